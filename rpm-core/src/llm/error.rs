use crate::gemini::StreamingError;
use std::time::Duration;
use thiserror::Error;

/// Failure of one generation request, worded for the teacher using the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Missing or blank credential, detected before any network call
    #[error(
        "Kunci API Gemini tidak ditemukan. Harap konfigurasikan variabel lingkungan `{variable}` di pengaturan deployment Anda, lalu coba lagi."
    )]
    Configuration { variable: String },

    #[error(
        "Terjadi masalah saat berkomunikasi dengan layanan AI. Pastikan kunci API Anda valid. (Detail: {detail})"
    )]
    Service { detail: String },

    #[error("Layanan AI tidak merespons dalam {} detik ({operation}). Silakan coba lagi.", .duration.as_secs())]
    Timeout { operation: String, duration: Duration },
}

impl GenerationError {
    pub fn configuration(variable: impl Into<String>) -> Self {
        Self::Configuration {
            variable: variable.into(),
        }
    }

    pub fn service(detail: impl Into<String>) -> Self {
        Self::Service {
            detail: detail.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<StreamingError> for GenerationError {
    fn from(error: StreamingError) -> Self {
        match error {
            StreamingError::TimeoutError {
                operation,
                duration,
            } => Self::Timeout {
                operation,
                duration,
            },
            other => Self::service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_the_variable() {
        let message = GenerationError::configuration("API_KEY").to_string();
        assert!(message.starts_with("Kunci API Gemini tidak ditemukan."));
        assert!(message.contains("`API_KEY`"));
    }

    #[test]
    fn service_message_carries_cause() {
        let error = GenerationError::from(StreamingError::ApiError {
            status_code: 400,
            message: "API key not valid".into(),
        });
        assert!(!error.is_configuration());
        assert!(error.to_string().contains("(Detail: API error (400): API key not valid)"));
    }

    #[test]
    fn streaming_timeout_maps_to_timeout() {
        let error = GenerationError::from(StreamingError::TimeoutError {
            operation: "chunk".into(),
            duration: Duration::from_secs(60),
        });
        assert_eq!(
            error.to_string(),
            "Layanan AI tidak merespons dalam 60 detik (chunk). Silakan coba lagi."
        );
    }
}
