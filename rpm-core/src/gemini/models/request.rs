use super::{Content, Part};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    pub generation_config: Option<GenerationSettings>,
}

impl GenerateContentRequest {
    /// Single-turn request: one user prompt under a system instruction
    pub fn single_turn(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            system_instruction: Some(SystemInstruction::new(system_instruction)),
            generation_config: None,
        }
    }

    pub fn with_generation_config(mut self, settings: GenerationSettings) -> Self {
        self.generation_config = Some(settings);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_field_names() {
        let request = GenerateContentRequest::single_turn("persona", "prompt").with_generation_config(
            GenerationSettings {
                temperature: Some(0.5),
                max_output_tokens: None,
            },
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "persona");
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
        assert!(value["generationConfig"].get("maxOutputTokens").is_none());
    }
}
