use super::Content;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    pub prompt_feedback: Option<Value>,
    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<Value>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if any
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .map(|candidate| candidate.content.text())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}
