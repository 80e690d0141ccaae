use serde::{Deserialize, Serialize};

use crate::persona::GenerationParams;

// Inference API Models
#[derive(Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParams,
}

#[derive(Deserialize, Debug)]
pub struct Generation {
    #[serde(default)]
    pub generated_text: Option<String>,
}

pub type InferenceResponse = Vec<Generation>;

// Chat API Models
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
}
