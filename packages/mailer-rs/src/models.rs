use serde::{Deserialize, Serialize};

/// Request body accepted by the transactional email endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Acknowledgement returned after the provider accepts a message.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailResponse {
    #[serde(default)]
    pub id: Option<String>,
}
