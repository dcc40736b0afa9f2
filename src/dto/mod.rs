use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyRequest {
    /// Body of the email being replied to
    #[serde(default)]
    pub email_content: String,
    /// Desired tone of the reply, e.g. "Professional" or "Friendly"
    #[serde(default)]
    pub tone: Option<String>,
}

impl GenerateReplyRequest {
    pub fn new(email_content: impl Into<String>, tone: Option<&str>) -> Self {
        Self {
            email_content: email_content.into(),
            tone: tone.map(str::to_string),
        }
    }

    /// Tone with surrounding whitespace removed, `None` when absent or blank.
    pub fn tone(&self) -> Option<&str> {
        self.tone
            .as_deref()
            .map(str::trim)
            .filter(|tone| !tone.is_empty())
    }
}
