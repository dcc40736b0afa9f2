pub mod prompt;

use crate::{
    client::{GeminiClient, wire::extract_reply},
    config::GeminiConfig,
    dto::GenerateReplyRequest,
    error::ReplyError,
};

#[derive(Clone)]
pub struct ReplyService {
    client: GeminiClient,
}

impl ReplyService {
    pub const fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &GeminiConfig) -> Result<Self, ReplyError> {
        GeminiClient::new(config).map(Self::new)
    }

    pub async fn generate_reply(&self, request: GenerateReplyRequest) -> Result<String, ReplyError> {
        validate(&request)?;

        let prompt = prompt::build_prompt(&request);
        tracing::info!(
            "Generating reply for {} byte email with tone {:?}",
            request.email_content.len(),
            request.tone()
        );

        let raw = self.client.generate(&prompt).await?;
        let reply = extract_reply(&raw)?;

        tracing::info!("Generated reply of {} bytes", reply.len());
        Ok(reply)
    }
}

fn validate(request: &GenerateReplyRequest) -> Result<(), ReplyError> {
    if request.email_content.trim().is_empty() {
        return Err(ReplyError::Validation(
            "emailContent must not be empty".to_string(),
        ));
    }
    Ok(())
}
