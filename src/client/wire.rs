//! Gemini `generateContent` request and response bodies.

use serde::{Deserialize, Serialize};

use crate::error::ReplyError;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a raw response body.
pub fn extract_reply(raw: &str) -> Result<String, ReplyError> {
    let response: GenerateContentResponse = serde_json::from_str(raw)
        .map_err(|e| ReplyError::ResponseParse(format!("invalid response body: {e}")))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map_or_else(
                || "response contained no candidates".to_string(),
                |reason| format!("prompt was blocked: {reason}"),
            );
        return Err(ReplyError::ResponseParse(reason));
    };

    let finish_reason = candidate.finish_reason.unwrap_or_default();
    let missing = |what: &str| {
        if finish_reason.is_empty() {
            ReplyError::ResponseParse(format!("first candidate has no {what}"))
        } else {
            ReplyError::ResponseParse(format!(
                "first candidate has no {what} (finish reason: {finish_reason})"
            ))
        }
    };

    candidate
        .content
        .ok_or_else(|| missing("content"))?
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| missing("parts"))?
        .text
        .ok_or_else(|| missing("text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(raw: &str) -> String {
        match extract_reply(raw) {
            Err(ReplyError::ResponseParse(message)) => message,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn serializes_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hi, sure thing. Best regards,"}]}}]}"#;
        assert_eq!(extract_reply(raw).unwrap(), "Hi, sure thing. Best regards,");
    }

    #[test]
    fn ignores_extra_fields_and_later_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "first"}, {"text": "second"}]},
                "finishReason": "STOP",
                "avgLogprobs": -0.2
            }],
            "usageMetadata": {"promptTokenCount": 10},
            "modelVersion": "gemini-2.0-flash"
        }"#;
        assert_eq!(extract_reply(raw).unwrap(), "first");
    }

    #[test]
    fn empty_object_is_an_error() {
        assert_eq!(parse_error("{}"), "response contained no candidates");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_error("not json").starts_with("invalid response body"));
    }

    #[test]
    fn empty_parts_is_an_error() {
        let message = parse_error(r#"{"candidates":[{"content":{"parts":[]}}]}"#);
        assert_eq!(message, "first candidate has no parts");
    }

    #[test]
    fn missing_content_reports_finish_reason() {
        let message = parse_error(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert_eq!(message, "first candidate has no content (finish reason: SAFETY)");
    }

    #[test]
    fn non_string_text_is_an_error() {
        assert!(
            parse_error(r#"{"candidates":[{"content":{"parts":[{"text":5}]}}]}"#)
                .starts_with("invalid response body")
        );
    }

    #[test]
    fn blocked_prompt_names_reason() {
        let message = parse_error(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(message, "prompt was blocked: SAFETY");
    }
}
