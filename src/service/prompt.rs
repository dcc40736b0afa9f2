use crate::dto::GenerateReplyRequest;

const INSTRUCTIONS: &str = "Write ONLY the body of the reply email. \
Do not include any subject line, formatting instructions, or optional suggestions. \
The reply should start directly with a greeting like 'Hi,' and end with a closing like 'Best regards,'. \
Keep it simple and professional. ";

/// Builds the `generateContent` prompt for a reply.
///
/// The email content is appended verbatim after the instructions and the
/// optional tone directive.
pub fn build_prompt(request: &GenerateReplyRequest) -> String {
    let mut prompt = String::from(INSTRUCTIONS);

    if let Some(tone) = request.tone() {
        prompt.push_str("Use a ");
        prompt.push_str(tone);
        prompt.push_str(" tone. ");
    }

    prompt.push_str("\nOriginal email:\n");
    prompt.push_str(&request.email_content);
    prompt
}
