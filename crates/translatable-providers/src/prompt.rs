//! Prompt shared by the chat-based translators.

use translatable_core::error::TranslatableError;

/// System prompt asking for a bare translation into `target_language`.
pub(crate) fn system_prompt(target_language: &str) -> String {
    format!(
        "You are a professional translator. Translate the user's text into the language \
         with code \"{target_language}\".\n\
         Reply with the translation only: no quotes, notes, or explanations.\n\
         Preserve formatting, line breaks, markup, URLs, and placeholders such as {{name}} or %s.\n\
         If the text is already in the target language, return it unchanged."
    )
}

/// Trim a model reply, rejecting an empty one.
pub(crate) fn clean_reply(provider: &str, reply: Option<String>) -> Result<String, TranslatableError> {
    let text = reply.map(|r| r.trim().to_string()).unwrap_or_default();
    if text.is_empty() {
        return Err(TranslatableError::TranslationService(format!(
            "{provider}: empty translation"
        )));
    }
    Ok(text)
}
