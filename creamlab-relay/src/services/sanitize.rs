//! Cleanup of model output before JSON parsing.

const FENCE: &str = "```";

/// Remove a surrounding Markdown code fence, if any.
///
/// Text that does not start with a fence is returned untouched. Otherwise the
/// opening fence and its optional language tag are dropped, as is a closing
/// fence, and the remaining content is trimmed. Content may start on the
/// fence line itself.
pub fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.trim().strip_prefix(FENCE) else {
        return text;
    };

    // Language tag, e.g. `json`, then the whitespace that follows it.
    let body = rest
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim_start()
        .trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}
