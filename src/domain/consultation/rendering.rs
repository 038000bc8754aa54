/// Opening marker placed before the model text.
pub const FENCE_OPEN: &str = "```markdown\n";

/// Closing marker placed after the model text.
pub const FENCE_CLOSE: &str = "\n```";

/// Wraps model output so it is rendered as a preformatted block.
pub fn fence_markdown(text: &str) -> String {
    let mut out = String::with_capacity(FENCE_OPEN.len() + text.len() + FENCE_CLOSE.len());
    out.push_str(FENCE_OPEN);
    out.push_str(text);
    out.push_str(FENCE_CLOSE);
    out
}
