// src/formatting/escape.rs
//! Markdown escaping for text embedded into the rendered document.

/// Backslash-escapes characters a markdown renderer would otherwise
/// interpret as structure: brackets, parentheses, emphasis and strike
/// markers, headers, pipes, backticks, and the backslash itself.
///
/// Applied to post titles only. Comment and post bodies are already
/// markdown as authored and are embedded verbatim.
pub fn escape_markdown(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        if matches!(
            c,
            '\\' | '[' | ']' | '(' | ')' | '*' | '_' | '~' | '#' | '|' | '`'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_structural_characters() {
        assert_eq!(escape_markdown("A [test] *post*"), "A \\[test\\] \\*post\\*");
        assert_eq!(escape_markdown("a_b~c#d|e`f"), "a\\_b\\~c\\#d\\|e\\`f");
        assert_eq!(escape_markdown("back\\slash"), "back\\\\slash");
        assert_eq!(escape_markdown("(parens)"), "\\(parens\\)");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_markdown("Hello World"), "Hello World");
        assert_eq!(escape_markdown(""), "");
    }
}
