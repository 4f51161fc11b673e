use std::sync::LazyLock;

use regex::Regex;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>|&.*?;").expect("Valid markup pattern"));

/// Remove HTML tags and character entities.
pub fn strip_html_tags(input: &str) -> String {
    MARKUP.replace_all(input, "").into_owned()
}

/// Plain-text preview of `content`, at most `max_chars` characters plus `...`.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let plain = strip_html_tags(content);
    let plain = plain.trim();

    match plain.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", plain[..cut].trim_end()),
        None => plain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(
            strip_html_tags("<p>Hello&nbsp;<b>world</b></p>"),
            "Helloworld"
        );
    }

    #[test]
    fn test_excerpt_short_content_is_untouched() {
        assert_eq!(excerpt("<p>short</p>", 10), "short");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
        assert_eq!(excerpt("abcdef", 6), "abcdef");
    }
}
