//! Sentence splitting
//!
//! Splits a paragraph after Chinese and ASCII terminal punctuation. The
//! terminator (and any closing quote right after it) stays with its sentence.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^。！？!?；;…\n]*[。！？!?；;…]+[”’」』）)]*|[^。！？!?；;…\n]+")
        .expect("sentence pattern is valid")
});

/// Split a paragraph into trimmed, non-empty sentences
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(paragraph)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_terminators() {
        let paragraph = "环境很好，位置独立性很强。点了比较经典的菜品，味道果然不错！烤乳鸽";
        assert_eq!(
            split_sentences(paragraph),
            vec![
                "环境很好，位置独立性很强。",
                "点了比较经典的菜品，味道果然不错！",
                "烤乳鸽"
            ]
        );
    }

    #[test]
    fn test_keeps_closing_quote() {
        assert_eq!(
            split_sentences("他说：“很好。”然后走了。"),
            vec!["他说：“很好。”", "然后走了。"]
        );
    }

    #[test]
    fn test_newlines_and_whitespace() {
        let paragraph = "  第一句\n\n  第二句？！ \nok!";
        assert_eq!(split_sentences(paragraph), vec!["第一句", "第二句？！", "ok!"]);
    }

    #[test]
    fn test_empty_paragraph() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\n ").is_empty());
    }
}
