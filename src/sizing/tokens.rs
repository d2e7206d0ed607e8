//! An approximate token size calculator for language models.
//!
//! A real tokenizer depends on the exact model; for splitting purposes an
//! estimate is good enough. The approximation follows the usual BPE
//! behavior: alphanumeric runs cost about one token per four characters,
//! every other non-whitespace segment costs one token.

use crate::sizing::SizeCalculator;
use unicode_segmentation::UnicodeSegmentation;

/// Estimates the number of language-model tokens in a text.
#[derive(Debug, Default)]
pub struct TokenSizeCalculator;

impl SizeCalculator for TokenSizeCalculator {
    fn name(&self) -> &'static str {
        "tokens"
    }

    fn unit_name(&self) -> &'static str {
        "tokens"
    }

    fn size_for_text(&self, text: &str) -> usize {
        let mut count = 0;
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            if segment.chars().any(char::is_alphanumeric) {
                count += segment.chars().count().div_ceil(4);
            } else {
                count += 1;
            }
        }
        count
    }

    fn maximum_block_size(&self) -> usize {
        100_000
    }

    fn minimum_fragment_size_recommendation(&self) -> usize {
        200
    }

    fn maximum_fragment_size_recommendation(&self) -> usize {
        2000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(TokenSizeCalculator.size_for_text(""), 0);
        assert_eq!(TokenSizeCalculator.size_for_text("   \n\t"), 0);
    }

    #[test]
    fn test_short_words_cost_one_token() {
        assert_eq!(TokenSizeCalculator.size_for_text("one two"), 2);
    }

    #[test]
    fn test_long_words_cost_more() {
        // 14 characters, one token per four characters rounded up.
        assert_eq!(TokenSizeCalculator.size_for_text("internationali"), 4);
    }

    #[test]
    fn test_punctuation_counts() {
        let size = TokenSizeCalculator.size_for_text("Hello, world!");
        // "Hello" + "," + "world" + "!"
        assert_eq!(size, 2 + 1 + 2 + 1);
    }

    #[test]
    fn test_size_grows_with_text() {
        let calculator = TokenSizeCalculator;
        let short = calculator.size_for_text("A sentence.");
        let long = calculator.size_for_text("A sentence. And quite a bit more text after it.");
        assert!(long > short);
    }

    #[test]
    fn test_limits() {
        assert_eq!(TokenSizeCalculator.maximum_block_size(), 100_000);
        assert_eq!(
            TokenSizeCalculator.minimum_fragment_size_recommendation(),
            200
        );
    }
}
