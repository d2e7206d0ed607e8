//! The basic size calculators: bytes, characters, words and lines.

use crate::sizing::SizeCalculator;

/// Measures the number of bytes of the UTF-8 encoded text.
#[derive(Debug, Default)]
pub struct ByteSizeCalculator;

impl SizeCalculator for ByteSizeCalculator {
    fn name(&self) -> &'static str {
        "bytes"
    }

    fn unit_name(&self) -> &'static str {
        "bytes"
    }

    fn size_for_text(&self, text: &str) -> usize {
        text.len()
    }
}

/// Measures the number of characters.
#[derive(Debug, Default)]
pub struct CharSizeCalculator;

impl SizeCalculator for CharSizeCalculator {
    fn name(&self) -> &'static str {
        "chars"
    }

    fn unit_name(&self) -> &'static str {
        "characters"
    }

    fn size_for_text(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Measures the number of whitespace-separated words.
#[derive(Debug, Default)]
pub struct WordSizeCalculator;

impl SizeCalculator for WordSizeCalculator {
    fn name(&self) -> &'static str {
        "words"
    }

    fn unit_name(&self) -> &'static str {
        "words"
    }

    fn size_for_text(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Measures the number of lines.
#[derive(Debug, Default)]
pub struct LineSizeCalculator;

impl SizeCalculator for LineSizeCalculator {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn unit_name(&self) -> &'static str {
        "lines"
    }

    fn size_for_text(&self, text: &str) -> usize {
        text.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("héllo", 6)]
    #[test_case("", 0)]
    fn test_byte_sizes(text: &str, size: usize) {
        assert_eq!(ByteSizeCalculator.size_for_text(text), size);
    }

    #[test_case("héllo", 5)]
    #[test_case("a b", 3)]
    fn test_char_sizes(text: &str, size: usize) {
        assert_eq!(CharSizeCalculator.size_for_text(text), size);
    }

    #[test_case("one two  three", 3)]
    #[test_case("  ", 0)]
    #[test_case("word", 1)]
    fn test_word_sizes(text: &str, size: usize) {
        assert_eq!(WordSizeCalculator.size_for_text(text), size);
    }

    #[test_case("a\nb\nc", 3)]
    #[test_case("a\nb\n", 2)]
    #[test_case("", 0)]
    fn test_line_sizes(text: &str, size: usize) {
        assert_eq!(LineSizeCalculator.size_for_text(text), size);
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(ByteSizeCalculator.maximum_block_size(), 1_000_000);
        assert_eq!(
            ByteSizeCalculator.minimum_fragment_size_recommendation(),
            0
        );
        assert_eq!(
            ByteSizeCalculator.maximum_fragment_size_recommendation(),
            1000
        );
    }
}
