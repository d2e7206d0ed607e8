//! Size calculators: measuring text in user-chosen units.

pub mod defaults;
pub mod tokens;
pub mod traits;

pub use defaults::{ByteSizeCalculator, CharSizeCalculator, LineSizeCalculator, WordSizeCalculator};
pub use tokens::TokenSizeCalculator;
pub use traits::SizeCalculator;

use crate::error::{Error, Result};

/// The hard upper bound, in bytes, for a single block read from disk,
/// regardless of what a size calculator claims to handle.
pub const MAX_READ_BLOCK_SIZE: usize = 200_000;

/// The identifiers of all built-in size calculators.
pub const AVAILABLE_UNITS: [&str; 5] = ["bytes", "chars", "words", "lines", "tokens"];

/// Creates the size calculator with the given identifier.
///
/// # Errors
///
/// Returns [`Error::Config`] for unknown identifiers.
pub fn create_size_calculator(name: &str) -> Result<Box<dyn SizeCalculator>> {
    match name {
        "bytes" => Ok(Box::new(ByteSizeCalculator)),
        "chars" => Ok(Box::new(CharSizeCalculator)),
        "words" => Ok(Box::new(WordSizeCalculator)),
        "lines" => Ok(Box::new(LineSizeCalculator)),
        "tokens" => Ok(Box::new(TokenSizeCalculator)),
        _ => Err(Error::config(format!("unknown size unit '{name}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_all_calculators() {
        for name in AVAILABLE_UNITS {
            let calculator = create_size_calculator(name).unwrap();
            assert_eq!(calculator.name(), name);
        }
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        assert!(create_size_calculator("pages").is_err());
    }
}
