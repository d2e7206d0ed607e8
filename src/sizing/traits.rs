//! The size calculator abstraction.

/// A tool to measure text fragments in a chosen unit.
///
/// The splitter compares these sizes against its minimum and maximum
/// block sizes, so the unit only has to be consistent, not exact.
pub trait SizeCalculator {
    /// The identifier of this calculator, as used on the command line.
    fn name(&self) -> &'static str;

    /// A short name for the unit, e.g. "tokens".
    fn unit_name(&self) -> &'static str;

    /// Calculates the size of the given text fragment.
    fn size_for_text(&self, text: &str) -> usize;

    /// The maximum size of a block, in bytes, this calculator can process
    /// in memory at once.
    fn maximum_block_size(&self) -> usize {
        1_000_000
    }

    /// A recommended minimum fragment size in this unit.
    fn minimum_fragment_size_recommendation(&self) -> usize {
        0
    }

    /// A recommended maximum fragment size in this unit.
    fn maximum_fragment_size_recommendation(&self) -> usize {
        1000
    }
}
