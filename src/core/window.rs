//! The sliding analysis window for syntax handlers.
//!
//! The window gives a handler a fixed amount of lookbehind and lookahead
//! around the current line, so local decisions (headings, underlines,
//! directive bodies) can be made with surrounding context while the document
//! itself is streamed and never fully held in memory.

use crate::core::Line;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// A fixed-size window of lines around the current analysis position.
///
/// The addressable span is `2 * window_size + 1` lines at offsets
/// `-window_size..=window_size`, where 0 is the current line. Positions
/// beyond either physical document boundary read as `None`.
///
/// # Examples
///
/// ```
/// use docsplit::core::{AnalysisWindow, Line};
///
/// let lines = (1..=6)
///     .map(|n| Some(Line::new(n, (n - 1) * 10, format!("line {n}"))))
///     .collect();
/// let window = AnalysisWindow::new(5, lines).unwrap();
/// assert_eq!(window.get(0).unwrap().text(), "line 1");
/// assert!(window.get(-1).is_none());
/// assert_eq!(window.get(1).unwrap().text(), "line 2");
/// ```
#[derive(Debug)]
pub struct AnalysisWindow {
    window_size: usize,
    /// Lines before the current one, nearest first.
    previous: VecDeque<Option<Line>>,
    current: Option<Line>,
    /// Lines after the current one, nearest first.
    next: VecDeque<Option<Line>>,
}

impl AnalysisWindow {
    /// Creates a new window seeded with the first lines of a document.
    ///
    /// # Arguments
    ///
    /// * `window_size` - How many lines before and after the current line
    ///   are addressable.
    /// * `lines` - The seed lines starting at the current line, at most
    ///   `window_size + 1` entries; `None` entries pad a short document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `window_size < 5`, the seed list is
    /// empty, or the seed list is longer than `window_size + 1`.
    pub fn new(window_size: usize, lines: Vec<Option<Line>>) -> Result<Self> {
        if window_size < 5 {
            return Err(Error::config("window size must be >= 5"));
        }
        if lines.is_empty() {
            return Err(Error::config("the seed line list must not be empty"));
        }
        if lines.len() > window_size + 1 {
            return Err(Error::config(format!(
                "the seed line list must have at most {} elements",
                window_size + 1
            )));
        }
        let mut iter = lines.into_iter();
        let current = iter.next().flatten();
        let mut next = VecDeque::with_capacity(window_size);
        for _ in 0..window_size {
            next.push_back(iter.next().flatten());
        }
        Ok(Self {
            window_size,
            previous: std::iter::repeat_with(|| None).take(window_size).collect(),
            current,
            next,
        })
    }

    /// The number of addressable lines before and after the current line.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the line at the given offset, 0 being the current line.
    ///
    /// Offsets past either physical boundary, and offsets outside
    /// `-window_size..=window_size`, read as `None`.
    #[must_use]
    pub fn get(&self, offset: isize) -> Option<&Line> {
        match offset {
            0 => self.current.as_ref(),
            _ if offset < 0 => {
                let index = usize::try_from(-offset).ok()?.checked_sub(1)?;
                self.previous.get(index)?.as_ref()
            }
            _ => {
                let index = usize::try_from(offset).ok()?.checked_sub(1)?;
                self.next.get(index)?.as_ref()
            }
        }
    }

    /// Mutable access to the line at the given offset.
    #[must_use]
    pub fn get_mut(&mut self, offset: isize) -> Option<&mut Line> {
        match offset {
            0 => self.current.as_mut(),
            _ if offset < 0 => {
                let index = usize::try_from(-offset).ok()?.checked_sub(1)?;
                self.previous.get_mut(index)?.as_mut()
            }
            _ => {
                let index = usize::try_from(offset).ok()?.checked_sub(1)?;
                self.next.get_mut(index)?.as_mut()
            }
        }
    }

    /// The current line, `None` once the end of the document is reached.
    #[must_use]
    pub const fn current(&self) -> Option<&Line> {
        self.current.as_ref()
    }

    /// The present lines at offsets `0..n`, stopping at the first gap.
    #[must_use]
    pub fn leading_lines(&self, n: usize) -> Vec<&Line> {
        let mut result = Vec::new();
        for offset in 0..n {
            let Ok(offset) = isize::try_from(offset) else {
                break;
            };
            match self.get(offset) {
                Some(line) => result.push(line),
                None => break,
            }
        }
        result
    }

    /// Iterates over the lookbehind slots, nearest line first.
    pub fn previous_lines(&self) -> impl Iterator<Item = Option<&Line>> {
        self.previous.iter().map(Option::as_ref)
    }

    /// Iterates over the lookahead slots, nearest line first.
    pub fn next_lines(&self) -> impl Iterator<Item = Option<&Line>> {
        self.next.iter().map(Option::as_ref)
    }

    /// Tests if the window reached the end of the document.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Tests if the line with the given number is anywhere in the window.
    #[must_use]
    pub fn contains_line(&self, line_number: usize) -> bool {
        self.line_position(line_number).is_some()
    }

    /// Mutable access to the line with the given number, wherever it sits
    /// in the window.
    #[must_use]
    pub fn line_mut(&mut self, line_number: usize) -> Option<&mut Line> {
        let offset = self.line_position(line_number)?;
        self.get_mut(offset)
    }

    fn line_position(&self, line_number: usize) -> Option<isize> {
        if let Some(current) = &self.current
            && current.line_number() == line_number
        {
            return Some(0);
        }
        for (index, slot) in self.previous.iter().enumerate() {
            if let Some(line) = slot
                && line.line_number() == line_number
            {
                return isize::try_from(index + 1).ok().map(|i| -i);
            }
        }
        for (index, slot) in self.next.iter().enumerate() {
            if let Some(line) = slot
                && line.line_number() == line_number
            {
                return isize::try_from(index + 1).ok();
            }
        }
        None
    }

    /// Pushes a new line into the window, shifting it by one position.
    ///
    /// Returns the line that falls out of the lookbehind side, if any. The
    /// caller finalizes the split location for that line.
    pub fn push_line(&mut self, line: Option<Line>) -> Option<Line> {
        let evicted = self.previous.pop_back().flatten();
        self.previous.push_front(self.current.take());
        self.current = self.next.pop_front().flatten();
        self.next.push_back(line);
        evicted
    }

    /// Drains the remaining buffered lines in chronological order.
    ///
    /// After this call the window is considered empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the window has not reached the
    /// end of the document yet.
    pub fn pop_remaining_lines(&mut self) -> Result<Vec<Line>> {
        if !self.is_at_end() {
            return Err(Error::invalid_state(
                "remaining lines may only be popped at the end of the document",
            ));
        }
        let result = self
            .previous
            .drain(..)
            .rev()
            .flatten()
            .collect();
        self.previous = std::iter::repeat_with(|| None)
            .take(self.window_size)
            .collect();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lines(count: usize) -> Vec<Option<Line>> {
        (1..=count)
            .map(|n| Some(Line::new(n, (n - 1) * 10, format!("line {n}"))))
            .collect()
    }

    #[test]
    fn test_rejects_small_window() {
        let result = AnalysisWindow::new(4, make_lines(3));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_empty_seed() {
        let result = AnalysisWindow::new(5, Vec::new());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_oversized_seed() {
        let result = AnalysisWindow::new(5, make_lines(7));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_initial_indexing() {
        let window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        assert_eq!(window.get(0).unwrap().text(), "line 1");
        assert_eq!(window.get(1).unwrap().text(), "line 2");
        assert_eq!(window.get(5).unwrap().text(), "line 6");
        assert!(window.get(-1).is_none());
        assert!(window.get(-5).is_none());
        assert!(window.get(6).is_none());
        assert!(window.get(-6).is_none());
    }

    #[test]
    fn test_short_seed_pads_with_none() {
        let window = AnalysisWindow::new(5, make_lines(2)).unwrap();
        assert_eq!(window.get(0).unwrap().text(), "line 1");
        assert_eq!(window.get(1).unwrap().text(), "line 2");
        assert!(window.get(2).is_none());
    }

    #[test]
    fn test_push_line_shifts_window() {
        let mut window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        let evicted = window.push_line(Some(Line::new(7, 60, "line 7".to_string())));
        assert!(evicted.is_none());
        assert_eq!(window.get(0).unwrap().text(), "line 2");
        assert_eq!(window.get(-1).unwrap().text(), "line 1");
        assert_eq!(window.get(5).unwrap().text(), "line 7");
    }

    #[test]
    fn test_push_line_evicts_after_window_fills() {
        let mut window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        let mut next_number = 7;
        let mut evicted = Vec::new();
        // Shift until line 1 falls out of the lookbehind side.
        for _ in 0..6 {
            let line = Line::new(next_number, (next_number - 1) * 10, format!("line {next_number}"));
            next_number += 1;
            if let Some(line) = window.push_line(Some(line)) {
                evicted.push(line.line_number());
            }
        }
        assert_eq!(evicted, vec![1]);
    }

    #[test]
    fn test_window_reports_end_at_correct_line() {
        let line_count = 8;
        let mut window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        let mut pushed = 7;
        while !window.is_at_end() {
            let line = if pushed <= line_count {
                let line = Line::new(pushed, (pushed - 1) * 10, format!("line {pushed}"));
                pushed += 1;
                Some(line)
            } else {
                None
            };
            window.push_line(line);
        }
        // All lines entered the window; the remaining ones are buffered.
        let remaining: Vec<usize> = window
            .pop_remaining_lines()
            .unwrap()
            .iter()
            .map(Line::line_number)
            .collect();
        assert_eq!(remaining, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_pop_remaining_requires_end() {
        let mut window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        assert!(window.pop_remaining_lines().is_err());
    }

    #[test]
    fn test_contains_and_line_mut() {
        let mut window = AnalysisWindow::new(5, make_lines(6)).unwrap();
        window.push_line(Some(Line::new(7, 60, "line 7".to_string())));
        assert!(window.contains_line(1));
        assert!(window.contains_line(2));
        assert!(window.contains_line(7));
        assert!(!window.contains_line(8));

        let line = window.line_mut(7).unwrap();
        line.split_level = Some(crate::core::SplitLevel::KEEP_LINES);
        assert_eq!(
            window.get(5).unwrap().split_level,
            Some(crate::core::SplitLevel::KEEP_LINES)
        );
    }

    #[test]
    fn test_leading_lines_stops_at_gap() {
        let window = AnalysisWindow::new(5, make_lines(2)).unwrap();
        let leading = window.leading_lines(3);
        assert_eq!(leading.len(), 2);
        assert_eq!(leading[0].text(), "line 1");
        assert_eq!(leading[1].text(), "line 2");
    }
}
