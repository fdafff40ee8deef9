//! Utility functions and errors for parsing input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// Parse a list of values split by a delimiter, like `"7,13,x,59"`.
///
/// Surrounding whitespace of each item is trimmed and empty items are skipped, so trailing
/// delimiters are tolerated.
///
/// # Errors
///
/// The first item that fails to parse is returned as a [`ParseContextError`].
pub fn parse_delimited<F>(string: &str, delimiter: char) -> Result<Vec<F>, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string
        .split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_with_context)
        .collect()
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    fn new(line_index: usize, source: impl Into<DynamicError>) -> Self {
        Self {
            line_index,
            source: source.into(),
        }
    }
}

/// Parse lines with a closure, mapping any line's error with an [`InvalidLine`].
///
/// # Arguments
/// - `input` - The input string to parse.
/// - `offset` - An offset to add to the line index passed to `parser` and reported by
///   [`InvalidLine`]. Useful when parsing a later slice of input and errors should have any
///   reported line index reflect the offset line position from the original input. Set to `0` if
///   no offset is needed.
/// - `parser` - A closure that takes the (offset) line index & line string and returns a result.
///
/// # Returns
///
/// An iterable of parsing results for each line.
pub fn parse_lines_with_offset<T, E, F>(
    input: &str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(index, line)| {
        let line_index = index.saturating_add(offset);
        parser(line_index, line).map_err(|source| InvalidLine::new(line_index, source))
    })
}

/// Parse every line of the input with a closure.
///
/// Shorthand for [`parse_lines_with_offset`] with an offset of `0`.
pub fn parse_input_lines<T, E, F>(
    input: &str,
    parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    parse_lines_with_offset(input, 0, parser)
}

/// A cursor over input lines, for inputs made of blocks separated by empty lines.
///
/// A *sequence* is a run of consecutive non-empty lines. A line is considered empty if it only
/// holds whitespace.
///
/// ```
/// # use aoc_framework::parsing::InputScanner;
/// # use aoc_framework::DynamicResult;
/// # fn main() -> DynamicResult<()> {
/// let mut scanner = InputScanner::new("abc\n\na\nb\n");
/// let first = scanner.collect_sequence(|_, line| -> DynamicResult<_> { Ok(line.len()) })?;
/// assert_eq!(first, vec![3]);
///
/// scanner.skip_empty();
/// let second = scanner.collect_sequence(|_, line| -> DynamicResult<_> { Ok(line.len()) })?;
/// assert_eq!(second, vec![1, 1]);
/// assert!(scanner.skip_empty().is_none());
/// # Ok(())
/// # }
/// ```
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    /// Create a scanner positioned at the first line of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    fn is_empty_line(line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Advance past any empty lines.
    ///
    /// # Returns
    ///
    /// The index of the next non-empty line, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<usize> {
        while let Some(&(index, line)) = self.lines.peek() {
            if !Self::is_empty_line(line) {
                return Some(index);
            }
            self.lines.next();
        }
        None
    }

    /// Parse the next line if it continues the current sequence.
    ///
    /// Nothing is consumed when the next line is empty or the input is exhausted.
    ///
    /// # Errors
    ///
    /// A parser error is wrapped in an [`InvalidLine`].
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        match self.lines.next_if(|&(_, line)| !Self::is_empty_line(line)) {
            Some((index, line)) => parser(index, line)
                .map(Some)
                .map_err(|source| InvalidLine::new(index, source)),
            None => Ok(None),
        }
    }

    /// Skip any empty lines, then parse the next line.
    ///
    /// # Errors
    ///
    /// A parser error is wrapped in an [`InvalidLine`].
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        self.skip_empty();
        self.next_in_sequence(parser)
    }

    /// Parse lines until an empty line or the end of input, collecting the results.
    ///
    /// The terminating empty line is not consumed.
    ///
    /// # Errors
    ///
    /// The first parser error is wrapped in an [`InvalidLine`] and returned.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, &str) -> Result<T, E>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }

    /// Collect every remaining sequence, each parsed as a whole by `parser`.
    ///
    /// The closure receives the lines of one block; blocks are separated by one or more empty
    /// lines.
    ///
    /// # Errors
    ///
    /// The first parser error is wrapped in an [`InvalidLine`] pointing at the block's first line.
    pub fn collect_blocks<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(&[&'a str]) -> Result<T, E>,
    {
        let mut blocks = Vec::new();
        while let Some(start_index) = self.skip_empty() {
            let mut lines = Vec::new();
            while let Some((_, line)) = self
                .lines
                .next_if(|&(_, line)| !Self::is_empty_line(line))
            {
                lines.push(line);
            }
            let block = parser(&lines).map_err(|source| InvalidLine::new(start_index, source))?;
            blocks.push(block);
        }
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;
    use crate::DynamicResult;

    #[test]
    fn parse_with_context_keeps_string() {
        let Err(error) = parse_with_context::<u8>("300") else {
            panic!("300 should not fit u8");
        };
        assert_eq!(error.to_string(), "failed to parse string: \"300\"");
    }

    #[test]
    fn parse_delimited_skips_empty_items() -> DynamicResult<()> {
        let values: Vec<u32> = parse_delimited(" 0, 3,6,", ',')?;
        assert_eq!(values, vec![0, 3, 6]);
        Ok(())
    }

    #[test]
    fn invalid_line_reports_one_based_line_with_offset() {
        let results: Vec<Result<u32, _>> =
            parse_lines_with_offset("1\nx", 10, |_, line| line.parse::<u32>()).collect();
        let Err(error) = &results[1] else {
            panic!("x should fail to parse");
        };
        assert_eq!(error.to_string(), "failure parsing line 12");
    }

    #[test]
    fn parse_input_lines_passes_line_index() -> DynamicResult<()> {
        let indexed = parse_input_lines("a\nb\nc", |index, line| -> Result<_, ParseIntError> {
            Ok((index, line.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(indexed[2], (2, "c".to_owned()));
        Ok(())
    }

    #[test]
    fn scanner_reads_header_then_sequence() -> DynamicResult<()> {
        let input = "939\n\n\nrules:\n1\n2\n\n3\n";
        let mut scanner = InputScanner::new(input);

        let first: Option<u32> = scanner.next_in_sequence(|_, line| line.parse::<u32>())?;
        assert_eq!(first, Some(939));
        assert_eq!(
            scanner.next_in_sequence(|_, line| line.parse::<u32>())?,
            None,
            "empty line should end a sequence"
        );

        let header = scanner.next_item(|index, line| -> DynamicResult<_> {
            Ok((index, line.to_owned()))
        })?;
        assert_eq!(header, Some((3, "rules:".to_owned())));

        let numbers: Vec<u32> = scanner.collect_sequence(|_, line| line.parse::<u32>())?;
        assert_eq!(numbers, vec![1, 2]);

        assert_eq!(scanner.skip_empty(), Some(7));
        let rest: Vec<u32> = scanner.collect_sequence(|_, line| line.parse::<u32>())?;
        assert_eq!(rest, vec![3]);
        assert_eq!(scanner.skip_empty(), None);
        Ok(())
    }

    #[test]
    fn scanner_collects_blocks() -> DynamicResult<()> {
        let mut scanner = InputScanner::new("abc\n\na\nb\nc\n\n\nab\nac\n");
        let sizes = scanner.collect_blocks(|lines| -> DynamicResult<_> { Ok(lines.len()) })?;
        assert_eq!(sizes, vec![1, 3, 2]);
        Ok(())
    }

    #[test]
    fn scanner_block_error_points_at_block_start() {
        let mut scanner = InputScanner::new("a\n\nb\nc");
        let result = scanner.collect_blocks(|lines| -> DynamicResult<()> {
            if lines.len() > 1 {
                return Err("too long".into());
            }
            Ok(())
        });
        let Err(error) = result else {
            panic!("second block should fail");
        };
        assert_eq!(error.to_string(), "failure parsing line 3");
    }
}
