//! Framework of traits and utilities for Advent of Code.
//!
//! A day is split into a parse step and one solve step per part. Parsing produces a value the
//! parts share by reference, so the input text is only processed once per run.
//!
//! # Quick Start
//!
//! 1. Define the parsed input and implement [`ParseData`]:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData};
//! #
//! struct ExpenseReport(Vec<u32>);
//!
//! impl ParseData for ExpenseReport {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let entries = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(entries))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Solution`] for each part:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//! #
//! # struct ExpenseReport(Vec<u32>);
//! # impl ParseData for ExpenseReport {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(str::parse).collect::<Result<_, _>>()?))
//! #     }
//! # }
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = ExpenseReport;
//!     type Output = u32;
//!
//!     fn solve(input: &Self::Input) -> DynamicResult<u32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Day01 {
//!     type Input = ExpenseReport;
//!     type Output = usize;
//!
//!     fn solve(input: &Self::Input) -> DynamicResult<usize> {
//!         Ok(input.0.len())
//!     }
//! }
//! ```
//!
//! 3. Use the [`runner`] module to execute the day.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod private {
    /// Sealing trait so [`Part`](super::Part) can only be implemented by the markers in this crate.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution for one [`Part`] of a day.
///
/// A day usually implements this twice on the same struct, once for [`PartOne`] and once for
/// [`PartTwo`].
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// The answer type, printed once solved.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// Input the solution can't make sense of, or a puzzle without an answer, is reported as a
    /// dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Solutions can be passed parsed data constructed through this trait by setting
/// [`Solution::Input`] to the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
