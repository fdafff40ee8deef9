//! Solutions implemented for Advent of Code 2020.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`AdventOfCode2020<DAY>`] for its day as a [`SolutionRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`AdventOfCode2020<DAY>`] for a day, below `MATCH SOLUTIONS HERE`:
//!
//! ```ignore
//! // matching for day 1
//! 1 => AdventOfCode2020::<1>::run(input, handler, timed),
//! ```
//!
//! Solutions report answers only through the [`OutputHandler`]; diagnostics go through `tracing`.

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day with
/// [`#[solution_runner]`][aoc_framework::runner::solution_runner]:
///
/// ```ignore
/// // in a submodule "day06.rs"
/// #[solution_runner(name = "Day 6: Custom Customs", parsed = Groups, part_one = Day06, part_two = Day06)]
/// impl super::AdventOfCode2020<6> {}
/// ```
struct AdventOfCode2020<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    tracing::info!(day, "running solution");
    match day {
        // --- MATCH SOLUTIONS HERE ---
        1 => AdventOfCode2020::<1>::run(input, handler, timed),
        2 => AdventOfCode2020::<2>::run(input, handler, timed),
        3 => AdventOfCode2020::<3>::run(input, handler, timed),
        4 => AdventOfCode2020::<4>::run(input, handler, timed),
        5 => AdventOfCode2020::<5>::run(input, handler, timed),
        6 => AdventOfCode2020::<6>::run(input, handler, timed),
        7 => AdventOfCode2020::<7>::run(input, handler, timed),
        8 => AdventOfCode2020::<8>::run(input, handler, timed),
        9 => AdventOfCode2020::<9>::run(input, handler, timed),
        10 => AdventOfCode2020::<10>::run(input, handler, timed),
        11 => AdventOfCode2020::<11>::run(input, handler, timed),
        12 => AdventOfCode2020::<12>::run(input, handler, timed),
        13 => AdventOfCode2020::<13>::run(input, handler, timed),
        14 => AdventOfCode2020::<14>::run(input, handler, timed),
        15 => AdventOfCode2020::<15>::run(input, handler, timed),
        16 => AdventOfCode2020::<16>::run(input, handler, timed),
        17 => AdventOfCode2020::<17>::run(input, handler, timed),
        18 => AdventOfCode2020::<18>::run(input, handler, timed),
        19 => AdventOfCode2020::<19>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}
