//! Functions and traits for running solutions.
//!
//! Running a day emits events to an [`OutputHandler`]: the day's name, the end of the parse step,
//! then the start and answer of each part. Durations are measured only when asked for.
//!
//! # Quick Start
//!
//! Annotate a struct or impl-block with [`#[solution_runner]`][solution_runner]:
//!
//! ```
//! # use aoc_framework::runner::solution_runner;
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//! #
//! struct Groups(Vec<String>);
//!
//! impl ParseData for Groups {
//!     /* ... */
//! #    fn parse(input: &str) -> DynamicResult<Self> {
//! #        Ok(Self(input.split("\n\n").map(String::from).collect()))
//! #    }
//! }
//!
//! struct Day06;
//!
//! impl Solution<PartOne> for Day06 {
//!     type Input = Groups;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(input.0.len())
//! #    }
//! }
//!
//! impl Solution<PartTwo> for Day06 {
//!     type Input = Groups;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(input.0.iter().map(String::len).sum())
//! #    }
//! }
//!
//! #[solution_runner(name = "Day 6: Custom Customs", parsed = Groups, part_one = Day06, part_two = Day06)]
//! struct Day06Runner;
//!
//! // or
//!
//! #[solution_runner(name = "Day 6: Custom Customs", parsed = Groups, part_one = Day06, part_two = Day06)]
//! impl Day06 {}
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// A trait for an output events handler.
///
/// When a solution runs, the steps of running the solution leads to events to output through a
/// handler as feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`] to identify the part.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Evaluate `step`, measuring its duration only if `timed` is set.
///
/// Any side effect or move inside the closure is part of the measured time.
fn run_step<T>(timed: bool, step: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let result = step();
        (result, Some(start.elapsed()))
    } else {
        (step(), None)
    }
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    handler.part_start(part);
    let (result, duration_opt) = run_step(timed, || S::solve(input));
    let output = result?;
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = run_step(timed, || D::parse(input));
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// The input is parsed once and both parts borrow the parsed data.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)?;
    run_part::<S2, PartTwo>(&parsed, handler, timed)
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `handler` - The output handler to output events to.
    /// - `timed` - A flag to measure the time to process steps then output the elapsed times to the
    ///   handler.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records handler events as strings.
    #[derive(Default)]
    struct RecordingHandler(Vec<String>);

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.0
                .push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.0.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.0
                .push(format!("{part}: {output} timed={}", duration_opt.is_some()));
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct CountWords;

    impl Solution<PartOne> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Self::Input) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    impl Solution<PartTwo> for CountWords {
        type Input = Words;
        type Output = String;

        fn solve(input: &Self::Input) -> DynamicResult<String> {
            input.0.last().cloned().ok_or_else(|| "no words".into())
        }
    }

    #[test]
    fn parsed_full_solution_emits_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Words, CountWords, CountWords>(
            "Test",
            "abc def",
            &mut handler,
            true,
        )?;
        assert_eq!(
            handler.0,
            vec![
                "name Test",
                "parse start",
                "parse end timed=true",
                "start Part 1",
                "Part 1: 2 timed=true",
                "start Part 2",
                "Part 2: def timed=true",
            ]
        );
        Ok(())
    }

    #[test]
    fn failing_part_stops_run() {
        let mut handler = RecordingHandler::default();
        let result =
            solve_parsed_full_solution::<Words, CountWords, CountWords>("Test", "", &mut handler, false);
        assert!(result.is_err());
        assert_eq!(handler.0.last().map(String::as_str), Some("start Part 2"));
    }
}
