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
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod checked_product;
mod solutions;

/// Advent of Code 2020 puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (e.g. 1, 2, etc).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,

    /// Log solution diagnostics to stderr; repeat for more detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Install a global log subscriber writing to stderr, so answers on stdout stay clean.
fn setup_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set log subscriber")
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8) -> Result<String> {
    let filename = format!("day{day:02}.txt");
    let path = PathBuf::from("inputs").join(filename);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        tracing::debug!("parsing input");
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(
        &mut self,
        _part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{output} ({formatted_duration})");
        } else {
            println!("{output}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(args.verbose)?;

    let input_str = args.input.map_or_else(
        || get_default_input(args.day),
        |input_file| get_input(&input_file),
    )?;
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(args.day, &input_str, &mut handler, args.timed).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context(format!("failed to run solution for day {}", args.day))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations_by_magnitude() {
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_millis(1500)),
            "1.500 seconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_micros(2250)),
            "2.250 milliseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(999)),
            "999 nanoseconds"
        );
    }

    #[test]
    fn filters_durations_below_minimum() {
        let handler = CliOutputHandler::new(Duration::from_millis(5));
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_millis(1))),
            None
        );
        assert!(
            handler
                .format_optional_duration_above_min(Some(Duration::from_millis(7)))
                .is_some()
        );
        assert_eq!(handler.format_optional_duration_above_min(None), None);
    }

    #[test]
    fn cli_rejects_day_out_of_range() {
        assert!(Cli::try_parse_from(["aoc", "26"]).is_err());
        assert!(Cli::try_parse_from(["aoc", "19", "-vv", "--timed"]).is_ok());
    }
}
