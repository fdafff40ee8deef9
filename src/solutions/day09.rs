use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 9: Encoding Error",
    parsed = XmasData,
    part_one = Day09,
    part_two = Day09
)]
impl super::AdventOfCode2020<9> {}

#[derive(thiserror::Error, Debug)]
enum Day09Error {
    #[error("every number after the preamble of {preamble} is valid")]
    NoInvalidNumber { preamble: usize },

    #[error("no contiguous range of at least two numbers sums to {0}")]
    NoWeakness(u64),
}

/*
Input is a stream of numbers in the XMAS encoding, one per line. After a preamble, every number
should be the sum of two numbers, with different values, among the immediately preceding preamble
length of numbers.
*/

/// Preamble length of the real data stream.
const PREAMBLE: usize = 25;

#[derive(Debug)]
struct XmasData(Vec<u64>);

impl ParseData for XmasData {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let numbers = parse_input_lines(input, |_, line| parse_with_context::<u64>(line.trim()))
            .collect::<Result<_, _>>()?;
        Ok(Self(numbers))
    }
}

/// Check if two numbers with different values in `window` sum to `target`.
fn is_pair_sum(window: &[u64], target: u64) -> bool {
    window.iter().enumerate().any(|(index, &first)| {
        window[index + 1..]
            .iter()
            .any(|&second| first != second && first.checked_add(second) == Some(target))
    })
}

/*
For part 1, find the first number after the preamble that isn't the sum of two of the previous
numbers in its window.
*/

/// Find the first number that isn't a pair sum of the `preamble` numbers before it.
fn first_invalid(numbers: &[u64], preamble: usize) -> Result<u64, Day09Error> {
    numbers
        .windows(preamble + 1)
        .find_map(|window| {
            let (&target, previous) = window.split_last().expect("window should not be empty");
            (!is_pair_sum(previous, target)).then_some(target)
        })
        .ok_or(Day09Error::NoInvalidNumber { preamble })
}

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = XmasData;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(first_invalid(&input.0, PREAMBLE)?)
    }
}

/*
For part 2, find a contiguous range of at least two numbers that sums to the invalid number from
part 1. The encryption weakness is the smallest plus the largest number in that range.
*/

/// Find the encryption weakness for the invalid number `target`.
///
/// Grows and shrinks a window over the stream, keeping its running sum.
fn encryption_weakness(numbers: &[u64], target: u64) -> Result<u64, Day09Error> {
    let mut start = 0;
    let mut sum = 0;

    for (end, &number) in numbers.iter().enumerate() {
        sum += number;
        while sum > target && start < end {
            sum -= numbers[start];
            start += 1;
        }

        if sum == target && end > start {
            let range = &numbers[start..=end];
            let min = range.iter().min().expect("range should not be empty");
            let max = range.iter().max().expect("range should not be empty");
            tracing::debug!(start, end, min, max, "found contiguous range");
            return Ok(min + max);
        }
    }

    Err(Day09Error::NoWeakness(target))
}

impl Solution<PartTwo> for Day09 {
    type Input = XmasData;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let target = first_invalid(&input.0, PREAMBLE)?;
        Ok(encryption_weakness(&input.0, target)?)
    }
}
