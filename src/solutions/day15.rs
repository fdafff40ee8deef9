use aoc_framework::parsing::parse_delimited;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 15: Rambunctious Recitation",
    parsed = StartingNumbers,
    part_one = Day15,
    part_two = Day15
)]
impl super::AdventOfCode2020<15> {}

/*
Input is a comma-separated list of starting numbers for the Elves' memory game. Players take turns
saying the starting numbers in order. After that, each turn considers the most recently spoken
number:

- If it was the first time it was spoken, say `0`.
- Otherwise, say how many turns apart it was spoken the last two times.
*/

#[derive(thiserror::Error, Debug)]
enum StartingNumbersError {
    #[error("expected at least one starting number")]
    Empty,
}

#[derive(Debug)]
struct StartingNumbers(Vec<u32>);

impl ParseData for StartingNumbers {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let numbers: Vec<u32> = parse_delimited(input.trim(), ',')?;
        if numbers.is_empty() {
            return Err(StartingNumbersError::Empty.into());
        }
        Ok(Self(numbers))
    }
}

/// Play the memory game and return the number spoken on turn `turns` (one based).
///
/// A spoken number is never larger than the turn count or the largest starting number, so the turn
/// each number was last spoken on fits in a table indexed by number. `0` marks unspoken numbers.
fn spoken_on_turn(starting: &[u32], turns: u32) -> u32 {
    if let Some(&number) = starting.get(turns as usize - 1) {
        return number;
    }

    let largest_start = starting.iter().copied().max().unwrap_or(0);
    let mut last_spoken = vec![0u32; turns.max(largest_start + 1) as usize];

    // every starting number but the last is recorded; the last is the pending number
    let (&first_pending, recorded) = starting
        .split_last()
        .expect("starting numbers should not be empty");
    for (turn, &number) in (1..).zip(recorded) {
        last_spoken[number as usize] = turn;
    }

    let mut pending = first_pending;
    let first_turn = u32::try_from(starting.len()).expect("starting numbers should fit u32 turns");
    for turn in first_turn..turns {
        let previous = std::mem::replace(&mut last_spoken[pending as usize], turn);
        pending = if previous == 0 { 0 } else { turn - previous };
    }
    pending
}

/*
For part 1, find the 2020th number spoken.
*/

struct Day15;

impl Solution<PartOne> for Day15 {
    type Input = StartingNumbers;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(spoken_on_turn(&input.0, 2020))
    }
}

/*
For part 2, find the 30000000th number spoken.
*/

impl Solution<PartTwo> for Day15 {
    type Input = StartingNumbers;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(spoken_on_turn(&input.0, 30_000_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "0,3,6\n";

    #[test]
    fn speaks_example_sequence() {
        let spoken: Vec<_> = (1..=10).map(|turn| spoken_on_turn(&[0, 3, 6], turn)).collect();
        assert_eq!(spoken, vec![0, 3, 6, 0, 3, 3, 1, 0, 4, 0]);
    }

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        let parsed = StartingNumbers::parse(EXAMPLE_INPUT)?;
        assert_eq!(<Day15 as Solution<PartOne>>::solve(&parsed)?, 436);

        assert_eq!(spoken_on_turn(&[1, 3, 2], 2020), 1);
        assert_eq!(spoken_on_turn(&[2, 1, 3], 2020), 10);
        assert_eq!(spoken_on_turn(&[3, 1, 2], 2020), 1836);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = StartingNumbers::parse(EXAMPLE_INPUT)?;
        let result = <Day15 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 175_594);
        Ok(())
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(StartingNumbers::parse("\n").is_err());
    }
}
