use std::collections::BTreeSet;

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 5: Binary Boarding",
    parsed = BoardingPasses,
    part_one = Day05,
    part_two = Day05
)]
impl super::AdventOfCode2020<5> {}

#[derive(thiserror::Error, Debug)]
enum Day05Error {
    #[error("expected 7 row letters (F/B) followed by 3 column letters (L/R), found {0:?}")]
    InvalidSeatCode(String),

    #[error("no boarding passes were scanned")]
    NoPasses,

    #[error("no free seat found between two taken seats")]
    NoFreeSeat,
}

/*
Input is a list of boarding passes. Each pass is a binary space partition of the plane: the first 7
letters pick the row (`F` front half, `B` back half) and the last 3 pick the column (`L` left half,
`R` right half).

A seat's ID is its row multiplied by 8, plus its column.
*/

const ROWS: u16 = 128;
const COLUMNS: u16 = 8;

/// Decode a seat code into its ID.
///
/// Halving front/left keeps the lower half, which is a `0` bit; back/right is a `1` bit. Reading the
/// whole code as one binary number gives `row * 8 + column` directly.
fn decode_seat_id(code: &str) -> Result<u16, Day05Error> {
    let invalid = || Day05Error::InvalidSeatCode(code.to_owned());
    if code.len() != 10 {
        return Err(invalid());
    }

    code.char_indices().try_fold(0, |id, (index, letter)| {
        let bit = match (index < 7, letter) {
            (true, 'F') | (false, 'L') => 0,
            (true, 'B') | (false, 'R') => 1,
            _ => return Err(invalid()),
        };
        Ok((id << 1) | bit)
    })
}

/// Seat IDs of all scanned boarding passes.
#[derive(Debug)]
struct BoardingPasses(BTreeSet<u16>);

impl ParseData for BoardingPasses {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let ids = parse_input_lines(input, |_, line| decode_seat_id(line.trim()))
            .collect::<Result<_, _>>()?;
        Ok(Self(ids))
    }
}

impl BoardingPasses {
    /// Draw the plane with `#` for taken seats and `.` for free ones, marking `highlight` with `~`.
    fn seat_map(&self, highlight: Option<u16>) -> String {
        (0..ROWS)
            .map(|row| {
                (0..COLUMNS)
                    .map(|column| {
                        let id = row * COLUMNS + column;
                        if highlight == Some(id) {
                            '~'
                        } else if self.0.contains(&id) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/*
For part 1, find the highest seat ID on a boarding pass.
*/

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = BoardingPasses;
    type Output = u16;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let highest = input.0.last().copied().ok_or(Day05Error::NoPasses)?;
        Ok(highest)
    }
}

/*
For part 2, find your seat. It's the only missing ID where the seats with IDs one lower and one
higher are both taken; seats at the very front and back don't exist on this plane.
*/

impl Solution<PartTwo> for Day05 {
    type Input = BoardingPasses;
    type Output = u16;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let ids: Vec<_> = input.0.iter().copied().collect();
        let seat = ids
            .windows(2)
            .find(|pair| pair[1] - pair[0] == 2)
            .map(|pair| pair[0] + 1)
            .ok_or(Day05Error::NoFreeSeat)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("seat map:\n{}", input.seat_map(Some(seat)));
        }
        Ok(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_example_seats() -> DynamicResult<()> {
        assert_eq!(decode_seat_id("FBFBBFFRLR")?, 44 * 8 + 5);
        assert_eq!(decode_seat_id("BFFFBBFRRR")?, 567);
        assert_eq!(decode_seat_id("FFFBBBFRRR")?, 119);
        assert_eq!(decode_seat_id("BBFFBBFRLL")?, 820);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = BoardingPasses::parse("FBFBBFFRLR\nBFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n")?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 820);
        Ok(())
    }

    #[test]
    fn part_two_finds_gap_between_taken_seats() -> DynamicResult<()> {
        // IDs 8, 9, 11, 12
        let parsed = BoardingPasses::parse("FFFFFFBLLL\nFFFFFFBLLR\nFFFFFFBLRR\nFFFFFFBRLL\n")?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 10);
        Ok(())
    }

    #[test]
    fn part_two_without_gap_is_an_error() -> DynamicResult<()> {
        // IDs 8, 9
        let parsed = BoardingPasses::parse("FFFFFFBLLL\nFFFFFFBLLR\n")?;
        let error = <Day05 as Solution<PartTwo>>::solve(&parsed)
            .expect_err("adjacent seats should leave no gap");
        assert!(matches!(
            error.downcast_ref::<Day05Error>(),
            Some(Day05Error::NoFreeSeat)
        ));
        Ok(())
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert!(decode_seat_id("FBFBBFFRL").is_err());
        assert!(decode_seat_id("FBFBBFRRLR").is_err());
        assert!(decode_seat_id("FBFBBFFRLB").is_err());
    }

    #[test]
    fn seat_map_marks_highlight() -> DynamicResult<()> {
        let parsed = BoardingPasses::parse("FFFFFFFLLL\nFFFFFFFLRL\n")?;
        let map = parsed.seat_map(Some(1));
        assert!(map.starts_with("#~#.....\n"));
        assert_eq!(map.lines().count(), 128);
        Ok(())
    }
}
