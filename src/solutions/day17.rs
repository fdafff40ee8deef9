use std::collections::{HashMap, HashSet};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point, SVector};

#[solution_runner(
    name = "Day 17: Conway Cubes",
    parsed = InitialSlice,
    part_one = Day17,
    part_two = Day17
)]
impl super::AdventOfCode2020<17> {}

/*
Input is a flat slice of an infinite grid of Conway Cubes: `#` for active cubes and `.` for inactive
ones. The slice's rows run along y and its columns along x, with every other coordinate at 0.

Each cycle, every cube changes simultaneously based on its neighbours, the cubes that differ by at
most 1 in every coordinate:

- An active cube stays active if exactly 2 or 3 neighbours are active.
- An inactive cube becomes active if exactly 3 neighbours are active.
*/

#[derive(thiserror::Error, Debug)]
enum ParseSliceError {
    #[error("invalid character in slice: {0:?}")]
    InvalidChar(char),

    #[error("slice is too large to index")]
    TooLarge,
}

/// Positions of active cubes in the initial slice, as `(x, y)`.
#[derive(Debug)]
struct InitialSlice(Vec<(i32, i32)>);

impl ParseData for InitialSlice {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rows = parse_input_lines(input, |y, line| -> Result<_, ParseSliceError> {
            let y = i32::try_from(y).map_err(|_| ParseSliceError::TooLarge)?;
            let mut active = Vec::new();
            for (x, c) in line.trim().chars().enumerate() {
                match c {
                    '#' => {
                        let x = i32::try_from(x).map_err(|_| ParseSliceError::TooLarge)?;
                        active.push((x, y));
                    }
                    '.' => {}
                    other => return Err(ParseSliceError::InvalidChar(other)),
                }
            }
            Ok(active)
        })
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(rows.into_iter().flatten().collect()))
    }
}

/// The cycles of the boot process.
const BOOT_CYCLES: usize = 6;

/// Active cubes of a pocket dimension with `D` coordinates.
struct PocketDimension<const D: usize> {
    active: HashSet<Point<i32, D>>,
    /// Offsets to every neighbour of a cube.
    neighbour_offsets: Vec<SVector<i32, D>>,
}

impl<const D: usize> PocketDimension<D> {
    fn new(slice: &InitialSlice) -> Self {
        let active = slice
            .0
            .iter()
            .map(|&(x, y)| {
                Point::from(SVector::<i32, D>::from_fn(|axis, _| match axis {
                    0 => x,
                    1 => y,
                    _ => 0,
                }))
            })
            .collect();

        // every combination of -1, 0, 1 per axis, read as base 3 digits, except no offset at all
        let combinations = 3usize.pow(u32::try_from(D).expect("dimension count should fit u32"));
        let neighbour_offsets = (0..combinations)
            .map(|combination| {
                let mut digits = combination;
                SVector::<i32, D>::from_fn(|_, _| {
                    let digit = digits % 3;
                    digits /= 3;
                    i32::try_from(digit).expect("base 3 digit should fit i32") - 1
                })
            })
            .filter(|offset| *offset != SVector::<i32, D>::zeros())
            .collect();

        Self {
            active,
            neighbour_offsets,
        }
    }

    fn cycle(&mut self) {
        let mut active_neighbours: HashMap<Point<i32, D>, usize> = HashMap::new();
        for cube in &self.active {
            for offset in &self.neighbour_offsets {
                *active_neighbours.entry(cube + offset).or_default() += 1;
            }
        }

        self.active = active_neighbours
            .into_iter()
            .filter(|(cube, count)| *count == 3 || (*count == 2 && self.active.contains(cube)))
            .map(|(cube, _)| cube)
            .collect();
    }

    /// Run the boot process and count the active cubes after it.
    fn boot(mut self) -> usize {
        for cycle in 1..=BOOT_CYCLES {
            self.cycle();
            tracing::debug!(dimensions = D, cycle, active = self.active.len(), "ran cycle");
        }
        self.active.len()
    }
}

/*
For part 1, simulate the boot process of six cycles in three dimensions, and count the active cubes.
*/

struct Day17;

impl Solution<PartOne> for Day17 {
    type Input = InitialSlice;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(PocketDimension::<3>::new(input).boot())
    }
}

/*
For part 2, the pocket dimension has four dimensions instead.
*/

impl Solution<PartTwo> for Day17 {
    type Input = InitialSlice;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(PocketDimension::<4>::new(input).boot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r".#.
..#
###
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = InitialSlice::parse(EXAMPLE_INPUT)?;
        let result = <Day17 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 112);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = InitialSlice::parse(EXAMPLE_INPUT)?;
        let result = <Day17 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 848);
        Ok(())
    }

    #[test]
    fn first_cycle_matches_example() -> DynamicResult<()> {
        let parsed = InitialSlice::parse(EXAMPLE_INPUT)?;
        let mut dimension = PocketDimension::<3>::new(&parsed);
        assert_eq!(dimension.neighbour_offsets.len(), 26);
        dimension.cycle();
        assert_eq!(dimension.active.len(), 11);
        Ok(())
    }
}
