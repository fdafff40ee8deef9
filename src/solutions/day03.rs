use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{DMatrix, Point2, Vector2};

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 3: Toboggan Trajectory",
    parsed = TreeMap,
    part_one = Day03,
    part_two = Day03
)]
impl super::AdventOfCode2020<3> {}

/*
Input is a map of open squares (`.`) and trees (`#`). The pattern repeats to the right as many times
as needed; the bottom row is the end of the slope.
*/

#[derive(thiserror::Error, Debug)]
enum ParseTreeMapError {
    #[error("expected map width to be {expected} across rows, but found row width {found}")]
    UnequalMapWidth { expected: usize, found: usize },

    #[error("invalid character in map: {0:?}")]
    InvalidChar(char),

    #[error("map has no squares")]
    EmptyMap,
}

/// Grid of squares holding a tree, indexed by `(row, column)`.
#[derive(Debug)]
struct TreeMap(DMatrix<bool>);

impl ParseData for TreeMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut expected_width = None;
        let rows: Vec<_> = parse_input_lines(input, |_, line| -> Result<_, ParseTreeMapError> {
            let row = line
                .trim()
                .chars()
                .map(|c| match c {
                    '.' => Ok(false),
                    '#' => Ok(true),
                    other => Err(ParseTreeMapError::InvalidChar(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(width) = expected_width {
                if row.len() != width {
                    return Err(ParseTreeMapError::UnequalMapWidth {
                        expected: width,
                        found: row.len(),
                    });
                }
            } else {
                expected_width = Some(row.len());
            }
            Ok(row)
        })
        .collect::<Result<_, _>>()?;

        let width = expected_width.unwrap_or(0);
        if width == 0 {
            return Err(ParseTreeMapError::EmptyMap.into());
        }

        let matrix = DMatrix::from_row_iterator(rows.len(), width, rows.into_iter().flatten());
        Ok(Self(matrix))
    }
}

impl TreeMap {
    /// Count trees hit going from the top-left square by `slope` (right, down) until passing the
    /// bottom row. The starting square isn't counted.
    fn trees_on_slope(&self, slope: Vector2<usize>) -> usize {
        let (height, width) = self.0.shape();
        let mut position = Point2::origin();
        let mut trees = 0;

        loop {
            position += slope;
            if position.y >= height {
                break;
            }
            // the map repeats to the right
            if self.0[(position.y, position.x % width)] {
                trees += 1;
            }
        }
        trees
    }
}

/*
For part 1, count the trees hit with a slope of right 3, down 1.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = TreeMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.trees_on_slope(Vector2::new(3, 1)))
    }
}

/*
For part 2, check several slopes and multiply the number of trees hit on each together.
*/

impl Solution<PartTwo> for Day03 {
    type Input = TreeMap;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

        let product = SLOPES
            .into_iter()
            .map(|(right, down)| {
                let trees = input.trees_on_slope(Vector2::new(right, down));
                tracing::debug!(right, down, trees, "counted trees on slope");
                u64::try_from(trees).expect("tree count should fit u64")
            })
            .checked_product()
            .ok_or("product of tree counts overflowed")?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = TreeMap::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 7);
        Ok(())
    }

    #[test]
    fn counts_each_example_slope() -> DynamicResult<()> {
        let parsed = TreeMap::parse(EXAMPLE_INPUT)?;
        let counts: Vec<_> = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)]
            .into_iter()
            .map(|(right, down)| parsed.trees_on_slope(Vector2::new(right, down)))
            .collect();
        assert_eq!(counts, vec![2, 7, 3, 4, 2]);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = TreeMap::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 336);
        Ok(())
    }

    #[test]
    fn uneven_rows_are_rejected() {
        assert!(TreeMap::parse("..#\n.#").is_err());
        assert!(TreeMap::parse("").is_err());
    }
}
