use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

#[solution_runner(
    name = "Day 11: Seating System",
    parsed = SeatLayout,
    part_one = Day11,
    part_two = Day11
)]
impl super::AdventOfCode2020<11> {}

/*
Input is the seat layout of a waiting area: `.` is floor, `L` an empty seat, and `#` an occupied
seat. People follow a set of rules applied to every seat simultaneously, until no seat changes.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Floor,
    Empty,
    Occupied,
}

/// An error converting [`char`] to [`Cell`].
#[derive(thiserror::Error, Debug)]
enum CellFromCharError {
    #[error("invalid character: {0:?}")]
    InvalidChar(char),
}

impl TryFrom<char> for Cell {
    type Error = CellFromCharError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Self::Floor),
            'L' => Ok(Self::Empty),
            '#' => Ok(Self::Occupied),
            _ => Err(CellFromCharError::InvalidChar(value)),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ParseSeatLayoutError {
    #[error("expected layout width to be {expected} across rows, but found row width {found}")]
    UnequalLayoutWidth { expected: usize, found: usize },

    #[error("layout has no cells")]
    EmptyLayout,
}

/// The waiting area, indexed by `(row, column)`.
#[derive(Debug, Clone)]
struct SeatLayout(DMatrix<Cell>);

impl ParseData for SeatLayout {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut expected_width = None;
        let rows: Vec<Vec<Cell>> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let row: Vec<_> = line
                .trim()
                .chars()
                .map(Cell::try_from)
                .collect::<Result<_, _>>()?;

            if let Some(width) = expected_width {
                if row.len() != width {
                    return Err(ParseSeatLayoutError::UnequalLayoutWidth {
                        expected: width,
                        found: row.len(),
                    }
                    .into());
                }
            } else {
                expected_width = Some(row.len());
            }
            Ok(row)
        })
        .collect::<Result<_, _>>()?;

        let width = expected_width.unwrap_or(0);
        if width == 0 {
            return Err(ParseSeatLayoutError::EmptyLayout.into());
        }
        let matrix = DMatrix::from_row_iterator(rows.len(), width, rows.into_iter().flatten());
        Ok(Self(matrix))
    }
}

/// Offsets of the 8 directions around a cell, as `(row, column)`.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which seats a person considers their neighbours.
#[derive(Debug, Clone, Copy)]
enum Neighbours {
    /// The 8 cells immediately around the seat.
    Adjacent,
    /// The first seat seen in each of the 8 directions, looking past floor.
    Visible,
}

/// Rules people follow to pick a seat.
#[derive(Debug, Clone, Copy)]
struct SeatingRules {
    neighbours: Neighbours,
    /// Occupied neighbour count at which an occupied seat becomes empty.
    tolerance: usize,
}

impl SeatLayout {
    fn step(position: (usize, usize), direction: (isize, isize)) -> Option<(usize, usize)> {
        Some((
            position.0.checked_add_signed(direction.0)?,
            position.1.checked_add_signed(direction.1)?,
        ))
    }

    /// Find the neighbouring seat of `position` in one direction, if any.
    fn neighbour_in(
        &self,
        position: (usize, usize),
        direction: (isize, isize),
        neighbours: Neighbours,
    ) -> Option<(usize, usize)> {
        let mut current = position;
        loop {
            current = Self::step(current, direction)?;
            match (self.0.get(current)?, neighbours) {
                (Cell::Floor, Neighbours::Visible) => {}
                (Cell::Floor, Neighbours::Adjacent) => return None,
                _ => return Some(current),
            }
        }
    }

    /// List the neighbouring seat positions of every seat. Floor has no neighbours.
    fn neighbour_map(&self, neighbours: Neighbours) -> DMatrix<Vec<(usize, usize)>> {
        DMatrix::from_fn(self.0.nrows(), self.0.ncols(), |row, column| {
            if self.0[(row, column)] == Cell::Floor {
                return Vec::new();
            }
            DIRECTIONS
                .iter()
                .filter_map(|&direction| self.neighbour_in((row, column), direction, neighbours))
                .collect()
        })
    }

    /// Apply `rules` until no seat changes, and return the stable layout.
    fn settle(&self, rules: SeatingRules) -> Self {
        let neighbour_map = self.neighbour_map(rules.neighbours);
        let mut layout = self.0.clone();
        let mut rounds = 0;

        loop {
            let mut changed = false;
            let next = DMatrix::from_fn(layout.nrows(), layout.ncols(), |row, column| {
                let cell = layout[(row, column)];
                let occupied = neighbour_map[(row, column)]
                    .iter()
                    .filter(|&&neighbour| layout[neighbour] == Cell::Occupied)
                    .count();
                let next_cell = match cell {
                    Cell::Empty if occupied == 0 => Cell::Occupied,
                    Cell::Occupied if occupied >= rules.tolerance => Cell::Empty,
                    other => other,
                };
                changed |= next_cell != cell;
                next_cell
            });
            layout = next;
            rounds += 1;

            if !changed {
                tracing::debug!(rounds, ?rules, "seating settled");
                return Self(layout);
            }
        }
    }

    fn occupied_seats(&self) -> usize {
        self.0.iter().filter(|&&cell| cell == Cell::Occupied).count()
    }
}

/*
For part 1, an empty seat with no occupied adjacent seats becomes occupied, and an occupied seat with
four or more occupied adjacent seats becomes empty. Count the occupied seats once the layout stops
changing.
*/

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = SeatLayout;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let rules = SeatingRules {
            neighbours: Neighbours::Adjacent,
            tolerance: 4,
        };
        Ok(input.settle(rules).occupied_seats())
    }
}

/*
For part 2, people consider the first seat they can see in each direction instead, and tolerate up to
four of those being occupied before leaving.
*/

impl Solution<PartTwo> for Day11 {
    type Input = SeatLayout;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let rules = SeatingRules {
            neighbours: Neighbours::Visible,
            tolerance: 5,
        };
        Ok(input.settle(rules).occupied_seats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = SeatLayout::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 37);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = SeatLayout::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 26);
        Ok(())
    }

    #[test]
    fn visible_seats_look_past_floor() -> DynamicResult<()> {
        let parsed = SeatLayout::parse(".......#.\n...#.....\n.#.......\n.........\n..#L....#\n....#....\n.........\n#........\n...#.....\n")?;
        let neighbours = parsed.neighbour_map(Neighbours::Visible);
        let occupied = neighbours[(4, 3)]
            .iter()
            .filter(|&&position| parsed.0[position] == Cell::Occupied)
            .count();
        assert_eq!(occupied, 8);
        Ok(())
    }

    #[test]
    fn unknown_character_is_rejected() {
        assert!(SeatLayout::parse("L.L\nL?L\n").is_err());
        assert!(SeatLayout::parse("L.L\nL.\n").is_err());
    }
}
