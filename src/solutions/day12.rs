use std::str::FromStr;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicError, DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point2, Vector2};

#[solution_runner(
    name = "Day 12: Rain Risk",
    parsed = NavigationInstructions,
    part_one = Day12,
    part_two = Day12
)]
impl super::AdventOfCode2020<12> {}

/*
Input is a list of navigation instructions for a ferry, one per line. Each is an action letter and a
value:

- `N`, `S`, `E`, `W` move north, south, east, or west by the value.
- `L`, `R` turn left or right by the value in degrees.
- `F` moves forward by the value.

Positions use x for east and y for north.
*/

#[derive(Debug, Clone, Copy)]
enum Action {
    /// Move in a compass direction by a distance.
    Move(Vector2<i32>),
    /// Turn counterclockwise by a number of quarter turns, 0 to 3.
    Turn(u8),
    Forward(i32),
}

#[derive(thiserror::Error, Debug)]
enum ParseActionError {
    #[error("expected an action letter followed by a value")]
    MissingValue,

    #[error("unknown action {0:?}")]
    UnknownAction(char),

    #[error("turns must be a multiple of 90 degrees, found {0}")]
    UnalignedTurn(i32),
}

impl FromStr for Action {
    type Err = DynamicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseActionError::MissingValue)?;
        let value_str = chars.as_str();
        if value_str.is_empty() {
            return Err(ParseActionError::MissingValue.into());
        }
        let value = parse_with_context::<i32>(value_str)?;

        let quarter_turns = |degrees: i32| -> Result<u8, ParseActionError> {
            if degrees % 90 != 0 {
                return Err(ParseActionError::UnalignedTurn(degrees));
            }
            let turns = (degrees / 90).rem_euclid(4);
            Ok(u8::try_from(turns).expect("turns modulo 4 should fit u8"))
        };

        let action = match letter {
            'N' => Self::Move(Vector2::new(0, value)),
            'S' => Self::Move(Vector2::new(0, -value)),
            'E' => Self::Move(Vector2::new(value, 0)),
            'W' => Self::Move(Vector2::new(-value, 0)),
            'L' => Self::Turn(quarter_turns(value)?),
            'R' => Self::Turn(quarter_turns(-value)?),
            'F' => Self::Forward(value),
            other => return Err(ParseActionError::UnknownAction(other).into()),
        };
        Ok(action)
    }
}

/// Rotate a vector counterclockwise about the origin by some quarter turns.
fn rotate(vector: Vector2<i32>, quarter_turns: u8) -> Vector2<i32> {
    (0..quarter_turns).fold(vector, |rotated, _| Vector2::new(-rotated.y, rotated.x))
}

struct NavigationInstructions(Vec<Action>);

impl ParseData for NavigationInstructions {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let actions = parse_input_lines(input, |_, line| line.trim().parse::<Action>())
            .collect::<Result<_, _>>()?;
        Ok(Self(actions))
    }
}

fn manhattan_distance(position: Point2<i32>) -> u32 {
    position.x.unsigned_abs() + position.y.unsigned_abs()
}

/*
For part 1, the ship starts facing east. Actions move or turn the ship directly. Find the Manhattan
distance between the final position and the starting position.
*/

struct Day12;

impl Solution<PartOne> for Day12 {
    type Input = NavigationInstructions;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut ship = Point2::origin();
        let mut heading = Vector2::new(1, 0);

        for &action in &input.0 {
            match action {
                Action::Move(offset) => ship += offset,
                Action::Turn(quarter_turns) => heading = rotate(heading, quarter_turns),
                Action::Forward(distance) => ship += heading * distance,
            }
        }
        tracing::debug!(x = ship.x, y = ship.y, "ship stopped");
        Ok(manhattan_distance(ship))
    }
}

/*
For part 2, most actions move a waypoint instead, which starts 10 east and 1 north relative to the
ship. Turns rotate the waypoint around the ship, and `F` moves the ship to the waypoint a number of
times equal to the value.
*/

impl Solution<PartTwo> for Day12 {
    type Input = NavigationInstructions;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut ship = Point2::origin();
        let mut waypoint = Vector2::new(10, 1);

        for &action in &input.0 {
            match action {
                Action::Move(offset) => waypoint += offset,
                Action::Turn(quarter_turns) => waypoint = rotate(waypoint, quarter_turns),
                Action::Forward(times) => ship += waypoint * times,
            }
        }
        tracing::debug!(x = ship.x, y = ship.y, "ship stopped");
        Ok(manhattan_distance(ship))
    }
}
