use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 13: Shuttle Search",
    parsed = BusNotes,
    part_one = Day13,
    part_two = Day13
)]
impl super::AdventOfCode2020<13> {}

/*
Input is two lines of notes: the earliest timestamp you could depart on a bus, then a
comma-separated list of bus IDs in service. Buses marked `x` are out of service.

Each bus departs at timestamp 0 and every time its ID passes again.
*/

#[derive(thiserror::Error, Debug)]
enum ParseBusNotesError {
    #[error("expected a line with the earliest departure timestamp")]
    MissingTimestamp,

    #[error("expected a line with the bus schedule")]
    MissingSchedule,

    #[error("bus ID must be positive")]
    ZeroBusId,

    #[error("no buses are in service")]
    NoBuses,
}

#[derive(thiserror::Error, Debug)]
enum Day13Error {
    #[error("bus {id} never departs {offset} minutes after the buses before it")]
    NoAlignment { id: u64, offset: u64 },

    #[error("timestamp overflowed")]
    Overflow,
}

/// A bus in service and its position in the schedule list.
#[derive(Debug, Clone, Copy)]
struct Bus {
    id: u64,
    offset: u64,
}

#[derive(Debug)]
struct BusNotes {
    earliest: u64,
    buses: Vec<Bus>,
}

impl ParseData for BusNotes {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let earliest = scanner
            .next_item(|_, line| parse_with_context::<u64>(line.trim()))?
            .ok_or(ParseBusNotesError::MissingTimestamp)?;

        let buses = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                let mut buses = Vec::new();
                for (offset, entry) in (0..).zip(line.trim().split(',')) {
                    let entry = entry.trim();
                    if entry == "x" {
                        continue;
                    }
                    let id = parse_with_context::<u64>(entry)?;
                    if id == 0 {
                        return Err(ParseBusNotesError::ZeroBusId.into());
                    }
                    buses.push(Bus { id, offset });
                }
                Ok(buses)
            })?
            .ok_or(ParseBusNotesError::MissingSchedule)?;

        if buses.is_empty() {
            return Err(ParseBusNotesError::NoBuses.into());
        }
        Ok(Self { earliest, buses })
    }
}

/*
For part 1, find the earliest bus you can take. Multiply its ID by the minutes you'd wait for it.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = BusNotes;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (wait, id) = input
            .buses
            .iter()
            .map(|bus| {
                let wait = (bus.id - input.earliest % bus.id) % bus.id;
                (wait, bus.id)
            })
            .min()
            .expect("notes should have at least one bus");
        tracing::debug!(id, wait, "earliest bus");
        Ok(id * wait)
    }
}

/*
For part 2, ignore the first line. Find the earliest timestamp where the first bus departs, and each
following bus departs as many minutes later as its position in the list.
*/

fn greatest_common_divisor(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Find the earliest timestamp `t` where `(t + offset) % id == 0` for every bus.
///
/// Buses are aligned one at a time, largest ID first. Once some buses are aligned, stepping by the
/// least common multiple of their IDs keeps them aligned while searching for the next bus.
fn earliest_aligned_timestamp(buses: &[Bus]) -> Result<u64, Day13Error> {
    let mut sorted = buses.to_vec();
    sorted.sort_unstable_by(|a, b| b.id.cmp(&a.id));

    let mut timestamp = 0;
    let mut step = 1;
    for bus in sorted {
        let departs = |timestamp: u64| {
            timestamp
                .checked_add(bus.offset)
                .map(|departure| departure % bus.id == 0)
                .ok_or(Day13Error::Overflow)
        };

        // the residue of `timestamp` modulo `bus.id` repeats within `bus.id` steps
        let mut attempts = 0;
        while !departs(timestamp)? {
            attempts += 1;
            if attempts >= bus.id {
                return Err(Day13Error::NoAlignment {
                    id: bus.id,
                    offset: bus.offset,
                });
            }
            timestamp = timestamp.checked_add(step).ok_or(Day13Error::Overflow)?;
        }

        step = (step / greatest_common_divisor(step, bus.id))
            .checked_mul(bus.id)
            .ok_or(Day13Error::Overflow)?;
        tracing::trace!(id = bus.id, timestamp, step, "aligned bus");
    }
    Ok(timestamp)
}

impl Solution<PartTwo> for Day13 {
    type Input = BusNotes;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(earliest_aligned_timestamp(&input.buses)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"939
7,13,x,x,59,x,31,19
";

    fn solve_schedule(schedule: &str) -> DynamicResult<u64> {
        let parsed = BusNotes::parse(&format!("0\n{schedule}\n"))?;
        <Day13 as Solution<PartTwo>>::solve(&parsed)
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = BusNotes::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 295);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = BusNotes::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 1_068_781);
        Ok(())
    }

    #[test]
    fn part_two_solves_other_schedules() -> DynamicResult<()> {
        assert_eq!(solve_schedule("17,x,13,19")?, 3417);
        assert_eq!(solve_schedule("67,7,59,61")?, 754_018);
        assert_eq!(solve_schedule("67,x,7,59,61")?, 779_210);
        assert_eq!(solve_schedule("67,7,x,59,61")?, 1_261_476);
        assert_eq!(solve_schedule("1789,37,47,1889")?, 1_202_161_486);
        Ok(())
    }

    #[test]
    fn impossible_alignment_is_an_error() {
        assert!(solve_schedule("4,2").is_err());
    }

    #[test]
    fn overflowing_departure_is_an_error() {
        let buses = [Bus {
            id: 3,
            offset: u64::MAX,
        }];
        assert!(matches!(
            earliest_aligned_timestamp(&buses),
            Err(Day13Error::Overflow)
        ));
    }
}
