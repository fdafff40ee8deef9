use std::cmp::Ordering;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 1: Report Repair",
    parsed = ExpenseReport,
    part_one = Day01,
    part_two = Day01
)]
impl super::AdventOfCode2020<1> {}

#[derive(thiserror::Error, Debug)]
enum Day01Error {
    #[error("no {count} entries sum to {target}")]
    NoEntriesWithSum { count: usize, target: Entry },
}

/*
Input is an expense report, one entry per line. The entries that sum to 2020 need to be found and
multiplied together.
*/

type Entry = u32;

/// The sum the expense report entries must add up to.
const TARGET_SUM: Entry = 2020;

/// Expense report entries, sorted ascending.
#[derive(Debug)]
struct ExpenseReport(Vec<Entry>);

impl ParseData for ExpenseReport {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut entries: Vec<Entry> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Ok(Some(parse_with_context::<Entry>(trimmed)?))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
        entries.sort_unstable();
        Ok(Self(entries))
    }
}

/// Find two entries at distinct positions of a sorted slice that add up to `target`.
///
/// Walks inward from both ends, so runs in linear time.
fn find_pair_with_sum(sorted: &[Entry], target: Entry) -> Option<(Entry, Entry)> {
    if sorted.len() < 2 {
        return None;
    }

    let mut low = 0;
    let mut high = sorted.len() - 1;
    while low < high {
        // an overflowing sum is past any target
        let order = sorted[low]
            .checked_add(sorted[high])
            .map_or(Ordering::Greater, |sum| sum.cmp(&target));
        match order {
            Ordering::Less => low += 1,
            Ordering::Greater => high -= 1,
            Ordering::Equal => return Some((sorted[low], sorted[high])),
        }
    }
    None
}

/*
For part 1, find the two entries that sum to 2020 and multiply them together.
*/

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = ExpenseReport;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (first, second) =
            find_pair_with_sum(&input.0, TARGET_SUM).ok_or(Day01Error::NoEntriesWithSum {
                count: 2,
                target: TARGET_SUM,
            })?;
        tracing::debug!(first, second, "found entry pair");

        let product = [first, second]
            .into_iter()
            .map(u64::from)
            .checked_product()
            .expect("product of two u32 should fit u64");
        Ok(product)
    }
}

/*
For part 2, find three entries that sum to 2020 instead.
*/

/// Find three entries at distinct positions of a sorted slice that add up to `target`.
fn find_triple_with_sum(sorted: &[Entry], target: Entry) -> Option<(Entry, Entry, Entry)> {
    sorted.iter().enumerate().find_map(|(index, &first)| {
        let remainder = target.checked_sub(first)?;
        find_pair_with_sum(&sorted[index + 1..], remainder)
            .map(|(second, third)| (first, second, third))
    })
}

impl Solution<PartTwo> for Day01 {
    type Input = ExpenseReport;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (first, second, third) =
            find_triple_with_sum(&input.0, TARGET_SUM).ok_or(Day01Error::NoEntriesWithSum {
                count: 3,
                target: TARGET_SUM,
            })?;
        tracing::debug!(first, second, third, "found entry triple");

        let product = [first, second, third]
            .into_iter()
            .map(u64::from)
            .checked_product()
            .ok_or("product of entries overflowed")?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"1721
979
366
299
675
1456
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = ExpenseReport::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 514_579);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = ExpenseReport::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 241_861_950);
        Ok(())
    }

    #[test]
    fn entry_is_not_paired_with_itself() -> DynamicResult<()> {
        let parsed = ExpenseReport::parse("1010\n5\n\n")?;
        assert!(<Day01 as Solution<PartOne>>::solve(&parsed).is_err());

        let parsed = ExpenseReport::parse("1010\n1010\n")?;
        assert_eq!(<Day01 as Solution<PartOne>>::solve(&parsed)?, 1_020_100);
        Ok(())
    }

    #[test]
    fn overflowing_sums_skip_the_larger_entry() -> DynamicResult<()> {
        let parsed = ExpenseReport::parse("1000\n1020\n4294967295\n")?;
        assert_eq!(<Day01 as Solution<PartOne>>::solve(&parsed)?, 1_020_000);
        Ok(())
    }
}
