use aoc_framework::parsing::InputScanner;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 6: Custom Customs",
    parsed = Groups,
    part_one = Day06,
    part_two = Day06
)]
impl super::AdventOfCode2020<6> {}

#[derive(thiserror::Error, Debug)]
enum ParseGroupError {
    #[error("expected questions a-z, found {0:?}")]
    InvalidQuestion(char),
}

/*
Input is the customs declaration answers of groups, separated by blank lines. Each line of a group
lists the questions (`a` to `z`) one person answered "yes" to.
*/

/// Set of yes-answered questions, bit 0 for `a` through bit 25 for `z`.
#[derive(Debug, Clone, Copy)]
struct Answers(u32);

impl Answers {
    const ALL: Self = Self((1 << 26) - 1);

    fn parse(line: &str) -> Result<Self, ParseGroupError> {
        line.trim().chars().try_fold(Self(0), |answers, c| {
            if c.is_ascii_lowercase() {
                Ok(Self(answers.0 | (1 << (u32::from(c) - u32::from('a')))))
            } else {
                Err(ParseGroupError::InvalidQuestion(c))
            }
        })
    }

    fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Per-person answers of each group.
struct Groups(Vec<Vec<Answers>>);

impl ParseData for Groups {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let groups = InputScanner::new(input).collect_blocks(|lines| {
            lines
                .iter()
                .map(|line| Answers::parse(line))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(Self(groups))
    }
}

/*
For part 1, count the questions anyone in each group answered, and sum those counts.
*/

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = Groups;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .0
            .iter()
            .map(|group| {
                group
                    .iter()
                    .fold(Answers(0), |anyone, person| Answers(anyone.0 | person.0))
                    .count()
            })
            .sum();
        Ok(sum)
    }
}

/*
For part 2, count the questions everyone in each group answered instead.
*/

impl Solution<PartTwo> for Day06 {
    type Input = Groups;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .0
            .iter()
            .map(|group| {
                group
                    .iter()
                    .fold(Answers::ALL, |everyone, person| {
                        Answers(everyone.0 & person.0)
                    })
                    .count()
            })
            .sum();
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"abc

a
b
c

ab
ac

a
a
a
a

b
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Groups::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 11);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Groups::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn uppercase_answer_is_rejected() {
        assert!(Groups::parse("abc\n\naB\n").is_err());
    }
}
