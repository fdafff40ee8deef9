use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use regex::Regex;

#[solution_runner(
    name = "Day 2: Password Philosophy",
    parsed = PasswordDatabase,
    part_one = Day02,
    part_two = Day02
)]
impl super::AdventOfCode2020<2> {}

#[derive(thiserror::Error, Debug)]
enum Day02Error {
    /// Line not formatted as a policy and password. Tuple contains the source line to report in
    /// the error message.
    #[error("expected pattern \"[n]-[m] [letter]: [password]\", found {0:?}")]
    NotPolicyAndPassword(String),
}

/*
Input is a corrupted password database. Each line holds a password policy and a password, like
`1-3 a: abcde`. The policy is two numbers and a letter; what the numbers mean differs per part.
*/

/// A password paired with the policy it was stored under.
#[derive(Debug)]
struct PasswordEntry {
    first: usize,
    second: usize,
    letter: char,
    password: String,
}

struct PasswordEntryParser {
    /// Regex for capturing the policy numbers, letter, and password.
    entry_re: Regex,
}

impl PasswordEntryParser {
    const ENTRY_PATTERN: &str = r"^(\d+)-(\d+) (\w): (.+)$";

    fn new() -> Self {
        let entry_re = Regex::new(Self::ENTRY_PATTERN).expect("pattern should be valid");
        Self { entry_re }
    }

    fn parse(&self, line: &str) -> DynamicResult<PasswordEntry> {
        let line = line.trim();
        let captures = self
            .entry_re
            .captures(line)
            .ok_or_else(|| Day02Error::NotPolicyAndPassword(line.to_owned()))?;

        let first = parse_with_context::<usize>(&captures[1])?;
        let second = parse_with_context::<usize>(&captures[2])?;
        let letter = captures[3]
            .chars()
            .next()
            .expect("letter capture group should match one character");
        let password = captures[4].to_owned();

        Ok(PasswordEntry {
            first,
            second,
            letter,
            password,
        })
    }
}

struct PasswordDatabase(Vec<PasswordEntry>);

impl ParseData for PasswordDatabase {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = PasswordEntryParser::new();
        let entries = parse_input_lines(input, |_, line| parser.parse(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(entries))
    }
}

impl PasswordDatabase {
    /// Count the entries whose password is valid under `policy`.
    fn count_valid(&self, policy: fn(&PasswordEntry) -> bool) -> usize {
        self.0
            .iter()
            .filter(|&entry| {
                let valid = policy(entry);
                tracing::debug!(password = %entry.password, valid, "classified password");
                valid
            })
            .count()
    }
}

/*
For part 1, the policy numbers are the minimum and maximum number of times the letter must appear
in the password. Count the valid passwords.
*/

impl PasswordEntry {
    fn is_valid_by_count(&self) -> bool {
        let occurrences = self.password.chars().filter(|&c| c == self.letter).count();
        (self.first..=self.second).contains(&occurrences)
    }
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = PasswordDatabase;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_valid(PasswordEntry::is_valid_by_count))
    }
}

/*
For part 2, the policy numbers are two one-based positions in the password. Exactly one of them
must hold the letter.
*/

impl PasswordEntry {
    /// Check if the character at a one-based position is the policy letter.
    ///
    /// Position `0` or a position past the end of the password never matches.
    fn letter_at(&self, position: usize) -> bool {
        position
            .checked_sub(1)
            .and_then(|index| self.password.chars().nth(index))
            .is_some_and(|c| c == self.letter)
    }

    fn is_valid_by_position(&self) -> bool {
        self.letter_at(self.first) ^ self.letter_at(self.second)
    }
}

impl Solution<PartTwo> for Day02 {
    type Input = PasswordDatabase;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_valid(PasswordEntry::is_valid_by_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"1-3 a: abcde
1-3 b: cdefg
2-9 c: ccccccccc
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = PasswordDatabase::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = PasswordDatabase::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 1);
        Ok(())
    }

    #[test]
    fn position_past_end_is_not_the_letter() -> DynamicResult<()> {
        let parsed = PasswordDatabase::parse("1-20 a: ab")?;
        assert_eq!(<Day02 as Solution<PartTwo>>::solve(&parsed)?, 1);
        Ok(())
    }

    #[test]
    fn malformed_line_is_rejected() {
        assert!(PasswordDatabase::parse("1-3 a abcde").is_err());
    }
}
