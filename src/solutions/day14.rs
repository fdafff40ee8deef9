use std::collections::HashMap;
use std::str::FromStr;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;

#[solution_runner(
    name = "Day 14: Docking Data",
    parsed = InitializationProgram,
    part_one = Day14,
    part_two = Day14
)]
impl super::AdventOfCode2020<14> {}

/*
Input is a ferry docking initialization program. Lines either update the bitmask, like
`mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X`, or write a value to memory, like `mem[8] = 11`.

Values and memory addresses are 36-bit unsigned integers. Masks list bits from most significant to
least significant.
*/

/// Width of values and addresses in bits.
const WORD_BITS: usize = 36;

/// A 36-bit mask, split into a bit set per mask character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Mask {
    /// Bits marked `1`.
    ones: u64,
    /// Bits marked `0`.
    zeros: u64,
    /// Bits marked `X`.
    floating: u64,
}

#[derive(thiserror::Error, Debug)]
enum ParseMaskError {
    #[error("expected 36 mask characters, found {0}")]
    InvalidLength(usize),

    #[error("invalid mask character: {0:?}")]
    InvalidChar(char),
}

impl FromStr for Mask {
    type Err = ParseMaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != WORD_BITS {
            return Err(ParseMaskError::InvalidLength(length));
        }

        s.chars().try_fold(Self::default(), |mask, c| {
            let shifted = Self {
                ones: mask.ones << 1,
                zeros: mask.zeros << 1,
                floating: mask.floating << 1,
            };
            match c {
                '1' => Ok(Self {
                    ones: shifted.ones | 1,
                    ..shifted
                }),
                '0' => Ok(Self {
                    zeros: shifted.zeros | 1,
                    ..shifted
                }),
                'X' => Ok(Self {
                    floating: shifted.floating | 1,
                    ..shifted
                }),
                other => Err(ParseMaskError::InvalidChar(other)),
            }
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

#[derive(thiserror::Error, Debug)]
enum ParseInstructionError {
    #[error("expected \"mask = [mask]\" or \"mem[address] = [value]\", found {0:?}")]
    Unrecognized(String),

    #[error("{0} does not fit in 36 bits")]
    WordOverflow(u64),

    #[error("memory is written before any mask is set")]
    WriteBeforeMask,
}

struct InstructionParser {
    write_re: Regex,
}

impl InstructionParser {
    const WRITE_PATTERN: &str = r"^mem\[(\d+)\] = (\d+)$";

    fn new() -> Self {
        let write_re = Regex::new(Self::WRITE_PATTERN).expect("pattern should be valid");
        Self { write_re }
    }

    fn parse_word(s: &str) -> DynamicResult<u64> {
        let word = parse_with_context::<u64>(s)?;
        if word >> WORD_BITS != 0 {
            return Err(ParseInstructionError::WordOverflow(word).into());
        }
        Ok(word)
    }

    fn parse(&self, line: &str) -> DynamicResult<Instruction> {
        let line = line.trim();
        if let Some(mask) = line.strip_prefix("mask = ") {
            return Ok(Instruction::SetMask(mask.parse()?));
        }

        let captures = self
            .write_re
            .captures(line)
            .ok_or_else(|| ParseInstructionError::Unrecognized(line.to_owned()))?;
        Ok(Instruction::Write {
            address: Self::parse_word(&captures[1])?,
            value: Self::parse_word(&captures[2])?,
        })
    }
}

struct InitializationProgram(Vec<Instruction>);

impl ParseData for InitializationProgram {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = InstructionParser::new();
        let instructions: Vec<_> = parse_input_lines(input, |_, line| parser.parse(line))
            .collect::<Result<_, _>>()?;

        if let Some(Instruction::Write { .. }) = instructions.first() {
            return Err(ParseInstructionError::WriteBeforeMask.into());
        }
        Ok(Self(instructions))
    }
}

impl InitializationProgram {
    /// Run the program with a decoder that maps a masked write to the memory updates it makes.
    fn run<F, I>(&self, mut decode: F) -> u64
    where
        F: FnMut(Mask, u64, u64) -> I,
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut memory: HashMap<u64, u64> = HashMap::new();
        let mut mask = Mask::default();

        for &instruction in &self.0 {
            match instruction {
                Instruction::SetMask(new_mask) => mask = new_mask,
                Instruction::Write { address, value } => {
                    memory.extend(decode(mask, address, value));
                }
            }
        }

        tracing::debug!(addresses = memory.len(), "initialization finished");
        memory
            .into_values()
            .checked_sum()
            .expect("sum of 36-bit values should not overflow")
    }
}

/*
For part 1, the mask applies to values: a `0` or `1` overwrites the value's bit, and an `X` leaves it
unchanged. Find the sum of all values left in memory.
*/

struct Day14;

impl Solution<PartOne> for Day14 {
    type Input = InitializationProgram;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input.run(|mask, address, value| {
            let masked = (value | mask.ones) & !mask.zeros;
            [(address, masked)]
        });
        Ok(sum)
    }
}

/*
For part 2, the mask applies to memory addresses instead:

- `0` leaves the address bit unchanged.
- `1` overwrites the address bit with 1.
- `X` is floating, taking both values.

A write goes to every address the floating bits can form.
*/

/// Iterate every subset of the bits in `bits`, including the empty and full set.
fn submasks(bits: u64) -> impl Iterator<Item = u64> {
    let mut next = Some(bits);
    std::iter::from_fn(move || {
        let current = next?;
        next = (current != 0).then(|| (current - 1) & bits);
        Some(current)
    })
}

impl Solution<PartTwo> for Day14 {
    type Input = InitializationProgram;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input.run(|mask, address, value| {
            let base = (address | mask.ones) & !mask.floating;
            submasks(mask.floating).map(move |floating| (base | floating, value))
        });
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
mem[8] = 11
mem[7] = 101
mem[8] = 0
";

    const EXAMPLE_FLOATING_INPUT: &str = r"mask = 000000000000000000000000000000X1001X
mem[42] = 100
mask = 00000000000000000000000000000000X0XX
mem[26] = 1
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = InitializationProgram::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 165);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = InitializationProgram::parse(EXAMPLE_FLOATING_INPUT)?;
        let result = <Day14 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 208);
        Ok(())
    }

    #[test]
    fn submasks_cover_every_combination() {
        let mut found: Vec<_> = submasks(0b1010).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0b0000, 0b0010, 0b1000, 0b1010]);
        assert_eq!(submasks(0).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn write_before_mask_is_rejected() {
        assert!(InitializationProgram::parse("mem[8] = 11\n").is_err());
        assert!(InitializationProgram::parse("mask = X1\n").is_err());
    }
}
