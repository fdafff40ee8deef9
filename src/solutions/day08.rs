use std::str::FromStr;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicError, DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 8: Handheld Halting",
    parsed = Program,
    part_one = Day08,
    part_two = Day08
)]
impl super::AdventOfCode2020<8> {}

/*
Input is the boot code of a handheld game console, one instruction per line. An instruction is an
operation (`acc`, `jmp`, or `nop`) and a signed argument, like `jmp -4` or `acc +7`.

- `acc` adds the argument to the accumulator, then moves to the next instruction.
- `jmp` jumps by the argument relative to itself.
- `nop` does nothing and moves to the next instruction.

The accumulator starts at 0, and execution starts at the first instruction.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Accumulate(i32),
    Jump(i32),
    NoOperation(i32),
}

#[derive(thiserror::Error, Debug)]
enum ParseInstructionError {
    #[error("expected \"[operation] [argument]\", found {0:?}")]
    MissingArgument(String),

    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
}

impl FromStr for Instruction {
    type Err = DynamicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (operation, argument) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| ParseInstructionError::MissingArgument(s.to_owned()))?;
        let argument = parse_with_context::<i32>(argument.trim())?;

        match operation {
            "acc" => Ok(Self::Accumulate(argument)),
            "jmp" => Ok(Self::Jump(argument)),
            "nop" => Ok(Self::NoOperation(argument)),
            other => Err(ParseInstructionError::UnknownOperation(other.to_owned()).into()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum Day08Error {
    #[error("instruction {index} jumps before the start of the program")]
    JumpBeforeStart { index: usize },

    #[error("accumulator overflowed at instruction {index}")]
    AccumulatorOverflow { index: usize },

    #[error("no single jmp/nop swap makes the program terminate")]
    NoRepair,
}

/// How a run of the program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The instruction pointer moved past the last instruction.
    Terminated { accumulator: i32 },
    /// An instruction was about to run a second time.
    Looped { accumulator: i32 },
}

#[derive(Debug)]
struct Program(Vec<Instruction>);

impl ParseData for Program {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let instructions = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            if line.trim().is_empty() {
                return Ok(None);
            }
            line.parse::<Instruction>().map(Some)
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
        Ok(Self(instructions))
    }
}

impl Program {
    /// Execute the program until it terminates or an instruction would run twice.
    ///
    /// `swapped` names an instruction index to run with `jmp` and `nop` exchanged.
    fn run(&self, swapped: Option<usize>) -> Result<Outcome, Day08Error> {
        let mut visited = vec![false; self.0.len()];
        let mut accumulator: i32 = 0;
        let mut pointer = 0;

        while let Some(&instruction) = self.0.get(pointer) {
            if visited[pointer] {
                return Ok(Outcome::Looped { accumulator });
            }
            visited[pointer] = true;

            let instruction = match (instruction, swapped == Some(pointer)) {
                (Instruction::Jump(argument), true) => Instruction::NoOperation(argument),
                (Instruction::NoOperation(argument), true) => Instruction::Jump(argument),
                (instruction, _) => instruction,
            };

            let offset = match instruction {
                Instruction::Accumulate(argument) => {
                    accumulator = accumulator
                        .checked_add(argument)
                        .ok_or(Day08Error::AccumulatorOverflow { index: pointer })?;
                    1
                }
                Instruction::Jump(argument) => argument,
                Instruction::NoOperation(_) => 1,
            };

            pointer = pointer
                .checked_add_signed(isize::try_from(offset).expect("i32 offset should fit isize"))
                .ok_or(Day08Error::JumpBeforeStart { index: pointer })?;
        }

        Ok(Outcome::Terminated { accumulator })
    }
}

/*
For part 1, the program loops forever. Find the accumulator value right before any instruction runs a
second time.
*/

struct Day08;

impl Solution<PartOne> for Day08 {
    type Input = Program;
    type Output = i32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        match input.run(None)? {
            Outcome::Looped { accumulator } | Outcome::Terminated { accumulator } => {
                Ok(accumulator)
            }
        }
    }
}

/*
For part 2, exactly one `jmp` is corrupted into a `nop` or one `nop` into a `jmp`. Repair it so the
program terminates, and find the accumulator value after it does.
*/

impl Solution<PartTwo> for Day08 {
    type Input = Program;
    type Output = i32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        for (index, instruction) in input.0.iter().enumerate() {
            if matches!(instruction, Instruction::Accumulate(_)) {
                continue;
            }
            // a swap that jumps out of bounds backwards just isn't the repair
            if let Ok(Outcome::Terminated { accumulator }) = input.run(Some(index)) {
                tracing::debug!(index, ?instruction, "repaired instruction");
                return Ok(accumulator);
            }
        }
        Err(Day08Error::NoRepair.into())
    }
}
