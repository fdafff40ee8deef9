use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 10: Adapter Array",
    parsed = AdapterChain,
    part_one = Day10,
    part_two = Day10
)]
impl super::AdventOfCode2020<10> {}

#[derive(thiserror::Error, Debug)]
enum ParseAdapterChainError {
    #[error("adapter joltages step from {from} to {to}, but steps must be 1 to 3 jolts")]
    InvalidStep { from: u32, to: u32 },
}

/*
Input is the output joltage of each adapter in a bag, one per line. An adapter can take an input 1,
2, or 3 jolts lower than its rating. The charging outlet is 0 jolts, and the device's built-in adapter
is 3 higher than the highest adapter.
*/

/// The largest joltage difference an adapter tolerates.
const MAX_STEP: u32 = 3;

/// Joltages from the outlet through every adapter to the device, ascending.
#[derive(Debug)]
struct AdapterChain(Vec<u32>);

impl ParseData for AdapterChain {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut joltages: Vec<u32> =
            parse_input_lines(input, |_, line| parse_with_context::<u32>(line.trim()))
                .collect::<Result<_, _>>()?;
        joltages.push(0);
        joltages.sort_unstable();
        let device = joltages.last().copied().unwrap_or(0) + MAX_STEP;
        joltages.push(device);

        if let Some(pair) = joltages
            .windows(2)
            .find(|pair| !(1..=MAX_STEP).contains(&(pair[1] - pair[0])))
        {
            return Err(ParseAdapterChainError::InvalidStep {
                from: pair[0],
                to: pair[1],
            }
            .into());
        }
        Ok(Self(joltages))
    }
}

/*
For part 1, use every adapter. Count the 1-jolt and 3-jolt differences along the chain and multiply
the counts together.
*/

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = AdapterChain;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut differences = [0usize; MAX_STEP as usize + 1];
        for pair in input.0.windows(2) {
            differences[(pair[1] - pair[0]) as usize] += 1;
        }
        tracing::debug!(?differences, "counted joltage differences");
        Ok(differences[1] * differences[3])
    }
}

/*
For part 2, count the distinct arrangements of adapters that connect the outlet to the device.
*/

/// Count arrangements over a valid ascending chain.
///
/// The ways to reach each joltage are the sum of the ways to reach the joltages up to 3 below it.
fn count_arrangements(joltages: &[u32]) -> u64 {
    let mut ways = vec![0u64; joltages.len()];
    ways[0] = 1;
    for index in 1..joltages.len() {
        ways[index] = (0..index)
            .rev()
            .take_while(|&previous| joltages[index] - joltages[previous] <= MAX_STEP)
            .map(|previous| ways[previous])
            .checked_sum()
            .expect("arrangement count should not overflow");
    }
    ways.last().copied().unwrap_or(0)
}

impl Solution<PartTwo> for Day10 {
    type Input = AdapterChain;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(count_arrangements(&input.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"16
10
15
5
1
11
7
19
6
12
4
";

    const EXAMPLE_LARGER_INPUT: &str = r"28
33
18
42
31
14
46
20
48
47
24
23
49
45
19
38
39
11
1
32
25
35
8
17
7
9
4
2
34
10
3
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        let parsed = AdapterChain::parse(EXAMPLE_INPUT)?;
        assert_eq!(<Day10 as Solution<PartOne>>::solve(&parsed)?, 35);

        let parsed = AdapterChain::parse(EXAMPLE_LARGER_INPUT)?;
        assert_eq!(<Day10 as Solution<PartOne>>::solve(&parsed)?, 220);
        Ok(())
    }

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        let parsed = AdapterChain::parse(EXAMPLE_INPUT)?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 8);

        let parsed = AdapterChain::parse(EXAMPLE_LARGER_INPUT)?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 19_208);
        Ok(())
    }

    #[test]
    fn gap_too_large_is_rejected() {
        assert!(AdapterChain::parse("1\n5\n").is_err());
        assert!(AdapterChain::parse("1\n1\n").is_err());
    }
}
