use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef, Reversed};
use regex::Regex;

#[solution_runner(
    name = "Day 7: Handy Haversacks",
    parsed = BagRules,
    part_one = Day07,
    part_two = Day07
)]
impl super::AdventOfCode2020<7> {}

/*
Input is a list of luggage rules, one per bag color, like:

    light red bags contain 1 bright white bag, 2 muted yellow bags.
    faded blue bags contain no other bags.
*/

/// The bag color the puzzle asks about.
const SHINY_GOLD: &str = "shiny gold";

#[derive(thiserror::Error, Debug)]
enum ParseBagRulesError {
    #[error("expected \"[color] bags contain [contents].\", found {0:?}")]
    NotRule(String),

    #[error("expected \"[count] [color] bag(s)\", found {0:?}")]
    NotContent(String),

    #[error("color {0:?} is defined by more than one rule")]
    DuplicateColor(String),

    #[error("rule for {container:?} refers to undefined color {color:?}")]
    UndefinedColor { container: String, color: String },

    #[error("bags contain each other in a loop")]
    CyclicRules,
}

#[derive(thiserror::Error, Debug)]
enum Day07Error {
    #[error("no rule for {0:?} bags")]
    MissingColor(&'static str),
}

/// A parsed rule line: the containing color and the count and color of each content.
struct RuleLine {
    container: String,
    contents: Vec<(u32, String)>,
}

struct RuleParser {
    content_re: Regex,
}

impl RuleParser {
    const CONTENT_PATTERN: &str = r"^(\d+) (.+?) bags?$";

    fn new() -> Self {
        let content_re = Regex::new(Self::CONTENT_PATTERN).expect("pattern should be valid");
        Self { content_re }
    }

    fn parse(&self, line: &str) -> DynamicResult<RuleLine> {
        let line = line.trim();
        let (container, contents_list) = line
            .strip_suffix('.')
            .and_then(|rule| rule.split_once(" bags contain "))
            .ok_or_else(|| ParseBagRulesError::NotRule(line.to_owned()))?;

        if contents_list == "no other bags" {
            return Ok(RuleLine {
                container: container.to_owned(),
                contents: Vec::new(),
            });
        }

        let contents = contents_list
            .split(", ")
            .map(|content| -> DynamicResult<_> {
                let captures = self
                    .content_re
                    .captures(content)
                    .ok_or_else(|| ParseBagRulesError::NotContent(content.to_owned()))?;
                let count = parse_with_context::<u32>(&captures[1])?;
                Ok((count, captures[2].to_owned()))
            })
            .collect::<Result<_, _>>()?;

        Ok(RuleLine {
            container: container.to_owned(),
            contents,
        })
    }
}

/// Luggage rules as a graph.
///
/// Nodes hold bag colors, and an edge from a container to a content holds how many of that content
/// the container must hold.
#[derive(Debug)]
struct BagRules {
    graph: DiGraph<String, u32>,
    colors: HashMap<String, NodeIndex>,
}

impl ParseData for BagRules {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = RuleParser::new();
        let lines = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            if line.trim().is_empty() {
                return Ok(None);
            }
            parser.parse(line).map(Some)
        })
        .collect::<Result<Vec<_>, _>>()?;

        let mut graph = DiGraph::new();
        let mut colors = HashMap::new();

        // every container gets a node before any contents are linked
        for rule in lines.iter().flatten() {
            if colors.contains_key(&rule.container) {
                return Err(ParseBagRulesError::DuplicateColor(rule.container.clone()).into());
            }
            let node = graph.add_node(rule.container.clone());
            colors.insert(rule.container.clone(), node);
        }

        for rule in lines.iter().flatten() {
            let container = colors[&rule.container];
            for (count, color) in &rule.contents {
                let &content =
                    colors
                        .get(color)
                        .ok_or_else(|| ParseBagRulesError::UndefinedColor {
                            container: rule.container.clone(),
                            color: color.clone(),
                        })?;
                graph.add_edge(container, content, *count);
            }
        }

        if is_cyclic_directed(&graph) {
            return Err(ParseBagRulesError::CyclicRules.into());
        }

        Ok(Self { graph, colors })
    }
}

impl BagRules {
    fn node(&self, color: &'static str) -> Result<NodeIndex, Day07Error> {
        self.colors
            .get(color)
            .copied()
            .ok_or(Day07Error::MissingColor(color))
    }
}

/*
For part 1, count how many bag colors can eventually contain at least one shiny gold bag.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = BagRules;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let target = input.node(SHINY_GOLD)?;

        // walking edges backwards from the target reaches every container of it
        let reversed = Reversed(&input.graph);
        let mut dfs = Dfs::new(reversed, target);
        let mut containers = 0;
        while let Some(node) = dfs.next(reversed) {
            if node != target {
                containers += 1;
            }
        }
        Ok(containers)
    }
}

/*
For part 2, count how many individual bags are required inside a single shiny gold bag.
*/

impl BagRules {
    /// Count the bags inside one bag of the color at `node`, caching counts per color.
    fn bags_inside(&self, node: NodeIndex, cache: &mut HashMap<NodeIndex, u64>) -> u64 {
        if let Some(&count) = cache.get(&node) {
            return count;
        }

        let count = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| {
                // the content bag itself, plus everything inside it
                let inner = self.bags_inside(edge.target(), cache);
                u64::from(*edge.weight())
                    .checked_mul(inner + 1)
                    .expect("bag count should not overflow")
            })
            .checked_sum()
            .expect("bag count should not overflow");
        cache.insert(node, count);
        count
    }
}

impl Solution<PartTwo> for Day07 {
    type Input = BagRules;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let target = input.node(SHINY_GOLD)?;
        let mut cache = HashMap::new();
        let count = input.bags_inside(target, &mut cache);
        tracing::debug!(colors = cache.len(), "counted bags inside");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"light red bags contain 1 bright white bag, 2 muted yellow bags.
dark orange bags contain 3 bright white bags, 4 muted yellow bags.
bright white bags contain 1 shiny gold bag.
muted yellow bags contain 2 shiny gold bags, 9 faded blue bags.
shiny gold bags contain 1 dark olive bag, 2 vibrant plum bags.
dark olive bags contain 3 faded blue bags, 4 dotted black bags.
vibrant plum bags contain 5 faded blue bags, 6 dotted black bags.
faded blue bags contain no other bags.
dotted black bags contain no other bags.
";

    const EXAMPLE_NESTED_INPUT: &str = r"shiny gold bags contain 2 dark red bags.
dark red bags contain 2 dark orange bags.
dark orange bags contain 2 dark yellow bags.
dark yellow bags contain 2 dark green bags.
dark green bags contain 2 dark blue bags.
dark blue bags contain 2 dark violet bags.
dark violet bags contain no other bags.
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = BagRules::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = BagRules::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 32);
        Ok(())
    }

    #[test]
    fn part_two_solves_nested_example() -> DynamicResult<()> {
        let parsed = BagRules::parse(EXAMPLE_NESTED_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 126);
        Ok(())
    }

    #[test]
    fn undefined_color_is_rejected() {
        let result = BagRules::parse("shiny gold bags contain 2 dark red bags.\n");
        assert!(result.is_err());
    }

    #[test]
    fn cyclic_rules_are_rejected() {
        let input = "shiny gold bags contain 1 dark red bag.\ndark red bags contain 1 shiny gold bag.\n";
        assert!(BagRules::parse(input).is_err());
    }
}
