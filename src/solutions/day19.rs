use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use rayon::prelude::*;
use regex::Regex;

#[solution_runner(
    name = "Day 19: Monster Messages",
    parsed = SatelliteData,
    part_one = Day19,
    part_two = Day19
)]
impl super::AdventOfCode2020<19> {}

/*
Input is rules for valid messages, an empty line, and received messages, one per line.

Rules are numbered, and each is one of:

- a single character to match, like `4: "a"`
- a sequence of other rules to match in order, like `0: 4 1 5`
- alternative sequences separated by `|`, like `2: 4 4 | 5 5`
*/

type RuleId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Char(u8),
    Alternatives(Vec<Vec<RuleId>>),
}

#[derive(thiserror::Error, Debug)]
enum ParseRuleError {
    #[error("expected \"[id]: [rule]\"")]
    MissingColon,

    #[error("expected a single ASCII character in quotes, found {0:?}")]
    InvalidChar(String),

    #[error("expected at least one rule in each alternative")]
    EmptyAlternative,
}

/// Parse the body of a rule, after its `id: ` prefix.
fn parse_rule(body: &str) -> DynamicResult<Rule> {
    let body = body.trim();
    if let Some(quoted) = body.strip_prefix('"') {
        let c = quoted
            .strip_suffix('"')
            .and_then(|c| match c.as_bytes() {
                &[byte] if byte.is_ascii() => Some(byte),
                _ => None,
            })
            .ok_or_else(|| ParseRuleError::InvalidChar(body.to_owned()))?;
        return Ok(Rule::Char(c));
    }

    let alternatives = body
        .split('|')
        .map(|sequence| -> DynamicResult<_> {
            let ids = sequence
                .split_whitespace()
                .map(parse_with_context::<RuleId>)
                .collect::<Result<Vec<_>, _>>()?;
            if ids.is_empty() {
                return Err(ParseRuleError::EmptyAlternative.into());
            }
            Ok(ids)
        })
        .collect::<Result<_, _>>()?;
    Ok(Rule::Alternatives(alternatives))
}

#[derive(thiserror::Error, Debug)]
enum GrammarError {
    #[error("rule {0} is not defined")]
    UndefinedRule(RuleId),

    #[error("rule {0} is defined more than once")]
    DuplicateRule(RuleId),

    #[error("rule {0} refers to itself, which a regular expression can't match")]
    RecursiveRule(RuleId),
}

/// A set of numbered rules where every referenced rule is defined.
#[derive(Debug, Clone)]
struct Grammar(HashMap<RuleId, Rule>);

impl Grammar {
    /// The rule every message must match.
    const ROOT: RuleId = 0;

    fn new(rules: HashMap<RuleId, Rule>) -> Result<Self, GrammarError> {
        for rule in rules.values() {
            if let Rule::Alternatives(alternatives) = rule
                && let Some(&undefined) = alternatives
                    .iter()
                    .flatten()
                    .find(|&&id| !rules.contains_key(&id))
            {
                return Err(GrammarError::UndefinedRule(undefined));
            }
        }
        if !rules.contains_key(&Self::ROOT) {
            return Err(GrammarError::UndefinedRule(Self::ROOT));
        }
        Ok(Self(rules))
    }

    /// Replace some rules, checking the result is still complete.
    fn with_overrides(
        &self,
        overrides: impl IntoIterator<Item = (RuleId, Rule)>,
    ) -> Result<Self, GrammarError> {
        let mut rules = self.0.clone();
        rules.extend(overrides);
        Self::new(rules)
    }

    fn rule(&self, id: RuleId) -> &Rule {
        self.0.get(&id).expect("grammar should define every referenced rule")
    }
}

#[derive(Debug)]
struct SatelliteData {
    grammar: Grammar,
    messages: Vec<String>,
}

impl ParseData for SatelliteData {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        scanner.skip_empty();
        let rules = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let (id, body) = line.split_once(':').ok_or(ParseRuleError::MissingColon)?;
            let id = parse_with_context::<RuleId>(id.trim())?;
            Ok((id, parse_rule(body)?))
        })?;

        let mut rule_map = HashMap::with_capacity(rules.len());
        for (id, rule) in rules {
            if rule_map.insert(id, rule).is_some() {
                return Err(GrammarError::DuplicateRule(id).into());
            }
        }
        let grammar = Grammar::new(rule_map)?;

        scanner.skip_empty();
        let messages = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            Ok(line.trim().to_owned())
        })?;

        Ok(Self { grammar, messages })
    }
}

/// Count messages matching `predicate`, checking messages in parallel.
fn count_matching<F>(messages: &[String], predicate: F) -> usize
where
    F: Fn(&str) -> bool + Sync,
{
    let matching = AtomicUsize::new(0);
    messages.par_iter().for_each(|message| {
        if predicate(message.as_str()) {
            matching.fetch_add(1, Ordering::Relaxed);
        }
    });
    matching.into_inner()
}

/*
For part 1, count the messages that completely match rule 0.
*/

impl Grammar {
    /// Write the pattern matching rule `id`, reusing patterns already written in `patterns`.
    fn write_pattern(
        &self,
        id: RuleId,
        patterns: &mut HashMap<RuleId, String>,
        in_progress: &mut HashSet<RuleId>,
    ) -> Result<String, GrammarError> {
        if let Some(pattern) = patterns.get(&id) {
            return Ok(pattern.clone());
        }
        if !in_progress.insert(id) {
            return Err(GrammarError::RecursiveRule(id));
        }

        let pattern = match self.rule(id) {
            &Rule::Char(c) => regex::escape(&char::from(c).to_string()),
            Rule::Alternatives(alternatives) => {
                let sequences = alternatives
                    .iter()
                    .map(|sequence| {
                        sequence
                            .iter()
                            .map(|&inner| self.write_pattern(inner, patterns, in_progress))
                            .collect::<Result<String, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                format!("(?:{})", sequences.join("|"))
            }
        };

        in_progress.remove(&id);
        patterns.insert(id, pattern.clone());
        Ok(pattern)
    }

    /// Build a regular expression matching exactly the messages valid for the root rule.
    fn to_regex(&self) -> DynamicResult<Regex> {
        let pattern = self.write_pattern(Self::ROOT, &mut HashMap::new(), &mut HashSet::new())?;
        tracing::debug!(length = pattern.len(), "built rule pattern");
        Ok(Regex::new(&format!("^{pattern}$"))?)
    }
}

struct Day19;

impl Solution<PartOne> for Day19 {
    type Input = SatelliteData;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let regex = input.grammar.to_regex()?;
        Ok(count_matching(&input.messages, |message| regex.is_match(message)))
    }
}

/*
For part 2, replace rules 8 and 11:

    8: 42 | 42 8
    11: 42 31 | 42 11 31

The rules now loop, so a regular expression can't describe them. Match messages against the grammar
directly instead, tracking every position a rule could end at.
*/

impl Grammar {
    /// Find every position in `message` where rule `id` can finish matching from `start`.
    ///
    /// `active` holds the rule and start pairs being matched further up the stack. Re-entering one
    /// contributes no ends, which keeps left-recursive rules from looping but limits them to their
    /// non-recursive alternatives. Rules recursing after consuming input, like the loop overrides,
    /// match in full.
    fn match_ends(
        &self,
        id: RuleId,
        message: &[u8],
        start: usize,
        active: &mut HashSet<(RuleId, usize)>,
    ) -> Vec<usize> {
        if start >= message.len() || !active.insert((id, start)) {
            return Vec::new();
        }

        let ends = match self.rule(id) {
            &Rule::Char(c) => {
                if message[start] == c {
                    vec![start + 1]
                } else {
                    Vec::new()
                }
            }
            Rule::Alternatives(alternatives) => {
                let mut ends = Vec::new();
                for sequence in alternatives {
                    let mut positions = vec![start];
                    for &inner in sequence {
                        let mut next: Vec<_> = positions
                            .iter()
                            .flat_map(|&position| self.match_ends(inner, message, position, active))
                            .collect();
                        next.sort_unstable();
                        next.dedup();
                        positions = next;
                        if positions.is_empty() {
                            break;
                        }
                    }
                    ends.extend(positions);
                }
                ends
            }
        };

        active.remove(&(id, start));
        ends
    }

    /// Check if the whole message matches the root rule.
    fn matches(&self, message: &str) -> bool {
        let bytes = message.as_bytes();
        self.match_ends(Self::ROOT, bytes, 0, &mut HashSet::new())
            .contains(&bytes.len())
    }
}

impl Solution<PartTwo> for Day19 {
    type Input = SatelliteData;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let grammar = input.grammar.with_overrides([
            (8, Rule::Alternatives(vec![vec![42], vec![42, 8]])),
            (11, Rule::Alternatives(vec![vec![42, 31], vec![42, 11, 31]])),
        ])?;
        Ok(count_matching(&input.messages, |message| grammar.matches(message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r#"0: 4 1 5
1: 2 3 | 3 2
2: 4 4 | 5 5
3: 4 5 | 5 4
4: "a"
5: "b"

ababbb
bababa
abbbab
aaabbb
aaaabbb
"#;

    const EXAMPLE_LOOPING_INPUT: &str = r#"42: 9 14 | 10 1
9: 14 27 | 1 26
10: 23 14 | 28 1
1: "a"
11: 42 31
5: 1 14 | 15 1
19: 14 1 | 14 14
12: 24 14 | 19 1
16: 15 1 | 14 14
31: 14 17 | 1 13
6: 14 14 | 1 14
2: 1 24 | 14 4
0: 8 11
13: 14 3 | 1 12
15: 1 | 14
17: 14 2 | 1 7
23: 25 1 | 22 14
28: 16 1
4: 1 1
20: 14 14 | 1 15
3: 5 14 | 16 1
27: 1 6 | 14 18
14: "b"
21: 14 1 | 1 14
25: 1 1 | 1 14
22: 14 14
8: 42
26: 14 22 | 1 20
18: 15 15
7: 14 5 | 1 21
24: 14 1

abbbbbabbbaaaababbaabbbbabababbbabbbbbbabaaaa
bbabbbbaabaabba
babbbbaabbbbbabbbbbbaabaaabaaa
aaabbbbbbaaaabaababaabababbabaaabbababababaaa
bbbbbbbaaaabbbbaaabbabaaa
bbbababbbbaaaaaaaabbababaaababaabab
ababaaaaaabaaab
ababaaaaabbbaba
baabbaaaabbaaaababbaababb
abbbbabbbbaaaababbbbbbaaaababb
aaaaabbaabaaaaababaa
aaaabbaaaabbaaa
aaaabbaabbaaaaaaabbbabbbaaabbaabaaa
babaaabbbaaabaababbaabababaaab
aabbbbbaabbbaaaaaabbbbbababaaaaabbaaabba
"#;

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = SatelliteData::parse(EXAMPLE_INPUT)?;
        let result = <Day19 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn part_one_solves_looping_example_before_overrides() -> DynamicResult<()> {
        let parsed = SatelliteData::parse(EXAMPLE_LOOPING_INPUT)?;
        let result = <Day19 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }

    #[test]
    fn part_two_solves_looping_example() -> DynamicResult<()> {
        let parsed = SatelliteData::parse(EXAMPLE_LOOPING_INPUT)?;
        let result = <Day19 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 12);
        Ok(())
    }

    #[test]
    fn grammar_matcher_agrees_with_regex() -> DynamicResult<()> {
        let parsed = SatelliteData::parse(EXAMPLE_INPUT)?;
        let regex = parsed.grammar.to_regex()?;
        for message in &parsed.messages {
            assert_eq!(parsed.grammar.matches(message), regex.is_match(message), "{message}");
        }
        Ok(())
    }

    #[test]
    fn recursive_rule_has_no_regex() -> DynamicResult<()> {
        let parsed = SatelliteData::parse("0: 1 | 1 0\n1: \"a\"\n\naaa\n")?;
        assert!(parsed.grammar.to_regex().is_err());
        assert!(parsed.grammar.matches("aaa"));
        Ok(())
    }

    #[test]
    fn grammar_matcher_recursion() -> DynamicResult<()> {
        let right = SatelliteData::parse("0: 1 | 1 0\n1: \"a\"\n\na\n")?;
        assert!(right.grammar.matches("a"));
        assert!(right.grammar.matches("aaaa"));
        assert!(!right.grammar.matches("aab"));

        let left = SatelliteData::parse("0: 1 | 0 1\n1: \"a\"\n\na\n")?;
        assert!(left.grammar.matches("a"));
        assert!(!left.grammar.matches("aa"));
        Ok(())
    }

    #[test]
    fn undefined_rule_is_rejected() {
        assert!(SatelliteData::parse("0: 1 2\n1: \"a\"\n\na\n").is_err());
        assert!(SatelliteData::parse("1: \"a\"\n\na\n").is_err());
    }
}
