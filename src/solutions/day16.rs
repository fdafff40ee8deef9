use std::ops::RangeInclusive;

use aoc_framework::parsing::{InputScanner, parse_delimited, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 16: Ticket Translation",
    parsed = TicketNotes,
    part_one = Day16,
    part_two = Day16
)]
impl super::AdventOfCode2020<16> {}

/*
Input is notes about train tickets, in three sections separated by empty lines:

1. Rules for ticket fields, like `departure location: 25-80 or 90-961`. A field's value is valid if
   it's in either inclusive range.
2. `your ticket:` followed by your ticket.
3. `nearby tickets:` followed by nearby tickets, one per line.

A ticket is a comma-separated list of values, in a consistent but unknown field order.
*/

#[derive(thiserror::Error, Debug)]
enum ParseTicketNotesError {
    #[error("expected \"[field]: [a]-[b] or [c]-[d]\", found {0:?}")]
    NotFieldRule(String),

    #[error("expected section header {expected:?}")]
    MissingHeader { expected: &'static str },

    #[error("expected your ticket after its header")]
    MissingTicket,

    #[error("expected tickets with {expected} values, found {found}")]
    TicketLength { expected: usize, found: usize },
}

#[derive(thiserror::Error, Debug)]
enum Day16Error {
    #[error("ticket scanning error rate overflowed")]
    ErrorRateOverflow,

    #[error("unable to resolve which field each ticket column holds")]
    UnresolvableFields,

    #[error("product of departure values overflowed")]
    ProductOverflow,
}

type Ticket = Vec<u32>;

#[derive(Debug)]
struct FieldRule {
    name: String,
    ranges: [RangeInclusive<u32>; 2],
}

impl FieldRule {
    fn allows(&self, value: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

struct FieldRuleParser {
    rule_re: Regex,
}

impl FieldRuleParser {
    const RULE_PATTERN: &str = r"^([^:]+): (\d+)-(\d+) or (\d+)-(\d+)$";

    fn new() -> Self {
        let rule_re = Regex::new(Self::RULE_PATTERN).expect("pattern should be valid");
        Self { rule_re }
    }

    fn parse(&self, line: &str) -> DynamicResult<FieldRule> {
        let line = line.trim();
        let captures = self
            .rule_re
            .captures(line)
            .ok_or_else(|| ParseTicketNotesError::NotFieldRule(line.to_owned()))?;
        let bound = |group: usize| parse_with_context::<u32>(&captures[group]);

        Ok(FieldRule {
            name: captures[1].to_owned(),
            ranges: [bound(2)?..=bound(3)?, bound(4)?..=bound(5)?],
        })
    }
}

#[derive(Debug)]
struct TicketNotes {
    rules: Vec<FieldRule>,
    own_ticket: Ticket,
    nearby_tickets: Vec<Ticket>,
}

impl TicketNotes {
    const OWN_TICKET_HEADER: &str = "your ticket:";
    const NEARBY_TICKETS_HEADER: &str = "nearby tickets:";
}

/// Consume a section header line, erroring if the next line isn't `expected`.
fn expect_header(scanner: &mut InputScanner<'_>, expected: &'static str) -> DynamicResult<()> {
    scanner
        .next_item(|_, line| -> DynamicResult<_> {
            if line.trim() == expected {
                Ok(())
            } else {
                Err(ParseTicketNotesError::MissingHeader { expected }.into())
            }
        })?
        .ok_or(ParseTicketNotesError::MissingHeader { expected })?;
    Ok(())
}

impl ParseData for TicketNotes {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rule_parser = FieldRuleParser::new();
        let mut scanner = InputScanner::new(input);

        scanner.skip_empty();
        let rules = scanner.collect_sequence(|_, line| rule_parser.parse(line))?;

        let parse_ticket = |_: usize, line: &str| -> DynamicResult<Ticket> {
            let ticket: Ticket = parse_delimited(line, ',')?;
            if ticket.len() != rules.len() {
                return Err(ParseTicketNotesError::TicketLength {
                    expected: rules.len(),
                    found: ticket.len(),
                }
                .into());
            }
            Ok(ticket)
        };

        expect_header(&mut scanner, Self::OWN_TICKET_HEADER)?;
        let own_ticket = scanner
            .next_in_sequence(parse_ticket)?
            .ok_or(ParseTicketNotesError::MissingTicket)?;

        expect_header(&mut scanner, Self::NEARBY_TICKETS_HEADER)?;
        let nearby_tickets = scanner.collect_sequence(parse_ticket)?;

        Ok(Self {
            rules,
            own_ticket,
            nearby_tickets,
        })
    }
}

impl TicketNotes {
    /// Check if a value is valid for at least one field.
    fn fits_any_field(&self, value: u32) -> bool {
        self.rules.iter().any(|rule| rule.allows(value))
    }
}

/*
For part 1, find values on nearby tickets that aren't valid for any field. The ticket scanning error
rate is the sum of those values.
*/

struct Day16;

impl Solution<PartOne> for Day16 {
    type Input = TicketNotes;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let error_rate = input
            .nearby_tickets
            .iter()
            .flatten()
            .filter(|&&value| !input.fits_any_field(value))
            .copied()
            .checked_sum()
            .ok_or(Day16Error::ErrorRateOverflow)?;
        Ok(error_rate)
    }
}

/*
For part 2, discard nearby tickets with any invalid value. Use the remaining tickets to determine
which field each column is. Multiply together the values of the six fields on your ticket whose
names start with `departure`.
*/

impl TicketNotes {
    /// Determine the rule index of the field held in each ticket column.
    ///
    /// A rule is a candidate for a column if every valid nearby ticket's value in that column fits
    /// it. Columns with a single candidate are fixed, which removes that rule from other columns,
    /// until every column is fixed.
    fn resolve_fields(&self) -> Result<Vec<usize>, Day16Error> {
        let valid_tickets: Vec<_> = self
            .nearby_tickets
            .iter()
            .filter(|ticket| ticket.iter().all(|&value| self.fits_any_field(value)))
            .collect();
        tracing::debug!(
            valid = valid_tickets.len(),
            nearby = self.nearby_tickets.len(),
            "discarded invalid tickets"
        );

        let columns = self.rules.len();
        let mut candidates: Vec<Vec<usize>> = (0..columns)
            .map(|column| {
                (0..self.rules.len())
                    .filter(|&rule| {
                        valid_tickets
                            .iter()
                            .all(|ticket| self.rules[rule].allows(ticket[column]))
                    })
                    .collect()
            })
            .collect();

        let mut resolved = vec![None; columns];
        for _ in 0..columns {
            let (column, rule) = candidates
                .iter()
                .enumerate()
                .find_map(|(column, rules)| match rules.as_slice() {
                    &[rule] => Some((column, rule)),
                    _ => None,
                })
                .ok_or(Day16Error::UnresolvableFields)?;

            resolved[column] = Some(rule);
            for rules in &mut candidates {
                rules.retain(|&candidate| candidate != rule);
            }
        }

        resolved
            .into_iter()
            .collect::<Option<_>>()
            .ok_or(Day16Error::UnresolvableFields)
    }
}

impl Solution<PartTwo> for Day16 {
    type Input = TicketNotes;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let fields = input.resolve_fields()?;
        let product = fields
            .iter()
            .zip(&input.own_ticket)
            .filter(|&(&rule, _)| input.rules[rule].name.starts_with("departure"))
            .map(|(_, &value)| u64::from(value))
            .checked_product()
            .ok_or(Day16Error::ProductOverflow)?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12
";

    const EXAMPLE_FIELDS_INPUT: &str = r"class: 0-1 or 4-19
row: 0-5 or 8-19
seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = TicketNotes::parse(EXAMPLE_INPUT)?;
        let result = <Day16 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 71);
        Ok(())
    }

    #[test]
    fn resolves_example_fields() -> DynamicResult<()> {
        let parsed = TicketNotes::parse(EXAMPLE_FIELDS_INPUT)?;
        let fields = parsed.resolve_fields()?;
        let own_values: Vec<_> = fields
            .iter()
            .zip(&parsed.own_ticket)
            .map(|(&rule, &value)| (parsed.rules[rule].name.as_str(), value))
            .collect();
        assert_eq!(own_values, vec![("row", 11), ("class", 12), ("seat", 13)]);
        Ok(())
    }

    #[test]
    fn part_two_multiplies_departure_fields() -> DynamicResult<()> {
        let input = EXAMPLE_FIELDS_INPUT
            .replace("class:", "departure class:")
            .replace("seat:", "departure seat:");
        let parsed = TicketNotes::parse(&input)?;
        let result = <Day16 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 12 * 13);
        Ok(())
    }

    #[test]
    fn ambiguous_fields_are_an_error() -> DynamicResult<()> {
        let parsed = TicketNotes::parse(
            "class: 1-5 or 7-9\nrow: 1-5 or 7-9\n\nyour ticket:\n1,2\n\nnearby tickets:\n3,4\n",
        )?;
        assert!(matches!(
            parsed.resolve_fields(),
            Err(Day16Error::UnresolvableFields)
        ));
        assert!(<Day16 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn part_one_sum_overflow_is_an_error() -> DynamicResult<()> {
        let parsed = TicketNotes::parse(
            "class: 1-3 or 5-7\n\nyour ticket:\n1\n\nnearby tickets:\n4000000000\n4000000000\n",
        )?;
        assert!(<Day16 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn mismatched_ticket_length_is_rejected() {
        let input = EXAMPLE_INPUT.replace("7,1,14", "7,1");
        assert!(TicketNotes::parse(&input).is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        let input = EXAMPLE_INPUT.replace("your ticket:", "my ticket:");
        assert!(TicketNotes::parse(&input).is_err());
    }
}
