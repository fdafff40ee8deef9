use std::iter::Peekable;
use std::slice::Iter;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 18: Operation Order",
    parsed = Homework,
    part_one = Day18,
    part_two = Day18
)]
impl super::AdventOfCode2020<18> {}

/*
Input is math homework, one expression per line. Expressions hold non-negative integers, addition
(`+`), multiplication (`*`), and parentheses. The rules of operator precedence are different from
usual, and differ per part.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(u64),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

#[derive(thiserror::Error, Debug)]
enum TokenizeError {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

/// Split an expression into tokens. Whitespace only separates tokens.
fn tokenize(expression: &str) -> DynamicResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            '+' => Token::Operator(Operator::Add),
            '*' => Token::Operator(Operator::Multiply),
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            c if c.is_whitespace() => continue,
            c if c.is_ascii_digit() => {
                let mut end = start + c.len_utf8();
                while let Some((index, digit)) = chars.next_if(|(_, next)| next.is_ascii_digit()) {
                    end = index + digit.len_utf8();
                }
                Token::Number(parse_with_context(&expression[start..end])?)
            }
            other => return Err(TokenizeError::UnexpectedChar(other).into()),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

#[derive(thiserror::Error, Debug)]
enum EvaluateError {
    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("expected a closing parenthesis")]
    UnclosedParen,

    #[error("evaluation overflowed")]
    Overflow,
}

/// Binding strength of each operator. Higher binds tighter; equal levels evaluate left to right.
#[derive(Debug, Clone, Copy)]
struct Precedence {
    add: u8,
    multiply: u8,
}

impl Precedence {
    fn of(self, operator: Operator) -> u8 {
        match operator {
            Operator::Add => self.add,
            Operator::Multiply => self.multiply,
        }
    }
}

/// Evaluates a tokenized expression by precedence climbing.
struct Evaluator<'a> {
    tokens: Peekable<Iter<'a, Token>>,
    precedence: Precedence,
}

impl<'a> Evaluator<'a> {
    /// Evaluate a whole expression, requiring every token to be used.
    fn evaluate(tokens: &'a [Token], precedence: Precedence) -> Result<u64, EvaluateError> {
        let mut evaluator = Self {
            tokens: tokens.iter().peekable(),
            precedence,
        };
        let value = evaluator.expression(0)?;
        match evaluator.tokens.next() {
            None => Ok(value),
            Some(&token) => Err(EvaluateError::UnexpectedToken(token)),
        }
    }

    /// Evaluate a number or a parenthesized expression.
    fn operand(&mut self) -> Result<u64, EvaluateError> {
        match self.tokens.next() {
            Some(&Token::Number(value)) => Ok(value),
            Some(&Token::OpenParen) => {
                let value = self.expression(0)?;
                match self.tokens.next() {
                    Some(Token::CloseParen) => Ok(value),
                    _ => Err(EvaluateError::UnclosedParen),
                }
            }
            Some(&token) => Err(EvaluateError::UnexpectedToken(token)),
            None => Err(EvaluateError::UnexpectedEnd),
        }
    }

    /// Evaluate operands joined by operators binding at least as tightly as `min_precedence`.
    fn expression(&mut self, min_precedence: u8) -> Result<u64, EvaluateError> {
        let mut value = self.operand()?;

        while let Some(&&Token::Operator(operator)) = self.tokens.peek() {
            let precedence = self.precedence.of(operator);
            if precedence < min_precedence {
                break;
            }
            self.tokens.next();

            // only tighter operators join the right operand, keeping equal levels left to right
            let rhs = self.expression(precedence + 1)?;
            value = match operator {
                Operator::Add => value.checked_add(rhs),
                Operator::Multiply => value.checked_mul(rhs),
            }
            .ok_or(EvaluateError::Overflow)?;
        }
        Ok(value)
    }
}

struct Homework(Vec<Vec<Token>>);

impl ParseData for Homework {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let expressions = parse_input_lines(input, |_, line| tokenize(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(expressions))
    }
}

impl Homework {
    /// Sum the results of every expression evaluated with `precedence`.
    fn sum_results(&self, precedence: Precedence) -> DynamicResult<u64> {
        let results = self
            .0
            .iter()
            .enumerate()
            .map(|(index, tokens)| {
                let result = Evaluator::evaluate(tokens, precedence)?;
                tracing::debug!(line = index + 1, result, "evaluated expression");
                Ok(result)
            })
            .collect::<Result<Vec<_>, EvaluateError>>()?;

        let sum = results
            .into_iter()
            .checked_sum()
            .ok_or(EvaluateError::Overflow)?;
        Ok(sum)
    }
}

/*
For part 1, addition and multiplication have the same precedence, so they evaluate left to right.
Parentheses still evaluate first. Find the sum of every line's result.
*/

struct Day18;

impl Solution<PartOne> for Day18 {
    type Input = Homework;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.sum_results(Precedence {
            add: 1,
            multiply: 1,
        })
    }
}

/*
For part 2, addition is evaluated before multiplication instead.
*/

impl Solution<PartTwo> for Day18 {
    type Input = Homework;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.sum_results(Precedence {
            add: 2,
            multiply: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EQUAL: Precedence = Precedence {
        add: 1,
        multiply: 1,
    };
    const ADDITION_FIRST: Precedence = Precedence {
        add: 2,
        multiply: 1,
    };

    fn evaluate(expression: &str, precedence: Precedence) -> DynamicResult<u64> {
        let tokens = tokenize(expression)?;
        Ok(Evaluator::evaluate(&tokens, precedence)?)
    }

    #[test]
    fn evaluates_left_to_right() -> DynamicResult<()> {
        assert_eq!(evaluate("1 + 2 * 3 + 4 * 5 + 6", EQUAL)?, 71);
        assert_eq!(evaluate("1 + (2 * 3) + (4 * (5 + 6))", EQUAL)?, 51);
        assert_eq!(evaluate("2 * 3 + (4 * 5)", EQUAL)?, 26);
        assert_eq!(evaluate("5 + (8 * 3 + 9 + 3 * 4 * 3)", EQUAL)?, 437);
        assert_eq!(
            evaluate("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))", EQUAL)?,
            12_240
        );
        assert_eq!(
            evaluate("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2", EQUAL)?,
            13_632
        );
        Ok(())
    }

    #[test]
    fn evaluates_addition_first() -> DynamicResult<()> {
        assert_eq!(evaluate("1 + 2 * 3 + 4 * 5 + 6", ADDITION_FIRST)?, 231);
        assert_eq!(evaluate("1 + (2 * 3) + (4 * (5 + 6))", ADDITION_FIRST)?, 51);
        assert_eq!(evaluate("2 * 3 + (4 * 5)", ADDITION_FIRST)?, 46);
        assert_eq!(evaluate("5 + (8 * 3 + 9 + 3 * 4 * 3)", ADDITION_FIRST)?, 1445);
        assert_eq!(
            evaluate("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))", ADDITION_FIRST)?,
            669_060
        );
        assert_eq!(
            evaluate("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2", ADDITION_FIRST)?,
            23_340
        );
        Ok(())
    }

    #[test]
    fn parts_sum_every_line() -> DynamicResult<()> {
        let parsed = Homework::parse("1 + 2 * 3 + 4 * 5 + 6\n2 * 3 + (4 * 5)\n")?;
        assert_eq!(<Day18 as Solution<PartOne>>::solve(&parsed)?, 71 + 26);
        assert_eq!(<Day18 as Solution<PartTwo>>::solve(&parsed)?, 231 + 46);
        Ok(())
    }

    #[test]
    fn multi_digit_numbers_are_tokenized() -> DynamicResult<()> {
        assert_eq!(evaluate("12 + 345", EQUAL)?, 357);
        Ok(())
    }

    #[test]
    fn malformed_expressions_are_errors() {
        assert!(evaluate("1 + ", EQUAL).is_err());
        assert!(evaluate("(1 + 2", EQUAL).is_err());
        assert!(evaluate("1 + 2)", EQUAL).is_err());
        assert!(evaluate("1 2", EQUAL).is_err());
        assert!(evaluate("1 - 2", EQUAL).is_err());
    }
}
