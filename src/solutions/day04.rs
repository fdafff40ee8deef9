use std::collections::HashMap;
use std::ops::RangeInclusive;

use aoc_framework::parsing::InputScanner;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use regex::Regex;

#[solution_runner(
    name = "Day 4: Passport Processing",
    parsed = PassportBatch,
    part_one = Day04,
    part_two = Day04
)]
impl super::AdventOfCode2020<4> {}

/*
Input is a batch file of passports. A passport is a block of `key:value` pairs separated by spaces
or newlines, and passports are separated by blank lines.
*/

/// Fields a passport must have. `cid` (country ID) is deliberately absent so North Pole
/// credentials pass.
const REQUIRED_FIELDS: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];

#[derive(Debug)]
struct Passport(HashMap<String, String>);

impl Passport {
    /// Build a passport from the lines of one block.
    ///
    /// Pairs without a `:` or with an empty key or value are skipped; a repeated key keeps its last
    /// value.
    fn from_lines(lines: &[&str]) -> Self {
        let fields = lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .filter_map(|pair| pair.split_once(':'))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self(fields)
    }

    fn has_required_fields(&self) -> bool {
        REQUIRED_FIELDS
            .iter()
            .all(|&field| self.0.contains_key(field))
    }
}

struct PassportBatch(Vec<Passport>);

impl ParseData for PassportBatch {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let passports = InputScanner::new(input)
            .collect_blocks(|lines| -> DynamicResult<_> { Ok(Passport::from_lines(lines)) })?;
        Ok(Self(passports))
    }
}

/*
For part 1, count the passports that have every required field.
*/

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = PassportBatch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let count = input
            .0
            .iter()
            .filter(|passport| passport.has_required_fields())
            .count();
        Ok(count)
    }
}

/*
For part 2, the required fields must also hold valid values:

- `byr` four digits, 1920 to 2002
- `iyr` four digits, 2010 to 2020
- `eyr` four digits, 2020 to 2030
- `hgt` a number followed by `cm` (150 to 193) or `in` (59 to 76)
- `hcl` a `#` followed by exactly six characters 0-9 or a-f
- `ecl` exactly one of: amb blu brn gry grn hzl oth
- `pid` a nine-digit number, including leading zeroes

Other fields are ignored.
*/

struct FieldValidator {
    height_re: Regex,
    hair_color_re: Regex,
    passport_id_re: Regex,
}

impl FieldValidator {
    const HEIGHT_PATTERN: &str = r"^(\d+)(cm|in)$";
    const HAIR_COLOR_PATTERN: &str = r"^#[0-9a-f]{6}$";
    const PASSPORT_ID_PATTERN: &str = r"^[0-9]{9}$";
    const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

    fn new() -> Self {
        Self {
            height_re: Regex::new(Self::HEIGHT_PATTERN).expect("pattern should be valid"),
            hair_color_re: Regex::new(Self::HAIR_COLOR_PATTERN).expect("pattern should be valid"),
            passport_id_re: Regex::new(Self::PASSPORT_ID_PATTERN)
                .expect("pattern should be valid"),
        }
    }

    fn number_in_range(value: &str, range: RangeInclusive<u32>) -> bool {
        value
            .parse::<u32>()
            .is_ok_and(|number| range.contains(&number))
    }

    fn is_valid_height(&self, value: &str) -> bool {
        let Some(captures) = self.height_re.captures(value) else {
            return false;
        };
        match &captures[2] {
            "cm" => Self::number_in_range(&captures[1], 150..=193),
            "in" => Self::number_in_range(&captures[1], 59..=76),
            _ => false,
        }
    }

    fn is_valid_field(&self, key: &str, value: &str) -> bool {
        match key {
            "byr" => Self::number_in_range(value, 1920..=2002),
            "iyr" => Self::number_in_range(value, 2010..=2020),
            "eyr" => Self::number_in_range(value, 2020..=2030),
            "hgt" => self.is_valid_height(value),
            "hcl" => self.hair_color_re.is_match(value),
            "ecl" => Self::EYE_COLORS.contains(&value),
            "pid" => self.passport_id_re.is_match(value),
            _ => true,
        }
    }

    fn is_valid_passport(&self, passport: &Passport) -> bool {
        passport.has_required_fields()
            && passport
                .0
                .iter()
                .all(|(key, value)| self.is_valid_field(key, value))
    }
}

impl Solution<PartTwo> for Day04 {
    type Input = PassportBatch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let validator = FieldValidator::new();
        let count = input
            .0
            .iter()
            .filter(|passport| validator.is_valid_passport(passport))
            .count();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
byr:1937 iyr:2017 cid:147 hgt:183cm

iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
hcl:#cfa07d byr:1929

hcl:#ae17e1 iyr:2013
eyr:2024
ecl:brn pid:760753108 byr:1931
hgt:179cm

hcl:#cfa07d eyr:2025 pid:166559648
iyr:2011 ecl:brn hgt:59in
";

    const EXAMPLE_INVALID_PASSPORTS: &str = r"eyr:1972 cid:100
hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

iyr:2019
hcl:#602927 eyr:1967 hgt:170cm
ecl:grn pid:012533040 byr:1946

hcl:dab227 iyr:2012
ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

hgt:59cm ecl:zzz
eyr:2038 hcl:74454a iyr:2023
pid:3556412378 byr:2007
";

    const EXAMPLE_VALID_PASSPORTS: &str = r"pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
hcl:#623a2f

eyr:2029 ecl:blu cid:129 byr:1989
iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

hcl:#888785
hgt:164cm byr:2001 iyr:2015 cid:88
pid:545766238 ecl:hzl
eyr:2022

iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = PassportBatch::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0.len(), 4);
        let result = <Day04 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn part_two_rejects_invalid_examples() -> DynamicResult<()> {
        let parsed = PassportBatch::parse(EXAMPLE_INVALID_PASSPORTS)?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 0);
        Ok(())
    }

    #[test]
    fn part_two_accepts_valid_examples() -> DynamicResult<()> {
        let parsed = PassportBatch::parse(EXAMPLE_VALID_PASSPORTS)?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn validates_documented_field_values() {
        let validator = FieldValidator::new();
        assert!(validator.is_valid_field("byr", "2002"));
        assert!(!validator.is_valid_field("byr", "2003"));
        assert!(validator.is_valid_field("hgt", "60in"));
        assert!(validator.is_valid_field("hgt", "190cm"));
        assert!(!validator.is_valid_field("hgt", "190in"));
        assert!(!validator.is_valid_field("hgt", "190"));
        assert!(validator.is_valid_field("hcl", "#123abc"));
        assert!(!validator.is_valid_field("hcl", "#123abz"));
        assert!(!validator.is_valid_field("hcl", "123abc"));
        assert!(validator.is_valid_field("ecl", "brn"));
        assert!(!validator.is_valid_field("ecl", "wat"));
        assert!(validator.is_valid_field("pid", "000000001"));
        assert!(!validator.is_valid_field("pid", "0123456789"));
    }
}
