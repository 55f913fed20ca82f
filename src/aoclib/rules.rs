use std::ops::RangeInclusive;

use nom::{
    bytes::complete::{is_not, tag},
    character::complete::{space0, space1},
    combinator::map,
    multi::separated_list1,
    sequence::{delimited, pair, separated_pair},
    IResult,
};

use crate::error::TicketError;

/// An inclusive interval of acceptable values. `low > high` is allowed and
/// accepts nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range(RangeInclusive<i64>);

impl Range {
    pub fn new(low: i64, high: i64) -> Self {
        Self(low..=high)
    }

    pub fn low(&self) -> i64 {
        *self.0.start()
    }

    pub fn high(&self) -> i64 {
        *self.0.end()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.0.contains(&value)
    }
}

impl From<RangeInclusive<i64>> for Range {
    fn from(r: RangeInclusive<i64>) -> Self {
        Self(r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ranges: Vec<Range>,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, ranges: Vec<Range>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// True if `value` falls in any of this field's ranges
    pub fn accepts(&self, value: i64) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    /// Parse a line like `departure location: 27-374 or 395-974`
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, TicketError> {
        match parse_field(line.trim_end()) {
            Ok((remaining, field)) if remaining.is_empty() => Ok(field),
            _ => Err(TicketError::InvalidRule {
                line_no,
                line: line.to_owned(),
            }),
        }
    }
}

fn parse_range(s: &str) -> IResult<&str, Range> {
    map(
        separated_pair(
            nom::character::complete::i64,
            tag("-"),
            nom::character::complete::i64,
        ),
        |(low, high)| Range::new(low, high),
    )(s)
}

fn parse_field(s: &str) -> IResult<&str, Field> {
    map(
        separated_pair(
            is_not(":"),
            pair(tag(":"), space0),
            separated_list1(delimited(space1, tag("or"), space1), parse_range),
        ),
        |(name, ranges): (&str, Vec<Range>)| Field::new(name.trim(), ranges),
    )(s)
}

/// All the fields a ticket may carry, in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<Field>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A repeated name extends the existing field's ranges.
    pub fn insert(&mut self, field: Field) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            log::debug!("extending field {:?} with {:?}", field.name, field.ranges);
            existing.ranges.extend(field.ranges);
        } else {
            self.fields.push(field);
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every range of every field, with field identity dropped
    pub fn ranges(&self) -> impl Iterator<Item = &Range> + '_ {
        self.fields.iter().flat_map(|f| f.ranges.iter())
    }

    /// True if some field accepts `value`
    pub fn accepts(&self, value: i64) -> bool {
        self.fields.iter().any(|f| f.accepts(value))
    }
}

impl FromIterator<Field> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        let mut rules = RuleSet::new();
        for field in iter {
            rules.insert(field);
        }
        rules
    }
}
