use std::iter::Enumerate;
use std::str::Lines;

use crate::error::TicketError;
use crate::rules::{Field, RuleSet};
use crate::ticket::Record;

const YOUR_TICKET: &str = "your ticket:";
const NEARBY_TICKETS: &str = "nearby tickets:";

/// Forward-only reader over the lines of the input, tracking 1-based line
/// numbers for error reporting.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> LineCursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
        }
    }

    pub fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.lines.next().map(|(i, line)| (i + 1, line))
    }

    /// Like `next_line`, but running out of input is an error
    pub fn require_line(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, &'a str), TicketError> {
        self.next_line().ok_or(TicketError::UnexpectedEof { expected })
    }

    /// Consume one line, which must read exactly `expected`
    pub fn expect_line(&mut self, expected: &'static str) -> Result<(), TicketError> {
        let (line_no, line) = self.require_line(expected)?;
        if line.trim_end() != expected {
            return Err(TicketError::UnexpectedLine {
                line_no,
                expected,
                found: line.to_owned(),
            });
        }
        Ok(())
    }

    pub fn expect_blank(&mut self) -> Result<(), TicketError> {
        self.expect_line("")
    }
}

/// Rule lines up to and including the blank line that ends them
pub fn parse_rules(cursor: &mut LineCursor<'_>) -> Result<RuleSet, TicketError> {
    let mut rules = RuleSet::new();
    loop {
        let (line_no, line) = cursor.require_line("a blank line after the rules")?;
        if line.trim().is_empty() {
            break;
        }
        rules.insert(Field::parse_line(line, line_no)?);
    }
    Ok(rules)
}

pub fn parse_own_ticket(cursor: &mut LineCursor<'_>) -> Result<Record, TicketError> {
    cursor.expect_line(YOUR_TICKET)?;
    let (line_no, line) = cursor.require_line("your ticket values")?;
    Record::parse_line(line, line_no)
}

/// Header plus every remaining line. Blank lines may only trail.
pub fn parse_nearby_tickets(cursor: &mut LineCursor<'_>) -> Result<Vec<Record>, TicketError> {
    cursor.expect_line(NEARBY_TICKETS)?;
    let mut records = Vec::new();
    let mut first_blank = None;
    while let Some((line_no, line)) = cursor.next_line() {
        if line.trim().is_empty() {
            first_blank.get_or_insert(line_no);
            continue;
        }
        if let Some(blank_no) = first_blank {
            return Err(TicketError::InvalidInteger {
                line_no: blank_no,
                token: String::new(),
            });
        }
        records.push(Record::parse_line(line, line_no)?);
    }
    Ok(records)
}

/// Everything in one puzzle input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    pub rules: RuleSet,
    pub own: Record,
    pub nearby: Vec<Record>,
}

impl Notes {
    pub fn parse(input: &str) -> Result<Self, TicketError> {
        let mut cursor = LineCursor::new(input);
        let rules = parse_rules(&mut cursor)?;
        log::debug!("read {} fields", rules.len());
        let own = parse_own_ticket(&mut cursor)?;
        cursor.expect_blank()?;
        let nearby = parse_nearby_tickets(&mut cursor)?;
        log::debug!("read {} nearby tickets", nearby.len());
        Ok(Notes { rules, own, nearby })
    }
}
