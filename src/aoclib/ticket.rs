use crate::error::TicketError;

/// One ticket: a row of values whose positions line up across all tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<i64>);

impl Record {
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, TicketError> {
        line.trim_end()
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| TicketError::InvalidInteger {
                    line_no,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Record)
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn get(&self, column: usize) -> Option<i64> {
        self.0.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i64>> for Record {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}
