use derive_more::{Display, Error};

#[derive(Debug, Display, Error, PartialEq, Eq, Clone)]
pub enum TicketError {
    #[display(fmt = "line {}: expected {:?}, found {:?}", line_no, expected, found)]
    UnexpectedLine {
        line_no: usize,
        expected: &'static str,
        found: String,
    },
    #[display(fmt = "unexpected end of input, expected {}", expected)]
    UnexpectedEof { expected: &'static str },
    #[display(fmt = "line {}: invalid rule {:?}", line_no, line)]
    InvalidRule { line_no: usize, line: String },
    #[display(fmt = "line {}: invalid integer {:?}", line_no, token)]
    InvalidInteger { line_no: usize, token: String },
    #[display(
        fmt = "nearby ticket {} has {} values, expected {}",
        record,
        found,
        expected
    )]
    RaggedRecord {
        record: usize,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "ticket has {} values, no column {}", len, column)]
    MissingColumn { column: usize, len: usize },
    #[display(
        fmt = "no field has a single candidate column ({} of {} fields assigned)",
        assigned,
        total
    )]
    Unresolvable { assigned: usize, total: usize },
    #[display(fmt = "answer overflowed")]
    Overflow,
}
