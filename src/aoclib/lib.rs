pub mod error;
pub mod notes;
pub mod resolver;
pub mod rules;
pub mod scan;
pub mod ticket;

pub use error::TicketError;
pub use notes::{LineCursor, Notes};
pub use resolver::{resolve_fields, Assignment, CandidateMap};
pub use rules::{Field, Range, RuleSet};
pub use scan::error_rate;
pub use ticket::Record;
