use crate::error::TicketError;
use crate::rules::{Range, RuleSet};
use crate::ticket::Record;

/// Values in `record` that fall outside every one of `ranges`
pub fn invalid_values<'a>(
    record: &'a Record,
    ranges: &'a [&'a Range],
) -> impl Iterator<Item = i64> + 'a {
    record
        .values()
        .iter()
        .copied()
        .filter(move |v| !ranges.iter().any(|r| r.contains(*v)))
}

/// Sum of every nearby value that no rule accepts. Which field a valid
/// value belongs to doesn't matter here.
pub fn error_rate(rules: &RuleSet, nearby: &[Record]) -> Result<i64, TicketError> {
    let pooled = rules.ranges().collect::<Vec<_>>();
    nearby
        .iter()
        .enumerate()
        .try_fold(0i64, |acc, (i, record)| {
            let invalid = invalid_values(record, &pooled).collect::<Vec<_>>();
            if !invalid.is_empty() {
                log::debug!("nearby ticket {} has invalid values {:?}", i, invalid);
            }
            invalid
                .into_iter()
                .try_fold(acc, |acc, v| acc.checked_add(v))
                .ok_or(TicketError::Overflow)
        })
}
