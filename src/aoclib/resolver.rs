//! Working out which ticket column holds which field.
//!
//! Every column starts out as a candidate for every field that accepts all
//! of that column's values. Fields with exactly one candidate left are
//! pinned to it, and the pinned column is struck from every other field,
//! until everything is pinned or no field is forced.

use std::collections::BTreeMap;

use bit_set::BitSet;
use itertools::Itertools;

use crate::error::TicketError;
use crate::rules::RuleSet;
use crate::ticket::Record;

/// A record with every value no field accepts replaced by `None`, which
/// constrains nothing.
pub type MaskedRecord = Vec<Option<i64>>;

pub fn mask_invalid(record: &Record, rules: &RuleSet) -> MaskedRecord {
    record
        .values()
        .iter()
        .map(|&v| if rules.accepts(v) { Some(v) } else { None })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMap {
    names: Vec<String>,
    columns: Vec<BitSet>,
}

impl CandidateMap {
    /// Column count comes from the first record; every other record must
    /// match it.
    pub fn build(rules: &RuleSet, records: &[MaskedRecord]) -> Result<Self, TicketError> {
        let width = records.first().map(Vec::len).unwrap_or(0);
        if let Some((i, r)) = records.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(TicketError::RaggedRecord {
                record: i,
                expected: width,
                found: r.len(),
            });
        }
        let mut names = Vec::with_capacity(rules.len());
        let mut columns = Vec::with_capacity(rules.len());
        for field in rules.fields() {
            let candidates = (0..width)
                .filter(|&column| {
                    records
                        .iter()
                        .all(|r| r[column].map_or(true, |v| field.accepts(v)))
                })
                .collect::<BitSet>();
            log::debug!(
                "field {:?} can be column {}",
                field.name(),
                candidates.iter().join(" or ")
            );
            names.push(field.name().to_owned());
            columns.push(candidates);
        }
        Ok(CandidateMap { names, columns })
    }

    pub fn candidates(&self, name: &str) -> Option<Vec<usize>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].iter().collect())
    }

    /// Eliminate by forced moves until every field has a column. Fails
    /// rather than guessing if at some point no field is forced.
    pub fn resolve(mut self) -> Result<Assignment, TicketError> {
        let total = self.names.len();
        let mut assigned = vec![None; total];
        let mut done = 0;
        while done < total {
            let forced = (0..total)
                .filter(|&i| assigned[i].is_none())
                .find_map(|i| match self.columns[i].len() {
                    1 => self.columns[i].iter().next().map(|column| (i, column)),
                    _ => None,
                });
            let (field, column) = forced.ok_or(TicketError::Unresolvable {
                assigned: done,
                total,
            })?;
            log::debug!("field {:?} is column {}", self.names[field], column);
            assigned[field] = Some(column);
            done += 1;
            for (i, candidates) in self.columns.iter_mut().enumerate() {
                if i != field {
                    candidates.remove(column);
                }
            }
        }
        Ok(Assignment {
            columns: self
                .names
                .into_iter()
                .zip(assigned.into_iter().flatten())
                .collect(),
        })
    }
}

/// The resolved field name → column index mapping; a bijection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    columns: BTreeMap<String, usize>,
}

impl Assignment {
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.columns.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Product of `own`'s values in every column whose field name starts
    /// with `prefix`. 1 when no field matches.
    pub fn prefix_product(&self, own: &Record, prefix: &str) -> Result<i64, TicketError> {
        self.iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .try_fold(1i64, |acc, (name, column)| {
                let value = own.get(column).ok_or(TicketError::MissingColumn {
                    column,
                    len: own.len(),
                })?;
                log::debug!("{} = {}", name, value);
                acc.checked_mul(value).ok_or(TicketError::Overflow)
            })
    }
}

/// Mask the own ticket and every nearby ticket, then resolve
pub fn resolve_fields(
    rules: &RuleSet,
    own: &Record,
    nearby: &[Record],
) -> Result<Assignment, TicketError> {
    let masked = std::iter::once(own)
        .chain(nearby.iter())
        .map(|r| mask_invalid(r, rules))
        .collect::<Vec<_>>();
    CandidateMap::build(rules, &masked)
        .map_err(|e| match e {
            // index 0 is the own ticket
            TicketError::RaggedRecord {
                record,
                expected,
                found,
            } => TicketError::RaggedRecord {
                record: record - 1,
                expected,
                found,
            },
            other => other,
        })?
        .resolve()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{mask_invalid, resolve_fields, CandidateMap};
    use crate::error::TicketError;
    use crate::notes::Notes;
    use crate::rules::{Field, Range, RuleSet};
    use crate::ticket::Record;

    const EXAMPLE: &str = "departure class: 0-1 or 4-19
row: 0-5 or 8-19
departure seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9
";

    #[test]
    fn test_mask_invalid() {
        let rules = [
            Field::new("class", vec![Range::new(1, 3), Range::new(5, 7)]),
            Field::new("row", vec![Range::new(6, 11), Range::new(33, 44)]),
        ]
        .into_iter()
        .collect::<RuleSet>();
        assert_eq!(
            mask_invalid(&Record::from(vec![40, 4, 50, 2]), &rules),
            vec![Some(40), None, None, Some(2)]
        );
    }

    #[test]
    fn test_candidates() {
        let notes = Notes::parse(EXAMPLE).unwrap();
        let masked = std::iter::once(&notes.own)
            .chain(notes.nearby.iter())
            .map(|r| mask_invalid(r, &notes.rules))
            .collect::<Vec<_>>();
        let map = CandidateMap::build(&notes.rules, &masked).unwrap();
        assert_eq!(map.candidates("departure class"), Some(vec![1, 2]));
        assert_eq!(map.candidates("row"), Some(vec![0, 1, 2]));
        assert_eq!(map.candidates("departure seat"), Some(vec![2]));
        assert_eq!(map.candidates("zone"), None);
    }

    #[test]
    fn test_resolve_example() {
        let notes = Notes::parse(EXAMPLE).unwrap();
        let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby).unwrap();
        assert_eq!(assignment.column_of("row"), Some(0));
        assert_eq!(assignment.column_of("departure class"), Some(1));
        assert_eq!(assignment.column_of("departure seat"), Some(2));
        let answer = assignment.prefix_product(&notes.own, "departure").unwrap();
        assert_eq!(answer, 156);
        assert_eq!(answer.to_string().parse::<i64>().unwrap(), answer);
        assert_eq!(assignment.prefix_product(&notes.own, "row").unwrap(), 11);
        assert_eq!(assignment.prefix_product(&notes.own, "arrival").unwrap(), 1);
    }

    #[test]
    fn test_prefix_product_short_record() {
        let notes = Notes::parse(EXAMPLE).unwrap();
        let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby).unwrap();
        assert_eq!(
            assignment.prefix_product(&Record::from(vec![11]), "departure"),
            Err(TicketError::MissingColumn { column: 1, len: 1 })
        );
    }

    #[test]
    fn test_resolve_is_bijection() {
        let notes = Notes::parse(EXAMPLE).unwrap();
        let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby).unwrap();
        assert_eq!(assignment.len(), notes.rules.len());
        let used = assignment.iter().map(|(_, c)| c).collect::<BTreeSet<_>>();
        assert_eq!(used.len(), assignment.len());
        assert!(used.iter().all(|&c| c < notes.own.len()));
    }

    #[test]
    fn test_invalid_values_do_not_constrain() {
        // 99 is valid for nothing, so it must not stop "seat" landing in column 1
        let notes = Notes::parse(
            "row: 1-5
seat: 10-15

your ticket:
1,10

nearby tickets:
2,99
99,12
",
        )
        .unwrap();
        let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby).unwrap();
        assert_eq!(assignment.column_of("row"), Some(0));
        assert_eq!(assignment.column_of("seat"), Some(1));
    }

    #[test]
    fn test_ambiguous_aborts() {
        let notes = Notes::parse(
            "a: 1-10
b: 1-10

your ticket:
1,2

nearby tickets:
3,4
",
        )
        .unwrap();
        assert_eq!(
            resolve_fields(&notes.rules, &notes.own, &notes.nearby),
            Err(TicketError::Unresolvable {
                assigned: 0,
                total: 2
            })
        );
    }

    #[test]
    fn test_stuck_midway_aborts() {
        // "a" is forced, after which "b" and "c" both still have two columns
        let notes = Notes::parse(
            "a: 0-0
b: 1-10
c: 1-10

your ticket:
0,1,2

nearby tickets:
",
        )
        .unwrap();
        assert_eq!(
            resolve_fields(&notes.rules, &notes.own, &notes.nearby),
            Err(TicketError::Unresolvable {
                assigned: 1,
                total: 3
            })
        );
    }

    #[test]
    fn test_more_fields_than_columns() {
        let notes = Notes::parse("a: 1-1\nb: 1-1\n\nyour ticket:\n1\n\nnearby tickets:\n").unwrap();
        assert!(matches!(
            resolve_fields(&notes.rules, &notes.own, &notes.nearby),
            Err(TicketError::Unresolvable { assigned: 1, .. })
        ));
    }

    #[test]
    fn test_ragged_record() {
        let notes = Notes::parse(&EXAMPLE.replace("15,1,5", "15,1")).unwrap();
        assert_eq!(
            resolve_fields(&notes.rules, &notes.own, &notes.nearby),
            Err(TicketError::RaggedRecord {
                record: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_overflow() {
        let notes = Notes::parse(
            "departure a: 0-9223372036854775807
departure b: 1-1

your ticket:
9223372036854775807,1

nearby tickets:
",
        )
        .unwrap();
        let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby).unwrap();
        assert_eq!(
            assignment.prefix_product(&notes.own, "departure"),
            Ok(i64::MAX)
        );
        let own = Record::from(vec![i64::MAX, 2]);
        let rules = [
            Field::new("departure a", vec![Range::new(3, i64::MAX)]),
            Field::new("departure b", vec![Range::new(2, 2)]),
        ]
        .into_iter()
        .collect::<RuleSet>();
        let assignment = resolve_fields(&rules, &own, &[]).unwrap();
        assert_eq!(
            assignment.prefix_product(&own, "departure"),
            Err(TicketError::Overflow)
        );
    }
}
