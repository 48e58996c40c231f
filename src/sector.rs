//! Splitting operator strings into spin sectors and recombining the results.
//!
//! Operators with different spin labels anticommute without ever contracting,
//! so every sector can be normal-ordered on its own. The per-sector results
//! are then multiplied back together, in the order the sectors first appear.

use log::debug;

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::term::Term;
use crate::types::Label;

/// Operators grouped by spin label, in first-seen order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Sectors {
    groups: Vec<(Label, Vec<Operator>)>,
}

impl Sectors {
    /// Groups `ops` by spin, keeping the relative order inside each group.
    pub fn partition(ops: &[Operator]) -> Self {
        let mut groups: Vec<(Label, Vec<Operator>)> = Vec::new();
        for op in ops {
            match groups.iter_mut().find(|(spin, _)| *spin == op.spin) {
                Some((_, group)) => group.push(op.clone()),
                None => groups.push((op.spin.clone(), vec![op.clone()])),
            }
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn spins(&self) -> impl Iterator<Item = &Label> + '_ {
        self.groups.iter().map(|(spin, _)| spin)
    }

    pub fn get(&self, spin: &Label) -> Option<&[Operator]> {
        self.groups
            .iter()
            .find(|(s, _)| s == spin)
            .map(|(_, group)| group.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &[Operator])> + '_ {
        self.groups.iter().map(|(spin, group)| (spin, group.as_slice()))
    }

    pub fn into_groups(self) -> Vec<(Label, Vec<Operator>)> {
        self.groups
    }
}

/// Outer product of per-sector term lists.
///
/// Each accumulated term is multiplied by each term of the next sector, the
/// accumulated operators first. A single list is returned unchanged, no lists
/// give the unit `[(1, [])]`.
///
/// Fails with [`Error::TooManyTerms`] before materializing a product larger
/// than `max_terms`, and with [`Error::CoefficientOverflow`] if a product
/// coefficient does not fit into `i64`.
pub fn combine(lists: Vec<Vec<Term>>, max_terms: Option<usize>) -> Result<Vec<Term>> {
    let mut lists = lists.into_iter();
    let Some(mut acc) = lists.next() else {
        return Ok(vec![Term::scalar(1)]);
    };

    for next in lists {
        let size = acc.len().saturating_mul(next.len());
        if let Some(limit) = max_terms {
            if size > limit {
                return Err(Error::TooManyTerms { limit });
            }
        }
        debug!("combine: {} x {} -> {} terms", acc.len(), next.len(), size);

        let mut product = Vec::with_capacity(size);
        for t1 in &acc {
            for t2 in &next {
                let term = t1.checked_product(t2).ok_or(Error::CoefficientOverflow {
                    lhs: t1.coefficient,
                    rhs: t2.coefficient,
                })?;
                product.push(term);
            }
        }
        acc = product;
    }

    Ok(acc)
}
