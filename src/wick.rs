//! # Normal ordering by repeated anticommutation
//!
//! The [`Wick`] manager turns a product of fermionic operators into a sum of
//! normal-ordered terms (all creation operators left of all annihilation
//! operators, inside every spin sector).
//!
//! ## Algorithm
//!
//! The input is first split into spin [sectors][crate::sector]. Every sector
//! is handled by a recursion over a single working buffer. A call owns the
//! prefix `buf[..end]`; everything in `buf[end..]` is an annihilation suffix
//! that is already in its final place.
//!
//! 1. A prefix of length at most one is done: emit the buffer.
//! 2. If the last operator of the prefix annihilates, it is settled: shrink the prefix.
//! 3. Otherwise find the rightmost annihilation operator `a = buf[i]`. Its right
//!    neighbour `b = buf[i+1]` creates. Apply `a b = {a, b} - b a`:
//!    - if `a` and `b` carry the same momentum, `{a, b} = 1`: remove both and recurse;
//!    - always swap them in place and continue with the opposite sign.
//!
//! Shrinking and swapping continue in a loop; only the contraction branch
//! recurses, so the stack stays shallow even for long swap-only strings.
//! Every branch restores the buffer before returning, so a term is only
//! allocated at a leaf. The number of leaves is at most `2^k`, where `k` is the
//! number of inversions in the sector: a swap removes exactly one inversion and
//! a contraction removes at least one.
//!
//! ## Sector combination
//!
//! Per-sector results are multiplied out in first-seen spin order, see
//! [`combine`][crate::sector::combine].

use std::fmt::{Debug, Display, Formatter};

use log::{debug, trace};
use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::latex::to_latex;
use crate::operator::{count_inversions, Operator};
use crate::parse::{parse_operators, ParseMode};
use crate::sector::{combine, Sectors};
use crate::term::Term;

/// Configuration of a [`Wick`] manager.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WickConfig {
    /// Maximum number of generated terms (`None` for unlimited).
    pub max_terms: Option<usize>,
    /// Maximum input length (`None` for unlimited).
    pub max_operators: Option<usize>,
    /// How the text adapter treats unrecognized input.
    pub parse_mode: ParseMode,
}

impl Default for WickConfig {
    fn default() -> Self {
        Self {
            max_terms: Some(1 << 20),
            max_operators: Some(64),
            parse_mode: ParseMode::Lenient,
        }
    }
}

impl WickConfig {
    pub fn with_max_terms(mut self, max_terms: impl Into<Option<usize>>) -> Self {
        self.max_terms = max_terms.into();
        self
    }

    pub fn with_max_operators(mut self, max_operators: impl Into<Option<usize>>) -> Self {
        self.max_operators = max_operators.into();
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// No limits at all.
    pub fn unlimited() -> Self {
        Self::default().with_max_terms(None).with_max_operators(None)
    }
}

/// Counters collected during one normal-ordering call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Stats {
    /// Terms emitted by the sector recursions (before sector combination).
    pub terms: usize,
    /// Contraction branches taken.
    pub contractions: usize,
    /// Swap branches taken.
    pub swaps: usize,
    /// Deepest nesting of contraction branches.
    pub max_depth: usize,
}

impl Stats {
    fn merge(&mut self, other: &Stats) {
        self.terms += other.terms;
        self.contractions += other.contractions;
        self.swaps += other.swaps;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "terms={}, contractions={}, swaps={}, max_depth={}",
            self.terms, self.contractions, self.swaps, self.max_depth
        )
    }
}

/// Normal-ordering manager.
///
/// Holds only configuration, so a single manager can be shared between
/// threads and reused for any number of calls.
#[derive(Clone, Default)]
pub struct Wick {
    config: WickConfig,
}

impl Debug for Wick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wick")
            .field("max_terms", &self.config.max_terms)
            .field("max_operators", &self.config.max_operators)
            .field("parse_mode", &self.config.parse_mode)
            .finish()
    }
}

impl Wick {
    pub fn new(config: WickConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WickConfig {
        &self.config
    }

    /// Normal-orders an arbitrary operator string.
    ///
    /// # Examples
    ///
    /// ```
    /// use wick_rs::operator::Operator;
    /// use wick_rs::term::Term;
    /// use wick_rs::wick::Wick;
    ///
    /// let wick = Wick::default();
    /// let a = Operator::annihilation("p", "↑");
    /// let b = Operator::creation("p", "↑");
    ///
    /// let terms = wick.normal_order(&[a.clone(), b.clone()]).unwrap();
    /// assert_eq!(terms, vec![Term::scalar(1), Term::new(-1, vec![b, a])]);
    /// ```
    pub fn normal_order(&self, ops: &[Operator]) -> Result<Vec<Term>> {
        self.normal_order_with_stats(ops).map(|(terms, _)| terms)
    }

    /// Same as [`normal_order`][Wick::normal_order], also returning the call's [`Stats`].
    pub fn normal_order_with_stats(&self, ops: &[Operator]) -> Result<(Vec<Term>, Stats)> {
        debug!("normal_order(len = {})", ops.len());
        self.check_len(ops)?;

        if ops.len() <= 1 {
            if self.config.max_terms == Some(0) {
                return Err(Error::TooManyTerms { limit: 0 });
            }
            let stats = Stats {
                terms: 1,
                ..Stats::default()
            };
            return Ok((vec![Term::new(1, ops.to_vec())], stats));
        }

        let sectors = Sectors::partition(ops);
        debug!("normal_order: {} sector(s)", sectors.len());

        let mut stats = Stats::default();
        if sectors.len() == 1 {
            let (terms, s) = self.order_sector(ops)?;
            stats.merge(&s);
            debug!("normal_order: {}", stats);
            return Ok((terms, stats));
        }

        let mut lists = Vec::with_capacity(sectors.len());
        for (spin, group) in sectors.iter() {
            let (terms, s) = self.order_sector(group)?;
            debug!("normal_order: sector {} -> {} term(s)", spin, terms.len());
            stats.merge(&s);
            lists.push(terms);
        }
        let terms = combine(lists, self.config.max_terms)?;
        debug!("normal_order: {}", stats);
        Ok((terms, stats))
    }

    /// Normal-orders a string whose operators all share one spin label.
    ///
    /// The spin labels are not inspected: operators of different spins would be
    /// swapped and contracted as if they were in the same sector.
    pub fn normal_order_sector(&self, ops: &[Operator]) -> Result<Vec<Term>> {
        self.check_len(ops)?;
        self.order_sector(ops).map(|(terms, _)| terms)
    }

    /// Parses `expr` with the configured [`ParseMode`] and normal-orders it.
    pub fn normal_order_str(&self, expr: &str) -> Result<Vec<Term>> {
        let ops = parse_operators(expr, self.config.parse_mode)?;
        self.normal_order(&ops)
    }

    /// Parses, normal-orders and renders `expr` as LaTeX.
    ///
    /// ```
    /// use wick_rs::wick::Wick;
    ///
    /// let wick = Wick::default();
    /// let res = wick.normal_order_latex(r"c_{p,↑} c^\dagger_{p,↑}").unwrap();
    /// assert_eq!(res, r"1 - c^{\dagger}_{p,↑} c_{p,↑}");
    /// ```
    pub fn normal_order_latex(&self, expr: &str) -> Result<String> {
        let terms = self.normal_order_str(expr)?;
        Ok(to_latex(&terms))
    }

    /// Upper bound `2^k` on the number of terms, `k` being the number of
    /// same-spin inversions in `ops`.
    pub fn term_count_bound(ops: &[Operator]) -> BigUint {
        BigUint::from(1u32) << count_inversions(ops)
    }

    fn check_len(&self, ops: &[Operator]) -> Result<()> {
        if let Some(limit) = self.config.max_operators {
            if ops.len() > limit {
                return Err(Error::TooManyOperators { len: ops.len(), limit });
            }
        }
        Ok(())
    }

    fn order_sector(&self, ops: &[Operator]) -> Result<(Vec<Term>, Stats)> {
        let mut walker = Walker {
            buf: ops.to_vec(),
            out: Vec::new(),
            max_terms: self.config.max_terms,
            stats: Stats::default(),
        };
        let end = walker.buf.len();
        walker.walk(end, 1, 0)?;
        let Walker { out, stats, .. } = walker;
        Ok((out, stats))
    }
}

/// State of one sector recursion.
struct Walker {
    buf: Vec<Operator>,
    out: Vec<Term>,
    max_terms: Option<usize>,
    stats: Stats,
}

impl Walker {
    /// Expands `buf[..end]` with the running `sign`.
    ///
    /// Suffix shrinks and swaps continue in a loop; only a contraction recurses,
    /// so `depth` counts nested contractions and stays below `len / 2`.
    fn walk(&mut self, end: usize, sign: i64, depth: usize) -> Result<()> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let mut end = end;
        let mut sign = sign;
        // Swap positions, undone in reverse before returning.
        let mut swapped = Vec::new();

        let res = loop {
            if end <= 1 {
                break self.emit(sign);
            }

            // Trailing annihilation operator is already in place.
            if self.buf[end - 1].is_annihilation() {
                end -= 1;
                continue;
            }

            let Some(i) = self.buf[..end].iter().rposition(|op| op.is_annihilation()) else {
                // Creation operators only.
                break self.emit(sign);
            };
            trace!("walk(end = {}, sign = {}): inversion at {}", end, sign, i);

            if self.buf[i].is_pairable(&self.buf[i + 1]) {
                self.stats.contractions += 1;
                let b = self.buf.remove(i + 1);
                let a = self.buf.remove(i);
                let res = self.walk(end - 2, sign, depth + 1);
                self.buf.insert(i, a);
                self.buf.insert(i + 1, b);
                if res.is_err() {
                    break res;
                }
            }

            self.stats.swaps += 1;
            self.buf.swap(i, i + 1);
            swapped.push(i);
            sign = -sign;
        };

        for i in swapped.into_iter().rev() {
            self.buf.swap(i, i + 1);
        }
        res
    }

    fn emit(&mut self, sign: i64) -> Result<()> {
        if let Some(limit) = self.max_terms {
            if self.out.len() >= limit {
                return Err(Error::TooManyTerms { limit });
            }
        }
        self.stats.terms += 1;
        self.out.push(Term::new(sign, self.buf.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::operator::is_normal_ordered;

    fn c(p: &str) -> Operator {
        Operator::annihilation(p, "↑")
    }

    fn cd(p: &str) -> Operator {
        Operator::creation(p, "↑")
    }

    #[test]
    fn test_empty_and_single() {
        let wick = Wick::default();
        assert_eq!(wick.normal_order(&[]).unwrap(), vec![Term::scalar(1)]);
        assert_eq!(
            wick.normal_order(&[c("p")]).unwrap(),
            vec![Term::new(1, vec![c("p")])]
        );
        assert_eq!(
            wick.normal_order(&[cd("p")]).unwrap(),
            vec![Term::new(1, vec![cd("p")])]
        );
    }

    #[test]
    fn test_single_pair() {
        let wick = Wick::default();
        let res = wick.normal_order(&[c("p"), cd("p")]).unwrap();
        assert_eq!(res, vec![Term::scalar(1), Term::new(-1, vec![cd("p"), c("p")])]);
    }

    #[test]
    fn test_mismatched_pair() {
        let wick = Wick::default();
        let res = wick.normal_order(&[c("p1"), cd("p2")]).unwrap();
        assert_eq!(res, vec![Term::new(-1, vec![cd("p2"), c("p1")])]);
    }

    #[test]
    fn test_already_ordered() {
        let wick = Wick::default();
        let ops = vec![cd("a"), cd("b"), c("b"), c("a")];
        assert_eq!(wick.normal_order(&ops).unwrap(), vec![Term::new(1, ops)]);
    }

    #[test]
    fn test_trailing_annihilation() {
        let wick = Wick::default();
        // c_p c^\dagger_p c_q = c_q - c^\dagger_p c_p c_q
        let res = wick.normal_order(&[c("p"), cd("p"), c("q")]).unwrap();
        assert_eq!(
            res,
            vec![
                Term::new(1, vec![c("q")]),
                Term::new(-1, vec![cd("p"), c("p"), c("q")]),
            ]
        );
    }

    #[test]
    fn test_two_creations_past_one_annihilation() {
        let wick = Wick::default();
        // c_p c^\dagger_q c^\dagger_p
        //   = -c^\dagger_q c_p c^\dagger_p
        //   = -c^\dagger_q + c^\dagger_q c^\dagger_p c_p
        let res = wick.normal_order(&[c("p"), cd("q"), cd("p")]).unwrap();
        assert_eq!(
            res,
            vec![
                Term::new(-1, vec![cd("q")]),
                Term::new(1, vec![cd("q"), cd("p"), c("p")]),
            ]
        );
    }

    #[test]
    fn test_number_operator_squared() {
        let wick = Wick::default();
        // n n = c^\dagger c c^\dagger c = c^\dagger c - c^\dagger c^\dagger c c
        let res = wick.normal_order(&[cd("p"), c("p"), cd("p"), c("p")]).unwrap();
        assert_eq!(
            res,
            vec![
                Term::new(1, vec![cd("p"), c("p")]),
                Term::new(-1, vec![cd("p"), cd("p"), c("p"), c("p")]),
            ]
        );
    }

    #[test]
    fn test_outputs_are_normal_ordered() {
        let wick = Wick::default();
        let ops = vec![c("a"), c("b"), cd("b"), cd("a"), c("c"), cd("c")];
        let res = wick.normal_order(&ops).unwrap();
        assert!(!res.is_empty());
        for term in &res {
            assert!(is_normal_ordered(&term.operators), "{}", term);
            assert!(term.coefficient == 1 || term.coefficient == -1);
        }
        assert!(BigUint::from(res.len()) <= Wick::term_count_bound(&ops));
    }

    #[test]
    fn test_sector_independence() {
        let wick = Wick::default();
        let ops = vec![
            Operator::annihilation("p1", "↑"),
            Operator::creation("p2", "↓"),
        ];
        assert_eq!(wick.normal_order(&ops).unwrap(), vec![Term::new(1, ops)]);
    }

    #[test]
    fn test_two_sectors() {
        let wick = Wick::default();
        let ops = vec![
            Operator::annihilation("p", "↑"),
            Operator::annihilation("q", "↓"),
            Operator::creation("p", "↑"),
            Operator::creation("q", "↓"),
        ];
        let res = wick.normal_order(&ops).unwrap();
        let up = [Operator::creation("p", "↑"), Operator::annihilation("p", "↑")];
        let down = [Operator::creation("q", "↓"), Operator::annihilation("q", "↓")];
        assert_eq!(
            res,
            vec![
                Term::scalar(1),
                Term::new(-1, down.to_vec()),
                Term::new(-1, up.to_vec()),
                Term::new(1, [up.clone(), down.clone()].concat()),
            ]
        );
    }

    #[test]
    fn test_stats() {
        let wick = Wick::default();
        let (terms, stats) = wick
            .normal_order_with_stats(&[c("p"), cd("p")])
            .unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(stats.terms, 2);
        assert_eq!(stats.contractions, 1);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.max_depth, 1);

        let (_, stats) = wick
            .normal_order_with_stats(&[c("a"), c("b"), cd("c"), cd("d")])
            .unwrap();
        assert_eq!(stats.swaps, 4);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_max_terms() {
        let wick = Wick::new(WickConfig::default().with_max_terms(1));
        assert_eq!(
            wick.normal_order(&[c("p"), cd("p")]),
            Err(Error::TooManyTerms { limit: 1 })
        );
        assert!(wick.normal_order(&[c("p"), cd("q")]).is_ok());
    }

    #[test]
    fn test_max_terms_zero() {
        let wick = Wick::new(WickConfig::default().with_max_terms(0));
        for ops in [vec![], vec![c("p")], vec![cd("p"), c("p")]] {
            assert_eq!(
                wick.normal_order(&ops),
                Err(Error::TooManyTerms { limit: 0 }),
                "{:?}",
                ops
            );
        }
        assert_eq!(
            wick.normal_order_sector(&[]),
            Err(Error::TooManyTerms { limit: 0 })
        );
    }

    #[test]
    fn test_max_operators() {
        let wick = Wick::new(WickConfig::default().with_max_operators(2));
        assert_eq!(
            wick.normal_order(&[c("a"), c("b"), c("c")]),
            Err(Error::TooManyOperators { len: 3, limit: 2 })
        );
        assert_eq!(
            wick.normal_order_sector(&[c("a"), c("b"), c("c")]),
            Err(Error::TooManyOperators { len: 3, limit: 2 })
        );
    }

    #[test]
    fn test_term_count_bound() {
        assert_eq!(Wick::term_count_bound(&[]), BigUint::from(1u32));
        assert_eq!(Wick::term_count_bound(&[c("p"), cd("p")]), BigUint::from(2u32));
        let ops: Vec<_> = (0..40)
            .map(|i| c(&format!("a{}", i)))
            .chain((0..40).map(|i| cd(&format!("b{}", i))))
            .collect();
        assert_eq!(Wick::term_count_bound(&ops), BigUint::from(1u32) << 1600usize);
    }

    #[test]
    fn test_normal_order_latex() {
        let wick = Wick::default();
        assert_eq!(
            wick.normal_order_latex(r"c_{p,↑} c^\dagger_{q,↑}").unwrap(),
            r"-c^{\dagger}_{q,↑} c_{p,↑}"
        );
        assert_eq!(wick.normal_order_latex("").unwrap(), "1");
    }
}
