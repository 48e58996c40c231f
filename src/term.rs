use std::fmt::{Display, Formatter};

use crate::operator::{Operator, OperatorString};

/// A signed operator string: `coefficient * operators`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Term {
    pub coefficient: i64,
    pub operators: OperatorString,
}

impl Term {
    pub fn new(coefficient: i64, operators: OperatorString) -> Self {
        Self {
            coefficient,
            operators,
        }
    }

    /// A term with no operators.
    pub fn scalar(coefficient: i64) -> Self {
        Self::new(coefficient, Vec::new())
    }

    pub fn is_scalar(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.coefficient, self.operators.clone())
    }

    /// Product of two terms: coefficients multiply, `self`'s operators come first.
    ///
    /// Returns `None` if the coefficient overflows `i64`.
    pub fn checked_product(&self, other: &Term) -> Option<Self> {
        let coefficient = self.coefficient.checked_mul(other.coefficient)?;
        let mut operators = Vec::with_capacity(self.operators.len() + other.operators.len());
        operators.extend_from_slice(&self.operators);
        operators.extend_from_slice(&other.operators);
        Some(Self::new(coefficient, operators))
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }
}

impl From<OperatorString> for Term {
    fn from(operators: OperatorString) -> Self {
        Self::new(1, operators)
    }
}

impl Display for Term {
    /// Same notation as [`to_latex`][crate::latex::to_latex] uses for a single term.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ops = self
            .operators
            .iter()
            .map(|op| op.to_latex())
            .collect::<Vec<_>>()
            .join(" ");
        if self.operators.is_empty() {
            write!(f, "{}", self.coefficient)
        } else if self.coefficient == 1 {
            write!(f, "{}", ops)
        } else if self.coefficient == -1 {
            write!(f, "-{}", ops)
        } else {
            write!(f, "{} {}", self.coefficient, ops)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let t = Term::scalar(1);
        assert!(t.is_scalar());
        assert_eq!(t.len(), 0);
        assert_eq!(t.to_string(), "1");
        assert_eq!(Term::scalar(-1).to_string(), "-1");
    }

    #[test]
    fn test_product() {
        let a = Term::new(-1, vec![Operator::creation("p", "↑")]);
        let b = Term::new(-1, vec![Operator::annihilation("q", "↓")]);
        let ab = a.checked_product(&b).unwrap();
        assert_eq!(ab.coefficient, 1);
        assert_eq!(
            ab.operators,
            vec![Operator::creation("p", "↑"), Operator::annihilation("q", "↓")]
        );
        let ba = b.checked_product(&a).unwrap();
        assert_eq!(ba.operators[0], Operator::annihilation("q", "↓"));
    }

    #[test]
    fn test_product_overflow() {
        let big = Term::new(i64::MAX, vec![Operator::creation("p", "↑")]);
        assert_eq!(big.checked_product(&Term::scalar(2)), None);
        assert_eq!(Term::scalar(i64::MIN).checked_product(&Term::scalar(-1)), None);
        assert_eq!(
            big.checked_product(&Term::scalar(-1)),
            Some(Term::new(-i64::MAX, vec![Operator::creation("p", "↑")]))
        );
    }

    #[test]
    fn test_negated() {
        let t = Term::from(vec![Operator::creation("p", "↑")]);
        assert_eq!(t.coefficient, 1);
        assert_eq!(t.negated().coefficient, -1);
        assert_eq!(t.negated().operators, t.operators);
    }

    #[test]
    fn test_display() {
        let ops = vec![Operator::creation("p", "↑"), Operator::annihilation("q", "↑")];
        assert_eq!(
            Term::new(1, ops.clone()).to_string(),
            "c^{\\dagger}_{p,↑} c_{q,↑}"
        );
        assert_eq!(
            Term::new(-1, ops.clone()).to_string(),
            "-c^{\\dagger}_{p,↑} c_{q,↑}"
        );
        assert_eq!(Term::new(3, ops).to_string(), "3 c^{\\dagger}_{p,↑} c_{q,↑}");
    }
}
