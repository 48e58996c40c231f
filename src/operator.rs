use std::fmt::{Display, Formatter};

use crate::types::{Kind, Label};

/// A single fermionic ladder operator, `c^\dagger_{k,s}` or `c_{k,s}`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Operator {
    pub kind: Kind,
    pub momentum: Label,
    pub spin: Label,
}

/// An ordered product of operators.
pub type OperatorString = Vec<Operator>;

impl Operator {
    pub fn new(kind: Kind, momentum: impl Into<Label>, spin: impl Into<Label>) -> Self {
        Self {
            kind,
            momentum: momentum.into(),
            spin: spin.into(),
        }
    }

    pub fn creation(momentum: impl Into<Label>, spin: impl Into<Label>) -> Self {
        Self::new(Kind::Creation, momentum, spin)
    }

    pub fn annihilation(momentum: impl Into<Label>, spin: impl Into<Label>) -> Self {
        Self::new(Kind::Annihilation, momentum, spin)
    }

    pub fn is_creation(&self) -> bool {
        self.kind.is_creation()
    }

    pub fn is_annihilation(&self) -> bool {
        self.kind.is_annihilation()
    }

    /// Whether the two operators contract: same momentum, opposite kinds.
    ///
    /// Spin is not compared, pairing only ever happens inside one sector.
    pub fn is_pairable(&self, other: &Operator) -> bool {
        self.momentum == other.momentum && self.kind != other.kind
    }

    /// Returns the Hermitian adjoint (same labels, flipped kind).
    pub fn adjoint(&self) -> Self {
        Self {
            kind: self.kind.flip(),
            momentum: self.momentum.clone(),
            spin: self.spin.clone(),
        }
    }

    /// Renders the operator as LaTeX, e.g. `c^{\dagger}_{p,↑}`.
    pub fn to_latex(&self) -> String {
        match self.kind {
            Kind::Creation => format!("c^{{\\dagger}}_{{{},{}}}", self.momentum, self.spin),
            Kind::Annihilation => format!("c_{{{},{}}}", self.momentum, self.spin),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{{{},{}}}", self.kind, self.momentum, self.spin)
    }
}

/// Checks that no annihilation operator precedes a creation operator of the same spin.
pub fn is_normal_ordered(ops: &[Operator]) -> bool {
    count_inversions(ops) == 0
}

/// Number of (annihilation, creation) pairs, annihilation first, sharing a spin label.
pub fn count_inversions(ops: &[Operator]) -> usize {
    let mut count = 0;
    for (i, a) in ops.iter().enumerate() {
        if a.is_annihilation() {
            count += ops[i + 1..]
                .iter()
                .filter(|b| b.is_creation() && b.spin == a.spin)
                .count();
        }
    }
    count
}
