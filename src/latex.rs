//! Rendering term lists as LaTeX.

use crate::term::Term;

/// Renders a sum of terms.
///
/// Terms with a zero coefficient are dropped; an empty sum is `0`.
///
/// ```
/// use wick_rs::latex::to_latex;
/// use wick_rs::operator::Operator;
/// use wick_rs::term::Term;
///
/// let terms = vec![
///     Term::scalar(1),
///     Term::new(-1, vec![Operator::creation("p", "↑"), Operator::annihilation("p", "↑")]),
/// ];
/// assert_eq!(to_latex(&terms), r"1 - c^{\dagger}_{p,↑} c_{p,↑}");
/// ```
pub fn to_latex(terms: &[Term]) -> String {
    let parts: Vec<String> = terms
        .iter()
        .filter(|term| term.coefficient != 0)
        .map(|term| term.to_string())
        .collect();

    if parts.is_empty() {
        return "0".to_string();
    }

    parts.join(" + ").replace(" + -", " - ")
}
