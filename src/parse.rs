//! Text and tuple adapters producing operator strings.
//!
//! # Operator notation
//!
//! ```text
//! c_{p1,↑}            braced annihilation operator
//! c^\dagger_{p1,↑}    braced creation operator
//! c^{\dagger}_{p1,↑}  creation operator as rendered by the LaTeX adapter
//! c_p1↑               compact forms, spin token glued to the momentum
//! c^\dagger_p1↑
//! ```
//!
//! Momenta are word tokens (`[A-Za-z0-9_]+`, Unicode letters allowed), spins
//! are `↑` or `↓`. Both forms can be mixed in one input; operator order is
//! kept as written.
//!
//! # Sums
//!
//! [`parse_terms`] reads back the output of [`to_latex`][crate::latex::to_latex]:
//!
//! ```text
//! 1 - c^{\dagger}_{p,↑} c_{p,↑} + 2 c_{q,↓}
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParseError;
use crate::operator::Operator;
use crate::term::Term;
use crate::types::{Kind, Label, SPIN_DOWN, SPIN_UP};

/// How to treat text that is not an operator.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ParseMode {
    /// Any unrecognized or malformed text is a [`ParseError`].
    Strict,
    /// Unrecognized or malformed text is skipped.
    #[default]
    Lenient,
}

fn operator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?P<marker>c\^\{\\dagger\}|c\^\\dagger|c)_(?:\{(?P<bmom>[^,{}]*),(?P<bspin>[^{}]*)\}|(?P<cmom>\w+)(?P<cspin>[↑↓]))",
        )
        .expect("operator pattern is valid")
    })
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+$").expect("word pattern is valid"))
}

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+[+-]\s+").expect("separator pattern is valid"))
}

/// Parses an operator string.
///
/// ```
/// use wick_rs::operator::Operator;
/// use wick_rs::parse::{parse_operators, ParseMode};
///
/// let ops = parse_operators(r"c_{p1,↑} c^\dagger_p2↓", ParseMode::Strict).unwrap();
/// assert_eq!(ops, vec![Operator::annihilation("p1", "↑"), Operator::creation("p2", "↓")]);
/// ```
pub fn parse_operators(expr: &str, mode: ParseMode) -> Result<Vec<Operator>, ParseError> {
    parse_operators_at(expr, mode, 0)
}

/// Same as [`parse_operators`], reporting positions shifted by `base`.
fn parse_operators_at(expr: &str, mode: ParseMode, base: usize) -> Result<Vec<Operator>, ParseError> {
    let mut ops = Vec::new();
    let mut last = 0;
    let mut at = 0;

    while let Some(caps) = operator_regex().captures_at(expr, at) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if mode == ParseMode::Strict {
            check_gap(&expr[last..whole.start()], base + last)?;
        }
        last = whole.end();
        at = whole.end();

        let kind = match caps.name("marker").map(|m| m.as_str()) {
            Some("c") => Kind::Annihilation,
            _ => Kind::Creation,
        };

        if let (Some(momentum), Some(spin)) = (caps.name("cmom"), caps.name("cspin")) {
            ops.push(Operator::new(kind, momentum.as_str(), spin.as_str()));
            continue;
        }

        let (Some(momentum), Some(spin)) = (caps.name("bmom"), caps.name("bspin")) else {
            continue;
        };
        if !word_regex().is_match(momentum.as_str()) {
            if mode == ParseMode::Strict {
                return Err(ParseError::MalformedIndex {
                    position: base + momentum.start(),
                    text: momentum.as_str().to_string(),
                });
            }
            // Rejected span may still contain operators: retry one byte later.
            at = whole.start() + 1;
            continue;
        }
        if !is_spin(spin.as_str()) {
            if mode == ParseMode::Strict {
                return Err(ParseError::UnsupportedSpin {
                    position: base + spin.start(),
                    spin: spin.as_str().to_string(),
                });
            }
            at = whole.start() + 1;
            continue;
        }
        ops.push(Operator::new(kind, momentum.as_str(), spin.as_str()));
    }

    if mode == ParseMode::Strict {
        check_gap(&expr[last..], base + last)?;
    }

    Ok(ops)
}

fn is_spin(token: &str) -> bool {
    token == SPIN_UP || token == SPIN_DOWN
}

fn check_gap(gap: &str, position: usize) -> Result<(), ParseError> {
    let trimmed = gap.trim_start();
    if trimmed.is_empty() {
        return Ok(());
    }
    Err(ParseError::Unrecognized {
        position: position + (gap.len() - trimmed.len()),
        text: trimmed.trim_end().to_string(),
    })
}

/// Builds operators from `(is_creation, momentum, spin)` tuples, one per tuple.
///
/// ```
/// use wick_rs::operator::Operator;
/// use wick_rs::parse::from_tuples;
///
/// let ops = from_tuples([(false, "p1", "↑"), (true, "p2", "↓")]);
/// assert_eq!(ops, vec![Operator::annihilation("p1", "↑"), Operator::creation("p2", "↓")]);
/// ```
pub fn from_tuples<I, M, S>(tuples: I) -> Vec<Operator>
where
    I: IntoIterator<Item = (bool, M, S)>,
    M: Into<Label>,
    S: Into<Label>,
{
    tuples
        .into_iter()
        .map(|(is_creation, momentum, spin)| Operator::new(Kind::from(is_creation), momentum, spin))
        .collect()
}

/// Parses a rendered sum of terms back into a term list.
///
/// The literal `0` is the empty sum. Operators are parsed in strict mode.
pub fn parse_terms(expr: &str) -> Result<Vec<Term>, ParseError> {
    let trimmed = expr.trim();
    let offset = expr.len() - expr.trim_start().len();
    if trimmed == "0" {
        return Ok(Vec::new());
    }

    let mut terms = Vec::new();
    let mut sign = 1;
    let mut start = 0;
    for sep in separator_regex().find_iter(trimmed) {
        terms.push(parse_summand(&trimmed[start..sep.start()], offset + start, sign)?);
        sign = if sep.as_str().trim() == "-" { -1 } else { 1 };
        start = sep.end();
    }
    terms.push(parse_summand(&trimmed[start..], offset + start, sign)?);

    Ok(terms)
}

fn parse_summand(text: &str, position: usize, sign: i64) -> Result<Term, ParseError> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let rest_position = position + (text.len() - rest.len());

    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let ops_text = &rest[digits..];
    if digits == 0 && ops_text.trim().is_empty() {
        return Err(ParseError::MissingTerm { position });
    }

    // Both signs are applied before narrowing, so `i64::MIN` reads back.
    let literal = &text[..text.len() - rest.len() + digits];
    let invalid = || ParseError::Coefficient {
        position,
        text: literal.to_string(),
    };
    let magnitude = if digits == 0 {
        1
    } else {
        rest[..digits].parse::<u64>().map_err(|_| invalid())?
    };
    let magnitude = if negative { -i128::from(magnitude) } else { i128::from(magnitude) };
    let value = i128::from(sign) * magnitude;
    let coefficient = i64::try_from(value).map_err(|_| invalid())?;

    let operators = parse_operators_at(ops_text, ParseMode::Strict, rest_position + digits)?;
    Ok(Term::new(coefficient, operators))
}
