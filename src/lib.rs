//! # wick-rs: normal ordering of fermionic operators
//!
//! **`wick-rs`** rewrites a product of fermionic creation and annihilation
//! operators into a signed sum of **normal-ordered** operator strings, using
//! nothing but the canonical anticommutation relation
//!
//! ```text
//! c_{k,s} c^\dagger_{q,s} = δ_{kq} - c^\dagger_{q,s} c_{k,s}
//! ```
//!
//! The result is the Wick expansion of the input: every way of contracting
//! matching pairs shows up as its own term, with the sign picked up from the
//! transpositions that produced it.
//!
//! ## Key Features
//!
//! - **Sectors**: operators of different spin never contract, so each spin sector is
//!   expanded on its own and the results are multiplied back together.
//! - **Allocation-light recursion**: the expansion works in place on a single buffer
//!   and allocates only the resulting terms.
//! - **Resource limits**: the number of operators and generated terms can be capped
//!   through [`WickConfig`][crate::wick::WickConfig], since the expansion grows as
//!   `2^k` in the number of inversions `k`.
//! - **Text adapters**: a parser for the `c_{k,↑}` / `c^\dagger_k↓` notation and a LaTeX renderer.
//!
//! ## Basic Usage
//!
//! ```rust
//! use wick_rs::operator::Operator;
//! use wick_rs::latex::to_latex;
//! use wick_rs::wick::Wick;
//!
//! let wick = Wick::default();
//!
//! // c_{p,↑} c^\dagger_{p,↑} c_{q,↑}
//! let ops = vec![
//!     Operator::annihilation("p", "↑"),
//!     Operator::creation("p", "↑"),
//!     Operator::annihilation("q", "↑"),
//! ];
//!
//! let terms = wick.normal_order(&ops).unwrap();
//! assert_eq!(terms.len(), 2);
//! assert_eq!(to_latex(&terms), r"c_{q,↑} - c^{\dagger}_{p,↑} c_{p,↑} c_{q,↑}");
//! ```
//!
//! ## Core Components
//!
//! - **[`wick`]**: the [`Wick`][crate::wick::Wick] manager and the normal-ordering recursion.
//! - **[`sector`]**: splitting by spin and recombining per-sector results.
//! - **[`parse`]** and **[`latex`]**: text in, text out.

pub mod error;
pub mod latex;
pub mod operator;
pub mod parse;
pub mod sector;
pub mod term;
pub mod types;
pub mod wick;
