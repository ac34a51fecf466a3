//! Refinement aliases recognized by guard synthesis.
//!
//! Each alias is an ordinary Rust type; the name is what `defn!` keys on when
//! a parameter is declared `guard<Alias>`. Writing the alias without the
//! marker is just the underlying type.
//!
//! | Alias | Underlying | Guard |
//! |-------|------------|-------|
//! | [`PosInteger`] | `i64` | `x > 0` |
//! | [`NonNegInteger`] | `i64` | `x >= 0` |
//! | [`NegInteger`] | `i64` | `x < 0` |
//! | [`Byte`], [`Arity`] | `i64` | `0..=255` |
//! | [`Char`] | `i64` | `0..=0x10FFFF` |
//! | [`Finite`] | `f64` | `x.is_finite()` |
//! | [`NonEmptyString`] | `String` | `!x.is_empty()` |
//! | [`NonEmptyList`] | `Vec<T>` | `!x.is_empty()` |

pub type PosInteger = i64;
pub type NonNegInteger = i64;
pub type NegInteger = i64;
pub type Byte = i64;
pub type Arity = i64;
/// A Unicode code point as an integer.
pub type Char = i64;
pub type Finite = f64;
pub type NonEmptyString = String;
pub type NonEmptyList<T> = Vec<T>;
