//! Declarative validated functions and records.
//!
//! `vetted` generates validation plumbing at build time so application code
//! only states what to check.
//!
//! # Functions
//!
//! [`defn!`] declares functions whose parameters may be destructuring
//! patterns, carry defaults, or be marked `guard<T>` (a precondition checked at
//! the call boundary) or `validate<T>` (the argument runs through
//! [`Validate`] and is rebound to the validated value). Each function
//! registers a [`Signature`] in [`SIGNATURES`].
//!
//! ```rust,ignore
//! use vetted::prelude::*;
//!
//! defn! {
//!     pub fn sign(n: i64) -> i64 {
//!         0 => 0,
//!         n if n < 0 => -1,
//!         _ => 1,
//!     }
//! }
//! ```
//!
//! # Records
//!
//! `#[derive(Record)]` implements [`Record`] and [`Validate`] for a struct
//! whose field types are validator modules, plus a getter and a `with_`
//! setter per field.
//!
//! ```rust,ignore
//! use vetted::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! pub struct Point {
//!     pub x: i64,
//!     pub y: i64,
//! }
//!
//! let point = Point::try_new(&Value::from(serde_json::json!({"x": 1, "y": 2})))?;
//! assert_eq!(*point.with_x(5).x(), 5);
//! ```
//!
//! # Features
//!
//! - `guards` (default): synthesize guards for `guard<T>` parameters.
//! - `validation` (default): emit validation prologues for `validate<T>`
//!   parameters.
//!
//! With a feature disabled the markers are still accepted and unwrapped, but
//! generate nothing.

extern crate self as vetted;

pub mod failure;
pub mod outcome;
pub mod prelude;
pub mod record;
pub mod signature;
pub mod types;
pub mod validate;
pub mod value;

pub use failure::{Failure, Outcome, Reason, raise};
pub use record::{FieldSpec, Record};
pub use signature::{Param, SIGNATURES, Signature, signature, signatures};
pub use validate::{Validate, validate_arg};
pub use value::{Map, Value};

pub use vetted_macros::{Record, defn};

#[doc(hidden)]
pub use linkme;
