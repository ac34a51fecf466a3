//! Common imports for declaring functions and records.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vetted::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! #[record(accept_case = "snake")]
//! pub struct Page {
//!     pub pageSize: u32,
//! }
//!
//! defn! {
//!     pub fn first(page: guard<NonNegInteger>) -> NonNegInteger { page }
//! }
//! ```

pub use crate::types::*;
pub use crate::{
    Failure, FieldSpec, Map, Outcome, Reason, Record, Signature, Validate, Value, defn, raise,
};
