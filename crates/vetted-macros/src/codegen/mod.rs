//! Code generation for `defn!` and `#[derive(Record)]`.
//!
//! This module contains the function assembler (direct, guarded and clause
//! shapes), signature registration, companion default macros, and record
//! operations.

pub(crate) mod defaults;
pub(crate) mod function;
pub(crate) mod record;
pub(crate) mod signature;
