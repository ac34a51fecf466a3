//! Proc-macros for validated functions and records.
//!
//! # Usage
//!
//! ```ignore
//! use vetted::prelude::*;
//!
//! defn! {
//!     /// Integer division by a strictly positive divisor.
//!     pub fn ratio(n: i64, d: guard<PosInteger>) -> i64 {
//!         n / d
//!     }
//!
//!     /// First element of a pair, whatever it holds.
//!     pub fn first((a, _)) -> Value {
//!         a
//!     }
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Record)]
//! #[record(accept_case = "snake")]
//! pub struct Page {
//!     pub pageSize: u32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod codegen;
mod descriptor;
mod guards;
mod parsing;
mod schema;
mod shared;

use parsing::Definitions;
use shared::Settings;

/// Declare functions with patterned, defaulted, guarded and validated
/// parameters.
///
/// # Parameters
///
/// Each parameter is `pattern (: type)? (= default)?`.
///
/// - `x: T`: an ordinary typed parameter.
/// - `x: guard<T>`: `x` has type `T`; when `T` is a refinement alias from
///   `vetted::types` the call panics unless the alias's predicate holds.
/// - `x: validate<T>`: `x` has type `T` and is rebound to
///   `T::from_value(&x.to_value())` before the body runs. A rejected argument
///   returns `Err(From::from(failure))`, so the function must return a
///   `Result` or `Outcome`.
/// - `x = expr`: a default; see below.
/// - Untyped parameters get their type from the pattern:
///   - `x`, `_`, `x @ ...` → `vetted::Value`
///   - `(a, b)` → tuple of the element types
///   - `[a, b, ..]` → `Vec<vetted::Value>`, matched as a slice
///   - `Point { .. }`, `Wrapper(..)` → the named type; `Shape::Circle(..)` → `Shape`
///   - `true`, `7`, `7u8`, `1.5`, `"s"`, `'c'` → `bool`, `i64`, `u8`, `f64`, `&str`, `char`
///
/// # Bodies
///
/// A body of statements runs once its arguments match. A body made of
/// `match` arms is clause syntax: the arms are tried in order against the
/// parameter, or the tuple of parameters, and the first match wins.
///
/// # Defaults
///
/// A function with defaults also gets a `macro_rules!` of the same name that
/// accepts any argument count from the number of required parameters up to
/// the full count. Supplied arguments fill required parameters first, then
/// defaulted ones left to right.
///
/// # Registration
///
/// Every function registers a `vetted::Signature` in `vetted::SIGNATURES`.
///
/// # Examples
///
/// ```rust,ignore
/// use vetted::prelude::*;
///
/// defn! {
///     pub fn describe(n: i64) -> &'static str {
///         0 => "zero",
///         n if n < 0 => "negative",
///         _ => "positive",
///     }
///
///     pub fn charge(amount: validate<Cents>, fee: i64 = 30) -> Outcome<i64> {
///         Ok(amount.0 + fee)
///     }
/// }
///
/// assert_eq!(describe(-4), "negative");
/// assert_eq!(charge!(Cents(100)), Ok(130));
/// ```
///
/// # Errors
///
/// Compile-time errors are emitted when:
/// - an untyped pattern has no inferable type (`cannot infer type`)
/// - a guard, validation or default targets a pattern that is not a variable
///   (`parameter is not a var`)
/// - clause syntax is combined with guards, validation or defaults
/// - validation is requested without a `Result`-like return type
#[proc_macro]
pub fn defn(input: TokenStream) -> TokenStream {
    let defs = parse_macro_input!(input as Definitions);

    match codegen::function::expand_definitions(&defs, Settings::from_features()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Derive `vetted::Record` and `vetted::Validate` for a struct whose field
/// types are validator modules.
///
/// # Attributes
///
/// - `#[record(accept_case = "...")]`: also accept input keys spelled in
///   `lower_camel`, `upper_camel`, `snake` or `upper` (upper snake) case.
///   `none` is the default.
/// - `#[record(recursive)]`: resolve missing or invalid fields with the field
///   type's own constructor.
///
/// # Generated items
///
/// - `impl Validate`, so records nest as fields of other records
/// - `impl Record`: `try_new`, `try_validate`, `try_update`, `to_map`,
///   `is_valid`, and the field table
/// - a getter `field(&self) -> &T` and a setter `with_field(&self, T) -> Self`
///   per field
///
/// Every type parameter is bounded by `Validate + Clone` in the generated
/// impls.
///
/// # Errors
///
/// Compile-time errors are emitted when:
/// - the item is not a struct with named fields
/// - `accept_case` names an unknown convention
/// - two fields accept the same key spelling
/// - a field is named after a record operation (`new`, `validate`, `update`,
///   `is_valid`, `matches` and the other `Record`/`Validate` methods), since its
///   getter would shadow the operation
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match schema::build(&input) {
        Ok(schema) => codegen::record::generate_record(&input, &schema).into(),
        Err(e) => e.to_compile_error().into(),
    }
}
