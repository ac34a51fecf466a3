//! Structured runtime failures.
//!
//! Every validator, generated record operation and validated function reports
//! rejection through a [`Failure`]: a [`Reason`] paired with a context trail of
//! type handles. The trail is stored root cause first; each enclosing record
//! appends its own handle with [`Failure::within`] as the failure propagates
//! outward, so a deeply nested rejection carries the whole chain of records
//! that contributed to it.
//!
//! # Examples
//!
//! ```rust
//! use vetted::{Failure, Reason};
//!
//! let failure = Failure::invalid_value("Port").within("Server").within("Config");
//! assert_eq!(failure.reason, Reason::InvalidValue);
//! assert_eq!(failure.trail, vec!["Port", "Server", "Config"]);
//! assert_eq!(failure.path(), vec!["Config", "Server", "Port"]);
//! assert_eq!(failure.to_string(), "invalid_value at Config > Server > Port");
//! ```

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Result of a fallible validation or construction step.
pub type Outcome<T> = Result<T, Failure>;

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A value was supplied but did not pass the validity predicate.
    InvalidValue,
    /// No value was supplied and none could be produced.
    ValueMissing,
    /// Recursive construction nested deeper than [`crate::record::MAX_DEPTH`].
    DepthExceeded,
    /// Validator-specific reason.
    Custom(Cow<'static, str>),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::InvalidValue => f.write_str("invalid_value"),
            Reason::ValueMissing => f.write_str("value_missing"),
            Reason::DepthExceeded => f.write_str("depth_exceeded"),
            Reason::Custom(reason) => f.write_str(reason),
        }
    }
}

/// A rejected value together with the chain of types that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at {}", render_path(.trail))]
pub struct Failure {
    /// What went wrong.
    pub reason: Reason,
    /// Contributing type handles, root cause first.
    pub trail: Vec<&'static str>,
}

impl Failure {
    /// Create a failure raised by `type_name`.
    pub fn new(reason: Reason, type_name: &'static str) -> Self {
        Self {
            reason,
            trail: vec![type_name],
        }
    }

    /// `invalid_value` raised by `type_name`.
    pub fn invalid_value(type_name: &'static str) -> Self {
        Self::new(Reason::InvalidValue, type_name)
    }

    /// `value_missing` raised by `type_name`.
    pub fn value_missing(type_name: &'static str) -> Self {
        Self::new(Reason::ValueMissing, type_name)
    }

    /// Validator-specific reason raised by `type_name`.
    pub fn custom(reason: impl Into<Cow<'static, str>>, type_name: &'static str) -> Self {
        Self::new(Reason::Custom(reason.into()), type_name)
    }

    /// Append an enclosing type handle to the trail.
    #[must_use]
    pub fn within(mut self, type_name: &'static str) -> Self {
        self.trail.push(type_name);
        self
    }

    /// The trail read from the outermost type down to the root cause.
    pub fn path(&self) -> Vec<&'static str> {
        self.trail.iter().rev().copied().collect()
    }

    /// The type handle that first rejected the value.
    pub fn root_cause(&self) -> Option<&'static str> {
        self.trail.first().copied()
    }
}

fn render_path(trail: &[&'static str]) -> String {
    trail.iter().rev().copied().collect::<Vec<_>>().join(" > ")
}

/// Abort the current call with `failure` as the panic payload.
///
/// This backs the unwrapping record operations (`new`, `validate`, `update`).
/// Callers that need the structured reason back can catch the unwind and
/// downcast the payload to [`Failure`].
pub fn raise(failure: Failure) -> ! {
    std::panic::panic_any(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_grows_outward() {
        let failure = Failure::value_missing("Leaf").within("Branch");
        assert_eq!(failure.root_cause(), Some("Leaf"));
        assert_eq!(failure.path(), vec!["Branch", "Leaf"]);
    }

    #[test]
    fn custom_reason_renders_verbatim() {
        let failure = Failure::custom("too_short", "Password");
        assert_eq!(failure.to_string(), "too_short at Password");
    }

    #[test]
    fn raise_carries_failure_payload() {
        let payload = std::panic::catch_unwind(|| raise(Failure::invalid_value("Port")))
            .expect_err("raise must unwind");
        let failure = payload.downcast_ref::<Failure>().expect("payload is a Failure");
        assert_eq!(failure.reason, Reason::InvalidValue);
    }
}
