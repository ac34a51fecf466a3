//! Combinators over [`Outcome`] values.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::failure::{Failure, Outcome, Reason};

/// Turn a sequence of outcomes into an outcome of a sequence.
///
/// Stops at the first failure; later outcomes are not pulled from the
/// iterator.
///
/// ```rust
/// use vetted::{outcome, Failure};
///
/// let all = outcome::sequence(vec![Ok(1), Ok(2)]);
/// assert_eq!(all, Ok(vec![1, 2]));
///
/// let first_bad = outcome::sequence(vec![Ok(1), Err(Failure::invalid_value("a")), Err(Failure::invalid_value("b"))]);
/// assert_eq!(first_bad.unwrap_err().trail, vec!["a"]);
/// ```
pub fn sequence<T, I>(outcomes: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = Outcome<T>>,
{
    outcomes.into_iter().collect()
}

/// Try `next` when `first` failed.
///
/// `next` returns `None` when it has nothing to offer, in which case the
/// original failure is kept.
pub fn fallback<T, F>(first: Outcome<T>, next: F) -> Outcome<T>
where
    F: FnOnce() -> Option<Outcome<T>>,
{
    match first {
        Ok(value) => Ok(value),
        Err(failure) => next().unwrap_or(Err(failure)),
    }
}

/// Run a collaborator call, converting a panic into a [`Failure`].
///
/// Field modules are user code; a panicking default producer or constructor
/// must surface as `reason` raised by `type_name` instead of unwinding through
/// the caller.
pub fn shielded<T, F>(reason: Reason, type_name: &'static str, call: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(call)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        let failure = Failure::new(reason, type_name);
        warn!(module = type_name, reason = %failure.reason, payload = %message, "collaborator panicked");
        failure
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_keeps_success() {
        let outcome = fallback(Ok(1), || Some(Ok(2)));
        assert_eq!(outcome, Ok(1));
    }

    #[test]
    fn fallback_replaces_failure() {
        let outcome = fallback(Err(Failure::invalid_value("A")), || Some(Ok(2)));
        assert_eq!(outcome, Ok(2));
    }

    #[test]
    fn fallback_without_alternative_keeps_original_failure() {
        let outcome: Outcome<i32> = fallback(Err(Failure::invalid_value("A")), || None);
        assert_eq!(outcome.unwrap_err().trail, vec!["A"]);
    }

    #[test]
    fn shielded_converts_panics() {
        let outcome: Outcome<i32> = shielded(Reason::ValueMissing, "Flaky", || panic!("boom"));
        assert_eq!(outcome, Err(Failure::value_missing("Flaky")));
    }

    #[test]
    fn sequence_of_nothing_is_empty() {
        let outcome: Outcome<Vec<i32>> = sequence(Vec::new());
        assert_eq!(outcome, Ok(vec![]));
    }
}
