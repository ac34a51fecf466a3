//! Record operations.
//!
//! `#[derive(Record)]` generates thin per-type code: a field table
//! ([`Record::FIELDS`]) and struct literals whose field initializers call
//! [`construct_field`], [`validate_field`] or [`update_field`]. The lookup,
//! fallback and trail-annotation logic lives here so every record shares one
//! implementation.
//!
//! # Field resolution
//!
//! For each field the accepted keys are tried in order against the input.
//!
//! | Operation | Hit | Miss |
//! |-----------|-----|------|
//! | construct | validate; if invalid and recursive, the field module's constructor on the raw value | default; else if recursive, constructor on an empty map; else `value_missing` |
//! | validate | validate | validate `Nil`, reported as `value_missing` |
//! | update | as construct | keep the current value |
//!
//! A failure is annotated with the record's type handle before it is
//! returned, so nested records accumulate a trail.
//!
//! Collaborator calls (default producers, constructors) run inside
//! [`outcome::shielded`], and recursive construction is bounded per thread by
//! [`MAX_DEPTH`].

use std::cell::Cell;

use tracing::{debug, trace};

use crate::failure::{Failure, Outcome, Reason, raise};
use crate::outcome;
use crate::validate::Validate;
use crate::value::{Map, Value};

/// Maximum nesting of recursive field construction on one thread.
pub const MAX_DEPTH: usize = 64;

/// One field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared.
    pub name: &'static str,
    /// Type handle of the field's validator module.
    pub module: &'static str,
    /// Accepted input keys, canonical spelling first.
    pub keys: &'static [&'static str],
}

/// A validated record type, implemented by `#[derive(Record)]`.
pub trait Record: Validate + Clone {
    /// Field table in declaration order.
    const FIELDS: &'static [FieldSpec];
    /// Whether missing or invalid fields fall back to the field module's
    /// constructor.
    const RECURSIVE: bool;

    /// Construct from key-value input, filling gaps from field modules.
    fn try_new(input: &Value) -> Outcome<Self>;

    /// Validate key-value input without defaults or fallbacks.
    fn try_validate(input: &Value) -> Outcome<Self>;

    /// A copy of `self` with the fields present in `input` replaced.
    fn try_update(&self, input: &Value) -> Outcome<Self>;

    /// Field values keyed by canonical field name.
    fn to_map(&self) -> Map;

    /// Whether every field still passes its validity predicate.
    fn is_valid(&self) -> bool;

    /// [`Record::try_new`], raising the failure.
    fn new(input: &Value) -> Self {
        Self::try_new(input).unwrap_or_else(|failure| raise(failure))
    }

    /// [`Record::try_validate`], raising the failure.
    fn validate(input: &Value) -> Self {
        Self::try_validate(input).unwrap_or_else(|failure| raise(failure))
    }

    /// [`Record::try_update`], raising the failure.
    fn update(&self, input: &Value) -> Self {
        self.try_update(input).unwrap_or_else(|failure| raise(failure))
    }

    /// Whether `value` validates as this record. Never raises.
    fn matches(value: &Value) -> bool {
        Self::try_validate(value).is_ok_and(|record| record.is_valid())
    }
}

/// Find the first non-nil value stored under any of `keys`.
///
/// `input` is a map or a list of `(key, value)` pairs; any other value has no
/// entries.
pub fn lookup<'a>(input: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| entry(input, key))
        .find(|value| !value.is_nil())
}

fn entry<'a>(input: &'a Value, key: &str) -> Option<&'a Value> {
    match input {
        Value::Map(map) => map.get(key),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .filter_map(Value::as_pair)
            .find_map(|(k, value)| (k == key).then_some(value)),
        _ => None,
    }
}

/// Reject input that is neither a map nor a list of pairs.
pub fn ensure_entries<R: Record>(input: &Value) -> Outcome<()> {
    let well_formed = match input {
        Value::Map(_) => true,
        Value::List(items) => items.iter().all(|item| item.as_pair().is_some()),
        _ => false,
    };
    if well_formed {
        Ok(())
    } else {
        debug!(record = R::TYPE, kind = input.kind(), "input is not key-value");
        Err(Failure::invalid_value(R::TYPE))
    }
}

/// Resolve one field for [`Record::try_new`].
pub fn construct_field<R: Record, T: Validate>(input: &Value, spec: &FieldSpec) -> Outcome<T> {
    let resolved = match lookup(input, spec.keys) {
        Some(raw) => supplied::<R, T>(raw, spec),
        None => missing::<R, T>(spec),
    };
    resolved.map_err(|failure| rejected::<R>(spec, failure))
}

/// Resolve one field for [`Record::try_validate`].
pub fn validate_field<R: Record, T: Validate>(input: &Value, spec: &FieldSpec) -> Outcome<T> {
    let resolved = match lookup(input, spec.keys) {
        Some(raw) => T::from_value(raw),
        None => T::from_value(&Value::Nil).map_err(|_| Failure::value_missing(T::TYPE)),
    };
    resolved.map_err(|failure| rejected::<R>(spec, failure))
}

/// Resolve one field for [`Record::try_update`]; absent keys keep `current`.
pub fn update_field<R: Record, T: Validate + Clone>(
    input: &Value,
    spec: &FieldSpec,
    current: &T,
) -> Outcome<T> {
    match lookup(input, spec.keys) {
        Some(raw) => supplied::<R, T>(raw, spec).map_err(|failure| rejected::<R>(spec, failure)),
        None => Ok(current.clone()),
    }
}

fn supplied<R: Record, T: Validate>(raw: &Value, spec: &FieldSpec) -> Outcome<T> {
    trace!(record = R::TYPE, field = spec.name, "validating supplied value");
    let validated = T::from_value(raw);
    if !R::RECURSIVE {
        return validated;
    }
    outcome::fallback(validated, || {
        trace!(record = R::TYPE, field = spec.name, "falling back to constructor");
        nested::<T>(raw, Reason::InvalidValue)
    })
}

fn missing<R: Record, T: Validate>(spec: &FieldSpec) -> Outcome<T> {
    trace!(record = R::TYPE, field = spec.name, "field missing, asking for default");
    match outcome::shielded(Reason::ValueMissing, T::TYPE, T::default_value) {
        Ok(Some(value)) => Ok(value),
        Ok(None) if R::RECURSIVE => {
            trace!(record = R::TYPE, field = spec.name, "no default, constructing from empty input");
            nested::<T>(&Value::Map(Map::new()), Reason::ValueMissing)
                .unwrap_or_else(|| Err(Failure::value_missing(T::TYPE)))
        }
        Ok(None) => Err(Failure::value_missing(T::TYPE)),
        Err(failure) => Err(failure),
    }
}

/// Call `T::construct` one level deeper, shielding panics as `reason`.
fn nested<T: Validate>(raw: &Value, reason: Reason) -> Option<Outcome<T>> {
    let Some(_depth) = DepthGuard::enter() else {
        debug!(module = T::TYPE, max = MAX_DEPTH, "recursive construction too deep");
        return Some(Err(Failure::new(Reason::DepthExceeded, T::TYPE)));
    };
    match outcome::shielded(reason, T::TYPE, || T::construct(raw)) {
        Ok(constructed) => constructed,
        Err(failure) => Some(Err(failure)),
    }
}

fn rejected<R: Record>(spec: &FieldSpec, failure: Failure) -> Failure {
    debug!(
        record = R::TYPE,
        field = spec.name,
        module = spec.module,
        reason = %failure.reason,
        "field rejected"
    );
    failure.within(R::TYPE)
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Option<Self> {
        DEPTH.with(|depth| {
            let current = depth.get();
            (current < MAX_DEPTH).then(|| {
                depth.set(current + 1);
                DepthGuard
            })
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
