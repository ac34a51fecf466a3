//! The validator capability.
//!
//! A type that can back a record field or a `validate<T>` parameter implements
//! [`Validate`]. The trait bundles the capability set a field module offers:
//! a type handle, a validity predicate that may also normalize, an optional
//! default producer and an optional single-argument constructor.
//!
//! # Examples
//!
//! ```rust
//! use vetted::{Failure, Outcome, Validate, Value};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Percent(i64);
//!
//! impl Validate for Percent {
//!     const TYPE: &'static str = "Percent";
//!
//!     fn from_value(value: &Value) -> Outcome<Self> {
//!         match value.as_int() {
//!             Some(n) if (0..=100).contains(&n) => Ok(Percent(n)),
//!             _ => Err(Failure::invalid_value(Self::TYPE)),
//!         }
//!     }
//!
//!     fn to_value(&self) -> Value {
//!         Value::Int(self.0)
//!     }
//!
//!     fn default_value() -> Option<Self> {
//!         Some(Percent(0))
//!     }
//! }
//!
//! assert_eq!(Percent::from_value(&Value::Int(42)), Ok(Percent(42)));
//! assert!(!Percent(140).conforms());
//! ```

use tracing::trace;

use crate::failure::{Failure, Outcome};
use crate::outcome;
use crate::value::{Map, Value};

/// Capability set of a validator module.
pub trait Validate: Sized {
    /// Type handle recorded in failure trails.
    const TYPE: &'static str;

    /// Validity predicate: accept `value`, possibly normalized, or reject it.
    fn from_value(value: &Value) -> Outcome<Self>;

    /// Convert back into a dynamic value.
    fn to_value(&self) -> Value;

    /// Value used when a record input omits the field.
    fn default_value() -> Option<Self> {
        None
    }

    /// Build a value from raw input after validation rejected it or the
    /// input was missing. `None` means the module has no constructor.
    fn construct(value: &Value) -> Option<Outcome<Self>> {
        let _ = value;
        None
    }

    /// Whether an existing value still passes the validity predicate.
    fn conforms(&self) -> bool {
        Self::from_value(&self.to_value()).is_ok()
    }
}

/// Validate a typed function argument through its type's validator.
///
/// Generated validation prologues call this and rebind the result to the
/// parameter name.
pub fn validate_arg<T: Validate>(value: T) -> Outcome<T> {
    trace!(module = T::TYPE, "validating argument");
    T::from_value(&value.to_value())
}

impl Validate for Value {
    const TYPE: &'static str = "any";

    fn from_value(value: &Value) -> Outcome<Self> {
        Ok(value.clone())
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Validate for bool {
    const TYPE: &'static str = "bool";

    fn from_value(value: &Value) -> Outcome<Self> {
        value
            .as_bool()
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Validate for i64 {
    const TYPE: &'static str = "i64";

    fn from_value(value: &Value) -> Outcome<Self> {
        value
            .as_int()
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

macro_rules! narrow_int_validator {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Validate for $ty {
                const TYPE: &'static str = $name;

                fn from_value(value: &Value) -> Outcome<Self> {
                    value
                        .as_int()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| Failure::invalid_value(Self::TYPE))
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

/// Unsigned types wider than `Value::Int`. Values above `i64::MAX` travel as
/// their decimal text so they round-trip without loss.
macro_rules! wide_int_validator {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Validate for $ty {
                const TYPE: &'static str = $name;

                fn from_value(value: &Value) -> Outcome<Self> {
                    let parsed = match value {
                        Value::Int(n) => <$ty>::try_from(*n).ok(),
                        Value::Text(text) => text
                            .parse::<$ty>()
                            .ok()
                            .filter(|n| i64::try_from(*n).is_err()),
                        _ => None,
                    };
                    parsed.ok_or_else(|| Failure::invalid_value(Self::TYPE))
                }

                fn to_value(&self) -> Value {
                    i64::try_from(*self).map_or_else(|_| Value::Text(self.to_string()), Value::Int)
                }
            }
        )*
    };
}

narrow_int_validator! {
    i32 => "i32",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
}

wide_int_validator! {
    u64 => "u64",
    usize => "usize",
}

impl Validate for f64 {
    const TYPE: &'static str = "f64";

    /// Integers are widened.
    fn from_value(value: &Value) -> Outcome<Self> {
        value
            .as_float()
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Validate for String {
    const TYPE: &'static str = "String";

    fn from_value(value: &Value) -> Outcome<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Validate for char {
    const TYPE: &'static str = "char";

    fn from_value(value: &Value) -> Outcome<Self> {
        let mut chars = value.as_str().unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Failure::invalid_value(Self::TYPE)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: Validate> Validate for Vec<T> {
    const TYPE: &'static str = "list";

    fn from_value(value: &Value) -> Outcome<Self> {
        let items = value
            .as_seq()
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))?;
        outcome::sequence(items.iter().map(T::from_value))
            .map_err(|failure| failure.within(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }
}

impl<T: Validate> Validate for Option<T> {
    const TYPE: &'static str = "option";

    fn from_value(value: &Value) -> Outcome<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Nil, T::to_value)
    }

    fn default_value() -> Option<Self> {
        Some(None)
    }
}

impl Validate for Map {
    const TYPE: &'static str = "map";

    fn from_value(value: &Value) -> Outcome<Self> {
        value
            .as_map()
            .cloned()
            .ok_or_else(|| Failure::invalid_value(Self::TYPE))
    }

    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }
}
