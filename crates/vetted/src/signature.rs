//! Function signature registry.
//!
//! Every function produced by `defn!` registers a [`Signature`] describing its
//! parameters, return type and type-variable constraints. Registration uses
//! [`linkme::distributed_slice`]:
//!
//! 1. `defn!` emits a static `Signature` tagged with `#[distributed_slice(SIGNATURES)]`
//! 2. At link time, all registrations are collected into [`SIGNATURES`]
//! 3. At runtime, [`signature`] looks a function up by name
//!
//! Functions may therefore be declared anywhere, including downstream crates,
//! and still be discoverable.
//!
//! # Example Lookup
//!
//! ```ignore
//! vetted::defn! {
//!     pub fn area(w: f64, h: f64 = 1.0) -> f64 { w * h }
//! }
//!
//! let sig = vetted::signature("area").unwrap();
//! assert_eq!(sig.to_string(), "fn area(w: f64, h: f64 = 1.0) -> f64");
//! ```

use std::fmt;

use linkme::distributed_slice;

/// One declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Binding pattern as written.
    pub binding: &'static str,
    /// Declared type, or the type inferred from the binding.
    pub ty: &'static str,
    /// Default value expression, if any.
    pub default: Option<&'static str>,
    /// A guard is checked at the call boundary.
    pub guard: bool,
    /// The argument runs through its type's validator.
    pub validate: bool,
}

/// Type declaration of a generated function.
#[derive(Debug)]
pub struct Signature {
    /// `module_path!()` of the declaring module.
    pub module: &'static str,
    pub name: &'static str,
    pub params: &'static [Param],
    pub returns: &'static str,
    /// `(type variable, bound)` pairs, sorted by type variable.
    pub constraints: &'static [(&'static str, &'static str)],
    /// Number of clauses; 1 for a block body.
    pub clauses: usize,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Number of parameters without a default.
    pub fn required_arity(&self) -> usize {
        self.params.iter().filter(|p| p.default.is_none()).count()
    }

    /// `module::name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}", self.name)?;
        if !self.constraints.is_empty() {
            f.write_str("<")?;
            for (i, (var, bound)) in self.constraints.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{var}: {bound}")?;
            }
            f.write_str(">")?;
        }
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.binding, param.ty)?;
            if let Some(default) = param.default {
                write!(f, " = {default}")?;
            }
        }
        write!(f, ") -> {}", self.returns)
    }
}

/// Distributed slice collecting all function signatures.
///
/// Populated at link time by `defn!`.
#[distributed_slice]
pub static SIGNATURES: [Signature];

/// All registered signatures.
pub fn signatures() -> impl Iterator<Item = &'static Signature> {
    SIGNATURES.iter()
}

/// Look up a signature by bare or module-qualified name.
pub fn signature(name: &str) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|sig| {
        sig.name == name
            || name
                .strip_suffix(sig.name)
                .and_then(|prefix| prefix.strip_suffix("::"))
                .is_some_and(|module| module == sig.module)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Registered via the slice directly
    #[distributed_slice(SIGNATURES)]
    static TEST_CLAMP: Signature = Signature {
        module: "vetted::signature::tests",
        name: "test_clamp",
        params: &[
            Param {
                binding: "x",
                ty: "T",
                default: None,
                guard: false,
                validate: false,
            },
            Param {
                binding: "lo",
                ty: "T",
                default: Some("0"),
                guard: false,
                validate: false,
            },
        ],
        returns: "T",
        constraints: &[("T", "PartialOrd")],
        clauses: 1,
    };

    #[test]
    fn test_lookup() {
        assert!(signature("test_clamp").is_some());
        assert!(signature("vetted::signature::tests::test_clamp").is_some());
        assert!(signature("other::test_clamp").is_none());
        assert!(signature("nonexistent").is_none());
    }

    #[test]
    fn test_arity() {
        let sig = signature("test_clamp").unwrap();
        assert_eq!(sig.arity(), 2);
        assert_eq!(sig.required_arity(), 1);
    }

    #[test]
    fn test_display() {
        let sig = signature("test_clamp").unwrap();
        assert_eq!(
            sig.to_string(),
            "fn test_clamp<T: PartialOrd>(x: T, lo: T = 0) -> T"
        );
    }
}
