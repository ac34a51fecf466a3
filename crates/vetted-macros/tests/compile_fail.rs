//! Compile-fail tests for `defn!` and `#[derive(Record)]`
//!
//! These tests verify that the macros reject invalid definitions with a
//! spanned error.

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
