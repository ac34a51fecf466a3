// Test: clause syntax combined with argument validation should fail

use vetted_macros::defn;

defn! {
    fn sign(n: validate<i64>) -> Outcome<i64> {
        0 => Ok(0),
        _ => Ok(1),
    }
}

fn main() {}
