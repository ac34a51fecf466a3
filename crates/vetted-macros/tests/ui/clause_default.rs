// Test: clause syntax combined with a default should fail

use vetted_macros::defn;

defn! {
    fn sign(n: i64 = 0) -> i64 {
        0 => 0,
        _ => 1,
    }
}

fn main() {}
