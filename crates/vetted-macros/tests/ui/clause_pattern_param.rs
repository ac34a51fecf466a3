// Test: clause syntax with a destructuring parameter should fail

use vetted_macros::defn;

defn! {
    fn swap((a, b)) -> i64 {
        _ => 0,
    }
}

fn main() {}
