// Test: clause syntax combined with a guard should fail

use vetted_macros::defn;

defn! {
    fn sign(n: guard<PosInteger>) -> i64 {
        1 => 1,
        _ => 0,
    }
}

fn main() {}
