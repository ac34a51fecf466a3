// Test: a default on a destructuring pattern should fail

use vetted_macros::defn;

defn! {
    fn pick((a, b) = (1, 2)) -> i64 {
        a + b
    }
}

fn main() {}
