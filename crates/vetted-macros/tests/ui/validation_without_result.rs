// Test: argument validation without a Result return type should fail

use vetted_macros::defn;

defn! {
    fn double(n: validate<i64>) -> i64 {
        n * 2
    }
}

fn main() {}
