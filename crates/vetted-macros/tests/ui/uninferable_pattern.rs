// Test: an untyped parameter whose pattern has no inferable type should fail

use vetted_macros::defn;

defn! {
    fn first(&x) -> i64 {
        *x
    }
}

fn main() {}
