use vetted_macros::Record;

#[derive(Record)]
#[allow(dead_code)]
struct Pair(i64, i64);

fn main() {}
