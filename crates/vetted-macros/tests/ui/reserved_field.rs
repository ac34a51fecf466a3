use vetted_macros::Record;

#[derive(Record)]
#[allow(dead_code)]
struct Item {
    new: i64,
}

fn main() {}
