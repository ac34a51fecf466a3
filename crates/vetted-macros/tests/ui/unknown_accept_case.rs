use vetted_macros::Record;

#[derive(Record)]
#[record(accept_case = "kebab")]
#[allow(dead_code)]
struct Page {
    size: i64,
}

fn main() {}
