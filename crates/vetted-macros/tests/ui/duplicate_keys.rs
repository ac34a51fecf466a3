use vetted_macros::Record;

#[derive(Record)]
#[record(accept_case = "snake")]
#[allow(dead_code, non_snake_case)]
struct Page {
    page_size: i64,
    pageSize: i64,
}

fn main() {}
