#[keel_derive::service]
pub struct Cache<T> {
    entries: Vec<T>,
}

fn main() {}
