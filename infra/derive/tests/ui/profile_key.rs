#[keel_derive::profile(key = "eu")]
pub struct Rounding;

fn main() {}
