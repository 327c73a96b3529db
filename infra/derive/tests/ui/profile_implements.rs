#[keel_derive::profile(implements(dyn Fare))]
pub struct Rounding;

fn main() {}
