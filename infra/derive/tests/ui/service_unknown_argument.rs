#[keel_derive::service(lazy)]
pub struct Fare;

fn main() {}
