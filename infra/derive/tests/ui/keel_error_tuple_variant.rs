#[keel_derive::keel_error]
pub enum ManifestError {
    Io(std::io::Error),
}

fn main() {}
