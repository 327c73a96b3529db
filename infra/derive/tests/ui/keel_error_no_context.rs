#[keel_derive::keel_error]
pub enum ManifestError {
    Io { source: std::io::Error },
}

fn main() {}
