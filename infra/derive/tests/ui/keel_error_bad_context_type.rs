#[keel_derive::keel_error]
pub enum ManifestError {
    Io { source: std::io::Error, context: String },
}

fn main() {}
