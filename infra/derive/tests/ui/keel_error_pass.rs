use std::borrow::Cow;

#[keel_derive::keel_error]
pub enum ManifestError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Unknown module '{module}'{}", format_context(.context))]
    Unknown { module: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).context("Reading manifest")
}

fn unknown(module: &str) -> Result<(), ManifestError> {
    Err(ManifestError::Unknown { module: module.to_owned(), context: None })
}

fn main() {
    let err = read("/definitely/not/here").unwrap_err();
    assert!(err.to_string().contains("(Reading manifest)"));

    let err = unknown("flight.biz").context("Resolving catalog entry").unwrap_err();
    assert_eq!(err.to_string(), "Unknown module 'flight.biz' (Resolving catalog entry)");

    let err: ManifestError = "boom".into();
    assert_eq!(err.to_string(), "Internal error: boom");

    let io = std::io::Error::other("disk");
    let err: ManifestError = io.into();
    assert!(matches!(err, ManifestError::Io { context: None, .. }));
}
