use std::borrow::Cow;

/// A specialized [`DiscoveryError`] enum of this crate.
#[keel_derive::keel_error]
pub enum DiscoveryError {
    #[error("Module I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Module directory scan failed{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed module manifest{}: {source}", format_context(.context))]
    Manifest { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("Unknown module{}: {module}", format_context(.context))]
    UnknownModule { module: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Required subsystem '{subsystem}' not found{}: no module file matches '{pattern}'", format_context(.context))]
    MissingSubsystem {
        subsystem: Cow<'static, str>,
        pattern: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Required subsystem '{subsystem}' is ambiguous{}: {candidates}", format_context(.context))]
    AmbiguousSubsystem {
        subsystem: Cow<'static, str>,
        candidates: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal discovery error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
