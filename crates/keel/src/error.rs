use keel_discovery::DiscoveryError;
use std::borrow::Cow;

#[keel_derive::keel_error]
pub enum BootstrapError {
    #[error("Module discovery failed{}: {source}", format_context(.context))]
    Discovery { source: DiscoveryError, context: Option<Cow<'static, str>> },

    #[error("Internal bootstrap error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
