//! Interface-URL configuration.
//!
//! The document looks like:
//!
//! ```xml
//! <Flight.Front.Interface>
//!   <InterfaceAPI>
//!     <UrlList>
//!       <UrlConfig><UrlKey>search</UrlKey><Url>https://api.example.com/search</Url></UrlConfig>
//!     </UrlList>
//!   </InterfaceAPI>
//! </Flight.Front.Interface>
//! ```

use roxmltree::{Document, Node};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

pub const ROOT_ELEMENT: &str = "Flight.Front.Interface";
const URL_PATH: [&str; 3] = ["InterfaceAPI", "UrlList", "UrlConfig"];

#[keel_derive::keel_error]
pub enum InterfaceError {
    #[error("Interface config I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Interface config is empty{}", format_context(.context))]
    Empty { context: Option<Cow<'static, str>> },

    #[error("Interface config is not valid XML{}: {source}", format_context(.context))]
    Xml { source: roxmltree::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid interface config{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl InterfaceError {
    fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid { message: message.into(), context: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlConfig {
    pub key: String,
    pub url: String,
}

/// Strictly validates an interface document and returns its URL entries in document order.
///
/// # Errors
/// * [`InterfaceError::Xml`] when the content is not well-formed.
/// * [`InterfaceError::Empty`] when the root element is missing or carries no text.
/// * [`InterfaceError::Invalid`] when there are no `UrlConfig` entries, or an entry
///   has a blank `UrlKey` or `Url`.
pub fn validate(xml: &str) -> Result<Vec<UrlConfig>, InterfaceError> {
    let document = Document::parse(xml).context("Parsing interface document")?;

    let root = document.root_element();
    if !root.has_tag_name(ROOT_ELEMENT) || inner_text(root).trim().is_empty() {
        return Err(InterfaceError::Empty { context: Some(Cow::Borrowed(ROOT_ELEMENT)) });
    }

    let entries = select(root, &URL_PATH);
    if entries.is_empty() {
        return Err(InterfaceError::invalid("no interface URLs are configured"));
    }

    entries
        .into_iter()
        .map(|entry| {
            let key = child_text(entry, "UrlKey")
                .ok_or_else(|| InterfaceError::invalid("UrlConfig requires a non-empty UrlKey"))?;
            let url = child_text(entry, "Url")
                .ok_or_else(|| InterfaceError::invalid("UrlConfig requires a non-empty Url"))?;
            Ok(UrlConfig { key, url })
        })
        .collect()
}

/// Lenient variant of [`validate`]: problems are logged and yield an empty list.
#[must_use]
pub fn read_config(xml: &str) -> Vec<UrlConfig> {
    match validate(xml) {
        Ok(entries) => {
            debug!(count = entries.len(), "Interface URLs configured");
            entries
        }
        Err(error) => {
            warn!(%error, "Ignoring invalid interface configuration");
            Vec::new()
        }
    }
}

/// Reads the interface document at `path` and applies [`read_config`] to it.
///
/// # Errors
/// A missing or unreadable file is [`InterfaceError::Io`]; blank content is
/// [`InterfaceError::Empty`]. Content problems are not errors here.
pub fn configure(path: impl AsRef<Path>) -> Result<Vec<UrlConfig>, InterfaceError> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;

    if content.trim().is_empty() {
        return Err(InterfaceError::Empty { context: Some(Cow::Owned(path.display().to_string())) });
    }

    Ok(read_config(&content))
}

fn select<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    let Some((head, rest)) = path.split_first() else {
        return vec![node];
    };

    node.children()
        .filter(|child| child.has_tag_name(*head))
        .flat_map(|child| select(child, rest))
        .collect()
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(name))
        .map(|child| inner_text(child).trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn inner_text(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|text| text.text()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_walks_nested_path() {
        let xml = "<a><b><c>1</c><c>2</c></b><b><c>3</c></b></a>";
        let document = Document::parse(xml).expect("xml");
        let found = select(document.root_element(), &["b", "c"]);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_inner_text_spans_descendants() {
        let document = Document::parse("<a> x <b>y</b></a>").expect("xml");
        assert_eq!(inner_text(document.root_element()), " x y");
    }
}
