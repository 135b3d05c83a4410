//! Extension element providers.
//!
//! Colibri2 stanzas may carry child elements that are not part of the core
//! schema (endpoint extensions, conference-level extensions). Decoding of
//! those is driven by a [`ProviderRegistry`]: a map from `(element name,
//! namespace)` to a parse function. Elements with no registered provider are
//! skipped; registering a provider with [`ProviderRegistry::register_raw`]
//! keeps the element as a structural [`Extension`] tree instead.
//!
//! Providers parse into [`Extension`] so the rest of the codec stays
//! uniform: the XML encoder re-emits an `Extension` verbatim, and the JSON
//! codec ignores extensions entirely.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::ColibriError;
use crate::xml::reader::{Token, XmlReader};

// ============================================================
// Raw extension element
// ============================================================

/// A structurally preserved element: name, namespace, attributes, character
/// data and child elements, with no schema applied.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Extension {
    pub name: String,
    pub namespace: String,
    pub attributes: Vec<(String, String)>,
    /// Character data of the element, with all text nodes coalesced into one
    /// string. Re-encoding writes the text before the children, so mixed
    /// content interleaving text and elements does not round-trip in order.
    pub text: Option<String>,
    pub children: Vec<Extension>,
}

impl Extension {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Decode the element the reader is currently positioned on, including
    /// its whole subtree. The reader must be at the element's start token and
    /// is left just past its end token.
    pub fn decode(reader: &mut XmlReader<'_>) -> Result<Self, ColibriError> {
        let Some(target) = reader.depth().checked_sub(1) else {
            return Err(ColibriError::malformed(
                "extension",
                "decode called with no open element",
            ));
        };
        let mut ext = Extension::new(reader.name(), reader.namespace());
        ext.attributes = reader
            .attribute_pairs()
            .map(|(n, v)| (n.to_owned(), v.to_owned()))
            .collect();
        loop {
            match reader.next()? {
                Token::Start => ext.children.push(Extension::decode(reader)?),
                Token::Text => {
                    let text = ext.text.get_or_insert_with(String::new);
                    text.push_str(reader.text());
                }
                Token::End if reader.depth() == target => return Ok(ext),
                Token::End => {}
                Token::Eof => {
                    return Err(ColibriError::malformed(
                        ext.name,
                        "unexpected end of document inside extension element",
                    ));
                }
            }
        }
    }
}

// ============================================================
// Registry
// ============================================================

/// A parse function for one extension element kind. Called with the reader at
/// the element's start token; must return with the reader just past the
/// element's end token.
pub type Provider =
    Arc<dyn Fn(&mut XmlReader<'_>) -> Result<Extension, ColibriError> + Send + Sync>;

/// Registry of extension element providers, keyed by element name and
/// namespace. Registration is last-writer-wins. Shareable across threads.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<(String, String), Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider for `(name, namespace)`, replacing any previous
    /// registration for that key.
    pub fn register<F>(&self, name: impl Into<String>, namespace: impl Into<String>, provider: F)
    where
        F: Fn(&mut XmlReader<'_>) -> Result<Extension, ColibriError> + Send + Sync + 'static,
    {
        self.providers
            .write()
            .insert((name.into(), namespace.into()), Arc::new(provider));
    }

    /// Register the structural parser for `(name, namespace)`: the element is
    /// preserved as an [`Extension`] tree instead of being skipped.
    pub fn register_raw(&self, name: impl Into<String>, namespace: impl Into<String>) {
        self.register(name, namespace, Extension::decode);
    }

    pub fn is_registered(&self, name: &str, namespace: &str) -> bool {
        self.providers
            .read()
            .contains_key(&(name.to_owned(), namespace.to_owned()))
    }

    /// Dispatch the element the reader is positioned on to its provider.
    ///
    /// Returns `Ok(None)` without touching the stream when no provider is
    /// registered; the caller decides whether to skip. When a provider runs,
    /// the stream position is verified afterwards: a provider that leaves the
    /// reader anywhere other than just past the element's end token would
    /// desynchronize every subsequent element, so that is an error here
    /// rather than a silent corruption later.
    pub fn decode(
        &self,
        reader: &mut XmlReader<'_>,
    ) -> Result<Option<Extension>, ColibriError> {
        let key = (reader.name().to_owned(), reader.namespace().to_owned());
        let provider = self.providers.read().get(&key).cloned();
        let Some(provider) = provider else {
            return Ok(None);
        };
        let entry_depth = reader.depth();
        debug!(element = %key.0, namespace = %key.1, "dispatching extension provider");
        let ext = provider(reader)?;
        if reader.depth() != entry_depth - 1 {
            return Err(ColibriError::malformed(
                key.0,
                "extension provider left the reader at the wrong depth",
            ));
        }
        Ok(Some(ext))
    }
}
