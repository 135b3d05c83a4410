//! Pull-style token reader over `quick_xml::NsReader`.
//!
//! The decoder only needs five primitives from the stream: current element
//! name, current namespace, attribute lookup, `next()`, and `depth()`. This
//! wrapper provides exactly those (plus element text, used for DTLS
//! fingerprints, and `skip_element` for ignored subtrees), with namespaces
//! already resolved and self-closing elements normalized into a start token
//! followed by an end token.
//!
//! Depth discipline: the counter is incremented when a start token is
//! produced and decremented when the matching end token is produced. A child
//! decoder entered at its start token (depth `d`) must return having just
//! consumed its own end token (depth `d - 1`); the registry driver checks
//! this invariant around every dispatch.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::ColibriError;

/// The kind of the current token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// An element was opened; name, namespace and attributes are available.
    Start,
    /// An element was closed.
    End,
    /// Character data inside an element.
    Text,
    /// End of the document.
    Eof,
}

/// A pull reader positioned on one token at a time.
pub struct XmlReader<'a> {
    inner: NsReader<&'a [u8]>,
    depth: usize,
    name: String,
    namespace: String,
    attributes: Vec<(String, String)>,
    text: String,
    /// Synthesized end token for a self-closing element.
    pending_end: bool,
}

impl<'a> XmlReader<'a> {
    /// Create a reader over a document. The reader starts before the first
    /// token; call [`next`](Self::next) to advance to the root element.
    pub fn new(xml: &'a str) -> Self {
        let mut inner = NsReader::from_str(xml);
        inner.config_mut().trim_text(true);
        Self {
            inner,
            depth: 0,
            name: String::new(),
            namespace: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            pending_end: false,
        }
    }

    /// The local name of the current start or end element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved namespace of the current start or end element. Empty for
    /// unbound names.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The number of currently open elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The unescaped character data of the current text token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up an attribute of the current start element.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes of the current start element, in document order.
    pub fn attribute_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Look up a required attribute, failing with `MissingRequiredField`.
    pub fn required_attribute(
        &self,
        element: &'static str,
        name: &'static str,
    ) -> Result<String, ColibriError> {
        self.attribute(name)
            .map(str::to_owned)
            .ok_or(ColibriError::MissingRequiredField {
                element,
                field: name,
            })
    }

    /// Advance to the next token.
    pub fn next(&mut self) -> Result<Token, ColibriError> {
        if self.pending_end {
            self.pending_end = false;
            self.depth -= 1;
            return Ok(Token::End);
        }

        loop {
            let (resolve, event) = self
                .inner
                .read_resolved_event()
                .map_err(|e| ColibriError::malformed("document", e.to_string()))?;
            match event {
                Event::Start(e) => {
                    let (name, namespace, attributes) = capture_element(&resolve, &e)?;
                    self.name = name;
                    self.namespace = namespace;
                    self.attributes = attributes;
                    self.depth += 1;
                    return Ok(Token::Start);
                }
                Event::Empty(e) => {
                    let (name, namespace, attributes) = capture_element(&resolve, &e)?;
                    self.name = name;
                    self.namespace = namespace;
                    self.attributes = attributes;
                    self.depth += 1;
                    self.pending_end = true;
                    return Ok(Token::Start);
                }
                Event::End(e) => {
                    self.name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.namespace = resolved_namespace(&resolve);
                    self.attributes.clear();
                    if self.depth == 0 {
                        return Err(ColibriError::malformed(
                            self.name.clone(),
                            "end tag with no open element",
                        ));
                    }
                    self.depth -= 1;
                    return Ok(Token::End);
                }
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| ColibriError::malformed("document", e.to_string()))?;
                    self.text = text.into_owned();
                    return Ok(Token::Text);
                }
                Event::CData(c) => {
                    self.text = String::from_utf8_lossy(c.as_ref()).into_owned();
                    return Ok(Token::Text);
                }
                Event::Eof => return Ok(Token::Eof),
                // Declarations, comments, PIs and doctypes are not tokens of
                // this protocol; keep reading.
                _ => {}
            }
        }
    }

    /// Consume the rest of the current element's subtree, leaving the reader
    /// just past its end token. Must be called at the element's start token.
    pub fn skip_element(&mut self) -> Result<(), ColibriError> {
        let Some(target) = self.depth.checked_sub(1) else {
            return Err(ColibriError::malformed(
                "document",
                "skip_element called with no open element",
            ));
        };
        loop {
            match self.next()? {
                Token::End if self.depth == target => return Ok(()),
                Token::Eof => {
                    return Err(ColibriError::malformed(
                        self.name.clone(),
                        "unexpected end of document while skipping element",
                    ));
                }
                _ => {}
            }
        }
    }

}

/// Extract owned name, namespace and attributes from a start/empty event.
/// A free function so the event (which borrows the underlying reader) can be
/// dropped before the reader's own fields are updated.
fn capture_element(
    resolve: &ResolveResult<'_>,
    e: &BytesStart<'_>,
) -> Result<(String, String, Vec<(String, String)>), ColibriError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let namespace = resolved_namespace(resolve);
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ColibriError::malformed(name.clone(), e.to_string()))?;
        let key = attr.key.as_ref();
        if key.starts_with(b"xmlns") {
            continue;
        }
        let attr_name = String::from_utf8_lossy(key).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ColibriError::malformed(name.clone(), e.to_string()))?
            .into_owned();
        attributes.push((attr_name, value));
    }
    Ok((name, namespace, attributes))
}

fn resolved_namespace(resolve: &ResolveResult<'_>) -> String {
    match resolve {
        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
        _ => String::new(),
    }
}
