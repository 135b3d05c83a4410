//! XML wire form of the protocol.
//!
//! `reader` is the pull-token layer over `quick_xml::NsReader`; `decode`
//! builds the typed model from a token stream; `encode` renders a model back
//! into an element tree. The two directions agree on element order and
//! default elision, so `from_xml(to_xml(m)) == m` for every constructible
//! model value.

pub mod decode;
pub mod encode;
pub mod reader;

pub use decode::decode_message;
pub use encode::encode_message;

use crate::error::ColibriError;
use crate::model::{
    ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
};
use crate::registry::ProviderRegistry;
use crate::xml::reader::{Token, XmlReader};

impl ColibriMessage {
    /// Decode any colibri2 message from XML, dispatching on the root element.
    pub fn from_xml(xml: &str, registry: &ProviderRegistry) -> Result<Self, ColibriError> {
        decode::decode_message(xml, registry)
    }

    /// Encode this message into its XML form.
    pub fn to_xml(&self) -> Result<String, ColibriError> {
        encode::encode_message(self)
    }
}

impl ConferenceModifyIQ {
    pub fn from_xml(xml: &str, registry: &ProviderRegistry) -> Result<Self, ColibriError> {
        let mut reader = root_reader(xml, crate::model::element::CONFERENCE_MODIFY)?;
        decode::decode_conference_modify(&mut reader, registry)
    }

    pub fn to_xml(&self) -> Result<String, ColibriError> {
        encode::encode_conference_modify(self)
    }
}

impl ConferenceModifiedIQ {
    pub fn from_xml(xml: &str, registry: &ProviderRegistry) -> Result<Self, ColibriError> {
        let mut reader = root_reader(xml, crate::model::element::CONFERENCE_MODIFIED)?;
        decode::decode_conference_modified(&mut reader, registry)
    }

    pub fn to_xml(&self) -> Result<String, ColibriError> {
        encode::encode_conference_modified(self)
    }
}

impl ConferenceNotificationIQ {
    pub fn from_xml(xml: &str) -> Result<Self, ColibriError> {
        let mut reader = root_reader(xml, crate::model::element::CONFERENCE_NOTIFICATION)?;
        decode::decode_conference_notification(&mut reader)
    }

    pub fn to_xml(&self) -> Result<String, ColibriError> {
        encode::encode_conference_notification(self)
    }
}

/// Position a reader on the expected root element.
fn root_reader<'a>(xml: &'a str, expected: &'static str) -> Result<XmlReader<'a>, ColibriError> {
    let mut reader = XmlReader::new(xml);
    loop {
        match reader.next()? {
            Token::Start => break,
            Token::Eof => return Err(ColibriError::malformed("document", "no root element")),
            _ => {}
        }
    }
    if reader.namespace() != crate::model::ns::COLIBRI2 || reader.name() != expected {
        return Err(ColibriError::malformed(
            reader.name().to_owned(),
            format!("expected a '{expected}' element"),
        ));
    }
    Ok(reader)
}
