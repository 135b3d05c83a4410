//! JSON wire form of the protocol.
//!
//! The JSON tree is a `serde_json::Value` with ordered object keys (the
//! `preserve_order` feature), so encodings are structurally stable. The
//! JSON form carries no extension elements; those are an XML-only concern.

pub mod decode;
pub mod encode;

pub use decode::decode_message;
pub use encode::encode_message;

use serde_json::Value;

use crate::error::ColibriError;
use crate::model::{
    ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
};

impl ColibriMessage {
    /// Decode any colibri2 message from JSON, dispatching on object shape.
    pub fn from_json(value: &Value) -> Result<Self, ColibriError> {
        decode::decode_message(value)
    }

    /// Encode this message into its JSON form.
    pub fn to_json(&self) -> Value {
        encode::encode_message(self)
    }
}

impl ConferenceModifyIQ {
    pub fn from_json(value: &Value) -> Result<Self, ColibriError> {
        decode::decode_conference_modify(value)
    }

    pub fn to_json(&self) -> Value {
        encode::encode_conference_modify(self)
    }
}

impl ConferenceModifiedIQ {
    pub fn from_json(value: &Value) -> Result<Self, ColibriError> {
        decode::decode_conference_modified(value)
    }

    pub fn to_json(&self) -> Value {
        encode::encode_conference_modified(self)
    }
}

impl ConferenceNotificationIQ {
    pub fn from_json(value: &Value) -> Result<Self, ColibriError> {
        decode::decode_conference_notification(value)
    }

    pub fn to_json(&self) -> Value {
        encode::encode_conference_notification(self)
    }
}
