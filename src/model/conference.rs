//! Top-level conference messages.

use crate::error::ColibriError;
use crate::registry::Extension;

use super::{Connect, Endpoint, Notification, Relay, Sources};

/// XML element names of the three message types.
pub(crate) mod element {
    pub const CONFERENCE_MODIFY: &str = "conference-modify";
    pub const CONFERENCE_MODIFIED: &str = "conference-modified";
    pub const CONFERENCE_NOTIFICATION: &str = "conference-notification";
}

/// Default for the `rtcstats-enabled` attribute. The one default-true
/// boolean in the schema: it is elided when true and emitted when false.
pub(crate) const RTCSTATS_ENABLED_DEFAULT: bool = true;

// ============================================================================
// CONFERENCE-MODIFY
// ============================================================================

/// A request to create or modify conference state (`<conference-modify>`).
#[derive(Clone, Debug, PartialEq)]
pub struct ConferenceModifyIQ {
    /// The conference's meeting ID. Required.
    pub meeting_id: String,
    /// The conference name (`name` attribute).
    pub conference_name: Option<String>,
    /// Whether this is a request to create a new conference. Default false.
    pub create: bool,
    /// Whether this is a request to expire the conference. Default false.
    pub expire: bool,
    /// Whether rtcstats reporting is enabled. Default **true**.
    pub rtcstats_enabled: bool,
    /// Endpoints, in document order within their kind.
    pub endpoints: Vec<Endpoint>,
    /// Relays, in document order within their kind.
    pub relays: Vec<Relay>,
    /// Recorder/transcriber connections (`<connects>` wrapper).
    pub connects: Option<Vec<Connect>>,
    /// Registry-decoded extension elements (XML passthrough).
    pub extensions: Vec<Extension>,
}

impl ConferenceModifyIQ {
    pub fn builder() -> ConferenceModifyIQBuilder {
        ConferenceModifyIQBuilder::default()
    }
}

/// Builder for [`ConferenceModifyIQ`].
pub struct ConferenceModifyIQBuilder {
    meeting_id: Option<String>,
    conference_name: Option<String>,
    create: bool,
    expire: bool,
    rtcstats_enabled: bool,
    endpoints: Vec<Endpoint>,
    relays: Vec<Relay>,
    connects: Option<Vec<Connect>>,
    extensions: Vec<Extension>,
}

impl Default for ConferenceModifyIQBuilder {
    fn default() -> Self {
        Self {
            meeting_id: None,
            conference_name: None,
            create: false,
            expire: false,
            rtcstats_enabled: RTCSTATS_ENABLED_DEFAULT,
            endpoints: Vec::new(),
            relays: Vec::new(),
            connects: None,
            extensions: Vec::new(),
        }
    }
}

impl ConferenceModifyIQBuilder {
    pub fn meeting_id(mut self, id: impl Into<String>) -> Self {
        self.meeting_id = Some(id.into());
        self
    }

    pub fn conference_name(mut self, name: impl Into<String>) -> Self {
        self.conference_name = Some(name.into());
        self
    }

    pub fn create(mut self, v: bool) -> Self {
        self.create = v;
        self
    }

    pub fn expire(mut self, v: bool) -> Self {
        self.expire = v;
        self
    }

    pub fn rtcstats_enabled(mut self, v: bool) -> Self {
        self.rtcstats_enabled = v;
        self
    }

    pub fn endpoint(mut self, ep: Endpoint) -> Self {
        self.endpoints.push(ep);
        self
    }

    pub fn relay(mut self, r: Relay) -> Self {
        self.relays.push(r);
        self
    }

    pub fn connect(mut self, c: Connect) -> Self {
        self.connects.get_or_insert_with(Vec::new).push(c);
        self
    }

    /// Set the whole connects list. An empty list is distinct from an
    /// absent one on the wire.
    pub fn connects(mut self, connects: Vec<Connect>) -> Self {
        self.connects = Some(connects);
        self
    }

    pub fn extension(mut self, ext: Extension) -> Self {
        self.extensions.push(ext);
        self
    }

    pub fn build(self) -> Result<ConferenceModifyIQ, ColibriError> {
        let meeting_id = self
            .meeting_id
            .ok_or_else(|| ColibriError::missing(element::CONFERENCE_MODIFY, "meeting-id"))?;
        Ok(ConferenceModifyIQ {
            meeting_id,
            conference_name: self.conference_name,
            create: self.create,
            expire: self.expire,
            rtcstats_enabled: self.rtcstats_enabled,
            endpoints: self.endpoints,
            relays: self.relays,
            connects: self.connects,
            extensions: self.extensions,
        })
    }
}

// ============================================================================
// CONFERENCE-MODIFIED
// ============================================================================

/// The response describing resulting conference state (`<conference-modified>`).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ConferenceModifiedIQ {
    pub endpoints: Vec<Endpoint>,
    pub relays: Vec<Relay>,
    /// Top-level feedback sources allocated by the bridge.
    pub sources: Option<Sources>,
    /// Registry-decoded extension elements (XML passthrough).
    pub extensions: Vec<Extension>,
}

impl ConferenceModifiedIQ {
    pub fn builder() -> ConferenceModifiedIQBuilder {
        ConferenceModifiedIQBuilder::default()
    }
}

/// Builder for [`ConferenceModifiedIQ`].
#[derive(Default)]
pub struct ConferenceModifiedIQBuilder {
    iq: ConferenceModifiedIQ,
}

impl ConferenceModifiedIQBuilder {
    pub fn endpoint(mut self, ep: Endpoint) -> Self {
        self.iq.endpoints.push(ep);
        self
    }

    pub fn relay(mut self, r: Relay) -> Self {
        self.iq.relays.push(r);
        self
    }

    pub fn sources(mut self, s: Sources) -> Self {
        self.iq.sources = Some(s);
        self
    }

    pub fn extension(mut self, ext: Extension) -> Self {
        self.iq.extensions.push(ext);
        self
    }

    pub fn build(self) -> Result<ConferenceModifiedIQ, ColibriError> {
        Ok(self.iq)
    }
}

// ============================================================================
// CONFERENCE-NOTIFICATION
// ============================================================================

/// Unsolicited endpoint notifications (`<conference-notification>`).
#[derive(Clone, Debug, PartialEq)]
pub struct ConferenceNotificationIQ {
    /// Required.
    pub meeting_id: String,
    pub notifications: Vec<Notification>,
}

impl ConferenceNotificationIQ {
    pub fn builder() -> ConferenceNotificationIQBuilder {
        ConferenceNotificationIQBuilder::default()
    }
}

/// Builder for [`ConferenceNotificationIQ`].
#[derive(Default)]
pub struct ConferenceNotificationIQBuilder {
    meeting_id: Option<String>,
    notifications: Vec<Notification>,
}

impl ConferenceNotificationIQBuilder {
    pub fn meeting_id(mut self, id: impl Into<String>) -> Self {
        self.meeting_id = Some(id.into());
        self
    }

    pub fn notification(mut self, n: Notification) -> Self {
        self.notifications.push(n);
        self
    }

    pub fn build(self) -> Result<ConferenceNotificationIQ, ColibriError> {
        let meeting_id = self
            .meeting_id
            .ok_or_else(|| ColibriError::missing(element::CONFERENCE_NOTIFICATION, "meeting-id"))?;
        Ok(ConferenceNotificationIQ {
            meeting_id,
            notifications: self.notifications,
        })
    }
}

// ============================================================================
// MESSAGE
// ============================================================================

/// Any of the three Colibri2 message payloads, dispatched by root element
/// name when decoding XML.
#[derive(Clone, Debug, PartialEq)]
pub enum ColibriMessage {
    ConferenceModify(ConferenceModifyIQ),
    ConferenceModified(ConferenceModifiedIQ),
    ConferenceNotification(ConferenceNotificationIQ),
}

impl ColibriMessage {
    /// The root element name of this message's XML form.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::ConferenceModify(_) => element::CONFERENCE_MODIFY,
            Self::ConferenceModified(_) => element::CONFERENCE_MODIFIED,
            Self::ConferenceNotification(_) => element::CONFERENCE_NOTIFICATION,
        }
    }
}
