//! Conference entities: endpoints and relays.

use crate::error::ColibriError;
use crate::registry::Extension;

use super::normalize_enum;
use super::{Media, Sources, Transport};

// ============================================================================
// ENDPOINT
// ============================================================================

/// The MUC role of an endpoint's occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MucRole {
    Moderator,
    Participant,
    Visitor,
    None,
}

impl MucRole {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "moderator" => Some(Self::Moderator),
            "participant" => Some(Self::Participant),
            "visitor" => Some(Self::Visitor),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Participant => "participant",
            Self::Visitor => "visitor",
            Self::None => "none",
        }
    }
}

/// The `<force-mute>` element: which directions of an endpoint are muted by
/// the conference. Both flags default to false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ForceMute {
    pub audio: bool,
    pub video: bool,
}

/// An endpoint participating in a conference (`<endpoint>`).
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    /// Unique within the message. Required.
    pub id: String,
    /// Whether this is a request to create the endpoint. Default false.
    pub create: bool,
    /// Whether the endpoint is marked to expire. Default false.
    pub expire: bool,
    pub stats_id: Option<String>,
    pub muc_role: Option<MucRole>,
    pub force_mute: Option<ForceMute>,
    /// Initial last-n value for the endpoint's receiver.
    pub initial_last_n: Option<i32>,
    /// Capability names, in document order.
    pub capabilities: Vec<String>,
    pub media: Vec<Media>,
    pub transport: Option<Transport>,
    pub sources: Option<Sources>,
    /// Registry-decoded extension elements (XML passthrough).
    pub extensions: Vec<Extension>,
}

impl Endpoint {
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    /// True if the endpoint advertises the capability of the given name.
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c == name)
    }
}

/// Builder for [`Endpoint`].
#[derive(Default)]
pub struct EndpointBuilder {
    id: Option<String>,
    create: bool,
    expire: bool,
    stats_id: Option<String>,
    muc_role: Option<MucRole>,
    force_mute: Option<ForceMute>,
    initial_last_n: Option<i32>,
    capabilities: Vec<String>,
    media: Vec<Media>,
    transport: Option<Transport>,
    sources: Option<Sources>,
    extensions: Vec<Extension>,
}

impl EndpointBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
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

    pub fn stats_id(mut self, v: impl Into<String>) -> Self {
        self.stats_id = Some(v.into());
        self
    }

    pub fn muc_role(mut self, v: MucRole) -> Self {
        self.muc_role = Some(v);
        self
    }

    pub fn force_mute(mut self, audio: bool, video: bool) -> Self {
        self.force_mute = Some(ForceMute { audio, video });
        self
    }

    pub fn initial_last_n(mut self, v: i32) -> Self {
        self.initial_last_n = Some(v);
        self
    }

    pub fn capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.push(name.into());
        self
    }

    pub fn media(mut self, m: Media) -> Self {
        self.media.push(m);
        self
    }

    pub fn transport(mut self, t: Transport) -> Self {
        self.transport = Some(t);
        self
    }

    pub fn sources(mut self, s: Sources) -> Self {
        self.sources = Some(s);
        self
    }

    pub fn extension(mut self, ext: Extension) -> Self {
        self.extensions.push(ext);
        self
    }

    pub fn build(self) -> Result<Endpoint, ColibriError> {
        let id = self
            .id
            .ok_or_else(|| ColibriError::missing("endpoint", "id"))?;
        Ok(Endpoint {
            id,
            create: self.create,
            expire: self.expire,
            stats_id: self.stats_id,
            muc_role: self.muc_role,
            force_mute: self.force_mute,
            initial_last_n: self.initial_last_n,
            capabilities: self.capabilities,
            media: self.media,
            transport: self.transport,
            sources: self.sources,
            extensions: self.extensions,
        })
    }
}

// ============================================================================
// RELAY
// ============================================================================

/// A relay: a forwarding node representing a group of endpoints to another
/// conference node (`<relay>`).
#[derive(Clone, Debug, PartialEq)]
pub struct Relay {
    /// Unique within the message. Required.
    pub id: String,
    pub create: bool,
    pub expire: bool,
    /// The mesh this relay belongs to.
    pub mesh_id: Option<String>,
    /// Remote endpoints announced through the relay (`<endpoints>` wrapper).
    pub endpoints: Option<Vec<Endpoint>>,
    pub media: Vec<Media>,
    pub transport: Option<Transport>,
    pub sources: Option<Sources>,
    /// Registry-decoded extension elements (XML passthrough).
    pub extensions: Vec<Extension>,
}

impl Relay {
    pub fn builder() -> RelayBuilder {
        RelayBuilder::default()
    }
}

/// Builder for [`Relay`].
#[derive(Default)]
pub struct RelayBuilder {
    id: Option<String>,
    create: bool,
    expire: bool,
    mesh_id: Option<String>,
    endpoints: Option<Vec<Endpoint>>,
    media: Vec<Media>,
    transport: Option<Transport>,
    sources: Option<Sources>,
    extensions: Vec<Extension>,
}

impl RelayBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
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

    pub fn mesh_id(mut self, v: impl Into<String>) -> Self {
        self.mesh_id = Some(v.into());
        self
    }

    pub fn endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    pub fn media(mut self, m: Media) -> Self {
        self.media.push(m);
        self
    }

    pub fn transport(mut self, t: Transport) -> Self {
        self.transport = Some(t);
        self
    }

    pub fn sources(mut self, s: Sources) -> Self {
        self.sources = Some(s);
        self
    }

    pub fn extension(mut self, ext: Extension) -> Self {
        self.extensions.push(ext);
        self
    }

    pub fn build(self) -> Result<Relay, ColibriError> {
        let id = self.id.ok_or_else(|| ColibriError::missing("relay", "id"))?;
        Ok(Relay {
            id,
            create: self.create,
            expire: self.expire,
            mesh_id: self.mesh_id,
            endpoints: self.endpoints,
            media: self.media,
            transport: self.transport,
            sources: self.sources,
            extensions: self.extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_requires_id() {
        let err = Endpoint::builder().stats_id("x").build().unwrap_err();
        assert_eq!(err, ColibriError::missing("endpoint", "id"));
    }

    #[test]
    fn relay_requires_id() {
        let err = Relay::builder().mesh_id("m1").build().unwrap_err();
        assert_eq!(err, ColibriError::missing("relay", "id"));
    }

    #[test]
    fn muc_role_parses_either_separator_style() {
        assert_eq!(MucRole::parse("visitor"), Some(MucRole::Visitor));
        assert_eq!(MucRole::parse("MODERATOR"), Some(MucRole::Moderator));
        assert_eq!(MucRole::parse("chair"), None);
    }

    #[test]
    fn has_capability() {
        let ep = Endpoint::builder()
            .id("e1")
            .capability("source-names")
            .build()
            .unwrap();
        assert!(ep.has_capability("source-names"));
        assert!(!ep.has_capability("transcription"));
    }
}
