//! Transport descriptions: ICE-UDP parameters, DTLS fingerprints, candidates,
//! websockets and SCTP.

use crate::error::ColibriError;

use super::normalize_enum;

// ============================================================================
// TRANSPORT (colibri2 wrapper)
// ============================================================================

/// The colibri2 `<transport>` element wrapping the ICE-UDP description.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Transport {
    /// Whether the bridge is the controlling ICE agent. Default false.
    pub ice_controlling: bool,
    /// Whether a unique candidate port should be allocated. Default false.
    /// Only meaningful in a conference-modify request.
    pub use_unique_port: bool,
    /// The nested XEP-0176 transport description.
    pub ice_udp: Option<IceUdpTransport>,
    /// The SCTP association description.
    pub sctp: Option<Sctp>,
}

impl Transport {
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }
}

/// Builder for [`Transport`].
#[derive(Default)]
pub struct TransportBuilder {
    transport: Transport,
}

impl TransportBuilder {
    pub fn ice_controlling(mut self, v: bool) -> Self {
        self.transport.ice_controlling = v;
        self
    }

    pub fn use_unique_port(mut self, v: bool) -> Self {
        self.transport.use_unique_port = v;
        self
    }

    pub fn ice_udp(mut self, ice_udp: IceUdpTransport) -> Self {
        self.transport.ice_udp = Some(ice_udp);
        self
    }

    pub fn sctp(mut self, sctp: Sctp) -> Self {
        self.transport.sctp = Some(sctp);
        self
    }

    // No required fields; Result keeps the construction surface uniform.
    pub fn build(self) -> Result<Transport, ColibriError> {
        Ok(self.transport)
    }
}

// ============================================================================
// ICE-UDP
// ============================================================================

/// An XEP-0176 ICE-UDP transport description (the inner `<transport>`).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct IceUdpTransport {
    pub ufrag: Option<String>,
    pub pwd: Option<String>,
    /// DTLS fingerprints, in document order.
    pub fingerprints: Vec<Fingerprint>,
    /// Colibri websocket URLs, in document order.
    pub web_socket_urls: Vec<String>,
    /// ICE candidates, in document order.
    pub candidates: Vec<Candidate>,
    /// Presence flag: the `rtcp-mux` child element.
    pub rtcp_mux: bool,
}

impl IceUdpTransport {
    pub fn builder() -> IceUdpTransportBuilder {
        IceUdpTransportBuilder::default()
    }
}

/// Builder for [`IceUdpTransport`].
#[derive(Default)]
pub struct IceUdpTransportBuilder {
    transport: IceUdpTransport,
}

impl IceUdpTransportBuilder {
    pub fn ufrag(mut self, ufrag: impl Into<String>) -> Self {
        self.transport.ufrag = Some(ufrag.into());
        self
    }

    pub fn pwd(mut self, pwd: impl Into<String>) -> Self {
        self.transport.pwd = Some(pwd.into());
        self
    }

    pub fn fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.transport.fingerprints.push(fingerprint);
        self
    }

    pub fn web_socket_url(mut self, url: impl Into<String>) -> Self {
        self.transport.web_socket_urls.push(url.into());
        self
    }

    pub fn candidate(mut self, candidate: Candidate) -> Self {
        self.transport.candidates.push(candidate);
        self
    }

    pub fn rtcp_mux(mut self, v: bool) -> Self {
        self.transport.rtcp_mux = v;
        self
    }

    pub fn build(self) -> Result<IceUdpTransport, ColibriError> {
        Ok(self.transport)
    }
}

/// A DTLS fingerprint (`<fingerprint hash='sha-256' setup='actpass'>...`).
/// The fingerprint itself is the element's text content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint {
    /// The fingerprint value (colon-separated hex).
    pub value: String,
    /// The hash function name.
    pub hash: String,
    /// The DTLS setup role (`actpass`, `active`, `passive`).
    pub setup: Option<String>,
    /// Whether RFC 9335 cryptex is supported. Default false.
    pub cryptex: bool,
}

// ============================================================================
// CANDIDATE
// ============================================================================

/// An ICE candidate: one network path descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub foundation: String,
    pub component: u32,
    pub protocol: String,
    pub priority: u32,
    pub ip: String,
    pub port: u16,
    /// The candidate type (`host`, `srflx`, `prflx`, `relay`).
    pub candidate_type: String,
    pub network: u32,
    pub generation: u32,
    pub rel_addr: Option<String>,
    pub rel_port: Option<u16>,
}

impl Candidate {
    pub fn builder() -> CandidateBuilder {
        CandidateBuilder::default()
    }
}

/// Builder for [`Candidate`].
#[derive(Default)]
pub struct CandidateBuilder {
    id: Option<String>,
    foundation: Option<String>,
    component: Option<u32>,
    protocol: Option<String>,
    priority: Option<u32>,
    ip: Option<String>,
    port: Option<u16>,
    candidate_type: Option<String>,
    network: Option<u32>,
    generation: Option<u32>,
    rel_addr: Option<String>,
    rel_port: Option<u16>,
}

impl CandidateBuilder {
    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.id = Some(v.into());
        self
    }

    pub fn foundation(mut self, v: impl Into<String>) -> Self {
        self.foundation = Some(v.into());
        self
    }

    pub fn component(mut self, v: u32) -> Self {
        self.component = Some(v);
        self
    }

    pub fn protocol(mut self, v: impl Into<String>) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn priority(mut self, v: u32) -> Self {
        self.priority = Some(v);
        self
    }

    pub fn ip(mut self, v: impl Into<String>) -> Self {
        self.ip = Some(v.into());
        self
    }

    pub fn port(mut self, v: u16) -> Self {
        self.port = Some(v);
        self
    }

    pub fn candidate_type(mut self, v: impl Into<String>) -> Self {
        self.candidate_type = Some(v.into());
        self
    }

    pub fn network(mut self, v: u32) -> Self {
        self.network = Some(v);
        self
    }

    pub fn generation(mut self, v: u32) -> Self {
        self.generation = Some(v);
        self
    }

    pub fn rel_addr(mut self, v: impl Into<String>) -> Self {
        self.rel_addr = Some(v.into());
        self
    }

    pub fn rel_port(mut self, v: u16) -> Self {
        self.rel_port = Some(v);
        self
    }

    pub fn build(self) -> Result<Candidate, ColibriError> {
        fn req<T>(v: Option<T>, field: &'static str) -> Result<T, ColibriError> {
            v.ok_or(ColibriError::MissingRequiredField {
                element: "candidate",
                field,
            })
        }
        Ok(Candidate {
            id: req(self.id, "id")?,
            foundation: req(self.foundation, "foundation")?,
            component: req(self.component, "component")?,
            protocol: req(self.protocol, "protocol")?,
            priority: req(self.priority, "priority")?,
            ip: req(self.ip, "ip")?,
            port: req(self.port, "port")?,
            candidate_type: req(self.candidate_type, "type")?,
            network: req(self.network, "network")?,
            generation: req(self.generation, "generation")?,
            rel_addr: self.rel_addr,
            rel_port: self.rel_port,
        })
    }
}

// ============================================================================
// SCTP
// ============================================================================

/// The role of an SCTP association endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SctpRole {
    Client,
    Server,
}

impl SctpRole {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "client" => Some(Self::Client),
            "server" => Some(Self::Server),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

/// An SCTP association description (`<sctp role='server' port='5000'/>`).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Sctp {
    pub role: Option<SctpRole>,
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_requires_all_core_fields() {
        let err = Candidate::builder().id("c1").build().unwrap_err();
        assert_eq!(err, ColibriError::missing("candidate", "foundation"));
    }

    #[test]
    fn sctp_role_parses_case_insensitively() {
        assert_eq!(SctpRole::parse("SERVER"), Some(SctpRole::Server));
        assert_eq!(SctpRole::parse("client"), Some(SctpRole::Client));
        assert_eq!(SctpRole::parse("peer"), None);
    }

    #[test]
    fn transport_defaults_are_false() {
        let t = Transport::builder().build().unwrap();
        assert!(!t.ice_controlling);
        assert!(!t.use_unique_port);
        assert!(t.ice_udp.is_none());
    }
}
