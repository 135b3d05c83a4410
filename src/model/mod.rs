//! Typed entity graph for the Colibri2 conference-control protocol.
//!
//! The model is a standalone value type, decoupled from any transport: it can
//! be built from an XML token stream, from a JSON object tree, or directly
//! through the builders, and encoded back into either wire form.
//!
//! ```text
//! ColibriMessage
//! ├── ConferenceModifyIQ        (conference-modify)
//! │   ├── endpoints: Vec<Endpoint>
//! │   ├── relays: Vec<Relay>
//! │   └── connects: Option<Vec<Connect>>
//! ├── ConferenceModifiedIQ      (conference-modified)
//! │   └── sources: Option<Sources>   (feedback sources)
//! └── ConferenceNotificationIQ  (conference-notification)
//!     └── notifications: Vec<Notification>
//! ```
//!
//! All values are immutable once built; construction goes through builders
//! whose `build()` performs the required-field validation, so a missing
//! required field is a construction-time error, never a silent default.

mod conference;
mod connect;
mod entity;
mod media;
mod notification;
mod source;
mod transport;

pub use conference::{
    ColibriMessage, ConferenceModifiedIQ, ConferenceModifiedIQBuilder, ConferenceModifyIQ,
    ConferenceModifyIQBuilder, ConferenceNotificationIQ, ConferenceNotificationIQBuilder,
};
pub(crate) use conference::{RTCSTATS_ENABLED_DEFAULT, element};
pub use connect::{Connect, ConnectBuilder, ConnectProtocol, ConnectType, HttpHeader};
pub use entity::{Endpoint, EndpointBuilder, ForceMute, MucRole, Relay, RelayBuilder};
pub use media::{Media, MediaBuilder, MediaType, PayloadType, PayloadTypeBuilder, RtcpFb, RtpHdrExt};
pub use notification::{Notification, NotificationType};
pub use source::{MediaSource, MediaSourceBuilder, Source, Sources, SsrcGroup};
pub use transport::{
    Candidate, CandidateBuilder, Fingerprint, IceUdpTransport, IceUdpTransportBuilder, Sctp,
    SctpRole, Transport, TransportBuilder,
};

/// XML namespaces of the protocol schema.
pub mod ns {
    /// The Colibri2 namespace; all colibri2-native elements live here.
    pub const COLIBRI2: &str = "jitsi:colibri2";
    /// XEP-0167 Jingle RTP sessions (payload-type, parameter).
    pub const JINGLE_RTP: &str = "urn:xmpp:jingle:apps:rtp:1";
    /// XEP-0294 RTP header extension negotiation (rtp-hdrext, extmap-allow-mixed).
    pub const JINGLE_RTP_HDREXT: &str = "urn:xmpp:jingle:apps:rtp:rtp-hdrext:0";
    /// RTCP feedback (rtcp-fb).
    pub const JINGLE_RTCP_FB: &str = "urn:xmpp:jingle:apps:rtp:rtcp-fb:0";
    /// XEP-0339 source-specific media attributes (source, ssrc-group).
    pub const JINGLE_SSMA: &str = "urn:xmpp:jingle:apps:rtp:ssma:0";
    /// XEP-0176 ICE-UDP transport (transport, candidate, rtcp-mux).
    pub const JINGLE_ICE_UDP: &str = "urn:xmpp:jingle:transports:ice-udp:1";
    /// XEP-0320 DTLS fingerprints (fingerprint).
    pub const JINGLE_DTLS: &str = "urn:xmpp:jingle:apps:dtls:0";
    /// Colibri websocket extension (web-socket).
    pub const COLIBRI_WS: &str = "http://jitsi.org/protocol/colibri";
}

/// Normalize an enum literal for parsing: case-insensitive, with hyphen and
/// underscore treated as equivalent (`ICE_FAILED` ≡ `ice-failed`).
pub(crate) fn normalize_enum(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('_', "-")
}

/// Parse a wire boolean the way the protocol does: only the literal `true`
/// (any case) is true, anything else is false.
pub(crate) fn parse_wire_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_normalization_is_case_and_separator_insensitive() {
        assert_eq!(normalize_enum("ICE_FAILED"), "ice-failed");
        assert_eq!(normalize_enum("ice-failed"), "ice-failed");
        assert_eq!(normalize_enum("  Connect_Failed "), "connect-failed");
    }

    #[test]
    fn wire_bool_only_accepts_true() {
        assert!(parse_wire_bool("true"));
        assert!(parse_wire_bool("TRUE"));
        assert!(!parse_wire_bool("1"));
        assert!(!parse_wire_bool("yes"));
        assert!(!parse_wire_bool("false"));
    }
}
