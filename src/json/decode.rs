//! JSON decoding: object tree to typed model.
//!
//! Validation mirrors the XML decoder exactly (same error taxonomy, same
//! defaults). The decoder is liberal in what numbers it accepts: a numeric
//! field may arrive as a JSON number or as a numeric string, since older
//! emitters rendered attribute values as strings. Unknown keys are ignored.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ColibriError;
use crate::model::{
    Candidate, ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
    Connect, ConnectProtocol, ConnectType, Endpoint, Fingerprint, IceUdpTransport, Media,
    MediaSource, MediaType, MucRole, Notification, NotificationType, PayloadType, Relay, RtcpFb,
    RtpHdrExt, Sctp, SctpRole, Source, Sources, SsrcGroup, Transport, parse_wire_bool,
};
use crate::xml::decode::parse_number;

// ============================================================
// Entry points
// ============================================================

/// Decode a colibri2 message from its JSON form, dispatching on shape:
/// a `notifications` key marks a conference-notification, a `meeting-id`
/// key marks a conference-modify, anything else is a conference-modified.
pub fn decode_message(value: &Value) -> Result<ColibriMessage, ColibriError> {
    let map = as_object("message", value)?;
    if map.contains_key("notifications") {
        decode_conference_notification(value).map(ColibriMessage::ConferenceNotification)
    } else if map.contains_key("meeting-id") {
        decode_conference_modify(value).map(ColibriMessage::ConferenceModify)
    } else {
        decode_conference_modified(value).map(ColibriMessage::ConferenceModified)
    }
}

pub(crate) fn decode_conference_modify(value: &Value) -> Result<ConferenceModifyIQ, ColibriError> {
    let map = as_object("conference-modify", value)?;
    let mut b = ConferenceModifyIQ::builder()
        .meeting_id(required_string(map, "conference-modify", "meeting-id")?)
        .create(bool_field(map, "create"))
        .expire(bool_field(map, "expire"));
    if let Some(name) = optional_string(map, "conference-modify", "name")? {
        b = b.conference_name(name);
    }
    if let Some(v) = map.get("rtcstats-enabled") {
        b = b.rtcstats_enabled(value_as_bool(v));
    }
    for endpoint in array_field(map, "conference-modify", "endpoints")? {
        b = b.endpoint(decode_endpoint(endpoint)?);
    }
    for relay in array_field(map, "conference-modify", "relays")? {
        b = b.relay(decode_relay(relay)?);
    }
    if let Some(connects) = map.get("connects") {
        // An empty list is distinct from an absent one.
        let items = as_array("connects", connects)?;
        let mut decoded = Vec::with_capacity(items.len());
        for item in items {
            decoded.push(decode_connect(item)?);
        }
        b = b.connects(decoded);
    }
    b.build()
}

pub(crate) fn decode_conference_modified(
    value: &Value,
) -> Result<ConferenceModifiedIQ, ColibriError> {
    let map = as_object("conference-modified", value)?;
    let mut b = ConferenceModifiedIQ::builder();
    for endpoint in array_field(map, "conference-modified", "endpoints")? {
        b = b.endpoint(decode_endpoint(endpoint)?);
    }
    for relay in array_field(map, "conference-modified", "relays")? {
        b = b.relay(decode_relay(relay)?);
    }
    if let Some(sources) = map.get("sources") {
        b = b.sources(decode_sources(sources)?);
    }
    b.build()
}

pub(crate) fn decode_conference_notification(
    value: &Value,
) -> Result<ConferenceNotificationIQ, ColibriError> {
    let map = as_object("conference-notification", value)?;
    let mut b = ConferenceNotificationIQ::builder()
        .meeting_id(required_string(map, "conference-notification", "meeting-id")?);
    for item in array_field(map, "conference-notification", "notifications")? {
        b = b.notification(decode_notification(item)?);
    }
    b.build()
}

// ============================================================
// Conference entities
// ============================================================

fn decode_endpoint(value: &Value) -> Result<Endpoint, ColibriError> {
    let map = as_object("endpoint", value)?;
    let mut b = Endpoint::builder()
        .id(required_string(map, "endpoint", "id")?)
        .create(bool_field(map, "create"))
        .expire(bool_field(map, "expire"));
    if let Some(stats_id) = optional_string(map, "endpoint", "stats-id")? {
        b = b.stats_id(stats_id);
    }
    if let Some(role) = optional_string(map, "endpoint", "muc-role")? {
        let role = MucRole::parse(&role)
            .ok_or_else(|| ColibriError::invalid_enum("endpoint", "muc-role", role))?;
        b = b.muc_role(role);
    }
    for media in array_field(map, "endpoint", "medias")? {
        b = b.media(decode_media(media)?);
    }
    if let Some(transport) = map.get("transport") {
        b = b.transport(decode_transport(transport)?);
    }
    if let Some(sources) = map.get("sources") {
        b = b.sources(decode_sources(sources)?);
    }
    if let Some(force_mute) = map.get("force-mute") {
        let fm = as_object("force-mute", force_mute)?;
        b = b.force_mute(bool_field(fm, "audio"), bool_field(fm, "video"));
    }
    if let Some(last_n) = map.get("initial-last-n") {
        let last_n = as_object("initial-last-n", last_n)?;
        let value = last_n
            .get("value")
            .ok_or(ColibriError::missing("initial-last-n", "value"))?;
        b = b.initial_last_n(number_value("initial-last-n", "value", value)?);
    }
    for capability in array_field(map, "endpoint", "capabilities")? {
        let name = capability.as_str().ok_or_else(|| {
            ColibriError::malformed("capability", "capability names must be strings")
        })?;
        b = b.capability(name);
    }
    b.build()
}

fn decode_relay(value: &Value) -> Result<Relay, ColibriError> {
    let map = as_object("relay", value)?;
    let mut b = Relay::builder()
        .id(required_string(map, "relay", "id")?)
        .create(bool_field(map, "create"))
        .expire(bool_field(map, "expire"));
    if let Some(mesh_id) = optional_string(map, "relay", "mesh-id")? {
        b = b.mesh_id(mesh_id);
    }
    for media in array_field(map, "relay", "medias")? {
        b = b.media(decode_media(media)?);
    }
    if let Some(transport) = map.get("transport") {
        b = b.transport(decode_transport(transport)?);
    }
    if let Some(sources) = map.get("sources") {
        b = b.sources(decode_sources(sources)?);
    }
    if let Some(endpoints) = map.get("endpoints") {
        let items = as_array("endpoints", endpoints)?;
        let mut decoded = Vec::with_capacity(items.len());
        for item in items {
            decoded.push(decode_endpoint(item)?);
        }
        b = b.endpoints(decoded);
    }
    b.build()
}

// ============================================================
// Media
// ============================================================

fn decode_media(value: &Value) -> Result<Media, ColibriError> {
    let map = as_object("media", value)?;
    let type_str = required_string(map, "media", "type")?;
    let media_type = MediaType::parse(&type_str)
        .ok_or_else(|| ColibriError::invalid_enum("media", "type", type_str))?;
    let mut b = Media::builder().media_type(media_type);
    for pt in array_field(map, "media", "payload-types")? {
        b = b.payload_type(decode_payload_type(pt)?);
    }
    for ext in array_field(map, "media", "rtp-hdrexts")? {
        b = b.rtp_header_extension(decode_rtp_hdrext(ext)?);
    }
    if let Some(v) = map.get("extmap-allow-mixed") {
        b = b.extmap_allow_mixed(value_as_bool(v));
    }
    b.build()
}

fn decode_payload_type(value: &Value) -> Result<PayloadType, ColibriError> {
    let map = as_object("payload-type", value)?;
    let mut b = PayloadType::builder().id(required_number(map, "payload-type", "id")?);
    if let Some(name) = optional_string(map, "payload-type", "name")? {
        b = b.name(name);
    }
    if let Some(clockrate) = optional_number(map, "payload-type", "clockrate")? {
        b = b.clockrate(clockrate);
    }
    if let Some(channels) = optional_number(map, "payload-type", "channels")? {
        b = b.channels(channels);
    }
    if let Some(parameters) = map.get("parameters") {
        for (name, value) in as_object("parameters", parameters)? {
            b = b.parameter(name.clone(), scalar_to_string(value));
        }
    }
    for fb in array_field(map, "payload-type", "rtcp-fbs")? {
        let fb_map = as_object("rtcp-fb", fb)?;
        b = b.rtcp_fb(RtcpFb {
            fb_type: required_string(fb_map, "rtcp-fb", "type")?,
            subtype: optional_string(fb_map, "rtcp-fb", "subtype")?,
        });
    }
    b.build()
}

fn decode_rtp_hdrext(value: &Value) -> Result<RtpHdrExt, ColibriError> {
    let map = as_object("rtp-hdrext", value)?;
    Ok(RtpHdrExt {
        id: required_number(map, "rtp-hdrext", "id")?,
        uri: required_string(map, "rtp-hdrext", "uri")?,
    })
}

// ============================================================
// Sources
// ============================================================

fn decode_sources(value: &Value) -> Result<Sources, ColibriError> {
    let items = as_array("sources", value)?;
    let mut media_sources = Vec::with_capacity(items.len());
    for item in items {
        media_sources.push(decode_media_source(item)?);
    }
    Ok(Sources::new(media_sources))
}

fn decode_media_source(value: &Value) -> Result<MediaSource, ColibriError> {
    let map = as_object("media-source", value)?;
    let type_str = required_string(map, "media-source", "type")?;
    let media_type = MediaType::parse(&type_str)
        .ok_or_else(|| ColibriError::invalid_enum("media-source", "type", type_str))?;
    let mut b = MediaSource::builder()
        .media_type(media_type)
        .id(required_string(map, "media-source", "id")?);
    for source in array_field(map, "media-source", "sources")? {
        b = b.source(decode_source(source)?);
    }
    for group in array_field(map, "media-source", "ssrc-groups")? {
        b = b.ssrc_group(decode_ssrc_group(group)?);
    }
    b.build()
}

fn decode_source(value: &Value) -> Result<Source, ColibriError> {
    // Compatibility shape: a bare number is a source with only its ssrc.
    if !value.is_object() {
        return Ok(Source::new(number_value("source", "ssrc", value)?));
    }
    let map = as_object("source", value)?;
    let ssrc_value = map
        .get("ssrc")
        .ok_or(ColibriError::missing("source", "ssrc"))?;
    let mut source = Source::new(number_value("source", "ssrc", ssrc_value)?);
    source.name = optional_string(map, "source", "name")?;
    if let Some(parameters) = map.get("parameters") {
        for (name, value) in as_object("parameters", parameters)? {
            source.parameters.insert(name.clone(), scalar_to_string(value));
        }
    }
    Ok(source)
}

fn decode_ssrc_group(value: &Value) -> Result<SsrcGroup, ColibriError> {
    let map = as_object("ssrc-group", value)?;
    let semantics = required_string(map, "ssrc-group", "semantics")?;
    let mut sources = Vec::new();
    for ssrc in array_field(map, "ssrc-group", "sources")? {
        sources.push(number_value("ssrc-group", "sources", ssrc)?);
    }
    Ok(SsrcGroup { semantics, sources })
}

// ============================================================
// Transport
// ============================================================

fn decode_transport(value: &Value) -> Result<Transport, ColibriError> {
    let map = as_object("transport", value)?;
    let mut b = Transport::builder()
        .ice_controlling(bool_field(map, "ice-controlling"))
        .use_unique_port(bool_field(map, "use-unique-port"));
    if let Some(ice_udp) = map.get("transport") {
        b = b.ice_udp(decode_ice_udp(ice_udp)?);
    }
    if let Some(sctp) = map.get("sctp") {
        b = b.sctp(decode_sctp(sctp)?);
    }
    b.build()
}

fn decode_ice_udp(value: &Value) -> Result<IceUdpTransport, ColibriError> {
    let map = as_object("transport", value)?;
    let mut b = IceUdpTransport::builder();
    if let Some(ufrag) = optional_string(map, "transport", "ufrag")? {
        b = b.ufrag(ufrag);
    }
    if let Some(pwd) = optional_string(map, "transport", "pwd")? {
        b = b.pwd(pwd);
    }
    for fingerprint in array_field(map, "transport", "fingerprints")? {
        b = b.fingerprint(decode_fingerprint(fingerprint)?);
    }
    for candidate in array_field(map, "transport", "candidates")? {
        b = b.candidate(decode_candidate(candidate)?);
    }
    for url in array_field(map, "transport", "web-sockets")? {
        let url = url.as_str().ok_or_else(|| {
            ColibriError::malformed("web-socket", "websocket entries must be strings")
        })?;
        b = b.web_socket_url(url);
    }
    if let Some(v) = map.get("rtcp-mux") {
        b = b.rtcp_mux(value_as_bool(v));
    }
    b.build()
}

fn decode_fingerprint(value: &Value) -> Result<Fingerprint, ColibriError> {
    let map = as_object("fingerprint", value)?;
    let mut cryptex = false;
    if let Some(v) = map.get("cryptex") {
        cryptex = value_as_bool(v);
    }
    Ok(Fingerprint {
        value: required_string(map, "fingerprint", "fingerprint")?,
        hash: required_string(map, "fingerprint", "hash")?,
        setup: optional_string(map, "fingerprint", "setup")?,
        cryptex,
    })
}

fn decode_candidate(value: &Value) -> Result<Candidate, ColibriError> {
    let map = as_object("candidate", value)?;
    let mut b = Candidate::builder()
        .id(required_string(map, "candidate", "id")?)
        .foundation(required_string(map, "candidate", "foundation")?)
        .component(required_number(map, "candidate", "component")?)
        .protocol(required_string(map, "candidate", "protocol")?)
        .priority(required_number(map, "candidate", "priority")?)
        .ip(required_string(map, "candidate", "ip")?)
        .port(required_number(map, "candidate", "port")?)
        .candidate_type(required_string(map, "candidate", "type")?)
        .network(required_number(map, "candidate", "network")?)
        .generation(required_number(map, "candidate", "generation")?);
    if let Some(rel_addr) = optional_string(map, "candidate", "rel-addr")? {
        b = b.rel_addr(rel_addr);
    }
    if let Some(rel_port) = optional_number(map, "candidate", "rel-port")? {
        b = b.rel_port(rel_port);
    }
    b.build()
}

fn decode_sctp(value: &Value) -> Result<Sctp, ColibriError> {
    let map = as_object("sctp", value)?;
    let role = match optional_string(map, "sctp", "role")? {
        Some(role) => Some(
            SctpRole::parse(&role)
                .ok_or_else(|| ColibriError::invalid_enum("sctp", "role", role))?,
        ),
        None => None,
    };
    Ok(Sctp {
        role,
        port: optional_number(map, "sctp", "port")?,
    })
}

// ============================================================
// Connect / notification
// ============================================================

pub(crate) fn decode_connect(value: &Value) -> Result<Connect, ColibriError> {
    let map = as_object("connect", value)?;
    let protocol_str = required_string(map, "connect", "protocol")?;
    let protocol = ConnectProtocol::parse(&protocol_str)
        .ok_or_else(|| ColibriError::invalid_enum("connect", "protocol", protocol_str))?;
    let type_str = required_string(map, "connect", "type")?;
    let connect_type = ConnectType::parse(&type_str)
        .ok_or_else(|| ColibriError::invalid_enum("connect", "type", type_str))?;
    let mut b = Connect::builder()
        .url_str(&required_string(map, "connect", "url")?)?
        .protocol(protocol)
        .connect_type(connect_type)
        .audio(bool_field(map, "audio"))
        .video(bool_field(map, "video"));
    for header in array_field(map, "connect", "http-headers")? {
        let header = as_object("http-header", header)?;
        b = b.http_header(
            required_string(header, "http-header", "name")?,
            required_string(header, "http-header", "value")?,
        );
    }
    b.build()
}

fn decode_notification(value: &Value) -> Result<Notification, ColibriError> {
    let map = as_object("notification", value)?;
    let type_str = required_string(map, "notification", "type")?;
    let notification_type = NotificationType::parse(&type_str)
        .ok_or_else(|| ColibriError::invalid_enum("notification", "type", type_str))?;
    Ok(Notification {
        id: required_string(map, "notification", "id")?,
        notification_type,
        description: optional_string(map, "notification", "description")?,
    })
}

// ============================================================
// Shared helpers
// ============================================================

fn as_object<'a>(
    element: &'static str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ColibriError> {
    value
        .as_object()
        .ok_or_else(|| ColibriError::malformed(element, "expected a JSON object"))
}

fn as_array<'a>(element: &'static str, value: &'a Value) -> Result<&'a Vec<Value>, ColibriError> {
    value
        .as_array()
        .ok_or_else(|| ColibriError::malformed(element, "expected a JSON array"))
}

/// An optional array field; an absent key is an empty slice.
fn array_field<'a>(
    map: &'a Map<String, Value>,
    element: &'static str,
    field: &'static str,
) -> Result<&'a [Value], ColibriError> {
    match map.get(field) {
        Some(value) => as_array(element, value).map(Vec::as_slice),
        None => Ok(&[]),
    }
}

fn required_string(
    map: &Map<String, Value>,
    element: &'static str,
    field: &'static str,
) -> Result<String, ColibriError> {
    optional_string(map, element, field)?
        .ok_or(ColibriError::MissingRequiredField { element, field })
}

fn optional_string(
    map: &Map<String, Value>,
    element: &'static str,
    field: &'static str,
) -> Result<Option<String>, ColibriError> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ColibriError::malformed(
            element,
            format!("'{field}' must be a string"),
        )),
        None => Ok(None),
    }
}

/// A missing or non-true field is false; both JSON `true` and the wire
/// literal `"true"` are accepted.
fn bool_field(map: &Map<String, Value>, field: &str) -> bool {
    map.get(field).map(value_as_bool).unwrap_or(false)
}

fn value_as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => parse_wire_bool(s),
        _ => false,
    }
}

fn number_value<T: FromStr>(
    element: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<T, ColibriError> {
    match value {
        Value::Number(n) => parse_number(element, field, &n.to_string()),
        Value::String(s) => parse_number(element, field, s),
        other => Err(ColibriError::invalid_number(
            element,
            field,
            other.to_string(),
        )),
    }
}

fn required_number<T: FromStr>(
    map: &Map<String, Value>,
    element: &'static str,
    field: &'static str,
) -> Result<T, ColibriError> {
    let value = map
        .get(field)
        .ok_or(ColibriError::MissingRequiredField { element, field })?;
    number_value(element, field, value)
}

fn optional_number<T: FromStr>(
    map: &Map<String, Value>,
    element: &'static str,
    field: &'static str,
) -> Result<Option<T>, ColibriError> {
    match map.get(field) {
        Some(value) => number_value(element, field, value).map(Some),
        None => Ok(None),
    }
}

/// Parameter values may arrive as any scalar; they are strings in the model.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
