//! JSON encoding: typed model to ordered object tree.
//!
//! Keys are kebab-case. Homogeneous simple collections (capability names,
//! SSRC lists inside an ssrc-group, websocket URLs) serialize as arrays of
//! scalars; collections of richer records serialize as arrays of objects.
//! Fields at their documented defaults are omitted, mirroring the XML
//! attribute elision. A source that carries nothing but its SSRC serializes
//! as the bare number (compatibility shape kept by the decoder as well).

use serde_json::{Map, Value};

use crate::model::{
    Candidate, ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
    Connect, Endpoint, Fingerprint, IceUdpTransport, Media, MediaSource, Notification,
    PayloadType, RTCSTATS_ENABLED_DEFAULT, Relay, Sctp, Source, Sources, SsrcGroup, Transport,
    ns,
};

// ============================================================
// Entry points
// ============================================================

/// Encode a colibri2 message into its JSON form.
pub fn encode_message(message: &ColibriMessage) -> Value {
    match message {
        ColibriMessage::ConferenceModify(iq) => encode_conference_modify(iq),
        ColibriMessage::ConferenceModified(iq) => encode_conference_modified(iq),
        ColibriMessage::ConferenceNotification(iq) => encode_conference_notification(iq),
    }
}

pub(crate) fn encode_conference_modify(iq: &ConferenceModifyIQ) -> Value {
    let mut map = Map::new();
    put_entities(&mut map, &iq.endpoints, &iq.relays);
    if iq.create {
        map.insert("create".into(), Value::Bool(true));
    }
    if iq.expire {
        map.insert("expire".into(), Value::Bool(true));
    }
    if iq.rtcstats_enabled != RTCSTATS_ENABLED_DEFAULT {
        map.insert("rtcstats-enabled".into(), Value::Bool(iq.rtcstats_enabled));
    }
    if let Some(connects) = &iq.connects {
        map.insert(
            "connects".into(),
            Value::Array(connects.iter().map(encode_connect).collect()),
        );
    }
    map.insert("meeting-id".into(), Value::String(iq.meeting_id.clone()));
    if let Some(name) = &iq.conference_name {
        map.insert("name".into(), Value::String(name.clone()));
    }
    Value::Object(map)
}

pub(crate) fn encode_conference_modified(iq: &ConferenceModifiedIQ) -> Value {
    let mut map = Map::new();
    put_entities(&mut map, &iq.endpoints, &iq.relays);
    if let Some(sources) = &iq.sources {
        map.insert("sources".into(), encode_sources(sources));
    }
    Value::Object(map)
}

pub(crate) fn encode_conference_notification(iq: &ConferenceNotificationIQ) -> Value {
    let mut map = Map::new();
    map.insert("meeting-id".into(), Value::String(iq.meeting_id.clone()));
    map.insert(
        "notifications".into(),
        Value::Array(iq.notifications.iter().map(encode_notification).collect()),
    );
    Value::Object(map)
}

fn put_entities(map: &mut Map<String, Value>, endpoints: &[Endpoint], relays: &[Relay]) {
    if !endpoints.is_empty() {
        map.insert(
            "endpoints".into(),
            Value::Array(endpoints.iter().map(encode_endpoint).collect()),
        );
    }
    if !relays.is_empty() {
        map.insert(
            "relays".into(),
            Value::Array(relays.iter().map(encode_relay).collect()),
        );
    }
}

// ============================================================
// Conference entities
// ============================================================

fn encode_entity_common(
    id: &str,
    create: bool,
    expire: bool,
    media: &[Media],
    transport: &Option<Transport>,
    sources: &Option<Sources>,
) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(id.to_owned()));
    if create {
        map.insert("create".into(), Value::Bool(true));
    }
    if expire {
        map.insert("expire".into(), Value::Bool(true));
    }
    if !media.is_empty() {
        map.insert(
            "medias".into(),
            Value::Array(media.iter().map(encode_media).collect()),
        );
    }
    if let Some(transport) = transport {
        map.insert("transport".into(), encode_transport(transport));
    }
    if let Some(sources) = sources {
        map.insert("sources".into(), encode_sources(sources));
    }
    map
}

pub(crate) fn encode_endpoint(endpoint: &Endpoint) -> Value {
    let mut map = encode_entity_common(
        &endpoint.id,
        endpoint.create,
        endpoint.expire,
        &endpoint.media,
        &endpoint.transport,
        &endpoint.sources,
    );
    if let Some(stats_id) = &endpoint.stats_id {
        map.insert("stats-id".into(), Value::String(stats_id.clone()));
    }
    if let Some(role) = &endpoint.muc_role {
        map.insert("muc-role".into(), Value::String(role.as_str().to_owned()));
    }
    if let Some(force_mute) = &endpoint.force_mute {
        // Unlike the other booleans, force-mute always carries both flags.
        let mut fm = Map::new();
        fm.insert("audio".into(), Value::Bool(force_mute.audio));
        fm.insert("video".into(), Value::Bool(force_mute.video));
        map.insert("force-mute".into(), Value::Object(fm));
    }
    if let Some(n) = endpoint.initial_last_n {
        let mut last_n = Map::new();
        last_n.insert("value".into(), Value::from(n));
        map.insert("initial-last-n".into(), Value::Object(last_n));
    }
    if !endpoint.capabilities.is_empty() {
        map.insert(
            "capabilities".into(),
            Value::Array(
                endpoint
                    .capabilities
                    .iter()
                    .map(|c| Value::String(c.clone()))
                    .collect(),
            ),
        );
    }
    Value::Object(map)
}

pub(crate) fn encode_relay(relay: &Relay) -> Value {
    let mut map = encode_entity_common(
        &relay.id,
        relay.create,
        relay.expire,
        &relay.media,
        &relay.transport,
        &relay.sources,
    );
    if let Some(mesh_id) = &relay.mesh_id {
        map.insert("mesh-id".into(), Value::String(mesh_id.clone()));
    }
    if let Some(endpoints) = &relay.endpoints {
        map.insert(
            "endpoints".into(),
            Value::Array(endpoints.iter().map(encode_endpoint).collect()),
        );
    }
    Value::Object(map)
}

// ============================================================
// Media
// ============================================================

fn encode_media(media: &Media) -> Value {
    let mut map = Map::new();
    map.insert(
        "type".into(),
        Value::String(media.media_type.as_str().to_owned()),
    );
    if !media.payload_types.is_empty() {
        map.insert(
            "payload-types".into(),
            Value::Array(media.payload_types.iter().map(encode_payload_type).collect()),
        );
    }
    if !media.rtp_header_extensions.is_empty() {
        map.insert(
            "rtp-hdrexts".into(),
            Value::Array(
                media
                    .rtp_header_extensions
                    .iter()
                    .map(|ext| {
                        let mut m = Map::new();
                        m.insert("id".into(), Value::from(ext.id));
                        m.insert("uri".into(), Value::String(ext.uri.clone()));
                        Value::Object(m)
                    })
                    .collect(),
            ),
        );
    }
    if media.extmap_allow_mixed {
        map.insert("extmap-allow-mixed".into(), Value::Bool(true));
    }
    Value::Object(map)
}

fn encode_payload_type(pt: &PayloadType) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::from(pt.id));
    if let Some(name) = &pt.name {
        map.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(clockrate) = pt.clockrate {
        map.insert("clockrate".into(), Value::from(clockrate));
    }
    if let Some(channels) = pt.channels {
        map.insert("channels".into(), Value::from(channels));
    }
    if !pt.parameters.is_empty() {
        map.insert("parameters".into(), encode_parameters(&pt.parameters));
    }
    if !pt.rtcp_fbs.is_empty() {
        map.insert(
            "rtcp-fbs".into(),
            Value::Array(
                pt.rtcp_fbs
                    .iter()
                    .map(|fb| {
                        let mut m = Map::new();
                        m.insert("type".into(), Value::String(fb.fb_type.clone()));
                        if let Some(subtype) = &fb.subtype {
                            m.insert("subtype".into(), Value::String(subtype.clone()));
                        }
                        Value::Object(m)
                    })
                    .collect(),
            ),
        );
    }
    Value::Object(map)
}

fn encode_parameters(parameters: &indexmap::IndexMap<String, String>) -> Value {
    let mut map = Map::new();
    for (name, value) in parameters {
        map.insert(name.clone(), Value::String(value.clone()));
    }
    Value::Object(map)
}

// ============================================================
// Sources
// ============================================================

fn encode_sources(sources: &Sources) -> Value {
    Value::Array(sources.media_sources.iter().map(encode_media_source).collect())
}

fn encode_media_source(source: &MediaSource) -> Value {
    let mut map = Map::new();
    map.insert(
        "type".into(),
        Value::String(source.media_type.as_str().to_owned()),
    );
    map.insert("id".into(), Value::String(source.id.clone()));
    if !source.sources.is_empty() {
        map.insert(
            "sources".into(),
            Value::Array(source.sources.iter().map(encode_source).collect()),
        );
    }
    if !source.ssrc_groups.is_empty() {
        map.insert(
            "ssrc-groups".into(),
            Value::Array(source.ssrc_groups.iter().map(encode_ssrc_group).collect()),
        );
    }
    Value::Object(map)
}

fn encode_source(source: &Source) -> Value {
    // Compatibility shape: sources used to be just their ssrc values.
    if source.is_bare() {
        return Value::from(source.ssrc);
    }
    let mut map = Map::new();
    map.insert("ssrc".into(), Value::from(source.ssrc));
    if let Some(name) = &source.name {
        map.insert("name".into(), Value::String(name.clone()));
    }
    if !source.parameters.is_empty() {
        map.insert("parameters".into(), encode_parameters(&source.parameters));
    }
    Value::Object(map)
}

fn encode_ssrc_group(group: &SsrcGroup) -> Value {
    let mut map = Map::new();
    map.insert("semantics".into(), Value::String(group.semantics.clone()));
    map.insert(
        "sources".into(),
        Value::Array(group.sources.iter().map(|s| Value::from(*s)).collect()),
    );
    Value::Object(map)
}

// ============================================================
// Transport
// ============================================================

fn encode_transport(transport: &Transport) -> Value {
    let mut map = Map::new();
    if transport.ice_controlling {
        map.insert("ice-controlling".into(), Value::Bool(true));
    }
    if transport.use_unique_port {
        map.insert("use-unique-port".into(), Value::Bool(true));
    }
    if let Some(ice_udp) = &transport.ice_udp {
        map.insert("transport".into(), encode_ice_udp(ice_udp));
    }
    if let Some(sctp) = &transport.sctp {
        map.insert("sctp".into(), encode_sctp(sctp));
    }
    Value::Object(map)
}

fn encode_ice_udp(transport: &IceUdpTransport) -> Value {
    let mut map = Map::new();
    map.insert(
        "xmlns".into(),
        Value::String(ns::JINGLE_ICE_UDP.to_owned()),
    );
    if let Some(ufrag) = &transport.ufrag {
        map.insert("ufrag".into(), Value::String(ufrag.clone()));
    }
    if let Some(pwd) = &transport.pwd {
        map.insert("pwd".into(), Value::String(pwd.clone()));
    }
    if !transport.fingerprints.is_empty() {
        map.insert(
            "fingerprints".into(),
            Value::Array(transport.fingerprints.iter().map(encode_fingerprint).collect()),
        );
    }
    if !transport.candidates.is_empty() {
        map.insert(
            "candidates".into(),
            Value::Array(transport.candidates.iter().map(encode_candidate).collect()),
        );
    }
    if !transport.web_socket_urls.is_empty() {
        map.insert(
            "web-sockets".into(),
            Value::Array(
                transport
                    .web_socket_urls
                    .iter()
                    .map(|url| Value::String(url.clone()))
                    .collect(),
            ),
        );
    }
    if transport.rtcp_mux {
        map.insert("rtcp-mux".into(), Value::Bool(true));
    }
    Value::Object(map)
}

fn encode_fingerprint(fingerprint: &Fingerprint) -> Value {
    let mut map = Map::new();
    map.insert(
        "fingerprint".into(),
        Value::String(fingerprint.value.clone()),
    );
    map.insert("hash".into(), Value::String(fingerprint.hash.clone()));
    if let Some(setup) = &fingerprint.setup {
        map.insert("setup".into(), Value::String(setup.clone()));
    }
    if fingerprint.cryptex {
        map.insert("cryptex".into(), Value::Bool(true));
    }
    Value::Object(map)
}

fn encode_candidate(candidate: &Candidate) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(candidate.id.clone()));
    map.insert(
        "foundation".into(),
        Value::String(candidate.foundation.clone()),
    );
    map.insert("component".into(), Value::from(candidate.component));
    map.insert("protocol".into(), Value::String(candidate.protocol.clone()));
    map.insert("priority".into(), Value::from(candidate.priority));
    map.insert("ip".into(), Value::String(candidate.ip.clone()));
    map.insert("port".into(), Value::from(candidate.port));
    map.insert(
        "type".into(),
        Value::String(candidate.candidate_type.clone()),
    );
    map.insert("network".into(), Value::from(candidate.network));
    map.insert("generation".into(), Value::from(candidate.generation));
    if let Some(rel_addr) = &candidate.rel_addr {
        map.insert("rel-addr".into(), Value::String(rel_addr.clone()));
    }
    if let Some(rel_port) = candidate.rel_port {
        map.insert("rel-port".into(), Value::from(rel_port));
    }
    Value::Object(map)
}

fn encode_sctp(sctp: &Sctp) -> Value {
    let mut map = Map::new();
    if let Some(role) = sctp.role {
        map.insert("role".into(), Value::String(role.as_str().to_owned()));
    }
    if let Some(port) = sctp.port {
        map.insert("port".into(), Value::from(port));
    }
    Value::Object(map)
}

// ============================================================
// Connect / notification
// ============================================================

pub(crate) fn encode_connect(connect: &Connect) -> Value {
    let mut map = Map::new();
    map.insert("url".into(), Value::String(connect.url.clone()));
    map.insert(
        "protocol".into(),
        Value::String(connect.protocol.as_str().to_owned()),
    );
    map.insert(
        "type".into(),
        Value::String(connect.connect_type.as_str().to_owned()),
    );
    if connect.audio {
        map.insert("audio".into(), Value::Bool(true));
    }
    if connect.video {
        map.insert("video".into(), Value::Bool(true));
    }
    if !connect.http_headers.is_empty() {
        map.insert(
            "http-headers".into(),
            Value::Array(
                connect
                    .http_headers
                    .iter()
                    .map(|header| {
                        let mut m = Map::new();
                        m.insert("name".into(), Value::String(header.name.clone()));
                        m.insert("value".into(), Value::String(header.value.clone()));
                        Value::Object(m)
                    })
                    .collect(),
            ),
        );
    }
    Value::Object(map)
}

fn encode_notification(notification: &Notification) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(notification.id.clone()));
    map.insert(
        "type".into(),
        Value::String(notification.notification_type.as_str().to_owned()),
    );
    if let Some(description) = &notification.description {
        map.insert(
            "description".into(),
            Value::String(description.clone()),
        );
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_source_is_a_number() {
        assert_eq!(encode_source(&Source::new(1234)), Value::from(1234u32));
    }

    #[test]
    fn named_source_is_an_object() {
        let mut source = Source::new(1234);
        source.name = Some("jvb-a0".into());
        let v = encode_source(&source);
        assert_eq!(v["ssrc"], Value::from(1234u32));
        assert_eq!(v["name"], Value::from("jvb-a0"));
    }

    #[test]
    fn default_booleans_are_omitted() {
        let iq = ConferenceModifyIQ::builder()
            .meeting_id("m1")
            .build()
            .unwrap();
        let v = encode_conference_modify(&iq);
        let obj = v.as_object().unwrap();
        assert!(!obj.contains_key("create"));
        assert!(!obj.contains_key("rtcstats-enabled"));
        assert_eq!(obj["meeting-id"], Value::from("m1"));
    }
}
