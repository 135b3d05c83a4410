//! XML encoding: typed model to element tree.
//!
//! Output ordering is fixed so that encodings are structurally stable:
//! entity children are written media*, transport?, sources?, then the
//! entity-specific elements, then extensions. Attributes at their documented
//! defaults are never written. An `xmlns` attribute is emitted whenever an
//! element's namespace differs from its parent's.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::ColibriError;
use crate::model::{
    Candidate, ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
    Connect, Endpoint, Fingerprint, IceUdpTransport, Media, MediaSource, Notification,
    PayloadType, RTCSTATS_ENABLED_DEFAULT, Relay, Sctp, Source, Sources, SsrcGroup, Transport,
    element, ns,
};
use crate::registry::Extension;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

// ============================================================
// Entry points
// ============================================================

/// Encode a colibri2 message into its XML form.
pub fn encode_message(message: &ColibriMessage) -> Result<String, ColibriError> {
    match message {
        ColibriMessage::ConferenceModify(iq) => encode_conference_modify(iq),
        ColibriMessage::ConferenceModified(iq) => encode_conference_modified(iq),
        ColibriMessage::ConferenceNotification(iq) => encode_conference_notification(iq),
    }
}

pub(crate) fn encode_conference_modify(iq: &ConferenceModifyIQ) -> Result<String, ColibriError> {
    with_writer(|w| write_conference_modify(w, iq))
}

pub(crate) fn encode_conference_modified(
    iq: &ConferenceModifiedIQ,
) -> Result<String, ColibriError> {
    with_writer(|w| write_conference_modified(w, iq))
}

pub(crate) fn encode_conference_notification(
    iq: &ConferenceNotificationIQ,
) -> Result<String, ColibriError> {
    with_writer(|w| write_conference_notification(w, iq))
}

fn with_writer(
    f: impl FnOnce(&mut XmlWriter) -> Result<(), ColibriError>,
) -> Result<String, ColibriError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    f(&mut writer)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| ColibriError::malformed("document", format!("non-utf8 output: {e}")))
}

// ============================================================
// IQ payloads
// ============================================================

fn write_conference_modify(w: &mut XmlWriter, iq: &ConferenceModifyIQ) -> Result<(), ColibriError> {
    let mut start = BytesStart::new(element::CONFERENCE_MODIFY);
    start.push_attribute(("xmlns", ns::COLIBRI2));
    start.push_attribute(("meeting-id", iq.meeting_id.as_str()));
    if let Some(name) = &iq.conference_name {
        start.push_attribute(("name", name.as_str()));
    }
    push_true(&mut start, "create", iq.create);
    push_true(&mut start, "expire", iq.expire);
    if iq.rtcstats_enabled != RTCSTATS_ENABLED_DEFAULT {
        start.push_attribute(("rtcstats-enabled", "false"));
    }

    let has_children = !iq.endpoints.is_empty()
        || !iq.relays.is_empty()
        || iq.connects.is_some()
        || !iq.extensions.is_empty();
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for endpoint in &iq.endpoints {
        write_endpoint(w, endpoint)?;
    }
    for relay in &iq.relays {
        write_relay(w, relay)?;
    }
    if let Some(connects) = &iq.connects {
        write_connects(w, connects)?;
    }
    for ext in &iq.extensions {
        write_extension(w, ext, ns::COLIBRI2)?;
    }
    write_end(w, element::CONFERENCE_MODIFY)
}

fn write_conference_modified(
    w: &mut XmlWriter,
    iq: &ConferenceModifiedIQ,
) -> Result<(), ColibriError> {
    let mut start = BytesStart::new(element::CONFERENCE_MODIFIED);
    start.push_attribute(("xmlns", ns::COLIBRI2));

    let has_children = !iq.endpoints.is_empty()
        || !iq.relays.is_empty()
        || iq.sources.is_some()
        || !iq.extensions.is_empty();
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for endpoint in &iq.endpoints {
        write_endpoint(w, endpoint)?;
    }
    for relay in &iq.relays {
        write_relay(w, relay)?;
    }
    if let Some(sources) = &iq.sources {
        write_sources(w, sources)?;
    }
    for ext in &iq.extensions {
        write_extension(w, ext, ns::COLIBRI2)?;
    }
    write_end(w, element::CONFERENCE_MODIFIED)
}

fn write_conference_notification(
    w: &mut XmlWriter,
    iq: &ConferenceNotificationIQ,
) -> Result<(), ColibriError> {
    let mut start = BytesStart::new(element::CONFERENCE_NOTIFICATION);
    start.push_attribute(("xmlns", ns::COLIBRI2));
    start.push_attribute(("meeting-id", iq.meeting_id.as_str()));

    if iq.notifications.is_empty() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    for notification in &iq.notifications {
        write_notification(w, notification)?;
    }
    write_end(w, element::CONFERENCE_NOTIFICATION)
}

// ============================================================
// Conference entities
// ============================================================

fn write_endpoint(w: &mut XmlWriter, endpoint: &Endpoint) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("endpoint");
    start.push_attribute(("id", endpoint.id.as_str()));
    push_true(&mut start, "create", endpoint.create);
    push_true(&mut start, "expire", endpoint.expire);
    if let Some(stats_id) = &endpoint.stats_id {
        start.push_attribute(("stats-id", stats_id.as_str()));
    }
    if let Some(role) = &endpoint.muc_role {
        start.push_attribute(("muc-role", role.as_str()));
    }

    let has_children = !endpoint.media.is_empty()
        || endpoint.transport.is_some()
        || endpoint.sources.is_some()
        || endpoint.force_mute.is_some()
        || endpoint.initial_last_n.is_some()
        || !endpoint.capabilities.is_empty()
        || !endpoint.extensions.is_empty();
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    write_entity_children(w, &endpoint.media, &endpoint.transport, &endpoint.sources)?;
    if let Some(force_mute) = &endpoint.force_mute {
        let mut fm = BytesStart::new("force-mute");
        push_true(&mut fm, "audio", force_mute.audio);
        push_true(&mut fm, "video", force_mute.video);
        write_empty(w, fm)?;
    }
    if let Some(n) = endpoint.initial_last_n {
        let mut last_n = BytesStart::new("initial-last-n");
        last_n.push_attribute(("value", n.to_string().as_str()));
        write_empty(w, last_n)?;
    }
    for capability in &endpoint.capabilities {
        let mut cap = BytesStart::new("capability");
        cap.push_attribute(("name", capability.as_str()));
        write_empty(w, cap)?;
    }
    for ext in &endpoint.extensions {
        write_extension(w, ext, ns::COLIBRI2)?;
    }
    write_end(w, "endpoint")
}

fn write_relay(w: &mut XmlWriter, relay: &Relay) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("relay");
    start.push_attribute(("id", relay.id.as_str()));
    push_true(&mut start, "create", relay.create);
    push_true(&mut start, "expire", relay.expire);
    if let Some(mesh_id) = &relay.mesh_id {
        start.push_attribute(("mesh-id", mesh_id.as_str()));
    }

    let has_children = !relay.media.is_empty()
        || relay.transport.is_some()
        || relay.sources.is_some()
        || relay.endpoints.is_some()
        || !relay.extensions.is_empty();
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    write_entity_children(w, &relay.media, &relay.transport, &relay.sources)?;
    if let Some(endpoints) = &relay.endpoints {
        write_start(w, BytesStart::new("endpoints"))?;
        for endpoint in endpoints {
            write_endpoint(w, endpoint)?;
        }
        write_end(w, "endpoints")?;
    }
    for ext in &relay.extensions {
        write_extension(w, ext, ns::COLIBRI2)?;
    }
    write_end(w, "relay")
}

fn write_entity_children(
    w: &mut XmlWriter,
    media: &[Media],
    transport: &Option<Transport>,
    sources: &Option<Sources>,
) -> Result<(), ColibriError> {
    for m in media {
        write_media(w, m)?;
    }
    if let Some(transport) = transport {
        write_transport(w, transport)?;
    }
    if let Some(sources) = sources {
        write_sources(w, sources)?;
    }
    Ok(())
}

// ============================================================
// Media
// ============================================================

fn write_media(w: &mut XmlWriter, media: &Media) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("media");
    start.push_attribute(("type", media.media_type.as_str()));

    let has_children = !media.payload_types.is_empty()
        || !media.rtp_header_extensions.is_empty()
        || media.extmap_allow_mixed;
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for pt in &media.payload_types {
        write_payload_type(w, pt)?;
    }
    for ext in &media.rtp_header_extensions {
        let mut hdrext = BytesStart::new("rtp-hdrext");
        hdrext.push_attribute(("xmlns", ns::JINGLE_RTP_HDREXT));
        hdrext.push_attribute(("id", ext.id.to_string().as_str()));
        hdrext.push_attribute(("uri", ext.uri.as_str()));
        write_empty(w, hdrext)?;
    }
    if media.extmap_allow_mixed {
        let mut allow = BytesStart::new("extmap-allow-mixed");
        allow.push_attribute(("xmlns", ns::JINGLE_RTP_HDREXT));
        write_empty(w, allow)?;
    }
    write_end(w, "media")
}

fn write_payload_type(w: &mut XmlWriter, pt: &PayloadType) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("payload-type");
    start.push_attribute(("xmlns", ns::JINGLE_RTP));
    start.push_attribute(("id", pt.id.to_string().as_str()));
    if let Some(name) = &pt.name {
        start.push_attribute(("name", name.as_str()));
    }
    if let Some(clockrate) = pt.clockrate {
        start.push_attribute(("clockrate", clockrate.to_string().as_str()));
    }
    if let Some(channels) = pt.channels {
        start.push_attribute(("channels", channels.to_string().as_str()));
    }

    if pt.parameters.is_empty() && pt.rtcp_fbs.is_empty() {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for (name, value) in &pt.parameters {
        let mut parameter = BytesStart::new("parameter");
        if !name.is_empty() {
            parameter.push_attribute(("name", name.as_str()));
        }
        parameter.push_attribute(("value", value.as_str()));
        write_empty(w, parameter)?;
    }
    for fb in &pt.rtcp_fbs {
        let mut rtcp_fb = BytesStart::new("rtcp-fb");
        rtcp_fb.push_attribute(("xmlns", ns::JINGLE_RTCP_FB));
        rtcp_fb.push_attribute(("type", fb.fb_type.as_str()));
        if let Some(subtype) = &fb.subtype {
            rtcp_fb.push_attribute(("subtype", subtype.as_str()));
        }
        write_empty(w, rtcp_fb)?;
    }
    write_end(w, "payload-type")
}

// ============================================================
// Sources
// ============================================================

fn write_sources(w: &mut XmlWriter, sources: &Sources) -> Result<(), ColibriError> {
    if sources.media_sources.is_empty() {
        return write_empty(w, BytesStart::new("sources"));
    }
    write_start(w, BytesStart::new("sources"))?;
    for media_source in &sources.media_sources {
        write_media_source(w, media_source)?;
    }
    write_end(w, "sources")
}

fn write_media_source(w: &mut XmlWriter, source: &MediaSource) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("media-source");
    start.push_attribute(("type", source.media_type.as_str()));
    start.push_attribute(("id", source.id.as_str()));

    if source.sources.is_empty() && source.ssrc_groups.is_empty() {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for s in &source.sources {
        write_source(w, s)?;
    }
    for group in &source.ssrc_groups {
        write_ssrc_group(w, group)?;
    }
    write_end(w, "media-source")
}

fn write_source(w: &mut XmlWriter, source: &Source) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("source");
    start.push_attribute(("xmlns", ns::JINGLE_SSMA));
    start.push_attribute(("ssrc", source.ssrc.to_string().as_str()));
    if let Some(name) = &source.name {
        start.push_attribute(("name", name.as_str()));
    }

    if source.parameters.is_empty() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    for (name, value) in &source.parameters {
        let mut parameter = BytesStart::new("parameter");
        parameter.push_attribute(("xmlns", ns::JINGLE_RTP));
        if !name.is_empty() {
            parameter.push_attribute(("name", name.as_str()));
        }
        parameter.push_attribute(("value", value.as_str()));
        write_empty(w, parameter)?;
    }
    write_end(w, "source")
}

fn write_ssrc_group(w: &mut XmlWriter, group: &SsrcGroup) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("ssrc-group");
    start.push_attribute(("xmlns", ns::JINGLE_SSMA));
    start.push_attribute(("semantics", group.semantics.as_str()));

    if group.sources.is_empty() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    for ssrc in &group.sources {
        let mut source = BytesStart::new("source");
        source.push_attribute(("ssrc", ssrc.to_string().as_str()));
        write_empty(w, source)?;
    }
    write_end(w, "ssrc-group")
}

// ============================================================
// Transport
// ============================================================

fn write_transport(w: &mut XmlWriter, transport: &Transport) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("transport");
    push_true(&mut start, "ice-controlling", transport.ice_controlling);
    push_true(&mut start, "use-unique-port", transport.use_unique_port);

    if transport.ice_udp.is_none() && transport.sctp.is_none() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    if let Some(ice_udp) = &transport.ice_udp {
        write_ice_udp(w, ice_udp)?;
    }
    if let Some(sctp) = &transport.sctp {
        write_sctp(w, sctp)?;
    }
    write_end(w, "transport")
}

fn write_ice_udp(w: &mut XmlWriter, transport: &IceUdpTransport) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("transport");
    start.push_attribute(("xmlns", ns::JINGLE_ICE_UDP));
    if let Some(ufrag) = &transport.ufrag {
        start.push_attribute(("ufrag", ufrag.as_str()));
    }
    if let Some(pwd) = &transport.pwd {
        start.push_attribute(("pwd", pwd.as_str()));
    }

    let has_children = !transport.fingerprints.is_empty()
        || !transport.web_socket_urls.is_empty()
        || !transport.candidates.is_empty()
        || transport.rtcp_mux;
    if !has_children {
        return write_empty(w, start);
    }

    write_start(w, start)?;
    for fingerprint in &transport.fingerprints {
        write_fingerprint(w, fingerprint)?;
    }
    for url in &transport.web_socket_urls {
        let mut ws = BytesStart::new("web-socket");
        ws.push_attribute(("xmlns", ns::COLIBRI_WS));
        ws.push_attribute(("url", url.as_str()));
        write_empty(w, ws)?;
    }
    for candidate in &transport.candidates {
        write_candidate(w, candidate)?;
    }
    if transport.rtcp_mux {
        write_empty(w, BytesStart::new("rtcp-mux"))?;
    }
    write_end(w, "transport")
}

fn write_fingerprint(w: &mut XmlWriter, fingerprint: &Fingerprint) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("fingerprint");
    start.push_attribute(("xmlns", ns::JINGLE_DTLS));
    start.push_attribute(("hash", fingerprint.hash.as_str()));
    if let Some(setup) = &fingerprint.setup {
        start.push_attribute(("setup", setup.as_str()));
    }
    push_true(&mut start, "cryptex", fingerprint.cryptex);
    write_start(w, start)?;
    w.write_event(Event::Text(BytesText::new(&fingerprint.value)))
        .map_err(write_err)?;
    write_end(w, "fingerprint")
}

fn write_candidate(w: &mut XmlWriter, candidate: &Candidate) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("candidate");
    start.push_attribute(("id", candidate.id.as_str()));
    start.push_attribute(("foundation", candidate.foundation.as_str()));
    start.push_attribute(("component", candidate.component.to_string().as_str()));
    start.push_attribute(("protocol", candidate.protocol.as_str()));
    start.push_attribute(("priority", candidate.priority.to_string().as_str()));
    start.push_attribute(("ip", candidate.ip.as_str()));
    start.push_attribute(("port", candidate.port.to_string().as_str()));
    start.push_attribute(("type", candidate.candidate_type.as_str()));
    start.push_attribute(("network", candidate.network.to_string().as_str()));
    start.push_attribute(("generation", candidate.generation.to_string().as_str()));
    if let Some(rel_addr) = &candidate.rel_addr {
        start.push_attribute(("rel-addr", rel_addr.as_str()));
    }
    if let Some(rel_port) = candidate.rel_port {
        start.push_attribute(("rel-port", rel_port.to_string().as_str()));
    }
    write_empty(w, start)
}

fn write_sctp(w: &mut XmlWriter, sctp: &Sctp) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("sctp");
    if let Some(role) = sctp.role {
        start.push_attribute(("role", role.as_str()));
    }
    if let Some(port) = sctp.port {
        start.push_attribute(("port", port.to_string().as_str()));
    }
    write_empty(w, start)
}

// ============================================================
// Connect / notification
// ============================================================

fn write_connects(w: &mut XmlWriter, connects: &[Connect]) -> Result<(), ColibriError> {
    if connects.is_empty() {
        return write_empty(w, BytesStart::new("connects"));
    }
    write_start(w, BytesStart::new("connects"))?;
    for connect in connects {
        write_connect(w, connect)?;
    }
    write_end(w, "connects")
}

fn write_connect(w: &mut XmlWriter, connect: &Connect) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("connect");
    start.push_attribute(("url", connect.url.as_str()));
    start.push_attribute(("protocol", connect.protocol.as_str()));
    start.push_attribute(("type", connect.connect_type.as_str()));
    push_true(&mut start, "audio", connect.audio);
    push_true(&mut start, "video", connect.video);

    if connect.http_headers.is_empty() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    for header in &connect.http_headers {
        let mut http_header = BytesStart::new("http-header");
        http_header.push_attribute(("name", header.name.as_str()));
        http_header.push_attribute(("value", header.value.as_str()));
        write_empty(w, http_header)?;
    }
    write_end(w, "connect")
}

fn write_notification(w: &mut XmlWriter, notification: &Notification) -> Result<(), ColibriError> {
    let mut start = BytesStart::new("notification");
    start.push_attribute(("id", notification.id.as_str()));
    start.push_attribute(("type", notification.notification_type.as_str()));
    if let Some(description) = &notification.description {
        start.push_attribute(("description", description.as_str()));
    }
    write_empty(w, start)
}

// ============================================================
// Extensions
// ============================================================

fn write_extension(
    w: &mut XmlWriter,
    ext: &Extension,
    parent_ns: &str,
) -> Result<(), ColibriError> {
    let mut start = BytesStart::new(&ext.name);
    if !ext.namespace.is_empty() && ext.namespace != parent_ns {
        start.push_attribute(("xmlns", ext.namespace.as_str()));
    }
    for (name, value) in &ext.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if ext.text.is_none() && ext.children.is_empty() {
        return write_empty(w, start);
    }
    write_start(w, start)?;
    if let Some(text) = &ext.text {
        w.write_event(Event::Text(BytesText::new(text)))
            .map_err(write_err)?;
    }
    for child in &ext.children {
        write_extension(w, child, &ext.namespace)?;
    }
    write_end(w, &ext.name)
}

// ============================================================
// Writer helpers
// ============================================================

fn push_true(start: &mut BytesStart<'_>, name: &str, value: bool) {
    if value {
        start.push_attribute((name, "true"));
    }
}

fn write_start(w: &mut XmlWriter, start: BytesStart<'_>) -> Result<(), ColibriError> {
    w.write_event(Event::Start(start)).map_err(write_err)
}

fn write_empty(w: &mut XmlWriter, start: BytesStart<'_>) -> Result<(), ColibriError> {
    w.write_event(Event::Empty(start)).map_err(write_err)
}

fn write_end(w: &mut XmlWriter, name: &str) -> Result<(), ColibriError> {
    w.write_event(Event::End(BytesEnd::new(name))).map_err(write_err)
}

fn write_err(e: std::io::Error) -> ColibriError {
    ColibriError::malformed("document", format!("write error: {e}"))
}
