//! XML decoding: token stream to typed model.
//!
//! Each container decoder follows the same shape: required attributes first
//! (fail fast), optional attributes, then a child loop with hard-coded
//! handlers for known children and registry dispatch otherwise, terminating
//! at the container's end token at the recorded depth. Every decoder is
//! entered at its element's start token and returns just past its own end
//! token, so parent loops can continue with the next sibling.
//!
//! Decoding is all-or-nothing: the first error aborts the whole message.

use std::str::FromStr;

use tracing::debug;

use crate::error::ColibriError;
use crate::model::{
    Candidate, ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ,
    Connect, ConnectProtocol, ConnectType, Endpoint, Fingerprint, IceUdpTransport, Media,
    MediaSource, MediaType, Notification, NotificationType, PayloadType, Relay, RtcpFb, RtpHdrExt,
    Sctp, SctpRole, Source, Sources, SsrcGroup, Transport, element, ns, parse_wire_bool,
};
use crate::registry::ProviderRegistry;
use crate::xml::reader::{Token, XmlReader};

// ============================================================
// Entry point
// ============================================================

/// Decode a colibri2 message from its XML form. Extension elements are
/// dispatched through `registry`; elements with no provider are skipped.
pub fn decode_message(
    xml: &str,
    registry: &ProviderRegistry,
) -> Result<ColibriMessage, ColibriError> {
    let mut reader = XmlReader::new(xml);
    loop {
        match reader.next()? {
            Token::Start => break,
            Token::Eof => {
                return Err(ColibriError::malformed("document", "no root element"));
            }
            _ => {}
        }
    }
    if reader.namespace() != ns::COLIBRI2 {
        return Err(ColibriError::malformed(
            reader.name().to_owned(),
            format!("unexpected root namespace '{}'", reader.namespace()),
        ));
    }
    match reader.name() {
        element::CONFERENCE_MODIFY => {
            decode_conference_modify(&mut reader, registry).map(ColibriMessage::ConferenceModify)
        }
        element::CONFERENCE_MODIFIED => decode_conference_modified(&mut reader, registry)
            .map(ColibriMessage::ConferenceModified),
        element::CONFERENCE_NOTIFICATION => decode_conference_notification(&mut reader)
            .map(ColibriMessage::ConferenceNotification),
        other => Err(ColibriError::malformed(
            other.to_owned(),
            "not a colibri2 message element",
        )),
    }
}

// ============================================================
// IQ payloads
// ============================================================

pub(crate) fn decode_conference_modify(
    reader: &mut XmlReader<'_>,
    registry: &ProviderRegistry,
) -> Result<ConferenceModifyIQ, ColibriError> {
    let mut b = ConferenceModifyIQ::builder()
        .meeting_id(reader.required_attribute(element::CONFERENCE_MODIFY, "meeting-id")?)
        .create(bool_attr(reader, "create"))
        .expire(bool_attr(reader, "expire"));
    if let Some(name) = reader.attribute("name") {
        b = b.conference_name(name);
    }
    if let Some(v) = reader.attribute("rtcstats-enabled") {
        b = b.rtcstats_enabled(parse_wire_bool(v));
    }

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::COLIBRI2, "endpoint") => b.endpoint(decode_endpoint(reader, registry)?),
                    (ns::COLIBRI2, "relay") => b.relay(decode_relay(reader, registry)?),
                    // An empty <connects/> is distinct from an absent one.
                    (ns::COLIBRI2, "connects") => b.connects(decode_connects(reader)?),
                    _ => match registry.decode(reader)? {
                        Some(ext) => b.extension(ext),
                        None => {
                            skip_unknown(reader, &namespace, &name)?;
                            b
                        }
                    },
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated(element::CONFERENCE_MODIFY)),
            _ => {}
        }
    }
    b.build()
}

pub(crate) fn decode_conference_modified(
    reader: &mut XmlReader<'_>,
    registry: &ProviderRegistry,
) -> Result<ConferenceModifiedIQ, ColibriError> {
    let mut b = ConferenceModifiedIQ::builder();
    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::COLIBRI2, "endpoint") => b.endpoint(decode_endpoint(reader, registry)?),
                    (ns::COLIBRI2, "relay") => b.relay(decode_relay(reader, registry)?),
                    (ns::COLIBRI2, "sources") => b.sources(decode_sources(reader)?),
                    _ => match registry.decode(reader)? {
                        Some(ext) => b.extension(ext),
                        None => {
                            skip_unknown(reader, &namespace, &name)?;
                            b
                        }
                    },
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated(element::CONFERENCE_MODIFIED)),
            _ => {}
        }
    }
    b.build()
}

pub(crate) fn decode_conference_notification(
    reader: &mut XmlReader<'_>,
) -> Result<ConferenceNotificationIQ, ColibriError> {
    let mut b = ConferenceNotificationIQ::builder()
        .meeting_id(reader.required_attribute(element::CONFERENCE_NOTIFICATION, "meeting-id")?);
    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::COLIBRI2, "notification") {
                    b = b.notification(decode_notification(reader)?);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated(element::CONFERENCE_NOTIFICATION)),
            _ => {}
        }
    }
    b.build()
}

// ============================================================
// Conference entities
// ============================================================

pub(crate) fn decode_endpoint(
    reader: &mut XmlReader<'_>,
    registry: &ProviderRegistry,
) -> Result<Endpoint, ColibriError> {
    let mut b = Endpoint::builder()
        .id(reader.required_attribute("endpoint", "id")?)
        .create(bool_attr(reader, "create"))
        .expire(bool_attr(reader, "expire"));
    if let Some(v) = reader.attribute("stats-id") {
        b = b.stats_id(v);
    }
    if let Some(v) = reader.attribute("muc-role") {
        let role = crate::model::MucRole::parse(v)
            .ok_or_else(|| ColibriError::invalid_enum("endpoint", "muc-role", v))?;
        b = b.muc_role(role);
    }

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::COLIBRI2, "media") => b.media(decode_media(reader)?),
                    (ns::COLIBRI2, "transport") => b.transport(decode_transport(reader)?),
                    (ns::COLIBRI2, "sources") => b.sources(decode_sources(reader)?),
                    (ns::COLIBRI2, "force-mute") => {
                        let audio = bool_attr(reader, "audio");
                        let video = bool_attr(reader, "video");
                        reader.skip_element()?;
                        b.force_mute(audio, video)
                    }
                    (ns::COLIBRI2, "initial-last-n") => {
                        let value = required_attr_number(reader, "initial-last-n", "value")?;
                        reader.skip_element()?;
                        b.initial_last_n(value)
                    }
                    (ns::COLIBRI2, "capability") => {
                        let name = reader.required_attribute("capability", "name")?;
                        reader.skip_element()?;
                        b.capability(name)
                    }
                    _ => match registry.decode(reader)? {
                        Some(ext) => b.extension(ext),
                        None => {
                            skip_unknown(reader, &namespace, &name)?;
                            b
                        }
                    },
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("endpoint")),
            _ => {}
        }
    }
    b.build()
}

pub(crate) fn decode_relay(
    reader: &mut XmlReader<'_>,
    registry: &ProviderRegistry,
) -> Result<Relay, ColibriError> {
    let mut b = Relay::builder()
        .id(reader.required_attribute("relay", "id")?)
        .create(bool_attr(reader, "create"))
        .expire(bool_attr(reader, "expire"));
    if let Some(v) = reader.attribute("mesh-id") {
        b = b.mesh_id(v);
    }

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::COLIBRI2, "media") => b.media(decode_media(reader)?),
                    (ns::COLIBRI2, "transport") => b.transport(decode_transport(reader)?),
                    (ns::COLIBRI2, "sources") => b.sources(decode_sources(reader)?),
                    (ns::COLIBRI2, "endpoints") => {
                        b.endpoints(decode_relay_endpoints(reader, registry)?)
                    }
                    _ => match registry.decode(reader)? {
                        Some(ext) => b.extension(ext),
                        None => {
                            skip_unknown(reader, &namespace, &name)?;
                            b
                        }
                    },
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("relay")),
            _ => {}
        }
    }
    b.build()
}

fn decode_relay_endpoints(
    reader: &mut XmlReader<'_>,
    registry: &ProviderRegistry,
) -> Result<Vec<Endpoint>, ColibriError> {
    let mut endpoints = Vec::new();
    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::COLIBRI2, "endpoint") {
                    endpoints.push(decode_endpoint(reader, registry)?);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("endpoints")),
            _ => {}
        }
    }
    Ok(endpoints)
}

// ============================================================
// Media
// ============================================================

pub(crate) fn decode_media(reader: &mut XmlReader<'_>) -> Result<Media, ColibriError> {
    let type_attr = reader.required_attribute("media", "type")?;
    let media_type = MediaType::parse(&type_attr)
        .ok_or_else(|| ColibriError::invalid_enum("media", "type", type_attr))?;
    let mut b = Media::builder().media_type(media_type);

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::JINGLE_RTP, "payload-type") => b.payload_type(decode_payload_type(reader)?),
                    (ns::JINGLE_RTP_HDREXT, "rtp-hdrext") => {
                        b.rtp_header_extension(decode_rtp_hdrext(reader)?)
                    }
                    (ns::JINGLE_RTP_HDREXT, "extmap-allow-mixed") => {
                        reader.skip_element()?;
                        b.extmap_allow_mixed(true)
                    }
                    _ => {
                        skip_unknown(reader, &namespace, &name)?;
                        b
                    }
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("media")),
            _ => {}
        }
    }
    b.build()
}

fn decode_payload_type(reader: &mut XmlReader<'_>) -> Result<PayloadType, ColibriError> {
    let mut b =
        PayloadType::builder().id(required_attr_number(reader, "payload-type", "id")?);
    if let Some(v) = reader.attribute("name") {
        b = b.name(v);
    }
    if let Some(v) = attr_number(reader, "payload-type", "clockrate")? {
        b = b.clockrate(v);
    }
    if let Some(v) = attr_number(reader, "payload-type", "channels")? {
        b = b.channels(v);
    }

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::JINGLE_RTP, "parameter") => {
                        let name = reader.attribute("name").unwrap_or_default().to_owned();
                        let value = reader.attribute("value").unwrap_or_default().to_owned();
                        reader.skip_element()?;
                        b.parameter(name, value)
                    }
                    (ns::JINGLE_RTCP_FB, "rtcp-fb") => {
                        let fb_type = reader.required_attribute("rtcp-fb", "type")?;
                        let subtype = reader.attribute("subtype").map(str::to_owned);
                        reader.skip_element()?;
                        b.rtcp_fb(RtcpFb { fb_type, subtype })
                    }
                    _ => {
                        skip_unknown(reader, &namespace, &name)?;
                        b
                    }
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("payload-type")),
            _ => {}
        }
    }
    b.build()
}

fn decode_rtp_hdrext(reader: &mut XmlReader<'_>) -> Result<RtpHdrExt, ColibriError> {
    let id = required_attr_number(reader, "rtp-hdrext", "id")?;
    let uri = reader.required_attribute("rtp-hdrext", "uri")?;
    reader.skip_element()?;
    Ok(RtpHdrExt { id, uri })
}

// ============================================================
// Sources
// ============================================================

pub(crate) fn decode_sources(reader: &mut XmlReader<'_>) -> Result<Sources, ColibriError> {
    let mut media_sources = Vec::new();
    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::COLIBRI2, "media-source") {
                    media_sources.push(decode_media_source(reader)?);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("sources")),
            _ => {}
        }
    }
    Ok(Sources::new(media_sources))
}

fn decode_media_source(reader: &mut XmlReader<'_>) -> Result<MediaSource, ColibriError> {
    let type_attr = reader.required_attribute("media-source", "type")?;
    let media_type = MediaType::parse(&type_attr)
        .ok_or_else(|| ColibriError::invalid_enum("media-source", "type", type_attr))?;
    let mut b = MediaSource::builder()
        .media_type(media_type)
        .id(reader.required_attribute("media-source", "id")?);

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::JINGLE_SSMA, "source") => b.source(decode_source(reader)?),
                    (ns::JINGLE_SSMA, "ssrc-group") => b.ssrc_group(decode_ssrc_group(reader)?),
                    _ => {
                        skip_unknown(reader, &namespace, &name)?;
                        b
                    }
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("media-source")),
            _ => {}
        }
    }
    b.build()
}

fn decode_source(reader: &mut XmlReader<'_>) -> Result<Source, ColibriError> {
    let mut source = Source::new(required_attr_number(reader, "source", "ssrc")?);
    source.name = reader.attribute("name").map(str::to_owned);

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if name == "parameter"
                    && (namespace == ns::JINGLE_RTP || namespace == ns::JINGLE_SSMA)
                {
                    let name = reader.attribute("name").unwrap_or_default().to_owned();
                    let value = reader.attribute("value").unwrap_or_default().to_owned();
                    reader.skip_element()?;
                    source.parameters.insert(name, value);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("source")),
            _ => {}
        }
    }
    Ok(source)
}

fn decode_ssrc_group(reader: &mut XmlReader<'_>) -> Result<SsrcGroup, ColibriError> {
    let semantics = reader.required_attribute("ssrc-group", "semantics")?;
    let mut sources = Vec::new();

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::JINGLE_SSMA, "source") {
                    sources.push(required_attr_number(reader, "source", "ssrc")?);
                    reader.skip_element()?;
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("ssrc-group")),
            _ => {}
        }
    }
    Ok(SsrcGroup { semantics, sources })
}

// ============================================================
// Transport
// ============================================================

pub(crate) fn decode_transport(reader: &mut XmlReader<'_>) -> Result<Transport, ColibriError> {
    let mut b = Transport::builder()
        .ice_controlling(bool_attr(reader, "ice-controlling"))
        .use_unique_port(bool_attr(reader, "use-unique-port"));

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::JINGLE_ICE_UDP, "transport") => b.ice_udp(decode_ice_udp(reader)?),
                    (ns::COLIBRI2, "sctp") => b.sctp(decode_sctp(reader)?),
                    _ => {
                        skip_unknown(reader, &namespace, &name)?;
                        b
                    }
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("transport")),
            _ => {}
        }
    }
    b.build()
}

fn decode_ice_udp(reader: &mut XmlReader<'_>) -> Result<IceUdpTransport, ColibriError> {
    let mut b = IceUdpTransport::builder();
    if let Some(v) = reader.attribute("ufrag") {
        b = b.ufrag(v);
    }
    if let Some(v) = reader.attribute("pwd") {
        b = b.pwd(v);
    }

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                b = match (namespace.as_str(), name.as_str()) {
                    (ns::JINGLE_DTLS, "fingerprint") => b.fingerprint(decode_fingerprint(reader)?),
                    (ns::COLIBRI_WS, "web-socket") => {
                        let url = reader.required_attribute("web-socket", "url")?;
                        reader.skip_element()?;
                        b.web_socket_url(url)
                    }
                    (ns::JINGLE_ICE_UDP, "candidate") => b.candidate(decode_candidate(reader)?),
                    (ns::JINGLE_ICE_UDP, "rtcp-mux") => {
                        reader.skip_element()?;
                        b.rtcp_mux(true)
                    }
                    _ => {
                        skip_unknown(reader, &namespace, &name)?;
                        b
                    }
                };
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("transport")),
            _ => {}
        }
    }
    b.build()
}

fn decode_fingerprint(reader: &mut XmlReader<'_>) -> Result<Fingerprint, ColibriError> {
    let hash = reader.required_attribute("fingerprint", "hash")?;
    let setup = reader.attribute("setup").map(str::to_owned);
    let cryptex = bool_attr(reader, "cryptex");
    let mut value = String::new();

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Text => value.push_str(reader.text()),
            Token::End if reader.depth() == target => break,
            Token::Start => reader.skip_element()?,
            Token::End => {}
            Token::Eof => return Err(truncated("fingerprint")),
        }
    }
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(ColibriError::missing("fingerprint", "fingerprint"));
    }
    Ok(Fingerprint {
        value,
        hash,
        setup,
        cryptex,
    })
}

fn decode_candidate(reader: &mut XmlReader<'_>) -> Result<Candidate, ColibriError> {
    let mut b = Candidate::builder()
        .id(reader.required_attribute("candidate", "id")?)
        .foundation(reader.required_attribute("candidate", "foundation")?)
        .component(required_attr_number(reader, "candidate", "component")?)
        .protocol(reader.required_attribute("candidate", "protocol")?)
        .priority(required_attr_number(reader, "candidate", "priority")?)
        .ip(reader.required_attribute("candidate", "ip")?)
        .port(required_attr_number(reader, "candidate", "port")?)
        .candidate_type(reader.required_attribute("candidate", "type")?)
        .network(required_attr_number(reader, "candidate", "network")?)
        .generation(required_attr_number(reader, "candidate", "generation")?);
    if let Some(v) = reader.attribute("rel-addr") {
        b = b.rel_addr(v);
    }
    if let Some(v) = attr_number(reader, "candidate", "rel-port")? {
        b = b.rel_port(v);
    }
    reader.skip_element()?;
    b.build()
}

fn decode_sctp(reader: &mut XmlReader<'_>) -> Result<Sctp, ColibriError> {
    let role = match reader.attribute("role") {
        Some(v) => Some(
            SctpRole::parse(v).ok_or_else(|| ColibriError::invalid_enum("sctp", "role", v))?,
        ),
        None => None,
    };
    let port = attr_number(reader, "sctp", "port")?;
    reader.skip_element()?;
    Ok(Sctp { role, port })
}

// ============================================================
// Connect / notification
// ============================================================

fn decode_connects(reader: &mut XmlReader<'_>) -> Result<Vec<Connect>, ColibriError> {
    let mut connects = Vec::new();
    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::COLIBRI2, "connect") {
                    connects.push(decode_connect(reader)?);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("connects")),
            _ => {}
        }
    }
    Ok(connects)
}

pub(crate) fn decode_connect(reader: &mut XmlReader<'_>) -> Result<Connect, ColibriError> {
    let url = reader.required_attribute("connect", "url")?;
    let protocol_attr = reader.required_attribute("connect", "protocol")?;
    let protocol = ConnectProtocol::parse(&protocol_attr)
        .ok_or_else(|| ColibriError::invalid_enum("connect", "protocol", protocol_attr))?;
    let type_attr = reader.required_attribute("connect", "type")?;
    let connect_type = ConnectType::parse(&type_attr)
        .ok_or_else(|| ColibriError::invalid_enum("connect", "type", type_attr))?;
    let mut b = Connect::builder()
        .url_str(&url)?
        .protocol(protocol)
        .connect_type(connect_type)
        .audio(bool_attr(reader, "audio"))
        .video(bool_attr(reader, "video"));

    let target = reader.depth() - 1;
    loop {
        match reader.next()? {
            Token::Start => {
                let (namespace, name) = current_element(reader);
                if (namespace.as_str(), name.as_str()) == (ns::COLIBRI2, "http-header") {
                    let name = reader.required_attribute("http-header", "name")?;
                    let value = reader.required_attribute("http-header", "value")?;
                    reader.skip_element()?;
                    b = b.http_header(name, value);
                } else {
                    skip_unknown(reader, &namespace, &name)?;
                }
            }
            Token::End if reader.depth() == target => break,
            Token::Eof => return Err(truncated("connect")),
            _ => {}
        }
    }
    b.build()
}

fn decode_notification(reader: &mut XmlReader<'_>) -> Result<Notification, ColibriError> {
    let id = reader.required_attribute("notification", "id")?;
    let type_attr = reader.required_attribute("notification", "type")?;
    let notification_type = NotificationType::parse(&type_attr)
        .ok_or_else(|| ColibriError::invalid_enum("notification", "type", type_attr))?;
    let description = reader.attribute("description").map(str::to_owned);
    reader.skip_element()?;
    Ok(Notification {
        id,
        notification_type,
        description,
    })
}

// ============================================================
// Shared helpers
// ============================================================

fn current_element(reader: &XmlReader<'_>) -> (String, String) {
    (reader.namespace().to_owned(), reader.name().to_owned())
}

fn bool_attr(reader: &XmlReader<'_>, name: &str) -> bool {
    reader.attribute(name).map(parse_wire_bool).unwrap_or(false)
}

fn attr_number<T: FromStr>(
    reader: &XmlReader<'_>,
    element: &'static str,
    field: &'static str,
) -> Result<Option<T>, ColibriError> {
    match reader.attribute(field) {
        Some(value) => parse_number(element, field, value).map(Some),
        None => Ok(None),
    }
}

fn required_attr_number<T: FromStr>(
    reader: &XmlReader<'_>,
    element: &'static str,
    field: &'static str,
) -> Result<T, ColibriError> {
    let value = reader.required_attribute(element, field)?;
    parse_number(element, field, &value)
}

pub(crate) fn parse_number<T: FromStr>(
    element: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, ColibriError> {
    value
        .trim()
        .parse()
        .map_err(|_| ColibriError::invalid_number(element, field, value))
}

fn skip_unknown(
    reader: &mut XmlReader<'_>,
    namespace: &str,
    name: &str,
) -> Result<(), ColibriError> {
    debug!(element = name, namespace, "ignoring unknown element");
    reader.skip_element()
}

fn truncated(element: &'static str) -> ColibriError {
    ColibriError::malformed(element, "unexpected end of document")
}
