//! Shared message fixtures for the integration tests.

#![allow(dead_code)]

use colibri2::model::{
    Candidate, ConferenceModifiedIQ, ConferenceModifyIQ, ConferenceNotificationIQ, Connect,
    ConnectProtocol, ConnectType, Endpoint, Fingerprint, IceUdpTransport, Media, MediaSource,
    MediaType, MucRole, Notification, NotificationType, PayloadType, Relay, RtcpFb, RtpHdrExt,
    Sctp, SctpRole, Source, Sources, SsrcGroup, Transport,
};

// A conference-modify request with one fully populated endpoint, ported from
// a real signalling capture.
pub const ENDPOINT_WITH_SOURCES_XML: &str = r#"
<conference-modify xmlns="jitsi:colibri2" meeting-id="88ff288c-5eeb-4ea9-bc2f-93ea38c43b78" name="myconference@jitsi.example" create="true">
  <endpoint xmlns="jitsi:colibri2" id="bd9b6765" stats-id="Jayme-Clv">
    <media type="audio">
      <payload-type xmlns="urn:xmpp:jingle:apps:rtp:1" name="opus" id="111" clockrate="48000" channels="2"/>
    </media>
    <transport ice-controlling="true"/>
    <sources>
      <media-source xmlns="jitsi:colibri2" type="video" id="bd9b6765-v1">
        <source xmlns="urn:xmpp:jingle:apps:rtp:ssma:0" ssrc="803354056"/>
      </media-source>
    </sources>
    <force-mute audio="true" video="true"/>
    <initial-last-n value="13"/>
  </endpoint>
</conference-modify>
"#;

// The same capture's JSON form, in the legacy style where numeric attributes
// travel as strings. The decoder must accept both.
pub const ENDPOINT_WITH_SOURCES_JSON: &str = r#"
{
  "meeting-id":"88ff288c-5eeb-4ea9-bc2f-93ea38c43b78",
  "name":"myconference@jitsi.example",
  "create":true,
  "endpoints":[
    {
      "id": "bd9b6765",
      "stats-id": "Jayme-Clv",
      "medias": [{"type":"audio", "payload-types": [{"name":"opus", "id":"111", "clockrate":"48000", "channels": "2"}]}],
      "transport": {"ice-controlling":true},
      "sources": [{"type":"video", "id":"bd9b6765-v1", "sources":[803354056]}],
      "force-mute": {"audio":true, "video":true},
      "initial-last-n": {"value": 13 }
    }
  ]
}
"#;

// A request mixing payload-type parameters, rtcp-fb, header extensions,
// capabilities and connects, also ported from a capture.
pub const KITCHEN_SINK_MODIFY_XML: &str = r#"
<conference-modify xmlns="jitsi:colibri2" meeting-id="beccf2ed-5441-4bfe-96d6-f0f3a6796378" name="torture819371@conference.beta.meet.jit.si" create="true">
  <endpoint xmlns="jitsi:colibri2" create="true" id="79f0273e" stats-id="Garett-w1o" muc-role="visitor">
    <media type="audio">
      <payload-type xmlns="urn:xmpp:jingle:apps:rtp:1" channels="2" name="opus" id="111" clockrate="48000">
        <parameter value="1" name="useinbandfec"/>
        <parameter value="10" name="minptime"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="transport-cc"/>
      </payload-type>
      <rtp-hdrext xmlns="urn:xmpp:jingle:apps:rtp:rtp-hdrext:0" uri="urn:ietf:params:rtp-hdrext:ssrc-audio-level" id="1"/>
      <extmap-allow-mixed xmlns="urn:xmpp:jingle:apps:rtp:rtp-hdrext:0"/>
    </media>
    <media type="video">
      <payload-type xmlns="urn:xmpp:jingle:apps:rtp:1" name="VP8" id="100" clockrate="90000">
        <parameter value="800" name="x-google-start-bitrate"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="ccm" subtype="fir"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="nack"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="nack" subtype="pli"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="transport-cc"/>
      </payload-type>
      <payload-type xmlns="urn:xmpp:jingle:apps:rtp:1" name="rtx" id="96" clockrate="90000">
        <parameter value="100" name="apt"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="ccm" subtype="fir"/>
        <rtcp-fb xmlns="urn:xmpp:jingle:apps:rtp:rtcp-fb:0" type="nack"/>
      </payload-type>
      <rtp-hdrext xmlns="urn:xmpp:jingle:apps:rtp:rtp-hdrext:0" uri="http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time" id="3"/>
    </media>
    <transport ice-controlling="true"/>
    <capability name="source-names"/>
  </endpoint>
  <connects>
    <connect url="wss://example.com/audio" protocol="mediajson" type="transcriber" audio="true"/>
    <connect url="wss://example.com/video" protocol="mediajson" type="recorder" video="true"/>
  </connects>
</conference-modify>
"#;

pub fn opus_payload_type() -> PayloadType {
    PayloadType::builder()
        .id(111)
        .name("opus")
        .clockrate(48000)
        .channels(2)
        .parameter("useinbandfec", "1")
        .parameter("minptime", "10")
        .rtcp_fb(RtcpFb {
            fb_type: "transport-cc".into(),
            subtype: None,
        })
        .build()
        .unwrap()
}

pub fn vp8_payload_type() -> PayloadType {
    PayloadType::builder()
        .id(100)
        .name("VP8")
        .clockrate(90000)
        .parameter("x-google-start-bitrate", "800")
        .rtcp_fb(RtcpFb {
            fb_type: "ccm".into(),
            subtype: Some("fir".into()),
        })
        .rtcp_fb(RtcpFb {
            fb_type: "nack".into(),
            subtype: None,
        })
        .build()
        .unwrap()
}

pub fn audio_media() -> Media {
    Media::builder()
        .media_type(MediaType::Audio)
        .payload_type(opus_payload_type())
        .rtp_header_extension(RtpHdrExt {
            id: 1,
            uri: "urn:ietf:params:rtp-hdrext:ssrc-audio-level".into(),
        })
        .extmap_allow_mixed(true)
        .build()
        .unwrap()
}

pub fn video_media() -> Media {
    Media::builder()
        .media_type(MediaType::Video)
        .payload_type(vp8_payload_type())
        .rtp_header_extension(RtpHdrExt {
            id: 3,
            uri: "http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time".into(),
        })
        .build()
        .unwrap()
}

pub fn full_transport() -> Transport {
    let candidate = Candidate::builder()
        .id("cand-1")
        .foundation("1")
        .component(1)
        .protocol("udp")
        .priority(2130706431)
        .ip("192.0.2.10")
        .port(10000)
        .candidate_type("host")
        .network(0)
        .generation(0)
        .build()
        .unwrap();
    let ice_udp = IceUdpTransport::builder()
        .ufrag("u1fr")
        .pwd("s3cret-ice-pwd")
        .fingerprint(Fingerprint {
            value: "AB:CD:EF:01:23:45".into(),
            hash: "sha-256".into(),
            setup: Some("actpass".into()),
            cryptex: true,
        })
        .web_socket_url("wss://bridge.example.com/colibri-ws/abc")
        .candidate(candidate)
        .rtcp_mux(true)
        .build()
        .unwrap();
    Transport::builder()
        .ice_controlling(true)
        .ice_udp(ice_udp)
        .sctp(Sctp {
            role: Some(SctpRole::Server),
            port: Some(5000),
        })
        .build()
        .unwrap()
}

pub fn video_sources() -> Sources {
    let mut named = Source::new(803354056);
    named.name = Some("bd9b6765-v1-s1".into());
    let media_source = MediaSource::builder()
        .media_type(MediaType::Video)
        .id("bd9b6765-v1")
        .source(named)
        .source(Source::new(803354057))
        .ssrc_group(SsrcGroup {
            semantics: "FID".into(),
            sources: vec![803354056, 803354057],
        })
        .build()
        .unwrap();
    Sources::new(vec![media_source])
}

pub fn full_endpoint() -> Endpoint {
    Endpoint::builder()
        .id("bd9b6765")
        .create(true)
        .stats_id("Jayme-Clv")
        .muc_role(MucRole::Participant)
        .force_mute(true, false)
        .initial_last_n(13)
        .capability("source-names")
        .media(audio_media())
        .media(video_media())
        .transport(full_transport())
        .sources(video_sources())
        .build()
        .unwrap()
}

pub fn relay_with_endpoints() -> Relay {
    Relay::builder()
        .id("relay-west")
        .create(true)
        .mesh_id("mesh-1")
        .endpoints(vec![
            Endpoint::builder().id("remote-a").build().unwrap(),
            Endpoint::builder()
                .id("remote-b")
                .expire(true)
                .build()
                .unwrap(),
        ])
        .media(audio_media())
        .build()
        .unwrap()
}

pub fn recorder_connect() -> Connect {
    Connect::builder()
        .url_str("wss://recorder.example.com/session")
        .unwrap()
        .protocol(ConnectProtocol::MediaJson)
        .connect_type(ConnectType::Recorder)
        .audio(true)
        .video(true)
        .http_header("Authorization", "Bearer abc123")
        .http_header("X-Session", "s-9")
        .build()
        .unwrap()
}

/// A conference-modify request exercising every element family.
pub fn full_modify_iq() -> ConferenceModifyIQ {
    ConferenceModifyIQ::builder()
        .meeting_id("88ff288c-5eeb-4ea9-bc2f-93ea38c43b78")
        .conference_name("myconference@jitsi.example")
        .create(true)
        .rtcstats_enabled(false)
        .endpoint(full_endpoint())
        .relay(relay_with_endpoints())
        .connect(recorder_connect())
        .build()
        .unwrap()
}

/// A bridge response carrying allocated transport and feedback sources.
pub fn feedback_modified_iq() -> ConferenceModifiedIQ {
    let feedback = Sources::new(vec![
        MediaSource::builder()
            .media_type(MediaType::Audio)
            .id("jvb-a0")
            .source(Source::new(411312308))
            .build()
            .unwrap(),
    ]);
    ConferenceModifiedIQ::builder()
        .endpoint(
            Endpoint::builder()
                .id("bd9b6765")
                .transport(full_transport())
                .build()
                .unwrap(),
        )
        .sources(feedback)
        .build()
        .unwrap()
}

pub fn failure_notification_iq() -> ConferenceNotificationIQ {
    ConferenceNotificationIQ::builder()
        .meeting_id("88ff288c-5eeb-4ea9-bc2f-93ea38c43b78")
        .notification(Notification {
            id: "bd9b6765".into(),
            notification_type: NotificationType::IceFailed,
            description: Some("consent check timed out".into()),
        })
        .build()
        .unwrap()
}
