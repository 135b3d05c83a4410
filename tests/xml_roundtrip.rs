#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

#[path = "helpers/mod.rs"]
mod helpers;

use colibri2::model::{ConnectType, MucRole};
use colibri2::{
    ColibriError, ColibriMessage, ConferenceModifyIQ, ConferenceNotificationIQ, ProviderRegistry,
};
use rstest::rstest;

fn roundtrip(message: ColibriMessage) -> ColibriMessage {
    let registry = ProviderRegistry::new();
    let xml = message.to_xml().unwrap();
    ColibriMessage::from_xml(&xml, &registry)
        .unwrap_or_else(|e| panic!("re-decoding failed: {e}\n{xml}"))
}

#[test]
fn modify_survives_a_roundtrip() {
    let message = ColibriMessage::ConferenceModify(helpers::full_modify_iq());
    assert_eq!(roundtrip(message.clone()), message);
}

#[test]
fn modified_survives_a_roundtrip() {
    let message = ColibriMessage::ConferenceModified(helpers::feedback_modified_iq());
    assert_eq!(roundtrip(message.clone()), message);
}

#[test]
fn notification_survives_a_roundtrip() {
    let message = ColibriMessage::ConferenceNotification(helpers::failure_notification_iq());
    assert_eq!(roundtrip(message.clone()), message);
}

#[test]
fn decodes_captured_endpoint_request() {
    let registry = ProviderRegistry::new();
    let iq =
        ConferenceModifyIQ::from_xml(helpers::ENDPOINT_WITH_SOURCES_XML, &registry).unwrap();

    assert_eq!(iq.meeting_id, "88ff288c-5eeb-4ea9-bc2f-93ea38c43b78");
    assert_eq!(iq.conference_name.as_deref(), Some("myconference@jitsi.example"));
    assert!(iq.create);
    assert!(!iq.expire);
    assert!(iq.rtcstats_enabled);
    assert!(iq.connects.is_none());

    let ep = &iq.endpoints[0];
    assert_eq!(ep.id, "bd9b6765");
    assert_eq!(ep.stats_id.as_deref(), Some("Jayme-Clv"));
    let force_mute = ep.force_mute.as_ref().unwrap();
    assert!(force_mute.audio && force_mute.video);
    assert_eq!(ep.initial_last_n, Some(13));

    let pt = &ep.media[0].payload_types[0];
    assert_eq!(pt.name.as_deref(), Some("opus"));
    assert_eq!((pt.id, pt.clockrate, pt.channels), (111, Some(48000), Some(2)));

    assert!(ep.transport.as_ref().unwrap().ice_controlling);
    let ms = &ep.sources.as_ref().unwrap().media_sources[0];
    assert_eq!(ms.id, "bd9b6765-v1");
    assert_eq!(ms.sources[0].ssrc, 803354056);
}

#[test]
fn decodes_captured_kitchen_sink_request() {
    let registry = ProviderRegistry::new();
    let iq = ConferenceModifyIQ::from_xml(helpers::KITCHEN_SINK_MODIFY_XML, &registry).unwrap();

    let ep = &iq.endpoints[0];
    assert!(ep.create);
    assert_eq!(ep.muc_role, Some(MucRole::Visitor));
    assert_eq!(ep.capabilities, vec!["source-names".to_owned()]);
    assert_eq!(ep.media.len(), 2);

    let opus = &ep.media[0].payload_types[0];
    assert_eq!(opus.parameters.get("useinbandfec").map(String::as_str), Some("1"));
    assert_eq!(opus.parameters.get("minptime").map(String::as_str), Some("10"));
    assert_eq!(opus.rtcp_fbs[0].fb_type, "transport-cc");
    assert!(ep.media[0].extmap_allow_mixed);

    let vp8 = &ep.media[1].payload_types[0];
    assert_eq!(vp8.rtcp_fbs.len(), 4);
    assert_eq!(vp8.rtcp_fbs[0].subtype.as_deref(), Some("fir"));

    let connects = iq.connects.as_ref().unwrap();
    assert_eq!(connects.len(), 2);
    assert_eq!(connects[0].connect_type, ConnectType::Transcriber);
    assert!(connects[0].audio && !connects[0].video);
    assert_eq!(connects[1].connect_type, ConnectType::Recorder);
    assert!(connects[1].video && !connects[1].audio);

    // And back out: the re-encoded form must mean the same thing.
    let reencoded = iq.to_xml().unwrap();
    assert_eq!(ConferenceModifyIQ::from_xml(&reencoded, &registry).unwrap(), iq);
}

#[test]
fn connect_headers_survive_a_roundtrip() {
    let xml = r#"
<conference-modify xmlns="jitsi:colibri2" meeting-id="m1">
  <connects>
    <connect url="wss://x.example/r" protocol="mediajson" type="recorder">
      <http-header name="Authorization" value="Bearer t0ken"/>
    </connect>
  </connects>
</conference-modify>
"#;
    let registry = ProviderRegistry::new();
    let iq = ConferenceModifyIQ::from_xml(xml, &registry).unwrap();
    let connect = &iq.connects.as_ref().unwrap()[0];
    assert_eq!(connect.url.as_str(), "wss://x.example/r");
    assert_eq!(connect.http_headers[0].name, "Authorization");
    assert_eq!(connect.http_headers[0].value, "Bearer t0ken");

    let reencoded = iq.to_xml().unwrap();
    assert_eq!(ConferenceModifyIQ::from_xml(&reencoded, &registry).unwrap(), iq);
}

#[test]
fn connect_url_keeps_its_literal_text() {
    // A host-only URL would gain a trailing slash under URL normalization;
    // the wire text has to come back out exactly as it went in.
    let xml = r#"
<conference-modify xmlns="jitsi:colibri2" meeting-id="m1">
  <connects>
    <connect url="ws://x" protocol="mediajson" type="recorder"/>
  </connects>
</conference-modify>
"#;
    let registry = ProviderRegistry::new();
    let iq = ConferenceModifyIQ::from_xml(xml, &registry).unwrap();
    assert_eq!(iq.connects.as_ref().unwrap()[0].url, "ws://x");

    let reencoded = iq.to_xml().unwrap();
    assert!(reencoded.contains(r#"url="ws://x""#), "got: {reencoded}");
}

#[test]
fn empty_connects_element_is_preserved() {
    let xml = r#"<conference-modify xmlns="jitsi:colibri2" meeting-id="m1"><connects/></conference-modify>"#;
    let registry = ProviderRegistry::new();
    let iq = ConferenceModifyIQ::from_xml(xml, &registry).unwrap();
    // An empty <connects/> clears active connects and is distinct from absence.
    assert_eq!(iq.connects.as_deref(), Some(&[][..]));

    let reencoded = iq.to_xml().unwrap();
    let again = ConferenceModifyIQ::from_xml(&reencoded, &registry).unwrap();
    assert_eq!(again.connects.as_deref(), Some(&[][..]));
}

#[test]
fn default_valued_attributes_are_elided() {
    let iq = ConferenceModifyIQ::builder().meeting_id("m1").build().unwrap();
    let xml = iq.to_xml().unwrap();
    assert!(!xml.contains("create"), "{xml}");
    assert!(!xml.contains("expire"), "{xml}");
    assert!(!xml.contains("rtcstats-enabled"), "{xml}");
}

#[test]
fn rtcstats_enabled_false_is_written_out() {
    let iq = ConferenceModifyIQ::builder()
        .meeting_id("m1")
        .rtcstats_enabled(false)
        .build()
        .unwrap();
    assert!(iq.to_xml().unwrap().contains(r#"rtcstats-enabled="false""#));
}

#[test]
fn missing_meeting_id_is_reported() {
    let registry = ProviderRegistry::new();
    let err =
        ConferenceModifyIQ::from_xml(r#"<conference-modify xmlns="jitsi:colibri2"/>"#, &registry)
            .unwrap_err();
    assert_eq!(
        err,
        ColibriError::MissingRequiredField {
            element: "conference-modify",
            field: "meeting-id",
        }
    );
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("false", false)]
#[case("1", false)]
#[case("yes", false)]
fn only_the_literal_true_counts(#[case] value: &str, #[case] expected: bool) {
    let registry = ProviderRegistry::new();
    let xml = format!(
        r#"<conference-modify xmlns="jitsi:colibri2" meeting-id="m1" create="{value}"/>"#
    );
    let iq = ConferenceModifyIQ::from_xml(&xml, &registry).unwrap();
    assert_eq!(iq.create, expected);
}

#[test]
fn unknown_children_are_skipped() {
    let xml = r#"
<conference-modify xmlns="jitsi:colibri2" meeting-id="m1">
  <mystery xmlns="urn:example:unknown"><deeper attr="x"/></mystery>
  <endpoint id="e1"/>
</conference-modify>
"#;
    let registry = ProviderRegistry::new();
    let iq = ConferenceModifyIQ::from_xml(xml, &registry).unwrap();
    assert_eq!(iq.endpoints[0].id, "e1");
    assert!(iq.extensions.is_empty());
}

#[test]
fn truncated_document_is_rejected() {
    let registry = ProviderRegistry::new();
    let result = ConferenceModifyIQ::from_xml(
        r#"<conference-modify xmlns="jitsi:colibri2" meeting-id="m1"><endpoint id="e1">"#,
        &registry,
    );
    assert!(matches!(result, Err(ColibriError::MalformedStructure { .. })));
}

#[test]
fn notification_roundtrip_without_registry() {
    let iq = helpers::failure_notification_iq();
    let xml = iq.to_xml().unwrap();
    assert_eq!(ConferenceNotificationIQ::from_xml(&xml).unwrap(), iq);
}
