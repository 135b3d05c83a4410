#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

#[path = "helpers/mod.rs"]
mod helpers;

use colibri2::model::NotificationType;
use colibri2::{
    ColibriError, ColibriMessage, ConferenceModifiedIQ, ConferenceModifyIQ,
    ConferenceNotificationIQ,
};
use rstest::rstest;
use serde_json::{Value, json};

#[test]
fn modify_survives_a_roundtrip() {
    let iq = helpers::full_modify_iq();
    assert_eq!(ConferenceModifyIQ::from_json(&iq.to_json()).unwrap(), iq);
}

#[test]
fn modified_survives_a_roundtrip() {
    let iq = helpers::feedback_modified_iq();
    assert_eq!(ConferenceModifiedIQ::from_json(&iq.to_json()).unwrap(), iq);
}

#[test]
fn notification_survives_a_roundtrip() {
    let iq = helpers::failure_notification_iq();
    assert_eq!(
        ConferenceNotificationIQ::from_json(&iq.to_json()).unwrap(),
        iq
    );
}

#[test]
fn decodes_captured_json_with_numeric_strings() {
    let value: Value = serde_json::from_str(helpers::ENDPOINT_WITH_SOURCES_JSON).unwrap();
    let iq = ConferenceModifyIQ::from_json(&value).unwrap();

    assert_eq!(iq.meeting_id, "88ff288c-5eeb-4ea9-bc2f-93ea38c43b78");
    assert!(iq.create);

    let ep = &iq.endpoints[0];
    let pt = &ep.media[0].payload_types[0];
    // "111", "48000" and "2" travel as strings in the legacy shape.
    assert_eq!((pt.id, pt.clockrate, pt.channels), (111, Some(48000), Some(2)));
    assert_eq!(ep.initial_last_n, Some(13));
    assert_eq!(ep.sources.as_ref().unwrap().media_sources[0].sources[0].ssrc, 803354056);
}

#[test]
fn message_dispatch_follows_the_document_shape() {
    let modify = json!({"meeting-id": "m1"});
    assert!(matches!(
        ColibriMessage::from_json(&modify).unwrap(),
        ColibriMessage::ConferenceModify(_)
    ));

    let notification = json!({
        "meeting-id": "m1",
        "notifications": [{"id": "e1", "type": "ice-failed"}]
    });
    assert!(matches!(
        ColibriMessage::from_json(&notification).unwrap(),
        ColibriMessage::ConferenceNotification(_)
    ));

    let modified = json!({"endpoints": []});
    assert!(matches!(
        ColibriMessage::from_json(&modified).unwrap(),
        ColibriMessage::ConferenceModified(_)
    ));
}

#[test]
fn bare_sources_encode_as_numbers() {
    let iq = helpers::feedback_modified_iq();
    let value = iq.to_json();
    let sources = &value["sources"][0]["sources"];
    assert_eq!(sources[0], json!(411312308));
}

#[test]
fn named_sources_encode_as_objects() {
    let iq = ConferenceModifyIQ::builder()
        .meeting_id("m1")
        .endpoint(
            colibri2::Endpoint::builder()
                .id("e1")
                .sources(helpers::video_sources())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let value = iq.to_json();
    let sources = &value["endpoints"][0]["sources"][0]["sources"];
    assert_eq!(sources[0]["ssrc"], json!(803354056u32));
    assert_eq!(sources[0]["name"], json!("bd9b6765-v1-s1"));
    // The second source carries only an ssrc, so it collapses to a number.
    assert_eq!(sources[1], json!(803354057u32));
}

#[test]
fn force_mute_always_carries_both_flags() {
    let iq = ConferenceModifyIQ::builder()
        .meeting_id("m1")
        .endpoint(
            colibri2::Endpoint::builder()
                .id("e1")
                .force_mute(true, false)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let value = iq.to_json();
    assert_eq!(
        value["endpoints"][0]["force-mute"],
        json!({"audio": true, "video": false})
    );
}

#[test]
fn rtcstats_enabled_defaults_on() {
    let on = ConferenceModifyIQ::builder().meeting_id("m1").build().unwrap();
    assert!(on.to_json().get("rtcstats-enabled").is_none());

    let off = ConferenceModifyIQ::builder()
        .meeting_id("m1")
        .rtcstats_enabled(false)
        .build()
        .unwrap();
    assert_eq!(off.to_json()["rtcstats-enabled"], json!(false));

    let decoded = ConferenceModifyIQ::from_json(&json!({"meeting-id": "m1"})).unwrap();
    assert!(decoded.rtcstats_enabled);
}

#[rstest]
#[case("ice-failed", NotificationType::IceFailed)]
#[case("ICE_FAILED", NotificationType::IceFailed)]
#[case(" Ice_Failed ", NotificationType::IceFailed)]
#[case("connect-failed", NotificationType::ConnectFailed)]
#[case("CONNECT_FAILED", NotificationType::ConnectFailed)]
fn notification_types_are_normalized(#[case] wire: &str, #[case] expected: NotificationType) {
    let value = json!({
        "meeting-id": "m1",
        "notifications": [{"id": "e1", "type": wire}]
    });
    let iq = ConferenceNotificationIQ::from_json(&value).unwrap();
    assert_eq!(iq.notifications[0].notification_type, expected);
}

#[test]
fn unknown_notification_type_is_rejected() {
    let value = json!({
        "meeting-id": "m1",
        "notifications": [{"id": "e1", "type": "mystery-failed"}]
    });
    let err = ConferenceNotificationIQ::from_json(&value).unwrap_err();
    assert!(matches!(err, ColibriError::InvalidEnumValue { .. }));
}

#[test]
fn non_numeric_ssrc_is_rejected() {
    let value = json!({
        "meeting-id": "m1",
        "endpoints": [{
            "id": "e1",
            "sources": [{"type": "audio", "id": "a0", "sources": ["not-a-number"]}]
        }]
    });
    let err = ConferenceModifyIQ::from_json(&value).unwrap_err();
    assert!(matches!(err, ColibriError::InvalidNumericValue { .. }));
}

#[test]
fn non_string_meeting_id_is_rejected() {
    let err = ConferenceModifyIQ::from_json(&json!({"meeting-id": 7})).unwrap_err();
    assert!(matches!(err, ColibriError::MalformedStructure { .. }));
}

#[test]
fn invalid_connect_url_is_rejected() {
    let value = json!({
        "meeting-id": "m1",
        "connects": [{"url": "not a url", "protocol": "mediajson", "type": "recorder"}]
    });
    let err = ConferenceModifyIQ::from_json(&value).unwrap_err();
    assert!(matches!(err, ColibriError::InvalidUri { .. }));
}
