#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Both codecs must agree: a message pushed through the XML pipeline and the
//! same message pushed through the JSON pipeline land on identical models.

#[path = "helpers/mod.rs"]
mod helpers;

use colibri2::{ColibriMessage, ConferenceModifyIQ, ProviderRegistry};
use serde_json::Value;

fn assert_codecs_agree(message: &ColibriMessage) {
    let registry = ProviderRegistry::new();

    let xml = message.to_xml().unwrap();
    let via_xml = ColibriMessage::from_xml(&xml, &registry)
        .unwrap_or_else(|e| panic!("xml decode failed: {e}\n{xml}"));

    let json = message.to_json();
    let via_json = ColibriMessage::from_json(&json)
        .unwrap_or_else(|e| panic!("json decode failed: {e}\n{json:#}"));

    assert_eq!(&via_xml, message, "xml pipeline changed the message");
    assert_eq!(&via_json, message, "json pipeline changed the message");
}

#[test]
fn codecs_agree_on_modify() {
    assert_codecs_agree(&ColibriMessage::ConferenceModify(helpers::full_modify_iq()));
}

#[test]
fn codecs_agree_on_modified() {
    assert_codecs_agree(&ColibriMessage::ConferenceModified(
        helpers::feedback_modified_iq(),
    ));
}

#[test]
fn codecs_agree_on_notification() {
    assert_codecs_agree(&ColibriMessage::ConferenceNotification(
        helpers::failure_notification_iq(),
    ));
}

#[test]
fn captured_xml_and_json_decode_to_the_same_model() {
    let registry = ProviderRegistry::new();
    let from_xml =
        ConferenceModifyIQ::from_xml(helpers::ENDPOINT_WITH_SOURCES_XML, &registry).unwrap();

    let value: Value = serde_json::from_str(helpers::ENDPOINT_WITH_SOURCES_JSON).unwrap();
    let from_json = ConferenceModifyIQ::from_json(&value).unwrap();

    assert_eq!(from_xml, from_json);
}

#[test]
fn xml_to_json_translation_roundtrips() {
    let registry = ProviderRegistry::new();
    let original =
        ConferenceModifyIQ::from_xml(helpers::KITCHEN_SINK_MODIFY_XML, &registry).unwrap();

    // XML in, JSON out, JSON in, XML out, XML in again.
    let json = original.to_json();
    let translated = ConferenceModifyIQ::from_json(&json).unwrap();
    assert_eq!(translated, original);

    let xml = translated.to_xml().unwrap();
    assert_eq!(ConferenceModifyIQ::from_xml(&xml, &registry).unwrap(), original);
}
