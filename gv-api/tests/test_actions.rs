//! Signed form actions: calls, SMS, forwarding and message operations.

mod common;

use common::*;
use gv_api::{CallParams, VoiceClient};
use gv_core::error::GvError;
use gv_models::{MessageId, PhoneType};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_call_uses_configured_forwarding_number() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/call/connect/"))
        .and(body_string_contains("outgoingNumber=%2B15555550100"))
        .and(body_string_contains("forwardingNumber=%2B15555550111"))
        .and(body_string_contains("subscriberNumber=undefined"))
        .and(body_string_contains("phoneType=2"))
        .and(body_string_contains("remember=1"))
        .and(body_string_contains(format!("_rnr_se={TOKEN}")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let response = client.call(CallParams::to("+15555550100")).await.unwrap();
    assert!(response.ok);
}

#[tokio::test]
async fn test_call_with_explicit_phone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/call/connect/"))
        .and(body_string_contains("forwardingNumber=%2B15555550120"))
        .and(body_string_contains("phoneType=3"))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let params = CallParams::to("+15555550100").from_phone("+15555550120", PhoneType::Work);
    client.call(params).await.unwrap();
}

#[tokio::test]
async fn test_call_rejected_by_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/call/connect/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": false, "error": "Cannot complete call."})),
        )
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let err = client.call(CallParams::to("+15555550100")).await.unwrap_err();
    match err {
        GvError::Validation(msg) => assert!(msg.contains("Cannot complete call."), "{msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_defaults_to_undefined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/call/cancel/"))
        .and(body_string_contains("outgoingNumber=undefined"))
        .and(body_string_contains("forwardingNumber=undefined"))
        .and(body_string_contains("cancelType=C2C"))
        .and(body_string_contains(format!("_rnr_se={TOKEN}")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    client.cancel(None, None).await.unwrap();
}

#[tokio::test]
async fn test_send_sms() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/sms/send/"))
        .and(body_string_contains("phoneNumber=%2B15555550100"))
        .and(body_string_contains("text=running+late"))
        .and(body_string_contains(format!("_rnr_se={TOKEN}")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    client.send_sms("+15555550100", "running late").await.unwrap();
}

#[tokio::test]
async fn test_actions_require_login() {
    let server = MockServer::start().await;
    mount_inbox(&server).await;
    Mock::given(method("POST"))
        .and(path("/voice/sms/send/"))
        .respond_with(ok_response())
        .expect(0)
        .mount(&server)
        .await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    let err = client.send_sms("+15555550100", "hi").await.unwrap_err();
    assert!(matches!(err, GvError::NotLoggedIn), "got {err:?}");
}

#[tokio::test]
async fn test_non_json_action_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/sms/send/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>error</html>"))
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let err = client.send_sms("+15555550100", "hi").await.unwrap_err();
    assert!(matches!(err, GvError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_delete_messages_sends_every_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/deleteMessages/"))
        .and(body_string_contains(format!("messages={ID_A}&messages={ID_B}")))
        .and(body_string_contains("trash=1"))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let ids = [MessageId::parse(ID_A).unwrap(), MessageId::parse(ID_B).unwrap()];
    client.delete_messages(&ids, true).await.unwrap();
}

#[tokio::test]
async fn test_star_and_mark_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/star/"))
        .and(body_string_contains(format!("messages={ID_A}")))
        .and(body_string_contains("star=0"))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/mark/"))
        .and(body_string_contains("read=1"))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let ids = [MessageId::parse(ID_A).unwrap()];
    client.star_messages(&ids, false).await.unwrap();
    client.mark_messages(&ids, true).await.unwrap();
}

#[tokio::test]
async fn test_disable_forwarding_phone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/settings/editDefaultForwarding/"))
        .and(body_string_contains("enabled=0"))
        .and(body_string_contains("phoneId=5"))
        .and(body_string_contains(format!("_rnr_se={TOKEN}")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    client.set_forwarding("5", false).await.unwrap();
}

#[tokio::test]
async fn test_single_message_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voice/inbox/recent/voicemail/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_xml(&voicemail_json())))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/deleteMessages/"))
        .and(body_string_contains(format!("messages={ID_A}&trash=1")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/star/"))
        .and(body_string_contains(format!("messages={ID_A}&star=1")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/star/"))
        .and(body_string_contains(format!("messages={ID_A}&star=0")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voice/inbox/mark/"))
        .and(body_string_contains(format!("messages={ID_A}&read=0")))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let folder = client.folder(gv_api::Feed::Voicemail).await.unwrap();
    let message = folder.find(&MessageId::parse(ID_A).unwrap()).unwrap();

    client.star_message(message).await.unwrap();
    client.unstar_message(message).await.unwrap();
    client.mark_message_read(message, false).await.unwrap();
    client.delete_message(message).await.unwrap();
}
