//! Login, logout and session token handling against a mock service.

mod common;

use common::*;
use gv_api::VoiceClient;
use gv_core::error::GvError;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_acquires_session_token() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    assert!(client.is_logged_in().await);
    assert_eq!(client.special().await.unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_login_posts_scraped_hidden_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/ServiceLoginAuth"))
        .and(body_string_contains("GALX=galx-1"))
        .and(body_string_contains("gxf=gxf-1"))
        .and(body_string_contains("_utf8=utf8-1"))
        .and(body_string_contains("bgresponse=js_disabled"))
        .and(body_string_contains("service=grandcentral"))
        .and(body_string_contains("pstMsg=1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/").as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_login_flow(&server).await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    client.login(credentials()).await.unwrap();
    assert!(client.is_logged_in().await);
}

#[tokio::test]
async fn test_login_twice_is_noop() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    client.login(credentials()).await.unwrap();

    let login_page_hits = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/accounts/ServiceLoginAuth")
        .count();
    assert_eq!(login_page_hits, 1);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let server = MockServer::start().await;
    mount_login_flow(&server).await;
    Mock::given(method("POST"))
        .and(path("/accounts/ServiceLoginAuth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Wrong password</html>"))
        .mount(&server)
        .await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    let err = client
        .login(gv_api::Credentials::new("someone@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, GvError::LoginFailed(_)), "got {err:?}");
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_login_page_without_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/ServiceLoginAuth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    let err = client.login(credentials()).await.unwrap_err();
    assert!(matches!(err, GvError::Scrape(_)), "got {err:?}");
}

#[tokio::test]
async fn test_special_is_none_when_anonymous() {
    let server = MockServer::start().await;
    mount_inbox(&server).await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    assert_eq!(client.special().await.unwrap(), None);
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voice/account/signout"))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "set-cookie",
            "SID=deleted; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    client.logout().await.unwrap();
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_logout_fails_when_session_survives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voice/account/signout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, GvError::LoginFailed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voice/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = VoiceClient::new(&service_config(&server), &voice_config()).unwrap();
    let err = client.special().await.unwrap_err();
    assert!(
        matches!(err, GvError::ServerError { status: 503, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_rejected_session_status_is_login_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voice/sms/send/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voice/inbox/recent/inbox/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    let err = client.send_sms("+15555550100", "hi").await.unwrap_err();
    assert!(matches!(err, GvError::LoginFailed(_)), "got {err:?}");

    let err = client.folder(gv_api::Feed::Inbox).await.unwrap_err();
    assert!(matches!(err, GvError::LoginFailed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_logout_drops_cached_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voice/account/signout"))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "set-cookie",
            "SID=deleted; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voice/contacts/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_xml(&contacts_json())))
        .expect(2)
        .mount(&server)
        .await;
    let client = logged_in_client(&server).await;

    client.contacts().await.unwrap();
    client.contacts().await.unwrap();
    client.logout().await.unwrap();

    client.login(credentials()).await.unwrap();
    let phones = client.phones().await.unwrap();
    assert_eq!(phones.len(), 2);
}
