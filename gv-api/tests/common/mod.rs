//! Shared test utilities: a mock Voice service on a local wiremock server.

#![allow(dead_code)]

use gv_api::{Credentials, VoiceClient};
use gv_core::config::{ServiceConfig, VoiceConfig};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok123";
pub const SESSION_COOKIE: &str = "SID=session-1";

pub const LOGIN_PAGE: &str = r#"<html><body>
<form id="gaia_loginform" action="/accounts/ServiceLoginAuth" method="post">
  <input type="hidden" name="GALX" value="galx-1">
  <input type="hidden" name="gxf" value="gxf-1">
  <input type="hidden" name="service" value="grandcentral">
  <input type="hidden" id="_utf8" name="_utf8" value="utf8-1"/>
  <input type="hidden" name="bgresponse" id="bgresponse" value="js_disabled">
  <input type="email" name="Email" value="">
  <input type="password" name="Passwd">
</form>
</body></html>"#;

pub const ANONYMOUS_INBOX: &str = "<html><body>Sign in to continue</body></html>";

pub const ID_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const ID_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

pub fn inbox_with_token() -> String {
    format!(
        "<html><script>var _gcData = {{ 'number': {{}}, '_rnr_se': '{TOKEN}', 'v': '1' }};</script></html>"
    )
}

/// Wrap a JSON payload in the feed XML envelope.
pub fn feed_xml(json: &serde_json::Value) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response><json><![CDATA[{json}]]></json><html><![CDATA[<div>rendered</div>]]></html></response>"
    )
}

pub fn voicemail_json() -> serde_json::Value {
    serde_json::json!({
        "messages": {
            ID_A: {
                "id": ID_A,
                "phoneNumber": "+15555550100",
                "displayNumber": "(555) 555-0100",
                "startTime": "1426368360000",
                "displayStartDateTime": "3/14/15 9:26 PM",
                "isRead": false,
                "star": false,
                "labels": ["inbox", "voicemail", "unread"],
                "messageText": "call me back",
                "duration": 14,
                "hasMp3": true
            },
            ID_B: {
                "id": ID_B,
                "phoneNumber": "+15555550101",
                "startTime": "1426000000000",
                "displayStartDateTime": "3/10/15 3:06 PM",
                "isRead": true,
                "star": true,
                "labels": ["voicemail"]
            }
        },
        "totalSize": 2,
        "unreadCounts": {"voicemail": 1},
        "resultsPerPage": 10
    })
}

pub fn contacts_json() -> serde_json::Value {
    serde_json::json!({
        "contacts": {
            "c1": {"name": "Amy", "phoneNumber": "+15555550112"}
        },
        "phones": {
            "2": {"id": 2, "name": "Cell", "phoneNumber": "+15555550111", "type": 2, "enabled": true},
            "5": {"id": 5, "name": "Desk", "phoneNumber": "+15555550120", "type": 3, "enabled": false}
        },
        "settings": {"primaryDid": "+15555550199", "language": "en"}
    })
}

pub fn service_config(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        base_url: format!("{}/voice/", server.uri()),
        login_url: format!("{}/accounts/ServiceLoginAuth?service=grandcentral", server.uri()),
        timeout_ms: 5_000,
        user_agent: None,
    }
}

pub fn voice_config() -> VoiceConfig {
    VoiceConfig {
        forwarding_number: Some("+15555550111".into()),
        phone_type: 2,
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("someone@example.com", "secret")
}

/// Mount the login form, the login POST (which sets the session cookie),
/// and the inbox page: with the cookie it carries the token, without it an
/// anonymous page.
pub async fn mount_login_flow(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/accounts/ServiceLoginAuth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts/ServiceLoginAuth"))
        .and(body_string_contains("Email=someone%40example.com"))
        .and(body_string_contains("Passwd=secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/").as_str())
                .set_body_string("<html>ok</html>"),
        )
        .mount(server)
        .await;

    mount_inbox(server).await;
}

pub async fn mount_inbox(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/voice/"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_string(inbox_with_token()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/voice/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ANONYMOUS_INBOX))
        .mount(server)
        .await;
}

/// A client pointed at the mock server, already logged in.
pub async fn logged_in_client(server: &MockServer) -> VoiceClient {
    mount_login_flow(server).await;
    let client = VoiceClient::new(&service_config(server), &voice_config())
        .expect("failed to build client");
    client.login(credentials()).await.expect("login failed");
    client
}

/// Respond to an action POST with `{"ok": true}`.
pub fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "data": {"code": 0}}))
}
