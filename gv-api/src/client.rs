//! HTTP session client for the Google Voice web interface.
//!
//! Owns the cookie-backed session, the scraped `_rnr_se` token, and the
//! request conventions: plain page loads, form posts, token-signed form
//! posts, and raw-URL GETs for downloads and search.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, trace};

use gv_core::config::{AppConfig, ServiceConfig, VoiceConfig};
use gv_core::constants::{Endpoints, SPECIAL_TOKEN_FIELD};
use gv_core::error::{GvError, GvResult};
use gv_models::ContactsFeed;

use crate::feed::{Feed, FeedHandle, FeedPage};
use crate::response::ActionResponse;
use crate::scrape;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Form fields for a request, in send order. Repeated names are allowed.
pub type FormFields = Vec<(&'static str, String)>;

/// Session client for the Google Voice web interface.
///
/// Cloning is cheap and clones share the cookie jar, token and caches.
#[derive(Clone)]
pub struct VoiceClient {
    inner: Client,
    endpoints: Endpoints,
    /// Calling defaults (forwarding number, phone type).
    voice: VoiceConfig,
    /// Session token scraped from the inbox page.
    special: Arc<RwLock<Option<String>>>,
    /// Contacts feed, fetched at most once per session.
    contacts: Arc<RwLock<Option<ContactsFeed>>>,
}

impl VoiceClient {
    /// Create a client from service and calling configuration.
    pub fn new(service: &ServiceConfig, voice: &VoiceConfig) -> GvResult<Self> {
        let inner = Client::builder()
            .cookie_store(true)
            .user_agent(service.user_agent())
            .timeout(Duration::from_millis(service.timeout_ms))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| GvError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            endpoints: service.endpoints(),
            voice: voice.clone(),
            special: Arc::new(RwLock::new(None)),
            contacts: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from the full application configuration.
    pub fn from_config(config: &AppConfig) -> GvResult<Self> {
        Self::new(&config.service, &config.gvoice)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn voice_config(&self) -> &VoiceConfig {
        &self.voice
    }

    // --- Session token ---

    /// The session token, scraping the inbox page if it is not cached yet.
    ///
    /// Returns `None` when the inbox page carries no token, which is what an
    /// unauthenticated session sees.
    pub async fn special(&self) -> GvResult<Option<String>> {
        if let Some(token) = self.special.read().await.clone() {
            return Ok(Some(token));
        }

        let html = self.get_text(self.endpoints.inbox()).await?;
        let token = scrape::special_token(&html);
        match token {
            Some(_) => debug!("session token acquired"),
            None => debug!("inbox page carries no session token"),
        }
        *self.special.write().await = token.clone();
        Ok(token)
    }

    /// The session token, or `NotLoggedIn`.
    pub(crate) async fn require_special(&self) -> GvResult<String> {
        self.special().await?.ok_or(GvError::NotLoggedIn)
    }

    /// Whether a token is cached. Performs no I/O.
    pub async fn is_logged_in(&self) -> bool {
        self.special.read().await.is_some()
    }

    /// Forget the token and every session-scoped cache.
    pub(crate) async fn clear_session(&self) {
        *self.special.write().await = None;
        *self.contacts.write().await = None;
    }

    pub(crate) async fn cached_contacts(&self) -> Option<ContactsFeed> {
        self.contacts.read().await.clone()
    }

    pub(crate) async fn cache_contacts(&self, feed: ContactsFeed) {
        *self.contacts.write().await = Some(feed);
    }

    // --- Requests ---

    /// GET a page.
    pub(crate) async fn get_page(&self, url: &str) -> GvResult<Response> {
        debug!("GET {url}");
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(Self::classify_error)?;
        Self::check_status(response).await
    }

    /// GET a page and read its body as text.
    pub(crate) async fn get_text(&self, url: &str) -> GvResult<String> {
        let response = self.get_page(url).await?;
        Self::response_text(response).await
    }

    /// POST url-encoded form fields.
    ///
    /// Only field names are logged; values may hold credentials or the token.
    pub(crate) async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> GvResult<Response> {
        debug!(
            "POST {url} fields=[{}]",
            fields.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(",")
        );
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .form(fields)
            .send()
            .await
            .map_err(Self::classify_error)?;
        Self::check_status(response).await
    }

    /// POST form fields signed with the session token.
    pub(crate) async fn post_special(&self, url: &str, mut fields: FormFields) -> GvResult<Response> {
        let token = self.require_special().await?;
        fields.push((SPECIAL_TOKEN_FIELD, token));
        self.post_form(url, &fields).await
    }

    /// POST a signed form and require the service to acknowledge it.
    pub(crate) async fn validate_special(&self, url: &str, fields: FormFields) -> GvResult<ActionResponse> {
        let response = self.post_special(url, fields).await?;
        let body = Self::response_text(response).await?;
        trace!("action response from {url}: {body}");
        ActionResponse::parse_ok(&body)
    }

    /// GET `base` with `suffix` appended verbatim.
    ///
    /// Downloads and search carry their argument in the URL rather than a
    /// form body, so nothing is encoded here; callers pass a ready suffix.
    pub(crate) async fn get_raw(&self, base: &str, suffix: &str) -> GvResult<Response> {
        self.require_special().await?;
        self.get_page(&format!("{base}{suffix}")).await
    }

    // --- Feeds ---

    /// A lazily loaded handle on a feed. No request is made until it is read.
    pub fn feed(&self, feed: Feed) -> FeedHandle {
        FeedHandle::new(self.clone(), feed)
    }

    /// Fetch one folder feed and return its messages.
    pub async fn folder(&self, feed: Feed) -> GvResult<gv_models::Folder> {
        if !feed.is_folder() {
            return Err(GvError::Feed(format!("{feed} is not a message folder")));
        }
        self.feed(feed).folder().await
    }

    /// Fetch and parse a feed now.
    pub(crate) async fn fetch_feed(&self, feed: Feed) -> GvResult<FeedPage> {
        self.require_special().await?;
        let xml = self.get_text(&feed.url(&self.endpoints)).await?;
        FeedPage::parse(feed.name(), &xml)
    }

    // --- Response helpers ---

    pub(crate) async fn response_text(response: Response) -> GvResult<String> {
        response
            .text()
            .await
            .map_err(|e| GvError::Http(format!("failed to read response body: {e}")))
    }

    /// Read a response body while reporting `(bytes_downloaded, total_bytes)`.
    ///
    /// `total_bytes` is 0 when the server sends no Content-Length.
    pub(crate) async fn response_bytes_with_progress<F>(
        response: Response,
        progress: F,
    ) -> GvResult<Vec<u8>>
    where
        F: Fn(u64, u64),
    {
        let total = response.content_length().unwrap_or(0);
        let mut downloaded: u64 = 0;
        let mut bytes = Vec::with_capacity(initial_capacity(total));

        let mut stream = response;
        while let Some(chunk) = stream
            .chunk()
            .await
            .map_err(|e| GvError::Http(format!("download stream error: {e}")))?
        {
            downloaded += chunk.len() as u64;
            bytes.extend_from_slice(&chunk);
            progress(downloaded, total);
        }

        Ok(bytes)
    }

    /// Check the HTTP status code and convert to GvError if needed.
    async fn check_status(response: Response) -> GvResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GvError::LoginFailed(format!("service returned {status}")));
        }

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(GvError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }

    /// Classify a reqwest error into a GvError variant.
    fn classify_error(e: reqwest::Error) -> GvError {
        if e.is_timeout() {
            GvError::Timeout(e.to_string())
        } else if e.is_connect() {
            GvError::Http(format!("connection failed: {e}"))
        } else {
            GvError::Http(e.to_string())
        }
    }
}

/// Largest buffer reserved up front for a body, whatever Content-Length claims.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// Starting buffer size for a body of `total` bytes (0 when unknown).
fn initial_capacity(total: u64) -> usize {
    match total {
        0 => 8192,
        n => n.min(MAX_PREALLOC) as usize,
    }
}
