//! Application-wide constants and service endpoints.

/// Application name.
pub const APP_NAME: &str = "gvoice";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("gvoice/", env!("CARGO_PKG_VERSION"));

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://www.google.com/voice/";

/// Default login form location.
pub const DEFAULT_LOGIN_URL: &str =
    "https://accounts.google.com/ServiceLoginAuth?service=grandcentral";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default phone type for the forwarding number (mobile).
pub const DEFAULT_PHONE_TYPE: u8 = 2;

/// Form field carrying the session token.
pub const SPECIAL_TOKEN_FIELD: &str = "_rnr_se";

/// Placeholder the service expects for omitted numbers.
pub const UNDEFINED: &str = "undefined";

/// Paths relative to the service root.
pub mod paths {
    pub const LOGOUT: &str = "account/signout";
    pub const CALL: &str = "call/connect/";
    pub const CANCEL: &str = "call/cancel/";
    pub const DEFAULT_FORWARD: &str = "settings/editDefaultForwarding/";
    pub const DELETE: &str = "inbox/deleteMessages/";
    pub const MARK: &str = "inbox/mark/";
    pub const STAR: &str = "inbox/star/";
    pub const SMS: &str = "sms/send/";
    pub const DOWNLOAD: &str = "media/send_voicemail/";

    pub const XML_SEARCH: &str = "inbox/search/";
    pub const XML_CONTACTS: &str = "contacts/";
    pub const XML_RECENT: &str = "inbox/recent/";
}

/// Names of the message folders exposed as XML feeds.
pub const FOLDER_FEEDS: &[&str] = &[
    "inbox",
    "starred",
    "all",
    "spam",
    "trash",
    "voicemail",
    "sms",
    "recorded",
    "placed",
    "received",
    "missed",
];

/// Absolute URLs for every page the client talks to.
///
/// Built from a service root and a login URL so that the whole client can be
/// pointed somewhere other than the production service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    login: String,
}

impl Endpoints {
    /// Create endpoints from a service root and login form URL.
    ///
    /// The root always ends up with exactly one trailing slash.
    pub fn new(base: &str, login: &str) -> Self {
        let base = format!("{}/", base.trim().trim_end_matches('/'));
        Self {
            base,
            login: login.trim().to_string(),
        }
    }

    /// Service root, also the page the session token is scraped from.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn inbox(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Resolve a path relative to the service root.
    pub fn page(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub fn logout(&self) -> String {
        self.page(paths::LOGOUT)
    }

    pub fn call(&self) -> String {
        self.page(paths::CALL)
    }

    pub fn cancel(&self) -> String {
        self.page(paths::CANCEL)
    }

    pub fn default_forward(&self) -> String {
        self.page(paths::DEFAULT_FORWARD)
    }

    pub fn delete(&self) -> String {
        self.page(paths::DELETE)
    }

    pub fn mark(&self) -> String {
        self.page(paths::MARK)
    }

    pub fn star(&self) -> String {
        self.page(paths::STAR)
    }

    pub fn sms(&self) -> String {
        self.page(paths::SMS)
    }

    pub fn download(&self) -> String {
        self.page(paths::DOWNLOAD)
    }

    pub fn xml_search(&self) -> String {
        self.page(paths::XML_SEARCH)
    }

    pub fn xml_contacts(&self) -> String {
        self.page(paths::XML_CONTACTS)
    }

    /// Feed URL for a message folder, e.g. `inbox/recent/voicemail/`.
    pub fn xml_folder(&self, name: &str) -> String {
        self.page(&format!("{}{}/", paths::XML_RECENT, name))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_LOGIN_URL)
    }
}
