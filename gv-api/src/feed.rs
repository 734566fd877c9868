//! XML feeds.
//!
//! Account state is served as a small XML envelope wrapping two CDATA
//! blocks: the JSON payload and a server-rendered HTML fragment.
//! ```xml
//! <response>
//!   <json><![CDATA[{"messages":{...},"totalSize":3}]]></json>
//!   <html><![CDATA[<div>...</div>]]></html>
//! </response>
//! ```
//! A [`FeedHandle`] defers the request until its content is first asked for.

use std::fmt;
use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use gv_core::constants::Endpoints;
use gv_core::error::{GvError, GvResult};
use gv_models::{ContactsFeed, Folder};

use crate::client::VoiceClient;

/// A named XML feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Inbox,
    Starred,
    All,
    Spam,
    Trash,
    Voicemail,
    Sms,
    Recorded,
    Placed,
    Received,
    Missed,
    Contacts,
}

impl Feed {
    /// Every message folder feed, in the order the service lists them.
    pub const ALL_FOLDERS: [Feed; 11] = [
        Feed::Inbox,
        Feed::Starred,
        Feed::All,
        Feed::Spam,
        Feed::Trash,
        Feed::Voicemail,
        Feed::Sms,
        Feed::Recorded,
        Feed::Placed,
        Feed::Received,
        Feed::Missed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feed::Inbox => "inbox",
            Feed::Starred => "starred",
            Feed::All => "all",
            Feed::Spam => "spam",
            Feed::Trash => "trash",
            Feed::Voicemail => "voicemail",
            Feed::Sms => "sms",
            Feed::Recorded => "recorded",
            Feed::Placed => "placed",
            Feed::Received => "received",
            Feed::Missed => "missed",
            Feed::Contacts => "contacts",
        }
    }

    pub fn is_folder(&self) -> bool {
        !matches!(self, Feed::Contacts)
    }

    pub fn url(&self, endpoints: &Endpoints) -> String {
        match self {
            Feed::Contacts => endpoints.xml_contacts(),
            folder => endpoints.xml_folder(folder.name()),
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feed {
    type Err = GvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Feed::ALL_FOLDERS
            .iter()
            .chain(std::iter::once(&Feed::Contacts))
            .find(|f| f.name() == wanted)
            .copied()
            .ok_or_else(|| GvError::Feed(format!("unknown feed {s:?}")))
    }
}

/// A fetched and parsed feed document.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub name: String,
    pub json: Value,
    pub html: String,
}

impl FeedPage {
    /// Parse a feed document.
    ///
    /// Text and CDATA inside `<json>` and `<html>` are accumulated, in as
    /// many chunks as the document splits them into. Other elements are
    /// ignored.
    pub fn parse(name: &str, xml: &str) -> GvResult<Self> {
        #[derive(Clone, Copy)]
        enum Section {
            Json,
            Html,
        }

        let mut reader = Reader::from_str(xml);
        let mut section: Option<Section> = None;
        let mut json = String::new();
        let mut html = String::new();

        loop {
            let chunk = match reader.read_event() {
                Ok(Event::Start(e)) => {
                    section = match e.name().as_ref() {
                        b"json" => Some(Section::Json),
                        b"html" => Some(Section::Html),
                        _ => section,
                    };
                    continue;
                }
                Ok(Event::End(e)) => {
                    if matches!(e.name().as_ref(), b"json" | b"html") {
                        section = None;
                    }
                    continue;
                }
                Ok(Event::Text(t)) if section.is_some() => t
                    .unescape()
                    .map_err(|e| GvError::Feed(format!("{name} feed: {e}")))?
                    .into_owned(),
                Ok(Event::CData(c)) if section.is_some() => std::str::from_utf8(&c)
                    .map_err(|e| GvError::Feed(format!("{name} feed: {e}")))?
                    .to_string(),
                Ok(Event::Eof) => break,
                Ok(_) => continue,
                Err(e) => {
                    return Err(GvError::Feed(format!(
                        "{name} feed: malformed xml at byte {}: {e}",
                        reader.buffer_position()
                    )))
                }
            };

            match section {
                Some(Section::Json) => json.push_str(&chunk),
                Some(Section::Html) => html.push_str(&chunk),
                None => {}
            }
        }

        let json: Value = serde_json::from_str(json.trim())
            .map_err(|e| GvError::Feed(format!("{name} feed: invalid json: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            json,
            html,
        })
    }

    /// Interpret the JSON payload as a message folder.
    pub fn folder(&self) -> GvResult<Folder> {
        Folder::from_server_map(&self.name, &self.json)
    }

    /// Interpret the JSON payload as the contacts feed.
    pub fn contacts(&self) -> GvResult<ContactsFeed> {
        ContactsFeed::from_server_map(&self.json)
    }
}

/// Lazily fetched feed.
///
/// Creating a handle performs no I/O. The first [`load`](Self::load) fetches
/// and parses the feed and caches the result; [`reload`](Self::reload)
/// discards the cache and fetches again.
pub struct FeedHandle {
    client: VoiceClient,
    feed: Feed,
    page: OnceCell<FeedPage>,
}

impl FeedHandle {
    pub(crate) fn new(client: VoiceClient, feed: Feed) -> Self {
        Self {
            client,
            feed,
            page: OnceCell::new(),
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }

    pub fn is_loaded(&self) -> bool {
        self.page.initialized()
    }

    /// Fetch on first use, then return the cached page.
    pub async fn load(&self) -> GvResult<&FeedPage> {
        self.page
            .get_or_try_init(|| async {
                debug!("loading {} feed", self.feed);
                self.client.fetch_feed(self.feed).await
            })
            .await
    }

    /// Drop any cached page and fetch again.
    pub async fn reload(&mut self) -> GvResult<&FeedPage> {
        self.page = OnceCell::new();
        self.load().await
    }

    /// The feed's messages. Loads the feed if needed.
    pub async fn folder(&self) -> GvResult<Folder> {
        self.load().await?.folder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <json><![CDATA[{"messages":{"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa":{"startTime":"1400000000000","isRead":false}},"totalSize":1}]]></json>
  <html><![CDATA[<div class="gc-message">hi</div>]]></html>
</response>"#;

    #[test]
    fn test_parse_feed_document() {
        let page = FeedPage::parse("inbox", DOC).unwrap();
        assert_eq!(page.name, "inbox");
        assert_eq!(page.json["totalSize"], 1);
        assert_eq!(page.html, r#"<div class="gc-message">hi</div>"#);
        let folder = page.folder().unwrap();
        assert_eq!(folder.len(), 1);
        assert_eq!(folder.name, "inbox");
    }

    #[test]
    fn test_split_chunks_are_joined() {
        let doc = r#"<response><json><![CDATA[{"totalSize":]]><![CDATA[7}]]></json><html>a &amp; b</html></response>"#;
        let page = FeedPage::parse("all", doc).unwrap();
        assert_eq!(page.json["totalSize"], 7);
        assert_eq!(page.html, "a & b");
    }

    #[test]
    fn test_other_elements_ignored() {
        let doc = r#"<response><meta>skip me</meta><json>{"ok":1}</json></response>"#;
        let page = FeedPage::parse("sms", doc).unwrap();
        assert_eq!(page.json["ok"], 1);
        assert!(page.html.is_empty());
    }

    #[test]
    fn test_missing_or_bad_json_is_feed_error() {
        let err = FeedPage::parse("inbox", "<response><html>x</html></response>").unwrap_err();
        assert!(matches!(err, GvError::Feed(_)));

        let err = FeedPage::parse("inbox", "<response><json>{nope</json></response>").unwrap_err();
        assert!(matches!(err, GvError::Feed(ref m) if m.contains("invalid json")));
    }

    #[test]
    fn test_malformed_xml() {
        let err = FeedPage::parse("inbox", "<response><json>{}</html></response>").unwrap_err();
        assert!(matches!(err, GvError::Feed(_)));
    }

    #[test]
    fn test_feed_names_and_urls() {
        let ep = Endpoints::default();
        assert_eq!(
            Feed::Voicemail.url(&ep),
            "https://www.google.com/voice/inbox/recent/voicemail/"
        );
        assert_eq!(Feed::Contacts.url(&ep), "https://www.google.com/voice/contacts/");
        assert_eq!("Missed".parse::<Feed>().unwrap(), Feed::Missed);
        assert!("archive".parse::<Feed>().is_err());
        assert!(!Feed::Contacts.is_folder());
        assert_eq!(
            Feed::ALL_FOLDERS.map(|f| f.name()).to_vec(),
            gv_core::constants::FOLDER_FEEDS.to_vec()
        );
    }
}
