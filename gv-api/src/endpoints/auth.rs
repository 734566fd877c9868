//! Login and logout.

use std::fmt;

use tracing::{info, warn};

use gv_core::config::AppConfig;
use gv_core::error::{GvError, GvResult};

use crate::client::VoiceClient;
use crate::scrape::LoginForm;

/// Account credentials for the login form.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Take both credentials from the `[auth]` section.
    pub fn from_config(config: &AppConfig) -> GvResult<Self> {
        let email = config
            .auth
            .email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| GvError::MissingConfig("auth.email".into()))?;
        let password = config
            .auth
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| GvError::MissingConfig("auth.password".into()))?;
        Ok(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl VoiceClient {
    /// Log in through the HTML login form.
    ///
    /// A no-op when a session token is already cached. Consumes the
    /// credentials so the password does not outlive the request.
    pub async fn login(&self, credentials: Credentials) -> GvResult<()> {
        if self.is_logged_in().await {
            return Ok(());
        }

        let page = self.get_text(self.endpoints().login()).await?;
        let form = LoginForm::parse(&page)?;

        let base = self.endpoints().base().to_string();
        let Credentials { email, password } = credentials;
        let fields = vec![
            ("Email", email.clone()),
            ("Passwd", password),
            ("GALX", form.galx),
            ("gxf", form.gxf),
            ("_utf8", form.utf8),
            ("bgresponse", form.bgresponse),
            ("pstMsg", "1".to_string()),
            ("service", form.service),
            ("continue", base.clone()),
            ("followup", base),
        ];
        self.post_form(self.endpoints().login(), &fields).await?;
        drop(fields);

        match self.special().await? {
            Some(_) => {
                info!("logged in as {email}");
                Ok(())
            }
            None => {
                warn!("login for {email} produced no session token");
                Err(GvError::LoginFailed(format!(
                    "no session token after signing in as {email}"
                )))
            }
        }
    }

    /// End the session and make sure the service no longer treats it as
    /// signed in.
    pub async fn logout(&self) -> GvResult<()> {
        self.get_page(&self.endpoints().logout()).await?;
        self.clear_session().await;

        if self.special().await?.is_some() {
            return Err(GvError::LoginFailed(
                "session still active after logout".into(),
            ));
        }
        info!("logged out");
        Ok(())
    }
}
