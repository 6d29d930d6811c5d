use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ClientError;
use crate::middlewares::csrf::CsrfToken;

pub mod grading_client;
pub mod platform;
pub mod semester_client;
pub mod session;
pub mod stopwatch;

use grading_client::GradingClient;
use platform::{normalize_base_url, PlatformTransport};
use semester_client::SemesterClient;

pub struct AppState {
    pub config: Config,
    pub http: Client,
    pub platform_url: Url,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let platform_url = Url::parse(&config.platform_url)
            .with_context(|| format!("Invalid platform URL: {}", config.platform_url))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build platform HTTP client")?;

        tracing::info!("Platform client configured for {}", platform_url);

        Ok(Self {
            config,
            http,
            platform_url: normalize_base_url(platform_url),
        })
    }

    /// Client acting on behalf of one caller: their CSRF token and session cookie.
    pub fn grading_client(
        &self,
        token: &CsrfToken,
        cookie: Option<String>,
    ) -> Result<GradingClient, ClientError> {
        let transport =
            PlatformTransport::new(self.http.clone(), self.platform_url.clone(), token.0.as_str())?
                .with_cookie(cookie);
        Ok(GradingClient::new(transport))
    }

    pub fn semester_client(
        &self,
        semester_id: Uuid,
        token: &CsrfToken,
        cookie: Option<String>,
    ) -> Result<SemesterClient, ClientError> {
        Ok(SemesterClient::new(
            self.http.clone(),
            &self.platform_url,
            semester_id,
            token.0.as_str(),
        )?
        .with_cookie(cookie))
    }
}
