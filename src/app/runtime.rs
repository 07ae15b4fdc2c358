//! Background network jobs so the UI loop never waits on a socket.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;

use crate::ai::{self, AiConfig, AiError};
use crate::core::assets::{AssetSink, StylesheetLink};

const STYLESHEET_TIMEOUT: Duration = Duration::from_secs(15);

pub enum AiUpdate {
    SampleText {
        /// Category that was active when the request went out.
        category: String,
        result: Result<String, AiError>,
    },
}

/// Ask the text model for a sample sentence.  A missing credential is
/// reported as `Err`; every other failure already degrades to the fallback
/// sentence inside [`ai::generate_sample_text`].
pub fn spawn_sample_text(
    tx: mpsc::UnboundedSender<AiUpdate>,
    config: AiConfig,
    category: String,
    vibe: String,
) {
    tokio::spawn(async move {
        let result = match ai::connect(&config) {
            Ok(model) => Ok(ai::generate_sample_text(model.as_ref(), &vibe).await),
            Err(e) => Err(e),
        };
        let _ = tx.send(AiUpdate::SampleText { category, result });
    });
}

// ───────────────────────────────────────── stylesheet sinks ──

/// Fetches each stylesheet once, fire-and-forget.
pub struct HttpStylesheetSink {
    http: Client,
}

impl HttpStylesheetSink {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(STYLESHEET_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl AssetSink for HttpStylesheetSink {
    fn inject(&mut self, link: &StylesheetLink) {
        let http = self.http.clone();
        let link = link.clone();
        tokio::spawn(async move {
            match fetch_stylesheet(&http, &link.href).await {
                Ok(css) => tracing::debug!(
                    id = %link.id,
                    faces = count_font_faces(&css),
                    "stylesheet loaded"
                ),
                Err(e) => tracing::warn!(id = %link.id, error = %e, "stylesheet fetch failed"),
            }
        });
    }
}

async fn fetch_stylesheet(http: &Client, href: &str) -> Result<String, reqwest::Error> {
    http.get(href).send().await?.error_for_status()?.text().await
}

fn count_font_faces(css: &str) -> usize {
    css.matches("@font-face").count()
}

/// Used in offline mode: records nothing, fetches nothing.
pub struct OfflineSink;

impl AssetSink for OfflineSink {
    fn inject(&mut self, link: &StylesheetLink) {
        tracing::debug!(id = %link.id, "offline, stylesheet skipped");
    }
}

/// Pick the sink for the current network mode.
pub fn sink_for(offline: bool) -> Box<dyn AssetSink> {
    if offline {
        return Box::new(OfflineSink);
    }
    match HttpStylesheetSink::new() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            tracing::warn!(error = %e, "http client unavailable, stylesheets disabled");
            Box::new(OfflineSink)
        }
    }
}
