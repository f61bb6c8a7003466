//! Web search and browser navigation gateway.
//!
//! Searches DuckDuckGo Lite (plain HTML, no API key) and hands URLs or file
//! paths to the platform opener.

use super::WebGateway;
use crate::config::SearchConfig;
use crate::{Result, ValetError};
use async_trait::async_trait;
use std::process::Command;
use tracing::{debug, info};

/// One extracted search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Web gateway over plain HTTP.
pub struct HttpWeb {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl HttpWeb {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ValetError::WebError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_results: config.max_results,
        })
    }
}

#[async_trait]
impl WebGateway for HttpWeb {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        info!("Searching the web for {:?}", query);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| ValetError::WebError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ValetError::WebError(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ValetError::WebError(e.to_string()))?;

        let hits = extract_hits(&html, self.max_results);
        debug!("Extracted {} result links", hits.len());
        Ok(hits)
    }

    fn open_external(&self, target: &str) -> Result<()> {
        info!("Opening {}", target);
        opener_command(target)
            .spawn()
            .map_err(|e| ValetError::WebError(format!("could not open {target}: {e}")))?;
        Ok(())
    }
}

/// Extract result links from DuckDuckGo Lite HTML.
///
/// Result rows look like `<a rel="nofollow" href="URL">title</a>`; a simple
/// line scan avoids a full HTML parser.
fn extract_hits(html: &str, max: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for line in html.lines() {
        if hits.len() >= max {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.contains("rel=\"nofollow\"") || !trimmed.contains("href=\"") {
            continue;
        }
        let Some(href_start) = trimmed.find("href=\"") else {
            continue;
        };
        let rest = &trimmed[href_start + 6..];
        let Some(href_end) = rest.find('"') else {
            continue;
        };
        let url = &rest[..href_end];

        let title = rest
            .find('>')
            .map(|gt| &rest[gt + 1..])
            .and_then(|after| after.find('<').map(|lt| after[..lt].trim().to_string()))
            .unwrap_or_default();

        if !url.is_empty() && !title.is_empty() {
            hits.push(SearchHit {
                title,
                url: url.to_string(),
            });
        }
    }
    hits
}

fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", target]);
        command
    }
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(target);
        command
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(target);
        command
    }
}
