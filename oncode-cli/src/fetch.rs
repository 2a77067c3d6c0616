//! Loading problem pages, from a saved snapshot or over HTTP.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use oncode_core::Page;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::ClientError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Load the page at `url`. With `html`, the DOM comes from that file and no
/// request is made.
pub async fn load_page(url: &str, html: Option<&Path>) -> Result<Page> {
    let content = match html {
        Some(path) => {
            debug!("Reading snapshot {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read HTML snapshot {}", path.display()))?
        }
        None => fetch_html(url).await?,
    };
    Ok(Page::parse(url, &content)?)
}

/// Download a page. Judges render their statements server-side, so the raw
/// response is enough for extraction; editor contents are not.
pub async fn fetch_html(url: &str) -> Result<String, ClientError> {
    info!("Fetching {}", url);

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_body(status.as_u16(), &body));
    }

    response.text().await.map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_page_from_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(
            &path,
            r#"<div class="problem-statement"><div class="header"><div class="title">A. Test</div></div></div>"#,
        )
        .unwrap();

        let page = load_page("https://codeforces.com/contest/1/problem/A", Some(&path))
            .await
            .unwrap();
        assert_eq!(page.problem_id(), "1A");
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_page("https://codeforces.com/", Some(&dir.path().join("missing.html")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read HTML snapshot"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p></p>").unwrap();
        assert!(load_page("not a url", Some(&path)).await.is_err());
    }
}
