//! Ping command - Check that the backend is up

use anyhow::Result;
use serde::Serialize;

use super::AppContext;
use crate::output::{Output, TableDisplay};

#[derive(Debug, Serialize)]
pub struct PingResult {
    pub backend_url: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDisplay for PingResult {
    fn to_table(&self) -> String {
        use colored::Colorize;
        match &self.error {
            None => format!("{} {} is up", "OK".green().bold(), self.backend_url),
            Some(e) => format!("{} {}\n{}", "DOWN".red().bold(), self.backend_url, e.dimmed()),
        }
    }
}

/// Exits non-zero when the backend does not answer.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let client = ctx.client()?;
    let error = client.health().await.err().map(|e| e.to_string());
    let result = PingResult {
        backend_url: client.base_url().to_string(),
        reachable: error.is_none(),
        error,
    };
    let reachable = result.reachable;
    Output::new(result, ctx.output).render()?;

    if !reachable {
        anyhow::bail!("Backend is not reachable");
    }
    Ok(())
}
