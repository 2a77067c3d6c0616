//! Code command - Read the code in a page's embedded editor

use std::path::Path;

use anyhow::Result;
use oncode_core::SiteId;
use serde::Serialize;
use tracing::info;

use crate::fetch;
use crate::output::{Output, OutputConfig, TableDisplay};

#[derive(Debug, Serialize)]
pub struct EditorCode {
    pub site: Option<SiteId>,
    pub code: String,
}

impl TableDisplay for EditorCode {
    fn to_table(&self) -> String {
        self.code.clone()
    }
}

/// Editor contents only exist in a rendered page, so a saved snapshot is
/// required.
pub async fn run(url: &str, html: &Path, output: OutputConfig) -> Result<()> {
    let page = fetch::load_page(url, Some(html)).await?;
    let code = page.editor_code();
    if code.is_empty() {
        info!("Editor is empty or not present on {}", url);
    }
    let result = EditorCode {
        site: page.site().map(|p| p.id),
        code,
    };
    Output::new(result, output).render()
}
