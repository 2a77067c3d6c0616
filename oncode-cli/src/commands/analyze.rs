//! Analyze command - Ask the backend to review code against a problem

use std::path::Path;

use anyhow::{bail, Result};

use super::chat::{load_code, CodeSource};
use super::AppContext;
use crate::fetch;
use crate::output::Output;
use crate::panel::ChatPanel;
use crate::views::AnalysisView;

pub async fn run(ctx: &AppContext, url: &str, code: CodeSource, html: Option<&Path>) -> Result<()> {
    if matches!(code, CodeSource::None) {
        bail!("Nothing to analyze: pass --code <file> or --ide");
    }
    if matches!(code, CodeSource::Editor) && html.is_none() {
        bail!("--ide needs a saved page with the editor: pass --html <file>");
    }

    let page = fetch::load_page(url, html).await?;
    let client = ctx.client()?;
    let mut panel = ChatPanel::new(page);
    load_code(&mut panel, &code)?;

    let analysis = panel.analyze(&client).await?;
    Output::new(AnalysisView::new(analysis, &ctx.config.settings), ctx.output).render()
}
