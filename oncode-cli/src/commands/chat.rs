//! Chat command - Send one message about a problem and print the reply

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::AppContext;
use crate::fetch;
use crate::output::{Output, TableDisplay};
use crate::panel::ChatPanel;
use crate::views::{format_message, ConversationView};

/// Where the code sent along with the message comes from.
#[derive(Debug, Clone)]
pub enum CodeSource {
    None,
    File(PathBuf),
    /// The editor contents of the page snapshot.
    Editor,
}

impl CodeSource {
    pub fn from_flags(code: Option<PathBuf>, ide: bool) -> Self {
        match (code, ide) {
            (Some(path), _) => CodeSource::File(path),
            (None, true) => CodeSource::Editor,
            (None, false) => CodeSource::None,
        }
    }
}

/// Fill the panel's code buffer from `source`.
pub fn load_code(panel: &mut ChatPanel, source: &CodeSource) -> Result<()> {
    match source {
        CodeSource::None => {}
        CodeSource::File(path) => {
            let code = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read code file {}", path.display()))?;
            panel.set_code(code);
        }
        CodeSource::Editor => {
            panel.use_ide_code()?;
        }
    }
    Ok(())
}

/// Reply to a single chat message. The table view shows only the answer.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ChatReply(pub ConversationView);

impl TableDisplay for ChatReply {
    fn to_table(&self) -> String {
        self.0
            .latest()
            .map(format_message)
            .unwrap_or_else(|| "(no reply)".to_string())
    }
}

pub async fn run(
    ctx: &AppContext,
    url: &str,
    message: &str,
    code: CodeSource,
    html: Option<&Path>,
) -> Result<()> {
    if matches!(code, CodeSource::Editor) && html.is_none() {
        bail!("--ide needs a saved page with the editor: pass --html <file>");
    }

    let page = fetch::load_page(url, html).await?;
    let client = ctx.client()?;
    let mut panel = ChatPanel::new(page);
    load_code(&mut panel, &code)?;

    panel.send(&client, message).await?;
    let view = ConversationView::new(panel.problem_id(), panel.history());
    Output::new(ChatReply(view), ctx.output).render()
}
