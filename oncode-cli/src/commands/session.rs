//! Session command - Interactive chat about one problem
//!
//! Plain lines are chat messages. Slash commands drive the panel:
//!
//! - `/code <file>` load code from a file
//! - `/ide` import the code shown in the page's editor
//! - `/analyze` analyze the current code
//! - `/history` reload the stored conversation
//! - `/close`, `/open` hide and show the panel
//! - `/quit` leave the session

use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use oncode_core::Page;
use tracing::debug;

use super::chat::{load_code, CodeSource};
use super::{extract, AppContext};
use crate::client::BackendClient;
use crate::output::Output;
use crate::panel::{ChatPanel, PanelSlot};
use crate::views::{format_message, AnalysisView, ConversationView};

/// One line of user input, parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionInput {
    Message(String),
    Code(PathBuf),
    Ide,
    Analyze,
    History,
    Close,
    Open,
    Help,
    Quit,
    Unknown(String),
}

impl SessionInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return SessionInput::Message(line.to_string());
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name {
            "code" if !arg.is_empty() => SessionInput::Code(PathBuf::from(arg)),
            "ide" => SessionInput::Ide,
            "analyze" => SessionInput::Analyze,
            "history" => SessionInput::History,
            "close" => SessionInput::Close,
            "open" => SessionInput::Open,
            "help" => SessionInput::Help,
            "quit" | "exit" => SessionInput::Quit,
            _ => SessionInput::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "Commands:
  /code <file>  load code from a file
  /ide          use the code in the page's editor
  /analyze      analyze the current code
  /history      reload the conversation
  /close        hide the chat panel
  /open         show the chat panel
  /quit         leave the session";

/// Line source: an interactive prompt on a terminal, plain stdin otherwise.
struct Prompt {
    interactive: bool,
}

impl Prompt {
    fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Next line, `None` at end of input.
    fn next_line(&self) -> Result<Option<String>> {
        if self.interactive {
            let line: String = Input::new()
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()?;
            return Ok(Some(line));
        }
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn print_error(message: impl std::fmt::Display) {
    println!("{}", message.to_string().red());
}

fn print_conversation(ctx: &AppContext, panel: &ChatPanel) -> Result<()> {
    let view = ConversationView::new(panel.problem_id(), panel.history());
    Output::new(view, ctx.output).render()
}

async fn analyze(ctx: &AppContext, panel: &ChatPanel, client: &BackendClient) -> Result<()> {
    match panel.analyze(client).await {
        Ok(analysis) => {
            Output::new(AnalysisView::new(analysis, &ctx.config.settings), ctx.output).render()
        }
        Err(e) => {
            print_error(e);
            Ok(())
        }
    }
}

/// Analyze after new code arrives, when autoAnalyze is on.
async fn code_loaded(ctx: &AppContext, panel: &ChatPanel, client: &BackendClient) -> Result<()> {
    let lines = panel.code().lines().count();
    println!("{}", format!("Loaded {} line(s) of code.", lines).dimmed());
    if ctx.config.settings.auto_analyze && !panel.code().trim().is_empty() {
        analyze(ctx, panel, client).await?;
    }
    Ok(())
}

pub async fn run(ctx: &AppContext, url: &str, html: Option<&Path>, code: Option<PathBuf>) -> Result<()> {
    let page: Page = crate::fetch::load_page(url, html).await?;
    let client = ctx.client()?;
    let mut slot = PanelSlot::new();

    let site = page
        .site()
        .map(|p| p.id.display_name())
        .unwrap_or("unsupported site");
    println!(
        "{} {} ({})",
        "OnCode".cyan().bold(),
        page.problem_id().yellow(),
        site
    );
    println!("{}", extract::summary(&page.extraction()).dimmed());

    let panel = slot.open_or_show(|| page.clone(), &client).await;
    print_conversation(ctx, panel)?;
    if let Some(path) = code {
        match load_code(panel, &CodeSource::File(path)) {
            Ok(()) => code_loaded(ctx, panel, &client).await?,
            Err(e) => print_error(e),
        }
    }
    if panel.has_ide() {
        println!("{}", format!("Type /ide to use your {} IDE code.", site).dimmed());
    }
    println!("{}", "Type /help for commands.".dimmed());

    let prompt = Prompt::new();
    while let Some(line) = prompt.next_line()? {
        let input = SessionInput::parse(&line);
        debug!("Session input: {:?}", input);

        match input {
            SessionInput::Quit => break,
            SessionInput::Help => println!("{}", HELP),
            SessionInput::Open => {
                let panel = slot.open_or_show(|| page.clone(), &client).await;
                print_conversation(ctx, panel)?;
            }
            SessionInput::Unknown(command) => {
                print_error(format!("Unknown command: {} (try /help)", command));
            }
            other => {
                let Some(panel) = slot.visible_mut() else {
                    println!("{}", "Chat is closed. Type /open to show it.".dimmed());
                    continue;
                };
                match other {
                    SessionInput::Close => {
                        panel.hide();
                        println!("{}", "Chat closed.".dimmed());
                    }
                    SessionInput::Message(message) => match panel.send(&client, &message).await.map(|_| ()) {
                        Ok(()) => {
                            let view = ConversationView::new(panel.problem_id(), panel.history());
                            if let Some(reply) = view.latest() {
                                println!("{}", format_message(reply));
                            }
                        }
                        Err(e) => print_error(e),
                    },
                    SessionInput::Code(path) => match load_code(panel, &CodeSource::File(path)) {
                        Ok(()) => code_loaded(ctx, panel, &client).await?,
                        Err(e) => print_error(e),
                    },
                    SessionInput::Ide => match panel.use_ide_code().map(|_| ()) {
                        Ok(()) => code_loaded(ctx, panel, &client).await?,
                        Err(e) => print_error(e),
                    },
                    SessionInput::Analyze => analyze(ctx, panel, &client).await?,
                    SessionInput::History => match panel.load_history(&client).await {
                        Ok(()) => print_conversation(ctx, panel)?,
                        Err(e) => print_error(format!("Error: {}", e)),
                    },
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
