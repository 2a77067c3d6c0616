//! Chat panel state for the interactive session.
//!
//! A session owns one [`PanelSlot`]. The slot holds at most one
//! [`ChatPanel`]; opening it again only makes the existing panel visible.

use oncode_core::{ConversationMessage, Page};
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::{Analysis, AnalyzeRequest, BackendClient, ChatRequest};
use crate::error::ClientError;
use crate::output;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Please enter a message")]
    EmptyMessage,

    #[error("Please enter some code first.")]
    EmptyCode,

    #[error("Importing editor code is only available on supported sites")]
    UnsupportedSite,

    #[error("Could not fetch code from {site} IDE. Please make sure you have some code in the editor.")]
    EmptyEditor { site: &'static str },

    #[error("Error: {0}")]
    Backend(#[from] ClientError),
}

/// Chat state bound to one problem page.
pub struct ChatPanel {
    page: Page,
    problem_id: String,
    code: String,
    visible: bool,
    history: Vec<ConversationMessage>,
}

impl ChatPanel {
    pub fn new(page: Page) -> Self {
        let problem_id = page.problem_id();
        Self {
            page,
            problem_id,
            code: String::new(),
            visible: true,
            history: Vec::new(),
        }
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replace the code buffer. Returns true when the new buffer is non-empty.
    pub fn set_code(&mut self, code: impl Into<String>) -> bool {
        self.code = code.into();
        !self.code.trim().is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Full history as last returned by the backend.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Whether the page's site has an editor to import from.
    pub fn has_ide(&self) -> bool {
        self.page.site().is_some_and(|p| p.has_editor())
    }

    /// Replace the history with what the backend has stored.
    pub async fn load_history(&mut self, client: &BackendClient) -> Result<(), ClientError> {
        self.history = client.conversation(&self.problem_id).await?;
        debug!(
            "Loaded {} message(s) for {}",
            self.history.len(),
            self.problem_id
        );
        Ok(())
    }

    /// Send one message with the current code and freshly extracted problem
    /// data. On success the history is replaced by the backend's copy.
    pub async fn send(
        &mut self,
        client: &BackendClient,
        message: &str,
    ) -> Result<&[ConversationMessage], PanelError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(PanelError::EmptyMessage);
        }

        let problem_data = self.page.problem_data();
        let request = ChatRequest {
            code: &self.code,
            message,
            problem_id: &self.problem_id,
            problem_data: &problem_data,
        };

        let spinner = output::spinner("Thinking...");
        let result = client.chat(&request).await;
        spinner.finish_and_clear();

        self.history = result?;
        Ok(&self.history)
    }

    /// Copy the editor snapshot into the code buffer.
    pub fn use_ide_code(&mut self) -> Result<&str, PanelError> {
        let site = self.page.site().ok_or(PanelError::UnsupportedSite)?;
        let code = self.page.editor_code();
        if code.trim().is_empty() {
            return Err(PanelError::EmptyEditor {
                site: site.id.display_name(),
            });
        }
        self.code = code;
        Ok(&self.code)
    }

    /// Analyze the current code buffer. An empty buffer never reaches the
    /// backend.
    pub async fn analyze(&self, client: &BackendClient) -> Result<Analysis, PanelError> {
        if self.code.trim().is_empty() {
            return Err(PanelError::EmptyCode);
        }

        let problem_data = self.page.problem_data();
        let request = AnalyzeRequest {
            code: &self.code,
            problem_data: &problem_data,
        };

        let spinner = output::spinner("Analyzing...");
        let result = client.analyze(&request).await;
        spinner.finish_and_clear();

        Ok(result?)
    }
}

/// Application-owned handle to the single chat panel.
#[derive(Default)]
pub struct PanelSlot {
    panel: Option<ChatPanel>,
}

impl PanelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the panel on first use, loading its conversation; afterwards
    /// just make it visible again. `page` is only called on first use.
    pub async fn open_or_show(
        &mut self,
        page: impl FnOnce() -> Page,
        client: &BackendClient,
    ) -> &mut ChatPanel {
        let panel = match self.panel.take() {
            Some(mut panel) => {
                panel.show();
                debug!("Chat panel shown");
                panel
            }
            None => {
                let mut panel = ChatPanel::new(page());
                if let Err(e) = panel.load_history(client).await {
                    match e.status() {
                        Some(404) => debug!("No stored conversation for {}", panel.problem_id()),
                        _ => warn!("Failed to load conversation history: {}", e),
                    }
                }
                panel
            }
        };
        self.panel.insert(panel)
    }

    /// The panel, only while it is visible.
    pub fn visible_mut(&mut self) -> Option<&mut ChatPanel> {
        self.panel.as_mut().filter(|p| p.is_visible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{mock_router, spawn, Recorded};
    use oncode_core::Role;

    const CODEFORCES_URL: &str = "https://codeforces.com/problemset/problem/4/A";

    fn codeforces_page() -> Page {
        let html = r#"<html><body>
            <div class="problem-statement">
              <div class="header"><div class="title">A. Watermelon</div></div>
              <div><p>Divide the watermelon.</p></div>
              <div class="input-specification"><p>One integer w.</p></div>
              <div class="output-specification"><p>YES or NO.</p></div>
              <div class="sample-tests">
                <div class="input"><pre>8</pre></div>
                <div class="output"><pre>YES</pre></div>
              </div>
            </div>
            </body></html>"#;
        Page::parse(CODEFORCES_URL, html).unwrap()
    }

    fn codechef_page(editor: &str) -> Page {
        let html = format!(
            r#"<div id="problem-statement"><h3>Sum</h3>
               <h3>Input Format</h3><p>Two integers.</p></div>
               <div id="submit-ide-v2"><div class="ace_layer ace_text-layer">{}</div></div>"#,
            editor
        );
        Page::parse("https://www.codechef.com/problems/SUM2", &html).unwrap()
    }

    #[test]
    fn test_use_ide_code() {
        let mut panel = ChatPanel::new(codechef_page(
            r#"<div class="ace_line">int main() {</div><div class="ace_line">}</div>"#,
        ));
        assert!(panel.has_ide());
        assert_eq!(panel.use_ide_code().unwrap(), "int main() {\n}");
        assert_eq!(panel.code(), "int main() {\n}");
    }

    #[test]
    fn test_use_ide_code_empty_editor() {
        let mut panel = ChatPanel::new(codechef_page(""));
        let err = panel.use_ide_code().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not fetch code from Codechef IDE. Please make sure you have some code in the editor."
        );
        assert_eq!(panel.code(), "");
    }

    #[test]
    fn test_codeforces_has_no_ide() {
        let mut panel = ChatPanel::new(codeforces_page());
        assert!(!panel.has_ide());
        assert!(matches!(
            panel.use_ide_code(),
            Err(PanelError::EmptyEditor { site: "Codeforces" })
        ));
    }

    #[test]
    fn test_use_ide_code_unsupported_site() {
        let page = Page::parse("https://example.com/p/1", "<p>hi</p>").unwrap();
        let mut panel = ChatPanel::new(page);
        assert!(!panel.has_ide());
        assert!(matches!(
            panel.use_ide_code(),
            Err(PanelError::UnsupportedSite)
        ));
    }

    #[test]
    fn test_set_code() {
        let mut panel = ChatPanel::new(codeforces_page());
        assert!(!panel.set_code("   "));
        assert!(panel.set_code("print(1)"));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_message() {
        let client = BackendClient::new("http://127.0.0.1:9", "").unwrap();
        let mut panel = ChatPanel::new(codeforces_page());

        let err = panel.send(&client, "  \n").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a message");
    }

    #[tokio::test]
    async fn test_analyze_refuses_empty_code() {
        let rec = Recorded::default();
        let url = spawn(mock_router(rec.clone())).await;
        let client = BackendClient::new(&url, "").unwrap();
        let mut panel = ChatPanel::new(codeforces_page());

        let err = panel.analyze(&client).await.unwrap_err();
        assert!(matches!(err, PanelError::EmptyCode));
        assert_eq!(err.to_string(), "Please enter some code first.");

        panel.set_code(" \n\t");
        assert!(matches!(
            panel.analyze(&client).await,
            Err(PanelError::EmptyCode)
        ));
        assert!(rec.paths().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_sends_code() {
        let rec = Recorded::default();
        let url = spawn(mock_router(rec.clone())).await;
        let client = BackendClient::new(&url, "").unwrap();
        let mut panel = ChatPanel::new(codeforces_page());
        panel.set_code("print('YES')");

        panel.analyze(&client).await.unwrap();
        assert_eq!(rec.paths(), vec!["/", "/analyze"]);
        let (_, _, body) = rec.last();
        assert_eq!(body["code"], "print('YES')");
    }

    #[tokio::test]
    async fn test_send_replaces_history() {
        let rec = Recorded::default();
        let url = spawn(mock_router(rec.clone())).await;
        let client = BackendClient::new(&url, "").unwrap();
        let mut panel = ChatPanel::new(codeforces_page());
        panel.set_code("int main() {}");

        let history = panel.send(&client, "Why WA?").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "Why WA?");

        let (_, _, body) = rec.last();
        assert_eq!(body["problem_id"], "4A");
        assert_eq!(body["code"], "int main() {}");
        assert_eq!(body["problem_data"]["sampleTests"]["inputs"][0], "8");
    }

    #[tokio::test]
    async fn test_send_failure_keeps_history() {
        let client = BackendClient::new("http://127.0.0.1:9", "").unwrap();
        let mut panel = ChatPanel::new(codeforces_page());

        let err = panel.send(&client, "hello").await.unwrap_err();
        assert!(matches!(err, PanelError::Backend(_)));
        assert!(err.to_string().starts_with("Error: "));
        assert!(panel.history().is_empty());
    }

    #[tokio::test]
    async fn test_slot_holds_one_panel() {
        let rec = Recorded::default();
        let url = spawn(mock_router(rec.clone())).await;
        let client = BackendClient::new(&url, "").unwrap();
        let mut slot = PanelSlot::new();

        let panel = slot.open_or_show(codeforces_page, &client).await;
        assert_eq!(panel.problem_id(), "4A");
        assert_eq!(panel.history()[0].role, Role::System);
        panel.set_code("kept");

        slot.visible_mut().unwrap().hide();
        assert!(slot.visible_mut().is_none());

        let other = Page::parse("https://atcoder.jp/contests/abc1/tasks/abc1_a", "").unwrap();
        let panel = slot.open_or_show(|| other, &client).await;
        assert!(panel.is_visible());
        assert_eq!(panel.problem_id(), "4A");
        assert_eq!(panel.code(), "kept");

        let loads = rec.paths().iter().filter(|p| p.starts_with("/conversation/")).count();
        assert_eq!(loads, 1);
    }

    #[tokio::test]
    async fn test_open_survives_history_failure() {
        let client = BackendClient::new("http://127.0.0.1:9", "").unwrap();
        let mut slot = PanelSlot::new();

        let panel = slot.open_or_show(codeforces_page, &client).await;
        assert!(panel.history().is_empty());
        assert!(slot.visible_mut().is_some());
    }
}
