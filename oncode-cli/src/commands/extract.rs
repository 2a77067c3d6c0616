//! Extract command - Show the normalized problem data for a page

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use oncode_core::Extraction;
use serde::Serialize;
use tracing::warn;

use crate::fetch;
use crate::output::{one_line, truncate, Output, OutputConfig, Outputter, TableOutput};

/// Extraction result as printed by `oncode extract`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ExtractView(pub Extraction);

fn section(title: &str, body: &str) -> String {
    let body = body.trim();
    let body = if body.is_empty() {
        "(not found)".dimmed().to_string()
    } else {
        body.to_string()
    };
    format!("{}\n{}\n", title.cyan().bold(), body)
}

impl Outputter for ExtractView {
    fn to_table(&self, config: &OutputConfig) -> String {
        let extraction = &self.0;
        let data = &extraction.problem_data;

        let site = extraction
            .site
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| "unsupported".to_string());
        let pairs = [
            ("Site", site),
            ("Problem", extraction.problem_id.clone()),
            ("URL", extraction.url.clone()),
        ];

        let mut output = TableOutput::format_key_value(&pairs, config);
        output.push_str("\n\n");
        output.push_str(&section("STATEMENT", &data.statement));
        output.push('\n');
        output.push_str(&section("INPUT", &data.input_spec));
        output.push('\n');
        output.push_str(&section("OUTPUT", &data.output_spec));
        output.push('\n');

        let samples = &data.sample_tests;
        output.push_str(&format!("{}\n", "SAMPLES".cyan().bold()));
        let width = config.effective_width().saturating_sub(12) / 2;
        let rows: Vec<Vec<String>> = samples
            .pairs()
            .iter()
            .enumerate()
            .map(|(i, (input, out))| {
                let (input, out) = if config.should_truncate() {
                    (truncate(input, width), truncate(out, width))
                } else {
                    (input.to_string(), out.to_string())
                };
                vec![(i + 1).to_string(), input, out]
            })
            .collect();
        output.push_str(&TableOutput::from_rows(&["#", "Input", "Output"], &rows, config));

        if !samples.is_balanced() {
            output.push_str(&format!(
                "\n{}",
                format!(
                    "{} input(s) but {} output(s) found; unmatched samples omitted",
                    samples.inputs.len(),
                    samples.outputs.len()
                )
                .yellow()
            ));
        }
        output
    }
}

/// Short human summary used by the session banner.
pub fn summary(extraction: &Extraction) -> String {
    let data = &extraction.problem_data;
    if data.is_blank() {
        return "no problem data found on this page".to_string();
    }
    format!(
        "{} | {} sample(s)",
        truncate(&one_line(&data.statement), 60),
        data.sample_tests.pairs().len()
    )
}

pub async fn run(url: &str, html: Option<&Path>, output: OutputConfig) -> Result<()> {
    let page = fetch::load_page(url, html).await?;
    let extraction = page.extraction();
    if extraction.site.is_some() && extraction.problem_data.is_blank() {
        warn!("No problem content matched on {}", url);
    }
    Output::new(ExtractView(extraction), output).render()
}
