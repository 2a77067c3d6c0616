//! Table output built on the `tabled` crate
//!
//! Tables respect the terminal width when stdout is a TTY and fall back to
//! borderless rendering in compact mode.

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
    Table,
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Two-column table with right-aligned keys
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();

        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        Self::style(&mut table, config);
        table.with(Modify::new(Columns::first()).with(Alignment::right()));
        Self::fit(&mut table, config);

        table.to_string()
    }

    /// Table with a header row
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        Self::style(&mut table, config);
        Self::fit(&mut table, config);

        table.to_string()
    }

    fn style(table: &mut Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
    }

    fn fit(table: &mut Table, config: &OutputConfig) {
        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }
    }
}
