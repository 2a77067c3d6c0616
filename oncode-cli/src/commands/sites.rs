//! Sites command - List supported judges and what OnCode can read from them

use anyhow::Result;
use oncode_core::{profiles, SiteProfile};
use serde::Serialize;

use crate::output::{Output, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct SiteRow {
    pub id: String,
    pub name: String,
    pub host: String,
    pub strategy: String,
    pub editor: bool,
}

impl From<&SiteProfile> for SiteRow {
    fn from(profile: &SiteProfile) -> Self {
        Self {
            id: profile.id.as_str().to_string(),
            name: profile.id.display_name().to_string(),
            host: profile.host_pattern.to_string(),
            strategy: profile.strategy.as_str().to_string(),
            editor: profile.has_editor(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SiteList {
    pub sites: Vec<SiteRow>,
}

impl Outputter for SiteList {
    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .sites
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.host.clone(),
                    s.strategy.clone(),
                    if s.editor { "yes" } else { "-" }.to_string(),
                ]
            })
            .collect();
        TableOutput::from_rows(&["Site", "Host", "Extraction", "Editor"], &rows, config)
    }
}

pub fn site_list() -> SiteList {
    SiteList {
        sites: profiles().iter().map(SiteRow::from).collect(),
    }
}

pub async fn run(output: OutputConfig) -> Result<()> {
    Output::new(site_list(), output).render()
}
