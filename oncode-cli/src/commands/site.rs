//! Site command - Which judge does a URL belong to

use anyhow::Result;
use colored::Colorize;
use oncode_core::{resolve_url, SiteId};
use serde::Serialize;

use crate::output::{Output, OutputConfig, TableDisplay};

#[derive(Debug, Serialize)]
pub struct SiteResolution {
    pub url: String,
    pub site: Option<SiteId>,
    pub supported: bool,
}

impl TableDisplay for SiteResolution {
    fn to_table(&self) -> String {
        match self.site {
            Some(site) => site.display_name().green().to_string(),
            None => "unsupported".yellow().to_string(),
        }
    }
}

pub fn resolve_site(url: &str) -> SiteResolution {
    let site = resolve_url(url).map(|p| p.id);
    SiteResolution {
        url: url.to_string(),
        site,
        supported: site.is_some(),
    }
}

pub async fn run(url: &str, output: OutputConfig) -> Result<()> {
    Output::new(resolve_site(url), output).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_site() {
        let res = resolve_site("https://leetcode.com/problems/two-sum/");
        assert_eq!(res.site, Some(SiteId::LeetCode));
        assert!(res.supported);

        let res = resolve_site("https://example.com/problem/1");
        assert!(!res.supported);

        colored::control::set_override(false);
        assert_eq!(res.to_table(), "unsupported");
    }
}
