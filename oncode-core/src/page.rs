//! Parsed page snapshots.
//!
//! A [`Page`] pairs a location with its parsed DOM, the two inputs every
//! extraction step needs. It can be built from HTML saved out of a browser
//! or fetched over HTTP; extraction does not care which.

use scraper::Html;
use serde::Serialize;
use url::Url;

use crate::editor;
use crate::error::{CoreError, Result};
use crate::extractor;
use crate::site::{self, SiteId, SiteProfile};
use crate::types::ProblemData;

/// A problem page: URL plus parsed document.
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    document: Html,
    site: Option<&'static SiteProfile>,
}

impl Page {
    /// Parse a page snapshot. Fails only when `url` is not a usable URL.
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| CoreError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let host = parsed.host_str().ok_or_else(|| CoreError::MissingHost {
            url: url.to_string(),
        })?;
        let site = site::resolve(host);

        Ok(Self {
            site,
            document: Html::parse_document(html),
            url: parsed,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Resolved site profile, `None` on unsupported sites.
    pub fn site(&self) -> Option<&'static SiteProfile> {
        self.site
    }

    pub fn problem_id(&self) -> String {
        site::problem_id(self.site, self.path())
    }

    pub fn problem_data(&self) -> ProblemData {
        extractor::extract_problem(self.site, &self.document)
    }

    pub fn editor_code(&self) -> String {
        editor::editor_code_for(self.site, &self.document)
    }

    /// Site, id and problem data in one record.
    pub fn extraction(&self) -> Extraction {
        Extraction {
            url: self.url.to_string(),
            site: self.site.map(|p| p.id),
            problem_id: self.problem_id(),
            problem_data: self.problem_data(),
        }
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub url: String,
    pub site: Option<SiteId>,
    pub problem_id: String,
    pub problem_data: ProblemData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::UNKNOWN_PROBLEM_ID;

    #[test]
    fn test_parse_rejects_bad_urls() {
        assert!(matches!(
            Page::parse("not a url", ""),
            Err(CoreError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Page::parse("data:text/html,hello", ""),
            Err(CoreError::MissingHost { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_the_url() {
        let err = Page::parse("codeforces/problem/1A", "").unwrap_err();
        assert!(err.to_string().contains("codeforces/problem/1A"));

        let page = Page::parse("https://codeforces.com/problemset/problem/1A", "").unwrap();
        assert!(format!("{:?}", page).contains("codeforces.com"));
    }

    #[test]
    fn test_unsupported_page_is_all_empty() {
        let page = Page::parse("https://example.com/problems/X", "<p>hi</p>").unwrap();
        assert!(page.site().is_none());
        assert_eq!(page.problem_id(), UNKNOWN_PROBLEM_ID);
        assert!(page.problem_data().is_blank());
        assert_eq!(page.editor_code(), "");
    }

    #[test]
    fn test_extraction_record() {
        let page = Page::parse(
            "https://www.codechef.com/problems/TEST123",
            r#"<div id="problem-statement"><h3>Sum</h3>
               <h3>Input Format</h3><p>N space-separated integers</p></div>"#,
        )
        .unwrap();
        let extraction = page.extraction();
        assert_eq!(extraction.site, Some(SiteId::CodeChef));
        assert_eq!(extraction.problem_id, "TEST123");
        assert_eq!(extraction.problem_data.input_spec, "N space-separated integers");

        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(json["site"], "codechef");
        assert!(json["problem_data"].get("sampleTests").is_some());
    }
}
