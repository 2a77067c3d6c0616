//! Per-site problem extraction.
//!
//! Every site reads its page with one of four strategies. They share one
//! contract: given a profile and a parsed document, produce a
//! [`ProblemData`]. A missing statement root short-circuits to an all-empty
//! record, and nothing below it can fail.

use scraper::Html;
use tracing::{debug, warn};

use crate::site::SiteProfile;
use crate::types::ProblemData;

pub mod header;
pub mod heading_search;
pub mod section_scan;
pub mod single_blob;

pub(crate) mod helpers;

/// How a site's problem page is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Fixed CSS paths for statement and specs; samples from a dedicated container.
    HeaderBased,
    /// Specs located by heading label, content taken from the next sibling.
    HeadingSearch,
    /// Statement subsections classified by their heading text.
    SectionScan,
    /// Whole statement container as a single text blob.
    SingleBlob,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::HeaderBased => "header",
            Strategy::HeadingSearch => "heading-search",
            Strategy::SectionScan => "section-scan",
            Strategy::SingleBlob => "single-blob",
        }
    }
}

/// Extract problem data from a document using the profile's strategy.
pub fn extract(profile: &SiteProfile, document: &Html) -> ProblemData {
    let Some(root) = helpers::select_first(document.root_element(), profile.selectors.statement)
    else {
        debug!(
            site = profile.id.as_str(),
            selector = profile.selectors.statement,
            "statement root not found"
        );
        return ProblemData::default();
    };

    let data = match profile.strategy {
        Strategy::HeaderBased => header::extract(profile, document, root),
        Strategy::HeadingSearch => heading_search::extract(profile, root),
        Strategy::SectionScan => section_scan::extract(profile, root),
        Strategy::SingleBlob => single_blob::extract(profile, document, root),
    };

    let samples = &data.sample_tests;
    if profile.strategy != Strategy::SingleBlob && !samples.is_balanced() {
        warn!(
            site = profile.id.as_str(),
            inputs = samples.inputs.len(),
            outputs = samples.outputs.len(),
            "sample input/output counts differ"
        );
    }

    data
}

/// Extract for an optional profile; unsupported sites yield empty data.
pub fn extract_problem(profile: Option<&SiteProfile>, document: &Html) -> ProblemData {
    match profile {
        Some(profile) => extract(profile, document),
        None => ProblemData::default(),
    }
}
