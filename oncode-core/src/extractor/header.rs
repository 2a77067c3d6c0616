//! Header-based extraction (Codeforces).
//!
//! Statement and specifications sit at fixed CSS paths under the statement
//! root. Samples live in a dedicated container elsewhere in the document and
//! are paired by index.

use scraper::{ElementRef, Html};

use super::helpers::{all_text, optional_text};
use crate::site::SiteProfile;
use crate::types::{ProblemData, SampleTests};

pub fn extract(profile: &SiteProfile, document: &Html, root: ElementRef) -> ProblemData {
    let sel = &profile.selectors;

    ProblemData {
        statement: optional_text(root, sel.header),
        input_spec: optional_text(root, sel.input_spec),
        output_spec: optional_text(root, sel.output_spec),
        sample_tests: SampleTests::new(
            samples(document, sel.sample_container, sel.sample_input),
            samples(document, sel.sample_container, sel.sample_output),
        ),
    }
}

/// Every `<container> <item>` match in the document.
fn samples(document: &Html, container: Option<&str>, item: Option<&str>) -> Vec<String> {
    let Some(item) = item else {
        return Vec::new();
    };
    let css = match container {
        Some(container) => format!("{} {}", container, item),
        None => item.to_string(),
    };
    all_text(document.root_element(), &css)
}
