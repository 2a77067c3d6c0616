//! Heading-text-search extraction (CodeChef).
//!
//! Specifications have no fixed location. A heading whose text contains a
//! known label marks the section, and the specification is the text of the
//! heading's next element sibling.

use scraper::ElementRef;

use super::helpers::{all_text, next_element_sibling, optional_text, select_all, text_content};
use crate::site::SiteProfile;
use crate::types::{ProblemData, SampleTests};

pub const INPUT_LABEL: &str = "Input Format";
pub const OUTPUT_LABEL: &str = "Output Format";

pub fn extract(profile: &SiteProfile, root: ElementRef) -> ProblemData {
    let sel = &profile.selectors;
    let heading = sel.header.unwrap_or("h3");

    ProblemData {
        statement: optional_text(root, sel.header),
        input_spec: section_after_heading(root, heading, INPUT_LABEL),
        output_spec: section_after_heading(root, heading, OUTPUT_LABEL),
        sample_tests: SampleTests::new(
            sel.sample_input
                .map(|css| all_text(root, css))
                .unwrap_or_default(),
            sel.sample_output
                .map(|css| all_text(root, css))
                .unwrap_or_default(),
        ),
    }
}

/// Text of the element following the first heading that contains `label`.
pub fn section_after_heading(root: ElementRef, heading: &str, label: &str) -> String {
    select_all(root, heading)
        .into_iter()
        .find(|h| text_content(*h).contains(label))
        .and_then(next_element_sibling)
        .map(text_content)
        .unwrap_or_default()
}
