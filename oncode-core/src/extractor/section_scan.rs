//! Section-scan extraction (AtCoder).
//!
//! The statement is split into `<section>` blocks, each introduced by an
//! `<h3>`. Sections are classified by heading text; samples are found by
//! scanning every heading for "Sample Input"/"Sample Output" and reading the
//! `<pre>` right after it.

use scraper::ElementRef;

use super::helpers::{
    first_text, is_tag, next_element_sibling, optional_text, select_all, strip_first,
    text_content,
};
use crate::site::SiteProfile;
use crate::types::{ProblemData, SampleTests};

const HEADING: &str = "h3";
const SAMPLE_INPUT: &str = "Sample Input";
const SAMPLE_OUTPUT: &str = "Sample Output";
const PROBLEM_STATEMENT: &str = "Problem Statement";

/// What a statement section describes, judged by its heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Input,
    Output,
    Sample,
    Other,
}

pub fn classify(title: &str) -> SectionKind {
    if title.contains("Sample") {
        SectionKind::Sample
    } else if title.contains("Input") {
        SectionKind::Input
    } else if title.contains("Output") {
        SectionKind::Output
    } else {
        SectionKind::Other
    }
}

pub fn extract(profile: &SiteProfile, root: ElementRef) -> ProblemData {
    let sel = &profile.selectors;
    let sections = select_all(root, sel.section.unwrap_or("section"));

    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut statement_body = None;

    for section in sections {
        let title = first_text(section, HEADING);
        if title.is_empty() {
            continue;
        }
        let body = || strip_first(&text_content(section), &title);
        match classify(&title) {
            SectionKind::Input => inputs.push(body()),
            SectionKind::Output => outputs.push(body()),
            SectionKind::Sample => {}
            SectionKind::Other => {
                if statement_body.is_none() && title.contains(PROBLEM_STATEMENT) {
                    statement_body = Some(body());
                }
            }
        }
    }

    let mut statement = optional_text(root, sel.header);
    if statement.trim().is_empty() {
        statement = statement_body.unwrap_or_default();
    }

    ProblemData {
        statement,
        input_spec: inputs.join("\n\n"),
        output_spec: outputs.join("\n\n"),
        sample_tests: samples(root),
    }
}

fn samples(root: ElementRef) -> SampleTests {
    let mut samples = SampleTests::default();

    for heading in select_all(root, HEADING) {
        let Some(pre) = next_element_sibling(heading).filter(|el| is_tag(*el, "pre")) else {
            continue;
        };
        let text = text_content(heading);
        if text.contains(SAMPLE_INPUT) {
            samples.inputs.push(text_content(pre));
        } else if text.contains(SAMPLE_OUTPUT) {
            samples.outputs.push(text_content(pre));
        }
    }

    samples
}
