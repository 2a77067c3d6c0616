//! Single-blob extraction (LeetCode).
//!
//! The description has no input/output specification to separate, so the
//! whole container is the statement. Example blocks are collected as raw
//! text into `inputs`; `outputs` stays empty.

use scraper::{ElementRef, Html};

use super::helpers::{all_text, text_content};
use crate::site::SiteProfile;
use crate::types::{ProblemData, SampleTests};

pub fn extract(profile: &SiteProfile, document: &Html, root: ElementRef) -> ProblemData {
    let examples = profile
        .selectors
        .sample_container
        .map(|css| all_text(document.root_element(), css))
        .unwrap_or_default();

    ProblemData {
        statement: text_content(root),
        input_spec: String::new(),
        output_spec: String::new(),
        sample_tests: SampleTests::new(examples, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor;
    use crate::site::{profile, SiteId};

    const FIXTURE: &str = r#"
<html><body>
<div data-track-load="description_content"><p>Given an array of integers <code>nums</code>, return indices of the two numbers that add up to <code>target</code>.</p></div>
<div class="example-testcases">nums = [2,7,11,15], target = 9</div>
<div class="example-testcases">nums = [3,2,4], target = 6</div>
</body></html>
"#;

    #[test]
    fn test_statement_is_whole_container() {
        let doc = Html::parse_document(FIXTURE);
        let data = extractor::extract(profile(SiteId::LeetCode), &doc);
        assert_eq!(
            data.statement,
            "Given an array of integers nums, return indices of the two numbers that add up to target."
        );
        assert!(data.input_spec.is_empty());
        assert!(data.output_spec.is_empty());
    }

    #[test]
    fn test_examples_are_raw_inputs() {
        let doc = Html::parse_document(FIXTURE);
        let data = extractor::extract(profile(SiteId::LeetCode), &doc);
        assert_eq!(
            data.sample_tests.inputs,
            vec!["nums = [2,7,11,15], target = 9", "nums = [3,2,4], target = 6"]
        );
        assert!(data.sample_tests.outputs.is_empty());
    }
}
