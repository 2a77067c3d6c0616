//! Id command - Print the stable problem id for a URL
//!
//! The id keys the problem's conversation on the backend. Paths no rule
//! recognizes, and unsupported sites, map to `unknown`.

use anyhow::{Context, Result};
use oncode_core::{site, SiteId};
use serde::Serialize;
use url::Url;

use crate::output::{Output, OutputConfig, TableDisplay};

#[derive(Debug, Serialize)]
pub struct ProblemId {
    pub url: String,
    pub site: Option<SiteId>,
    pub problem_id: String,
}

impl TableDisplay for ProblemId {
    fn to_table(&self) -> String {
        self.problem_id.clone()
    }
}

pub fn problem_id(url: &str) -> Result<ProblemId> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
    let profile = parsed.host_str().and_then(site::resolve);

    Ok(ProblemId {
        url: url.to_string(),
        site: profile.map(|p| p.id),
        problem_id: site::problem_id(profile, parsed.path()),
    })
}

pub async fn run(url: &str, output: OutputConfig) -> Result<()> {
    Output::new(problem_id(url)?, output).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_ids() {
        let cases = [
            ("https://codeforces.com/problemset/problem/1A", "1A"),
            ("https://codeforces.com/contest/1352/problem/C", "1352C"),
            ("https://www.codechef.com/problems/TEST123", "TEST123"),
            ("https://atcoder.jp/contests/abc300/tasks/abc300_a", "abc300_a"),
            ("https://leetcode.com/problems/two-sum/description/", "two-sum"),
            ("https://codeforces.com/blog/entry/1", "unknown"),
            ("https://example.com/problems/X", "unknown"),
        ];
        for (url, expected) in cases {
            assert_eq!(problem_id(url).unwrap().problem_id, expected, "{}", url);
        }
    }

    #[test]
    fn test_invalid_url() {
        assert!(problem_id("codeforces").is_err());
    }
}
