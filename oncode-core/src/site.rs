//! Supported judge sites and their extraction rules.
//!
//! Each site is described by a static [`SiteProfile`]: how to recognize its
//! host, how to pull a problem identifier out of a path, where its content
//! lives in the DOM, and which extraction strategy reads it. Profiles are
//! checked in declaration order and the first host match wins.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractor::Strategy;

/// Identifier returned when no problem-id rule matches.
pub const UNKNOWN_PROBLEM_ID: &str = "unknown";

/// Closed set of supported sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Codeforces,
    CodeChef,
    AtCoder,
    LeetCode,
}

impl SiteId {
    /// Lowercase machine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteId::Codeforces => "codeforces",
            SiteId::CodeChef => "codechef",
            SiteId::AtCoder => "atcoder",
            SiteId::LeetCode => "leetcode",
        }
    }

    /// Human-facing name, e.g. for "Use Codechef IDE Code".
    pub fn display_name(&self) -> &'static str {
        match self {
            SiteId::Codeforces => "Codeforces",
            SiteId::CodeChef => "Codechef",
            SiteId::AtCoder => "Atcoder",
            SiteId::LeetCode => "Leetcode",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "codeforces" | "cf" => Ok(SiteId::Codeforces),
            "codechef" | "cc" => Ok(SiteId::CodeChef),
            "atcoder" | "ac" => Ok(SiteId::AtCoder),
            "leetcode" | "lc" => Ok(SiteId::LeetCode),
            _ => Err(format!("Unsupported site: '{}'", s)),
        }
    }
}

/// Named DOM locations for one site. `None` means the site has no such
/// element; reads against it produce empty values.
#[derive(Debug, Clone, Default)]
pub struct Selectors {
    /// Root element holding the problem statement.
    pub statement: &'static str,
    /// Title/header element, or the heading tag to search by label.
    pub header: Option<&'static str>,
    pub input_spec: Option<&'static str>,
    pub output_spec: Option<&'static str>,
    /// Subsection element scanned by section-based sites.
    pub section: Option<&'static str>,
    pub sample_container: Option<&'static str>,
    pub sample_input: Option<&'static str>,
    pub sample_output: Option<&'static str>,
    /// Line elements of the embedded code editor.
    pub editor: Option<&'static str>,
}

/// A problem-id pattern plus the capture groups that form the id.
///
/// Groups are concatenated in order, so `contest/(\d+)/problem/([A-Z])`
/// with groups `[1, 2]` turns `contest/1/problem/A` into `1A`.
#[derive(Debug)]
pub struct IdRule {
    regex: Regex,
    groups: &'static [usize],
    uppercase: bool,
}

impl IdRule {
    fn new(pattern: &str, groups: &'static [usize]) -> Self {
        Self {
            regex: Regex::new(pattern).expect("invalid problem id pattern"),
            groups,
            uppercase: false,
        }
    }

    /// Normalize the id to upper case, for sites whose URLs accept either.
    fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Apply the rule to a path. `None` when the pattern or any designated
    /// group does not match.
    pub fn apply(&self, path: &str) -> Option<String> {
        let caps = self.regex.captures(path)?;
        let mut id = String::new();
        for &group in self.groups {
            id.push_str(caps.get(group)?.as_str());
        }
        if id.is_empty() {
            None
        } else if self.uppercase {
            Some(id.to_ascii_uppercase())
        } else {
            Some(id)
        }
    }
}

/// Rule set for one supported judge site.
#[derive(Debug)]
pub struct SiteProfile {
    pub id: SiteId,
    /// Substring that identifies the site's hostname.
    pub host_pattern: &'static str,
    /// Tried in order; the first rule that yields an id wins.
    pub id_rules: Vec<IdRule>,
    pub selectors: Selectors,
    pub strategy: Strategy,
}

impl SiteProfile {
    /// Whether this profile handles the given hostname.
    pub fn matches_host(&self, host: &str) -> bool {
        host.to_ascii_lowercase().contains(self.host_pattern)
    }

    /// Problem identifier for a path, or [`UNKNOWN_PROBLEM_ID`].
    pub fn problem_id(&self, path: &str) -> String {
        self.id_rules
            .iter()
            .find_map(|rule| rule.apply(path))
            .unwrap_or_else(|| UNKNOWN_PROBLEM_ID.to_string())
    }

    /// Whether the site exposes an embedded editor we can read.
    pub fn has_editor(&self) -> bool {
        self.selectors.editor.is_some()
    }
}

static PROFILES: Lazy<Vec<SiteProfile>> = Lazy::new(|| {
    vec![
        SiteProfile {
            id: SiteId::Codeforces,
            host_pattern: "codeforces.com",
            id_rules: vec![
                IdRule::new(r"(?i)problem/(\d+[A-Z]\d*)", &[1]).uppercase(),
                IdRule::new(
                    r"(?i)(?:problemset/problem|contest|gym)/(\d+)/(?:problem/)?([A-Z]\d*)(?:/|$)",
                    &[1, 2],
                )
                .uppercase(),
            ],
            selectors: Selectors {
                statement: ".problem-statement",
                header: Some(".header"),
                input_spec: Some(".input-specification"),
                output_spec: Some(".output-specification"),
                sample_container: Some(".sample-tests"),
                sample_input: Some(".input pre"),
                sample_output: Some(".output pre"),
                ..Default::default()
            },
            strategy: Strategy::HeaderBased,
        },
        SiteProfile {
            id: SiteId::CodeChef,
            host_pattern: "codechef.com",
            id_rules: vec![IdRule::new(r"(?i)problems/([A-Z0-9]+)", &[1])],
            selectors: Selectors {
                statement: "#problem-statement",
                header: Some("h3"),
                sample_input: Some(
                    "._values__container_x0ehp_226 ._values_x0ehp_226:first-child pre",
                ),
                sample_output: Some(
                    "._values__container_x0ehp_226 ._values_x0ehp_226:last-child pre",
                ),
                editor: Some("#submit-ide-v2 .ace_layer.ace_text-layer .ace_line"),
                ..Default::default()
            },
            strategy: Strategy::HeadingSearch,
        },
        SiteProfile {
            id: SiteId::AtCoder,
            host_pattern: "atcoder.jp",
            id_rules: vec![IdRule::new(r"(?i)tasks/([a-z0-9_]+)", &[1])],
            selectors: Selectors {
                statement: "#task-statement",
                header: Some("div.h2"),
                section: Some("section"),
                editor: Some("#editor .ace_layer.ace_text-layer .ace_line"),
                ..Default::default()
            },
            strategy: Strategy::SectionScan,
        },
        SiteProfile {
            id: SiteId::LeetCode,
            host_pattern: "leetcode.com",
            id_rules: vec![IdRule::new(r"(?i)(problems|explore)/([^/]+)", &[2])],
            selectors: Selectors {
                statement: r#"[data-track-load="description_content"]"#,
                sample_container: Some(".example-testcases"),
                editor: Some(".monaco-editor .view-lines .view-line"),
                ..Default::default()
            },
            strategy: Strategy::SingleBlob,
        },
    ]
});

/// All supported profiles, in resolution order.
pub fn profiles() -> &'static [SiteProfile] {
    &PROFILES
}

/// Profile for a known site.
pub fn profile(id: SiteId) -> &'static SiteProfile {
    // Every SiteId variant has exactly one entry in PROFILES.
    PROFILES
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&PROFILES[0])
}

/// Resolve a hostname to its site profile (first match wins).
pub fn resolve(host: &str) -> Option<&'static SiteProfile> {
    let profile = PROFILES.iter().find(|p| p.matches_host(host));
    if profile.is_none() {
        tracing::debug!(host, "no site profile matches host");
    }
    profile
}

/// Resolve a full URL string. Unparseable URLs resolve to `None`.
pub fn resolve_url(url: &str) -> Option<&'static SiteProfile> {
    let parsed = url::Url::parse(url).ok()?;
    resolve(parsed.host_str()?)
}

/// Problem id for an optional profile; unsupported sites yield `"unknown"`.
pub fn problem_id(profile: Option<&SiteProfile>, path: &str) -> String {
    match profile {
        Some(profile) => profile.problem_id(path),
        None => UNKNOWN_PROBLEM_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_host_substring() {
        assert_eq!(resolve("codeforces.com").unwrap().id, SiteId::Codeforces);
        assert_eq!(resolve("m1.codeforces.com").unwrap().id, SiteId::Codeforces);
        assert_eq!(resolve("www.codechef.com").unwrap().id, SiteId::CodeChef);
        assert_eq!(resolve("atcoder.jp").unwrap().id, SiteId::AtCoder);
        assert_eq!(resolve("leetcode.com").unwrap().id, SiteId::LeetCode);
        assert_eq!(resolve("LeetCode.com").unwrap().id, SiteId::LeetCode);
    }

    #[test]
    fn test_resolve_unsupported_host() {
        assert!(resolve("example.com").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn test_resolve_url() {
        let p = resolve_url("https://codeforces.com/problemset/problem/1/A").unwrap();
        assert_eq!(p.id, SiteId::Codeforces);
        assert!(resolve_url("not a url").is_none());
        assert!(resolve_url("https://example.org/problems/X").is_none());
    }

    #[test]
    fn test_codeforces_problem_id() {
        let cf = profile(SiteId::Codeforces);
        assert_eq!(cf.problem_id("/problemset/problem/1A"), "1A");
        assert_eq!(cf.problem_id("/problemset/problem/1/A"), "1A");
        assert_eq!(cf.problem_id("/contest/1900/problem/B2"), "1900B2");
        assert_eq!(cf.problem_id("/gym/104/problem/C"), "104C");
        assert_eq!(cf.problem_id("/contest/1900/standings"), UNKNOWN_PROBLEM_ID);
    }

    #[test]
    fn test_codeforces_index_case_is_normalized() {
        let cf = profile(SiteId::Codeforces);
        assert_eq!(cf.problem_id("/contest/1900/problem/b2"), "1900B2");
        assert_eq!(cf.problem_id("/problemset/problem/1a"), "1A");
        assert_eq!(
            cf.problem_id("/contest/1900/problem/b2"),
            cf.problem_id("/contest/1900/problem/B2")
        );
    }

    #[test]
    fn test_codechef_problem_id() {
        let cc = profile(SiteId::CodeChef);
        assert_eq!(cc.problem_id("/problems/TEST123"), "TEST123");
        assert_eq!(cc.problem_id("/START100/problems/FLOW001"), "FLOW001");
    }

    #[test]
    fn test_atcoder_problem_id() {
        let ac = profile(SiteId::AtCoder);
        assert_eq!(ac.problem_id("/contests/abc300/tasks/abc300_a"), "abc300_a");
    }

    #[test]
    fn test_leetcode_uses_second_group() {
        let lc = profile(SiteId::LeetCode);
        assert_eq!(lc.problem_id("/problems/two-sum/"), "two-sum");
        assert_eq!(lc.problem_id("/problems/two-sum/description/"), "two-sum");
        assert_eq!(lc.problem_id("/explore/learn/card"), "learn");
    }

    #[test]
    fn test_unmatched_path_is_unknown() {
        for p in profiles() {
            assert_eq!(p.problem_id("/"), UNKNOWN_PROBLEM_ID);
            assert_eq!(p.problem_id("/blog/entry/12345"), UNKNOWN_PROBLEM_ID);
        }
        assert_eq!(problem_id(None, "/problems/TEST123"), UNKNOWN_PROBLEM_ID);
    }

    #[test]
    fn test_problem_id_is_deterministic() {
        let cc = profile(SiteId::CodeChef);
        let first = cc.problem_id("/problems/TEST123");
        for _ in 0..5 {
            assert_eq!(cc.problem_id("/problems/TEST123"), first);
        }
        assert_ne!(cc.problem_id("/problems/OTHER"), first);
    }

    #[test]
    fn test_every_site_has_a_profile() {
        for id in [
            SiteId::Codeforces,
            SiteId::CodeChef,
            SiteId::AtCoder,
            SiteId::LeetCode,
        ] {
            assert_eq!(profile(id).id, id);
        }
        assert!(!profile(SiteId::Codeforces).has_editor());
        assert!(profile(SiteId::LeetCode).has_editor());
    }

    #[test]
    fn test_site_id_from_str() {
        assert_eq!("CodeChef".parse::<SiteId>().unwrap(), SiteId::CodeChef);
        assert_eq!("lc".parse::<SiteId>().unwrap(), SiteId::LeetCode);
        assert!("hackerrank".parse::<SiteId>().is_err());
    }
}
