//! OnCode Core - problem-page extraction for competitive-programming judges.
//!
//! Given a page's URL and DOM, this crate identifies which supported judge it
//! belongs to and produces a normalized [`ProblemData`] record: statement,
//! input/output specification and sample tests, plus the code currently in
//! the site's embedded editor.
//!
//! # Features
//!
//! - **Site resolution**: Codeforces, CodeChef, AtCoder, LeetCode by hostname
//! - **Stable problem ids**: per-site path rules, `"unknown"` when unmatched
//! - **Strategy-per-site extraction**: header, heading-search, section-scan, single-blob
//! - **Graceful degradation**: selector misses give empty fields, never errors
//!
//! # Usage
//!
//! ```no_run
//! use oncode_core::Page;
//!
//! let html = std::fs::read_to_string("problem.html").unwrap();
//! let page = Page::parse("https://codeforces.com/problemset/problem/1/A", &html).unwrap();
//!
//! println!("{}", page.problem_id());
//! let data = page.problem_data();
//! println!("{}", serde_json::to_string_pretty(&data).unwrap());
//! ```

pub mod editor;
pub mod error;
pub mod extractor;
pub mod page;
pub mod site;
pub mod types;

pub use error::{CoreError, Result};
pub use extractor::Strategy;
pub use page::{Extraction, Page};
pub use site::{profile, profiles, resolve, resolve_url, SiteId, SiteProfile, UNKNOWN_PROBLEM_ID};
pub use types::{ConversationMessage, ProblemData, Role, SampleTests};
