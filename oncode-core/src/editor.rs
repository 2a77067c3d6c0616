//! Snapshot of the code currently shown in a site's embedded editor.
//!
//! Ace and Monaco render one element per visible line. Joining their text
//! in document order reconstructs the buffer. Monaco pads indentation with
//! non-breaking spaces, which are turned back into plain spaces.

use scraper::Html;

use crate::extractor::helpers::all_text;
use crate::site::SiteProfile;

/// Editor contents for the profile's site, or an empty string when the
/// editor is absent or the site has none.
pub fn editor_code(profile: &SiteProfile, document: &Html) -> String {
    let Some(css) = profile.selectors.editor else {
        return String::new();
    };

    let lines = all_text(document.root_element(), css);
    tracing::debug!(site = profile.id.as_str(), lines = lines.len(), "read editor lines");

    lines
        .iter()
        .map(|line| line.replace('\u{a0}', " "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Editor contents for an optional profile.
pub fn editor_code_for(profile: Option<&SiteProfile>, document: &Html) -> String {
    profile
        .map(|p| editor_code(p, document))
        .unwrap_or_default()
}
