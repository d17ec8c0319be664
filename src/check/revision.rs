//! Revision ID extraction from gist page markup
//!
//! A gist page links its raw files as `.../raw/<revision>/<file>`, e.g.
//! `href="/ervinb/ecab6ca35ec87ed0cadf/raw/9f1c3a0/ips.txt"`. The revision is
//! whatever lies between the two markers:
//!
//! - matching never crosses a line break
//! - the first prefix on a line that is followed by a suffix starts the match
//! - the match runs to the last suffix on that line

use std::fmt;

use serde::Deserialize;

/// Default marker preceding the revision
pub const DEFAULT_PREFIX: &str = "raw/";

/// Default marker following the revision
pub const DEFAULT_SUFFIX: &str = "/ips.txt";

/// Opaque token identifying a published version of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal markers surrounding the revision in the fetched page
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RevisionMarkers {
    pub prefix: String,
    pub suffix: String,
}

impl Default for RevisionMarkers {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Extracts the revision between `markers.prefix` and `markers.suffix`.
///
/// Returns `None` when no line holds both markers in order, or when the text
/// between them is empty.
pub fn extract_revision(body: &str, markers: &RevisionMarkers) -> Option<RevisionId> {
    let prefix = markers.prefix.as_str();
    let suffix = markers.suffix.as_str();

    for line in body.split('\n') {
        // A later prefix on the same line cannot see a suffix the first one misses
        let Some(found) = line.find(prefix) else {
            continue;
        };
        let start = found + prefix.len();
        if let Some(end) = line[start..].rfind(suffix) {
            let token = &line[start..start + end];
            return (!token.is_empty()).then(|| RevisionId::new(token));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::gist_href(
        r#"<a href="/ervinb/ecab6ca35ec87ed0cadf/raw/9f1c3a0/ips.txt" class="btn">Raw</a>"#,
        Some("9f1c3a0")
    )]
    #[case::full_sha(
        "https://gist.githubusercontent.com/ervinb/ecab6ca35ec87ed0cadf/raw/3e2b0c1f6a4d8e7f9a0b1c2d3e4f5a6b7c8d9e0f/ips.txt",
        Some("3e2b0c1f6a4d8e7f9a0b1c2d3e4f5a6b7c8d9e0f")
    )]
    #[case::second_line("<html>\n<body>\n<a href=\"/u/g/raw/abc123/ips.txt\">\n</body>", Some("abc123"))]
    #[case::no_prefix("<a href=\"/u/g/blob/abc123/ips.txt\">", None)]
    #[case::no_suffix("<a href=\"/u/g/raw/abc123/other.txt\">", None)]
    #[case::empty_token("<a href=\"/u/g/raw//ips.txt\">", None)]
    #[case::empty_body("", None)]
    fn extract_revision_finds_token_between_markers(
        #[case] body: &str,
        #[case] expected: Option<&str>,
    ) {
        let result = extract_revision(body, &RevisionMarkers::default());

        assert_eq!(result, expected.map(RevisionId::new));
    }

    #[test]
    fn extract_revision_does_not_cross_line_breaks() {
        let body = "see raw/\nabc123/ips.txt";

        assert_eq!(extract_revision(body, &RevisionMarkers::default()), None);
    }

    #[test]
    fn extract_revision_skips_prefix_without_suffix_on_earlier_line() {
        let body = "a raw/ link\nhref=\"/u/g/raw/def456/ips.txt\"";

        assert_eq!(
            extract_revision(body, &RevisionMarkers::default()),
            Some(RevisionId::new("def456"))
        );
    }

    #[test]
    fn extract_revision_is_greedy_up_to_last_suffix_on_line() {
        let body = r#"<a href="/u/g/raw/aaa/ips.txt"></a><a href="/u/g/raw/bbb/ips.txt"></a>"#;

        assert_eq!(
            extract_revision(body, &RevisionMarkers::default()),
            Some(RevisionId::new(
                r#"aaa/ips.txt"></a><a href="/u/g/raw/bbb"#
            ))
        );
    }

    #[test]
    fn extract_revision_uses_custom_markers() {
        let markers = RevisionMarkers {
            prefix: "rev=".to_string(),
            suffix: ";".to_string(),
        };

        assert_eq!(
            extract_revision("x rev=42; y", &markers),
            Some(RevisionId::new("42"))
        );
    }
}
