use regex::Regex;

use crate::error::Result;

/// A matched disabling annotation: its name and the raw text between
/// its parentheses, when any appear on the same line.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMatch {
    pub kind: String,
    pub payload: Option<String>,
}

/// The fixed set of line-level recognizers the scanner applies to each
/// trimmed source line. None of them look past the line they are given.
pub struct LinePatterns {
    class_decl: Regex,
    method_decl: Regex,
    marker: Regex,
    reason_attr: Regex,
    issue_link: Regex,
}

impl LinePatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            class_decl: Regex::new(r"public\s+(?:\w+\s+)*class\s+(\w+)")?,
            method_decl: Regex::new(r"public\s+void\s+(\w+)\s*\(")?,
            marker: Regex::new(r"@(Disabled\w*)\s*(?:\((.*)\))?")?,
            reason_attr: Regex::new(r#"(?i)reason\s*=\s*"([^"]+)""#)?,
            issue_link: Regex::new(
                r"(https://(?:github\.com/.+?/issues/\d+|issue\.redhat\.com/.+?/browse/\w+-\d+))",
            )?,
        })
    }

    /// Class declaration anywhere in the line; captures the class name.
    pub fn class_name(&self, line: &str) -> Option<String> {
        self.class_decl.captures(line).map(|c| c[1].to_string())
    }

    /// Method declaration anywhere in the line; captures the method name.
    pub fn method_name(&self, line: &str) -> Option<String> {
        self.method_decl.captures(line).map(|c| c[1].to_string())
    }

    /// Disabling annotation anywhere in the line. The payload capture is
    /// greedy and runs to the last closing parenthesis on the line; it is
    /// absent when the annotation carries no parentheses at all.
    pub fn marker(&self, line: &str) -> Option<MarkerMatch> {
        self.marker.captures(line).map(|c| MarkerMatch {
            kind: c[1].to_string(),
            payload: c.get(2).map(|m| m.as_str().to_string()),
        })
    }

    /// `reason = "..."` attribute inside a marker payload. Also matches
    /// the tail of attributes like `disabledReason`, which is how the
    /// conditional annotations carry their justification.
    pub fn reason(&self, payload: &str) -> Option<String> {
        self.reason_attr.captures(payload).map(|c| c[1].to_string())
    }

    /// Narrow issue-tracker URL shape, searched anywhere in the text.
    pub fn issue_link(&self, text: &str) -> Option<String> {
        self.issue_link.captures(text).map(|c| c[1].to_string())
    }

    /// Whether a method declaration starts at the first position of the
    /// line. The block flush rule uses this positional form, re-run
    /// fresh, rather than the unanchored `method_name` search.
    pub fn method_at_line_start(&self, line: &str) -> bool {
        self.method_decl
            .find(line)
            .map_or(false, |m| m.start() == 0)
    }

    /// Positional counterpart of `class_name` for the flush rule.
    pub fn class_at_line_start(&self, line: &str) -> bool {
        self.class_decl.find(line).map_or(false, |m| m.start() == 0)
    }
}
