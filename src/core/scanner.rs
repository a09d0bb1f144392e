use tracing::{debug, trace};

use crate::error::Result;
use super::patterns::LinePatterns;
use super::report::{ALL_METHODS, UNKNOWN_CLASS};

/// One disabling marker recovered when a block closed. The file path
/// and issue resolution are attached by the engine afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub test_name: String,
    pub class_name: String,
    pub annotation_type: String,
    pub reason: Option<String>,
    pub issue_link: Option<String>,
}

/// Marker collected while a disabled block is open, waiting for the
/// declaration line that will close the block.
#[derive(Debug, Clone)]
struct PendingMarker {
    annotation_type: String,
    reason: Option<String>,
    issue_link: Option<String>,
}

/// Running scan context for one file. Class and method names persist
/// until overwritten by the next matching declaration; they are never
/// cleared when a block flushes. A method name can therefore outlive
/// its class and attach to a later class-level block — observed
/// behavior, kept as is.
#[derive(Debug, Clone)]
pub struct ScanState {
    previous_line: String,
    current_class: String,
    current_test_method: Option<String>,
    inside_disabled_block: bool,
    pending: Vec<PendingMarker>,
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            previous_line: String::new(),
            current_class: UNKNOWN_CLASS.to_string(),
            current_test_method: None,
            inside_disabled_block: false,
            pending: Vec::new(),
        }
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

/// Line-oriented scanner for disabling annotations. Works purely on
/// line patterns; no syntax tree is ever built.
pub struct LineScanner {
    patterns: LinePatterns,
}

impl LineScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: LinePatterns::new()?,
        })
    }

    /// Scan a whole file's text. Records appear in block flush order.
    pub fn scan(&self, content: &str) -> Vec<ScanRecord> {
        let mut state = ScanState::new();
        let mut records = Vec::new();

        for raw in content.lines() {
            records.extend(self.advance(&mut state, raw.trim()));
        }

        records
    }

    /// One transition of the state machine: consumes a trimmed line,
    /// returns the records it flushed (usually none).
    pub fn advance(&self, state: &mut ScanState, line: &str) -> Vec<ScanRecord> {
        if let Some(class) = self.patterns.class_name(line) {
            debug!("Found class: {}", class);
            state.current_class = class;
        }

        if let Some(method) = self.patterns.method_name(line) {
            trace!("Found method: {}", method);
            state.current_test_method = Some(method);
        }

        if let Some(marker) = self.patterns.marker(line) {
            state.inside_disabled_block = true;

            let mut reason = None;
            let mut issue_link = None;

            if let Some(payload) = marker.payload.as_deref() {
                reason = self.patterns.reason(payload);
                issue_link = self.patterns.issue_link(payload);
            }

            // Issue link recovery: the payload first, then a comment
            // line directly above, then a trailing comment on the
            // marker line itself.
            if issue_link.is_none() && state.previous_line.starts_with("//") {
                issue_link = self.patterns.issue_link(&state.previous_line);
            }
            if issue_link.is_none() && line.starts_with("//") {
                issue_link = self.patterns.issue_link(line);
            }

            // Without an explicit reason attribute, the comment above
            // the marker doubles as the reason.
            if reason.is_none() {
                reason = comment_text(&state.previous_line);
            }
            if line.contains("//") && issue_link.is_none() && reason.is_none() {
                reason = comment_text(line);
            }

            trace!(
                "Found marker @{} (reason: {:?}, issue: {:?})",
                marker.kind,
                reason,
                issue_link
            );
            state.pending.push(PendingMarker {
                annotation_type: marker.kind,
                reason,
                issue_link,
            });
        }

        // Flush rule: a declaration starting at the first position of
        // the line closes an open block. Both patterns are re-run as
        // fresh positional matches; a mid-line hit does not flush.
        let mut flushed = Vec::new();
        if state.inside_disabled_block
            && (self.patterns.method_at_line_start(line) || self.patterns.class_at_line_start(line))
        {
            debug!("Closing disabled block with {} marker(s)", state.pending.len());

            for pending in state.pending.drain(..) {
                flushed.push(ScanRecord {
                    test_name: state
                        .current_test_method
                        .clone()
                        .unwrap_or_else(|| ALL_METHODS.to_string()),
                    class_name: state.current_class.clone(),
                    annotation_type: pending.annotation_type,
                    reason: pending.reason,
                    issue_link: pending.issue_link,
                });
            }
            state.inside_disabled_block = false;
        }

        state.previous_line = line.to_string();
        flushed
    }
}

/// Text after the first `//` of the line, trimmed. None when the line
/// carries no line comment.
fn comment_text(line: &str) -> Option<String> {
    line.find("//")
        .map(|idx| line[idx + 2..].trim().to_string())
}
