mod engine;
mod patterns;
mod scanner;
mod resolver;
mod report;

// Remote collaborators (repository source + issue tracker)
mod remote;

pub use patterns::{LinePatterns, MarkerMatch};
pub use scanner::{LineScanner, ScanRecord, ScanState};
pub use resolver::IssueResolver;
pub use report::{
    BranchAnalysisResult, DisabledTest, JsonFileSink, ReportSink,
    ALL_METHODS, UNKNOWN_CLASS,
};
pub use remote::{GitHubClient, IssueState, IssueTracker, SourceProvider};

// Export the main engine
pub use engine::Engine;
