use std::path::{Path, PathBuf};
use anyhow::Result;
use tracing::{info, debug};

use crate::config::Config;
use super::remote::{GitHubClient, SourceProvider};
use super::report::{BranchAnalysisResult, DisabledTest, JsonFileSink, ReportSink};
use super::resolver::IssueResolver;
use super::scanner::LineScanner;

/// Main orchestration engine: drives the scanner over every source
/// file of every requested branch, resolves issue links, and hands the
/// collected results to the report sink.
pub struct Engine {
    config: Config,
    scanner: LineScanner,
}

impl Engine {
    /// Create a new engine instance
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;

        debug!("Loaded configuration: {:?}", config);

        let scanner = LineScanner::new()?;

        Ok(Self { config, scanner })
    }

    /// Analyze the configured branches and write the JSON report.
    /// CLI arguments override their config counterparts.
    pub async fn analyze(
        &mut self,
        owner: Option<String>,
        repo: Option<String>,
        branches: Option<String>,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let owner = owner.unwrap_or_else(|| self.config.repository.owner.clone());
        let repo = repo.unwrap_or_else(|| self.config.repository.name.clone());
        let branches: Vec<String> = match branches {
            Some(list) => list.split(',').map(String::from).collect(),
            None => self.config.repository.branches.clone(),
        };
        let output = output.unwrap_or_else(|| self.config.output.path.clone());

        info!(
            "🔍 Starting analysis of {}/{} on branches: {}",
            owner,
            repo,
            branches.join(", ")
        );

        let client = GitHubClient::new(&self.config.github, &owner, &repo)?;
        let mut resolver = IssueResolver::new(&client);

        let results = self
            .analyze_branches(&client, &mut resolver, &branches)
            .await?;

        let sink = JsonFileSink::new(output.clone(), self.config.output.pretty);
        sink.persist(&results)?;

        let total: usize = results.iter().map(|r| r.disabled_tests.len()).sum();
        info!(
            "✅ Report with {} disabled test(s) written to {}",
            total,
            output.display()
        );
        Ok(())
    }

    /// Scan every source file of every branch, in request order. Any
    /// fetch failure aborts the whole run; no partial report survives.
    async fn analyze_branches(
        &self,
        provider: &dyn SourceProvider,
        resolver: &mut IssueResolver<'_>,
        branches: &[String],
    ) -> crate::error::Result<Vec<BranchAnalysisResult>> {
        let suffix = self.config.scan.file_suffix.as_str();
        let mut results = Vec::new();

        for branch in branches {
            info!("Analyzing branch {}", branch);
            let mut disabled_tests = Vec::new();

            let paths = provider.list_files(branch).await?;
            for path in paths.iter().filter(|p| p.ends_with(suffix)) {
                debug!("Analyzing file: {}", path);
                let content = provider.read_file(branch, path).await?;

                for record in self.scanner.scan(&content) {
                    let can_be_reenabled = resolver
                        .can_be_reenabled(record.issue_link.as_deref())
                        .await;

                    disabled_tests.push(DisabledTest {
                        test_name: record.test_name,
                        class_name: record.class_name,
                        annotation_type: record.annotation_type,
                        reason: record.reason,
                        issue_link: record.issue_link,
                        file_path: path.clone(),
                        can_be_reenabled,
                    });
                }
            }

            info!("Found {} disabled test(s) on {}", disabled_tests.len(), branch);
            results.push(BranchAnalysisResult {
                branch_name: branch.clone(),
                disabled_tests,
            });
        }

        Ok(results)
    }

    /// Write a default configuration file into the target directory.
    pub async fn init(&mut self, path: Option<PathBuf>) -> Result<()> {
        let target_dir = path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join("testwarden.toml");

        if config_path.exists() {
            anyhow::bail!("Refusing to overwrite existing {}", config_path.display());
        }

        Config::default().save(&config_path)?;
        info!("Wrote default configuration to {}", config_path.display());
        Ok(())
    }
}
