use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TestwardenError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Repository under inspection
    pub repository: RepositoryConfig,

    /// Source file scanning settings
    pub scan: ScanConfig,

    /// GitHub API access settings
    pub github: GitHubConfig,

    /// Report output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,

    /// Branches to analyze, in order
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Only files with this suffix are scanned
    pub file_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API base URL (override for GitHub Enterprise)
    pub api_base: String,

    /// Access token; falls back to the GITHUB_TOKEN environment variable
    pub token: Option<String>,

    /// Timeout per API call, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON report file
    pub path: PathBuf,

    /// Pretty-print the report
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig {
                owner: "org".to_string(),
                name: "repo-name".to_string(),
                branches: vec!["main".to_string()],
            },
            scan: ScanConfig {
                file_suffix: ".java".to_string(),
            },
            github: GitHubConfig {
                api_base: "https://api.github.com".to_string(),
                token: None,
                timeout_secs: 30,
            },
            output: OutputConfig {
                path: PathBuf::from("disabled-tests-report.json"),
                pretty: true,
            },
        }
    }
}

impl GitHubConfig {
    /// Token from config, or from the environment when unset
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TestwardenError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TestwardenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                // Try common config file locations
                let candidates = [
                    "Testwarden.toml",
                    "testwarden.toml",
                    ".testwarden.toml",
                ];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testwarden.toml");

        let mut config = Config::default();
        config.repository.owner = "quarkusio".to_string();
        config.repository.branches = vec!["main".to_string(), "3.15".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.repository.owner, "quarkusio");
        assert_eq!(loaded.repository.branches, vec!["main", "3.15"]);
        assert_eq!(loaded.scan.file_suffix, ".java");
    }

    #[test]
    fn missing_explicit_path_falls_back_to_default() {
        let config = Config::load_or_default(Some("does-not-exist.toml")).unwrap();
        assert_eq!(config.repository.branches, vec!["main"]);
        assert_eq!(config.output.path, PathBuf::from("disabled-tests-report.json"));
    }
}
