//! Fetch command implementation.
//!
//! Provisions the reference table: asks the release feed for the latest
//! CLDR tag, downloads that tag's annotation file for the configured
//! locale, checks it parses, and moves it into place.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Deserialize;
use ureq::{Agent, AgentBuilder};

use crate::commands::traits::Command;
use crate::config::TableConfig;
use crate::error::{MojiError, Result};

/// Arguments for the fetch command.
#[derive(Debug, Clone, Default)]
pub struct FetchArgs {
    /// Download even if the table already exists.
    pub force: bool,
    /// Table settings, with any CLI override already applied.
    pub table: TableConfig,
}

/// Fetch command handler.
pub struct FetchCommand {
    args: FetchArgs,
}

impl Command for FetchCommand {
    type Args = FetchArgs;
    type Output = PathBuf;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<PathBuf> {
        let path = self.args.table.resolve_path()?;
        if ensure_table(&self.args.table, &path, self.args.force)? {
            tracing::info!("reference table installed at {}", path.display());
        } else {
            tracing::info!("reference table already present at {}", path.display());
        }
        Ok(path)
    }

    fn name() -> &'static str {
        "fetch"
    }
}

/// Makes sure a table exists at `path`, downloading it if it is missing or
/// `force` is set. Returns true if a download happened.
pub fn ensure_table(config: &TableConfig, path: &Path, force: bool) -> Result<bool> {
    if path.is_file() && !force {
        return Ok(false);
    }

    let start_time = Instant::now();
    let provisioner = Provisioner::new(config);
    let tag = provisioner.latest_tag()?;
    let url = provisioner.annotations_url(&tag);
    tracing::info!("downloading CLDR {} annotations ({})", tag, config.locale);
    tracing::debug!("GET {}", url);

    let body = provisioner.get(&url)?;
    install(path, &body)?;

    tracing::debug!("provisioned in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(true)
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Talks to the release feed and the raw-content host.
struct Provisioner<'a> {
    agent: Agent,
    config: &'a TableConfig,
}

impl<'a> Provisioner<'a> {
    fn new(config: &'a TableConfig) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("moji/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent, config }
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| MojiError::Provision(format!("GET {}: {}", url, e)))?;
        response
            .into_string()
            .map_err(|e| MojiError::Provision(format!("reading {}: {}", url, e)))
    }

    fn latest_tag(&self) -> Result<String> {
        let body = self.get(&self.config.feed_url)?;
        parse_release_tag(&body)
    }

    fn annotations_url(&self, tag: &str) -> String {
        annotations_url(&self.config.raw_base_url, tag, &self.config.locale)
    }
}

fn parse_release_tag(body: &str) -> Result<String> {
    let release: Release = serde_json::from_str(body)
        .map_err(|e| MojiError::Provision(format!("unexpected release feed payload: {}", e)))?;
    if release.tag_name.is_empty() {
        return Err(MojiError::Provision("release feed has an empty tag".to_string()));
    }
    Ok(release.tag_name)
}

fn annotations_url(base: &str, tag: &str, locale: &str) -> String {
    format!(
        "{}/{}/cldr-json/cldr-annotations-full/annotations/{}/annotations.json",
        base.trim_end_matches('/'),
        tag,
        locale
    )
}

/// Writes `body` to `target` via a sibling temp file so a failed download
/// never leaves a partial table behind.
fn install(target: &Path, body: &str) -> Result<()> {
    let document: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| MojiError::Provision(format!("downloaded table is not JSON: {}", e)))?;
    if document.pointer("/annotations/annotations").is_none() {
        return Err(MojiError::Provision(
            "downloaded table has no annotations section".to_string(),
        ));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let partial = target.with_extension("json.part");
    fs::write(&partial, body)?;
    fs::rename(&partial, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TABLE: &str = r#"{"annotations":{"annotations":{"👋":{"tts":["waving hand"]}}}}"#;

    #[test]
    fn test_fetch_command_name() {
        assert_eq!(<FetchCommand as Command>::name(), "fetch");
    }

    #[test]
    fn test_parse_release_tag() {
        let body = r#"{"tag_name":"47.0.0","name":"47.0.0","assets":[]}"#;
        assert_eq!(parse_release_tag(body).unwrap(), "47.0.0");
    }

    #[test]
    fn test_parse_release_tag_rejects_garbage() {
        assert!(matches!(parse_release_tag("<html>"), Err(MojiError::Provision(_))));
        assert!(matches!(
            parse_release_tag(r#"{"tag_name":""}"#),
            Err(MojiError::Provision(_))
        ));
    }

    #[test]
    fn test_annotations_url() {
        assert_eq!(
            annotations_url("https://raw.example.com/cldr-json/", "47.0.0", "en"),
            "https://raw.example.com/cldr-json/47.0.0/cldr-json/cldr-annotations-full/annotations/en/annotations.json"
        );
    }

    #[test]
    fn test_install_writes_table() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("state").join("annotations-en.json");

        install(&target, TABLE).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), TABLE);
        assert!(!target.with_extension("json.part").exists());
    }

    #[test]
    fn test_install_rejects_wrong_document() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("annotations-en.json");

        assert!(install(&target, "not json").is_err());
        assert!(install(&target, r#"{"main":{}}"#).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn test_existing_table_is_not_refetched() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("annotations-en.json");
        fs::write(&target, TABLE).unwrap();

        let config = TableConfig {
            feed_url: "http://127.0.0.1:9/unreachable".to_string(),
            ..TableConfig::default()
        };
        assert!(!ensure_table(&config, &target, false).unwrap());
    }

    #[test]
    fn test_unreachable_feed_is_provision_error() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("annotations-en.json");
        let config = TableConfig {
            feed_url: "http://127.0.0.1:9/unreachable".to_string(),
            timeout_secs: 2,
            ..TableConfig::default()
        };

        let result = ensure_table(&config, &target, false);
        assert!(matches!(result, Err(MojiError::Provision(_))));
        assert!(!target.exists());
    }
}
