//! Runtime configuration, read from `config.toml` and `LEADS_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite file holding the leads. Without one the service runs with no
  /// store at all.
  #[serde(default)]
  pub store_path: Option<PathBuf>,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self { host: default_host(), port: default_port(), store_path: None }
  }
}

impl ServerConfig {
  /// Layer the optional file at `path` under `LEADS_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("LEADS")),
    )
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn store_path(&self) -> Option<PathBuf> {
    self.store_path.as_deref().map(expand_tilde)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use config::{File, FileFormat};

  use super::*;

  fn from_toml(toml: &str) -> anyhow::Result<ServerConfig> {
    ServerConfig::from_builder(
      config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = from_toml("").unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.store_path(), None);
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        host = "127.0.0.1"
        port = 9090
        store_path = "/var/lib/leads/leads.db"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:9090");
    assert_eq!(cfg.store_path(), Some(PathBuf::from("/var/lib/leads/leads.db")));
  }

  #[test]
  fn bad_port_is_rejected() {
    assert!(from_toml("port = \"eighty\"").is_err());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let path = std::env::temp_dir().join("leads-no-such-config.toml");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, ServerConfig::default().port);
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/leads.db")),
      PathBuf::from(home).join("leads.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs/leads.db")), PathBuf::from("/abs/leads.db"));
    assert_eq!(expand_tilde(Path::new("rel.db")), PathBuf::from("rel.db"));
  }
}
