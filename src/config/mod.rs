// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON, picked by extension)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );
    parse_config(&contents, yaml)
}

pub fn parse_config(contents: &str, yaml: bool) -> Result<Config> {
    let config: Config = if yaml {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn yaml_with_defaults() {
        let config = parse_config("probes:\n  query_timeout_ms: 250\n", true).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.probes.query_timeout(),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn json_listen_address() {
        let config = parse_config(r#"{"server": {"listen": "127.0.0.1:9000"}}"#, false).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.probes.query_timeout(), None);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse_config("probes:\n  query_timeout_ms: 0\n", true).unwrap_err();
        assert!(err.to_string().contains("query_timeout_ms"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        assert!(load_config("/nonexistent/kubeprobes.yaml").await.is_err());
    }
}
