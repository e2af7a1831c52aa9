mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "SCENESCAPE_API_URL";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_api_url_override(&mut config, std::env::var(API_URL_ENV).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./scenescape.toml",
        "./config.toml",
        "~/.config/scenescape/config.toml",
        "/etc/scenescape/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_api_url_override(&mut config, std::env::var(API_URL_ENV).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Replace the API base URL when an override is set and non-blank.
pub fn apply_api_url_override(config: &mut Config, url: Option<String>) {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        tracing::debug!("Overriding API base URL from {}", API_URL_ENV);
        config.api.base_url = url.trim().to_string();
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let base_url = &config.api.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("API base URL must start with http:// or https://: {}", base_url);
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("API timeout cannot be 0");
    }

    if config.scan.poll_interval_ms == 0 {
        anyhow::bail!("Scan poll interval cannot be 0");
    }

    if config.media.max_file_size_mb == 0 {
        tracing::warn!("media.max_file_size_mb is 0, every file will be skipped");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.scan.poll_interval(), Duration::from_secs(1));
        assert!(!config.scan.discard_stale_responses);
        assert_eq!(config.media.max_file_size_bytes(), 10240 * 1024 * 1024);
        assert!(config.media.skip_hidden_files);
        assert!(config.media.recursive);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[api]
base_url = "https://media.example.com"

[scan]
poll_interval_ms = 250
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.scan.poll_interval_ms, 250);
        assert!(config.media.recursive);
    }

    #[test]
    fn test_load_rejects_zero_interval() {
        let file = write_config("[scan]\npoll_interval_ms = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("poll interval"));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let file = write_config("[api\nbase_url = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/scenescape.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default();
        config.api.base_url = "localhost:8000".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_api_url_override() {
        let mut config = Config::default();
        apply_api_url_override(&mut config, Some("  http://nas:9000 ".into()));
        assert_eq!(config.api.base_url, "http://nas:9000");

        apply_api_url_override(&mut config, Some("   ".into()));
        assert_eq!(config.api.base_url, "http://nas:9000");

        apply_api_url_override(&mut config, None);
        assert_eq!(config.api.base_url, "http://nas:9000");
    }
}
