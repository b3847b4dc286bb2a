use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use radscrape::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Request timeout: {}s", config.fetch.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Loads configuration from an optional path, falling back to defaults
///
/// The CLI runs without a configuration file; every setting has a default
/// matching the scraped origin's observed tolerances.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[fetch]
timeout-secs = 10
rate-limit-cooldown-secs = 2

[pacing]
item-delay-min-ms = 100
item-delay-max-ms = 200
enabled = true

[source]
base-url = "https://radiopaedia.org"

[output]
results-path = "./out.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.rate_limit_cooldown_secs, 2);
        assert_eq!(config.pacing.item_delay_min_ms, 100);
        // Unspecified fields fall back to defaults
        assert_eq!(config.pacing.page_delay_min_ms, 2000);
        assert_eq!(config.output.results_path, "./out.json");
        assert_eq!(config.output.image_dir, "./downloaded_images");
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.timeout_secs, 25);
        assert_eq!(config.fetch.rate_limit_cooldown_secs, 10);
        assert_eq!(config.source.base_url, "https://radiopaedia.org");
        assert!(config.pacing.enabled);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[pacing]
item-delay-min-ms = 500
item-delay-max-ms = 100
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_or_default_without_path() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.fetch.timeout_secs, 25);
    }
}
