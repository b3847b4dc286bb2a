use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks:
/// - timeouts are non-zero
/// - pacing delay ranges are well ordered (min <= max)
/// - the base URL parses and uses an HTTP(S) scheme
/// - output paths are non-empty
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.fetch.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch.timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.fetch.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch.connect-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.pacing.item_delay_min_ms > config.pacing.item_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "pacing.item-delay range is inverted: {} > {}",
            config.pacing.item_delay_min_ms, config.pacing.item_delay_max_ms
        )));
    }

    if config.pacing.page_delay_min_ms > config.pacing.page_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "pacing.page-delay range is inverted: {} > {}",
            config.pacing.page_delay_min_ms, config.pacing.page_delay_max_ms
        )));
    }

    let base = Url::parse(&config.source.base_url)
        .map_err(|e| ConfigError::Validation(format!("source.base-url is invalid: {}", e)))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "source.base-url must be http or https, got {}",
            base.scheme()
        )));
    }

    if config.output.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.results-path must not be empty".to_string(),
        ));
    }

    if config.output.image_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output.image-dir must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_inverted_item_delay_rejected() {
        let mut config = Config::default();
        config.pacing.item_delay_min_ms = 2000;
        config.pacing.item_delay_max_ms = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_inverted_page_delay_rejected() {
        let mut config = Config::default();
        config.pacing.page_delay_min_ms = 5000;
        config.pacing.page_delay_max_ms = 2000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = Config::default();
        config.source.base_url = "ftp://radiopaedia.org".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_equal_delay_bounds_accepted() {
        let mut config = Config::default();
        config.pacing.item_delay_min_ms = 0;
        config.pacing.item_delay_max_ms = 0;
        assert!(validate(&config).is_ok());
    }
}
