use crate::config::types::{Config, CrawlerConfig, RenderConfig};
use crate::ConfigError;

/// Upper bound on crawl depth
const MAX_DEPTH_LIMIT: u32 = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_render_config(&config.render)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates page layout configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("page_width_mm", config.page_width_mm),
        ("page_height_mm", config.page_height_mm),
        ("font_size", config.font_size),
        ("line_height_mm", config.line_height_mm),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{} must be a positive number, got {}",
                name, value
            )));
        }
    }

    if !config.margin_mm.is_finite() || config.margin_mm < 0.0 {
        return Err(ConfigError::Validation(format!(
            "margin_mm cannot be negative, got {}",
            config.margin_mm
        )));
    }

    let printable_width = config.page_width_mm - 2.0 * config.margin_mm;
    let printable_height = config.page_height_mm - 2.0 * config.margin_mm;
    if printable_width <= 0.0 || printable_height < config.line_height_mm {
        return Err(ConfigError::Validation(format!(
            "margin_mm {} leaves no printable area on a {}x{}mm page",
            config.margin_mm, config.page_width_mm, config.page_height_mm
        )));
    }

    Ok(())
}
