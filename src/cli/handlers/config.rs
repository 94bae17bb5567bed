//! Configuration inspection commands

use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::{ParkingError, Result};
use serde_json::json;

/// Handler for `config show`
///
/// Prints the effective configuration after all layers are applied.
pub fn handle_config_show(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    if formatter.is_json() {
        formatter.print_json(config)
    } else {
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

/// Handler for `config path`
pub fn handle_config_path(formatter: &OutputFormatter) -> Result<()> {
    let path = Config::default_path().ok_or_else(|| {
        ParkingError::ConfigError("Could not determine a configuration directory".to_string())
    })?;

    if formatter.is_json() {
        formatter.print_json(&json!({
            "path": path,
            "exists": path.exists(),
        }))
    } else {
        formatter.info(&path.display().to_string());
        if !path.exists() {
            formatter.info("(file does not exist; built-in defaults are used)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_show_both_formats() {
        let config = Config::default();
        assert!(handle_config_show(&config, &OutputFormatter::new(false, true)).is_ok());
        assert!(handle_config_show(&config, &OutputFormatter::new(true, true)).is_ok());
    }
}
