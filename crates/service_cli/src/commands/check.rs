//! Check command implementation
//!
//! Validates the effective configuration and base parameter set.

use tracing::info;

use crate::config::QuotationConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &QuotationConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("Currency:     {}", config.currency.code());
    println!("Log level:    {}", config.log_level);
    println!("Project store: {}", config.store_path.display());
    println!("Duration:     {} months", config.parameters.duration);
    println!("Margin:       {}%", config.parameters.margin);

    config.validate()?;

    println!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::CliError;

    #[test]
    fn test_check_reports_invalid_parameters() {
        let mut config = QuotationConfig::default();
        assert!(run(&config).is_ok());

        config.parameters.coordination_rate = 150.0;
        assert!(matches!(
            run(&config),
            Err(CliError::Config(ConfigError::Validation(_)))
        ));
    }
}
