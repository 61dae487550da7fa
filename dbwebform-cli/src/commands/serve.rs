//! Serve the demo form page for one table

use anyhow::{Context, Result};
use console::style;
use dbwebform::config::{GeneratorConfig, MappingStyle, ServerSettings};
use std::path::PathBuf;

/// Options of the `serve` subcommand
#[derive(Debug, Clone)]
pub struct ServeCommand {
    /// Connection URL of the source database
    pub database_url: String,
    /// Table whose form is served
    pub table_name: String,
    /// JSON configuration overriding the preset
    pub config_path: Option<PathBuf>,
    /// Listen address; `DBWEBFORM_BIND` or the default when unset
    pub bind: Option<String>,
    /// Mapping preset
    pub style: MappingStyle,
}

impl ServeCommand {
    /// Address the server will listen on
    pub fn bind_address(&self) -> Result<String> {
        match self.bind {
            Some(ref bind) => Ok(bind.clone()),
            None => Ok(ServerSettings::from_env()
                .context("Failed to read server settings")?
                .bind),
        }
    }

    /// Run the server until it stops
    pub async fn execute(&self) -> Result<()> {
        let config = GeneratorConfig::load(self.config_path.as_deref(), self.style)
            .context("Failed to load generator configuration")?;
        let bind = self.bind_address()?;

        println!(
            "{} form for {} on {}",
            style("Serving").cyan().bold(),
            style(&self.table_name).green().bold(),
            style(format!("http://{bind}")).yellow()
        );

        dbwebform::web::serve(&self.database_url, &self.table_name, &config, &bind)
            .await
            .with_context(|| format!("Failed to serve form for table '{}'", self.table_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(bind: Option<&str>) -> ServeCommand {
        ServeCommand {
            database_url: "sqlite::memory:".into(),
            table_name: "users".into(),
            config_path: None,
            bind: bind.map(Into::into),
            style: MappingStyle::Flask,
        }
    }

    #[test]
    fn test_bind_flag_wins() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DBWEBFORM_BIND", "10.0.0.1:7000");
            assert_eq!(command(Some("0.0.0.0:9000")).bind_address().unwrap(), "0.0.0.0:9000");
            Ok(())
        });
    }

    #[test]
    fn test_bind_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DBWEBFORM_BIND", "10.0.0.1:7000");
            assert_eq!(command(None).bind_address().unwrap(), "10.0.0.1:7000");
            Ok(())
        });
    }
}
