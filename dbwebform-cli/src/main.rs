//! dbwebform CLI tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dbwebform::config::MappingStyle;
use dbwebform::observability;
use dbwebform::scaffold::OutputParts;
use dbwebform_cli_lib::{GenerateCommand, ServeCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dbwebform")]
#[command(version)]
#[command(about = "Generate ORM mapping classes and web forms from database tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the mapping class and form class for a table
    Generate {
        /// Database URL (`sqlite://...` or `postgres://...`)
        database_url: String,
        /// Table to reflect
        table_name: String,
        /// Output file or directory; stdout when omitted
        output_file: Option<PathBuf>,
        /// JSON configuration file
        config_path: Option<PathBuf>,
        /// JSON configuration file (takes precedence over the positional path)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Name the classes `Model` and `ModelForm`
        #[arg(short = 'r', long)]
        default_rename: bool,
        /// Emit only the mapping class
        #[arg(short = 'm', long, conflicts_with = "only_form")]
        only_model: bool,
        /// Emit only the form class
        #[arg(short = 'f', long)]
        only_form: bool,
        /// Use plain `SQLAlchemy` declarative mapping instead of Flask-SQLAlchemy
        #[arg(short = 's', long)]
        classic_mapping: bool,
        /// Mapping class name (the form class appends `Form`)
        #[arg(long, value_name = "NAME")]
        class_name: Option<String>,
    },
    /// Serve a validating HTML form for a table
    Serve {
        /// Database URL (`sqlite://...` or `postgres://...`)
        database_url: String,
        /// Table to reflect
        table_name: String,
        /// JSON configuration file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Listen address (defaults to `DBWEBFORM_BIND`, then 127.0.0.1:8000)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// Use plain `SQLAlchemy` declarative mapping instead of Flask-SQLAlchemy
        #[arg(short = 's', long)]
        classic_mapping: bool,
    },
}

const fn mapping_style(classic: bool) -> MappingStyle {
    if classic {
        MappingStyle::Classic
    } else {
        MappingStyle::Flask
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            database_url,
            table_name,
            output_file,
            config_path,
            config,
            default_rename,
            only_model,
            only_form,
            classic_mapping,
            class_name,
        } => {
            observability::init(observability::CLI_FILTER).context("Failed to initialize logging")?;
            let cmd = GenerateCommand {
                database_url,
                table_name,
                output_file,
                config_path: config.or(config_path),
                class_name,
                default_rename,
                parts: OutputParts::from_flags(only_model, only_form),
                style: mapping_style(classic_mapping),
            };
            cmd.execute().await?;
        }
        Commands::Serve {
            database_url,
            table_name,
            config,
            bind,
            classic_mapping,
        } => {
            observability::init(observability::SERVER_FILTER).context("Failed to initialize logging")?;
            let cmd = ServeCommand {
                database_url,
                table_name,
                config_path: config,
                bind,
                style: mapping_style(classic_mapping),
            };
            cmd.execute().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_only_flags_conflict() {
        let result = Cli::try_parse_from(["dbwebform", "generate", "sqlite://a.db", "users", "-m", "-f"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_positionals() {
        let cli = Cli::try_parse_from([
            "dbwebform",
            "generate",
            "sqlite://a.db",
            "users",
            "out.py",
            "conf.json",
            "-r",
            "-s",
        ])
        .unwrap();

        let Commands::Generate {
            output_file,
            config_path,
            default_rename,
            classic_mapping,
            ..
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(output_file, Some(PathBuf::from("out.py")));
        assert_eq!(config_path, Some(PathBuf::from("conf.json")));
        assert!(default_rename);
        assert!(classic_mapping);
    }
}
