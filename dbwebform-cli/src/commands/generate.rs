//! Generate mapping and form classes for one table
//!
//! ```bash
//! dbwebform generate sqlite://app.db users users.py --only-model
//! ```

use anyhow::{Context, Result};
use console::style;
use dbwebform::config::{GeneratorConfig, MappingStyle};
use dbwebform::scaffold::{CodeGenerator, OutputParts};
use dbwebform::schema::{reflect_table, TableInfo};
use std::path::PathBuf;

/// Options of the `generate` subcommand
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    /// Connection URL of the source database
    pub database_url: String,
    /// Table to reflect
    pub table_name: String,
    /// Destination file or directory; stdout when unset
    pub output_file: Option<PathBuf>,
    /// JSON configuration overriding the preset
    pub config_path: Option<PathBuf>,
    /// Explicit mapping class name
    pub class_name: Option<String>,
    /// Name the classes `Model` and `ModelForm`
    pub default_rename: bool,
    /// Which classes to emit
    pub parts: OutputParts,
    /// Mapping preset
    pub style: MappingStyle,
}

impl GenerateCommand {
    /// Create a command emitting both classes with the Flask preset
    #[must_use]
    pub fn new(database_url: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            table_name: table_name.into(),
            output_file: None,
            config_path: None,
            class_name: None,
            default_rename: false,
            parts: OutputParts::Both,
            style: MappingStyle::Flask,
        }
    }

    /// Reflect the table and render the selected classes
    pub async fn render(&self) -> Result<String> {
        let config = self.load_config()?;
        let table = self.reflect().await?;
        let output = self
            .generator(&table, &config)?
            .render_output(self.parts)
            .context("Failed to render generated classes")?;
        Ok(output)
    }

    /// Run the command, writing to the output file or stdout
    pub async fn execute(&self) -> Result<()> {
        let config = self.load_config()?;
        let table = self.reflect().await?;
        let generator = self.generator(&table, &config)?;

        let Some(ref output_file) = self.output_file else {
            let output = generator
                .render_output(self.parts)
                .context("Failed to render generated classes")?;
            print!("{output}");
            return Ok(());
        };

        let written = generator
            .write_output(output_file, self.parts)
            .context("Failed to write generated classes")?;

        println!(
            "{} {}",
            style("Created file:").green().bold(),
            style(written.display()).cyan()
        );
        if self.parts.includes_model() {
            println!(
                "  {} mapping class {}",
                style("✓").green(),
                style(generator.class_name()).dim()
            );
        }
        if self.parts.includes_form() {
            println!(
                "  {} form class {}",
                style("✓").green(),
                style(generator.form_class_name()).dim()
            );
        }

        Ok(())
    }

    fn load_config(&self) -> Result<GeneratorConfig> {
        GeneratorConfig::load(self.config_path.as_deref(), self.style)
            .context("Failed to load generator configuration")
    }

    async fn reflect(&self) -> Result<TableInfo> {
        reflect_table(&self.database_url, &self.table_name)
            .await
            .with_context(|| format!("Failed to reflect table '{}'", self.table_name))
    }

    fn generator<'a>(
        &self,
        table: &'a TableInfo,
        config: &'a GeneratorConfig,
    ) -> Result<CodeGenerator<'a>> {
        let generator =
            CodeGenerator::new(table, config).context("Failed to prepare code generator")?;

        // An explicit name beats --default-rename
        Ok(match (&self.class_name, self.default_rename) {
            (Some(name), _) => generator.with_class_name(name.clone()),
            (None, true) => generator.with_default_rename(),
            (None, false) => generator,
        })
    }
}
