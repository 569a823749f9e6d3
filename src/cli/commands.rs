use crate::config::{self, ConfigCheck, Settings, TemplateDataConfig};
use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::pipeline::Prepared;
use crate::scaffold;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Message printed when the data range holds no data rows.
pub const NO_DATA_MESSAGE: &str = "No header or not enough data to populate template.";

/// Load and validate the config. `None` means a usage message was printed
/// and the command should stop without error.
fn load_settings(config_path: &Path, strict_columns: bool) -> TemplatinatorResult<Option<Settings>> {
    let config = TemplateDataConfig::load(config_path)?;
    match config.check(&config::base_dir(config_path))? {
        ConfigCheck::Ready(mut settings) => {
            settings.strict_columns |= strict_columns;
            Ok(Some(settings))
        }
        ConfigCheck::Incomplete(message) => {
            println!("{}", message.yellow());
            Ok(None)
        }
    }
}

/// Report an empty data range and stop cleanly; pass anything else on.
fn no_data_is_clean_exit(result: TemplatinatorResult<()>) -> TemplatinatorResult<()> {
    match result {
        Err(TemplatinatorError::NoData { range }) => {
            println!("{}", NO_DATA_MESSAGE.yellow());
            println!("   Data range: {}", range);
            Ok(())
        }
        other => other,
    }
}

/// Execute the generate command
pub fn generate(
    config_path: PathBuf,
    dry_run: bool,
    verbose: bool,
    strict_columns: bool,
) -> TemplatinatorResult<()> {
    println!("{}", "📄 Templatinator - Generating workbooks".bold().green());
    println!("   Config: {}", config_path.display());
    println!();

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No files will be written\n".yellow()
        );
    }

    let Some(settings) = load_settings(&config_path, strict_columns)? else {
        return Ok(());
    };

    if verbose {
        println!("   Template: {}", settings.input.display());
        println!("   Data:     {} [{}]", settings.data_file.display(), settings.data_range);
        println!("   Output:   {}", settings.output_dir.display());
        println!();
        println!("{}", "🧩 Compiling template areas...".cyan());
    }

    no_data_is_clean_exit(render_rows(&settings, dry_run, verbose))
}

fn render_rows(settings: &Settings, dry_run: bool, verbose: bool) -> TemplatinatorResult<()> {
    let mut prepared = Prepared::load(settings)?;

    if verbose {
        println!(
            "   {} cells compiled, {} with placeholders",
            prepared.cache.len(),
            prepared.cache.placeholders().count()
        );
        println!(
            "   {} data rows, {} columns\n",
            prepared.data.len(),
            prepared.data.columns.len()
        );
        println!("{}", "🖨️  Rendering rows...".cyan());
    }

    let summary = prepared.render(settings, dry_run)?;

    for path in &summary.artifacts {
        let verb = if dry_run { "would write" } else { "wrote" };
        println!("   {} {}", verb.dimmed(), path.display());
    }
    println!();

    if summary.collisions > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} rows reused an earlier output filename (later rows won)",
                summary.collisions
            )
            .yellow()
        );
    }

    if dry_run {
        println!("{}", "📋 Dry run complete - no files written".yellow());
    } else {
        println!(
            "{}",
            format!(
                "✅ Generated {} workbooks in {}",
                summary.distinct_artifacts(),
                settings.output_dir.display()
            )
            .bold()
            .green()
        );
    }
    Ok(())
}

/// Execute the inspect command - show compiled cells and column variables
pub fn inspect(config_path: PathBuf) -> TemplatinatorResult<()> {
    println!("{}", "🔍 Templatinator - Inspect".bold().green());
    println!("   Config: {}\n", config_path.display());

    let Some(settings) = load_settings(&config_path, false)? else {
        return Ok(());
    };

    no_data_is_clean_exit(show_template(&settings))
}

fn show_template(settings: &Settings) -> TemplatinatorResult<()> {
    let prepared = Prepared::load(settings)?;

    println!("{}", "🧩 Placeholder cells:".bold().cyan());
    for entry in prepared.cache.placeholders() {
        println!("   {}  {}", entry.cell.address().bright_blue(), entry.source);
    }
    println!(
        "   ({} cells scanned in {} areas)\n",
        prepared.cache.len(),
        settings.areas.len()
    );

    println!("{}", "📊 Data variables:".bold().cyan());
    for column in prepared.data.columns.iter() {
        println!("   {} ← {:?}", column.variable.bright_blue(), column.header);
    }
    println!("   ({} data rows)\n", prepared.data.len());

    println!(
        "   Output filename: {}",
        settings.output_template.bright_yellow()
    );
    Ok(())
}

/// Execute the init command
pub fn init(dir: PathBuf) -> TemplatinatorResult<()> {
    println!("{}", "🌱 Templatinator - New sample project".bold().green());
    println!("   Directory: {}\n", dir.display());

    let files = scaffold::init_project(&dir)?;
    for file in &files {
        println!("   created {}", file.display());
    }

    println!();
    println!(
        "{}",
        format!(
            "💡 Run 'templatinator generate --config {}' to try it",
            dir.join(config::DEFAULT_CONFIG_FILE).display()
        )
        .bold()
        .yellow()
    );
    Ok(())
}
