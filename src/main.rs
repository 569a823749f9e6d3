use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use templatinator::cli;
use templatinator::config::DEFAULT_CONFIG_FILE;
use templatinator::error::TemplatinatorResult;

#[derive(Parser)]
#[command(name = "templatinator")]
#[command(about = "Fill an Excel template once per data row, one workbook per row.")]
#[command(long_about = "Templatinator - batch spreadsheet generator

Takes a template workbook whose cells contain {{placeholders}}, a data sheet
with one record per row, and writes one filled-in workbook per record.

COMMANDS:
  generate  - Render every data row into its own workbook (default)
  inspect   - Show placeholder cells and data variables
  init      - Create a sample project to start from

CONFIG (template-data.json):
  {
    \"Input\": \"template.xlsx\",
    \"OutputTemplate\": \"{{Name}}.xlsx\",
    \"OutputDir\": \"output\",
    \"Data\": { \"File\": \"data.xlsx\", \"Range\": \"A1:C50\" },
    \"Areas\": [ { \"Range\": \"A1:D20\" } ]
  }

VARIABLES:
  Data headers become variable names with every character other than
  letters, digits and '_' replaced by '_':
    \"First Name\" → {{First_Name}}     \"Unit #\" → {{Unit__}}

EXAMPLES:
  templatinator                               # generate with ./template-data.json
  templatinator generate -c jobs/config.yaml  # explicit config
  templatinator generate --dry-run            # render without writing
  templatinator init demo                     # sample project in ./demo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Render every data row into its own workbook.

Every cell of every template area is compiled once. Each data row is then
rendered into the template, the output filename expression is rendered with
the same row, and the workbook is saved under OutputDir. An existing file at
that path is replaced.

Rows are processed in sheet order; when two rows render the same filename
the later row wins.

Relative paths in the config are resolved against the config file's folder.")]
    /// Render every data row into its own workbook
    Generate {
        /// Path to config file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "TEMPLATINATOR_CONFIG")]
        config: PathBuf,

        /// Render everything but write no files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show verbose progress (and debug logs)
        #[arg(short, long)]
        verbose: bool,

        /// Fail when two data headers normalize to the same variable name
        #[arg(long)]
        strict_columns: bool,
    },

    /// Show placeholder cells and data variables without rendering
    Inspect {
        /// Path to config file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "TEMPLATINATOR_CONFIG")]
        config: PathBuf,
    },

    /// Create a sample template, data sheet and config
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "templatinator=debug"
    } else {
        "templatinator=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> TemplatinatorResult<()> {
    match command {
        Commands::Generate {
            config,
            dry_run,
            verbose,
            strict_columns,
        } => cli::generate(config, dry_run, verbose, strict_columns),

        Commands::Inspect { config } => cli::inspect(config),

        Commands::Init { dir } => cli::init(dir),
    }
}

fn main() {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or_else(|| Commands::Generate {
        config: std::env::var_os("TEMPLATINATOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        dry_run: false,
        verbose: false,
        strict_columns: false,
    });

    init_tracing(matches!(command, Commands::Generate { verbose: true, .. }));

    if let Err(e) = run(command) {
        eprintln!("{} {}", "❌ Error:".bold().red(), e);
        std::process::exit(1);
    }
}
