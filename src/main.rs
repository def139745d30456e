// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use member_import::utils::logging::{
    format_error, format_error_list, format_info, format_step, format_success, format_warning,
};
use member_import::{
    ChapterDirectory, Config, HealthCheck, HealthStatus, ImportPipeline, ImportReport,
    InMemoryMembershipStore, JsonExporter, MemberCreator, ProgressTracker, RestMembershipStore,
    SheetFormat, SpreadsheetDecoder, Validator, write_template,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

const SLOW_STORE_THRESHOLD: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "member_import")]
#[command(version = "0.1.0")]
#[command(about = "Bulk member import for the membership back-office", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateFormat {
    Xlsx,
    Csv,
}

impl From<TemplateFormat> for SheetFormat {
    fn from(format: TemplateFormat) -> Self {
        match format {
            TemplateFormat::Xlsx => SheetFormat::Xlsx,
            TemplateFormat::Csv => SheetFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the import template with the expected headers and an example row
    Template {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<TemplateFormat>,
    },

    /// Decode and validate a file without creating any member
    Validate {
        file: PathBuf,

        /// Show every defect instead of the configured limit
        #[arg(long)]
        all: bool,
    },

    /// Validate a file and create every valid row in the membership store
    Import {
        file: PathBuf,

        /// Validate against the live chapter directory but commit into memory only
        #[arg(long)]
        dry_run: bool,

        #[arg(long, value_name = "DIR")]
        report_dir: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// List the chapter directory used for validation
    Chapters,

    /// Check that the membership store is reachable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    member_import::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Template { output, format } => {
            cmd_template(&config, output, format)?;
        }
        Commands::Validate { file, all } => {
            cmd_validate(&config, &file, all).await?;
        }
        Commands::Import {
            file,
            dry_run,
            report_dir,
            pretty,
        } => {
            cmd_import(&config, &file, dry_run, report_dir, pretty, cli.color).await?;
        }
        Commands::Chapters => {
            cmd_chapters(&config).await?;
        }
        Commands::Check => {
            cmd_check(&config).await?;
        }
    }

    Ok(())
}

fn cmd_template(
    config: &Config,
    output: Option<PathBuf>,
    format: Option<TemplateFormat>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.import.template_path.clone());

    let format = match format {
        Some(format) => format.into(),
        None => output
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SheetFormat::from_extension)
            .unwrap_or(SheetFormat::Xlsx),
    };

    write_template(&output, format).context("Failed to write template")?;
    println!(
        "{}",
        format_success(&format!("Template downloaded to {}", output.display()))
    );

    Ok(())
}

fn read_upload(config: &Config, file: &Path) -> Result<(Vec<u8>, SheetFormat)> {
    Validator::validate_file_path(file)?;

    let metadata = fs::metadata(file)
        .with_context(|| format!("Failed to stat {}", file.display()))?;
    Validator::validate_file_size(metadata.len(), config.import.max_file_size_mb)?;

    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let format = SheetFormat::detect(file, &bytes)?;

    info!(
        "Read {} ({} bytes, {} format)",
        file.display(),
        bytes.len(),
        format
    );
    Ok((bytes, format))
}

async fn cmd_validate(config: &Config, file: &Path, all: bool) -> Result<()> {
    let (bytes, format) = read_upload(config, file)?;

    let store = RestMembershipStore::new(config.store.clone())?;
    let chapters = store
        .list_chapters()
        .await
        .context("Failed to load chapter directory")?;

    let decoder = SpreadsheetDecoder::new(format);
    let report = ImportPipeline::new(&decoder, &store).validate(&bytes, &chapters)?;

    println!(
        "{}",
        format_info(&format!(
            "{} rows read: {} valid, {} invalid",
            report.total_rows,
            report.valid.len(),
            report.invalid_rows
        ))
    );

    if report.defects.is_empty() {
        println!("{}", format_success("All rows passed validation"));
        return Ok(());
    }

    let messages = report.error_messages();
    let limit = if all {
        messages.len()
    } else {
        config.import.error_display_limit
    };
    let shown = messages.len().min(limit);
    println!("{}", format_warning("Errors:"));
    println!(
        "{}",
        format_error_list(&messages[..shown], messages.len() - shown)
    );

    Ok(())
}

async fn cmd_import(
    config: &Config,
    file: &Path,
    dry_run: bool,
    report_dir: Option<PathBuf>,
    pretty: bool,
    color: bool,
) -> Result<()> {
    println!("{}", format_step(1, 3, "Reading file"));
    let (bytes, format) = read_upload(config, file)?;

    println!("{}", format_step(2, 3, "Loading chapter directory"));
    let store = RestMembershipStore::new(config.store.clone())?;
    let chapters = store
        .list_chapters()
        .await
        .context("Failed to load chapter directory")?;
    info!("Validating against {} chapters", chapters.len());

    let dry_run_store = InMemoryMembershipStore::new(chapters.clone());
    let creator: &dyn MemberCreator = if dry_run {
        warn!("Dry run: members are created in memory only");
        &dry_run_store
    } else {
        &store
    };

    println!("{}", format_step(3, 3, "Importing members"));
    let decoder = SpreadsheetDecoder::new(format);
    let tracker = ProgressTracker::with_color(color);

    let outcome = ImportPipeline::new(&decoder, creator)
        .with_progress(&tracker)
        .run_import(&bytes, &chapters)
        .await;
    let result = match outcome {
        Ok(result) => {
            tracker.finish();
            result
        }
        Err(e) => {
            tracker.abandon("Import aborted");
            error!("Import failed: {}", e);
            println!("{}", format_error(&format!("Import failed: {}", e)));
            return Err(e.into());
        }
    };

    println!("\nImport Results:");
    if result.success > 0 {
        println!("{}", format_success(&result.summary()));
        if result.failed > 0 {
            println!(
                "{}",
                format_info(&format!("Success rate: {:.1}%", result.success_rate()))
            );
        }
    } else {
        println!("{}", format_warning("No members were imported."));
    }

    if result.failed > 0 {
        println!(
            "{}",
            format_error(&format!("Failed to import: {} members", result.failed))
        );
        let (shown, hidden) = result.visible_errors(config.import.error_display_limit);
        if !shown.is_empty() {
            println!("Errors:");
            println!("{}", format_error_list(shown, hidden));
        }
    }

    if let Some(dir) = report_dir {
        let exporter = JsonExporter::new(dir)?;
        let report = ImportReport::new(file.display().to_string(), dry_run, result);
        let path = exporter.export(&report, pretty)?;
        println!(
            "{}",
            format_info(&format!("Report written to {}", path.display()))
        );
    }

    Ok(())
}

async fn cmd_chapters(config: &Config) -> Result<()> {
    let store = RestMembershipStore::new(config.store.clone())?;
    let chapters = store
        .list_chapters()
        .await
        .context("Failed to load chapter directory")?;

    if chapters.is_empty() {
        println!("{}", format_warning("No chapters found"));
        return Ok(());
    }

    println!("\n{} chapter(s)\n", chapters.len());
    for chapter in &chapters {
        match chapter.member_count {
            Some(count) => println!("  {:<30} {:<9} {} members", chapter.name, chapter.status, count),
            None => println!("  {:<30} {}", chapter.name, chapter.status),
        }
    }

    Ok(())
}

async fn cmd_check(config: &Config) -> Result<()> {
    info!("Checking membership store at {}", config.store.url);

    let store = RestMembershipStore::new(config.store.clone())?;
    let check = HealthCheck::from_probe(
        "membership store",
        store.ping().await,
        SLOW_STORE_THRESHOLD,
    );
    println!("{}", check.format());

    if check.status == HealthStatus::Unhealthy {
        return Err(anyhow::anyhow!("Membership store is unreachable"));
    }

    Ok(())
}
