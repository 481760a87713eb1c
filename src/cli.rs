use crate::{
    config::Config,
    extract::Extracted,
    pipeline::Pipeline,
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "docprep", version)]
#[command(about = "Extract and normalize PDF/DOCX/XLSX/PPTX/EPUB documents into JSON records")]
pub struct Args {
    /// Defaults to `batch` over the configured input directory.
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Path to config TOML. If omitted, uses ./docprep.toml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize every supported file in a directory.
    Batch {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Normalize one file and print the record.
    Process {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the raw extraction of one file (tables stay structured).
    Extract {
        #[arg(long)]
        input: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    match &args.cmd {
        None => batch(&cfg, None, None),
        Some(Command::Batch { input, out_dir }) => batch(&cfg, input.as_deref(), out_dir.as_deref()),
        Some(Command::Process { input }) => process(&cfg, input),
        Some(Command::Extract { input }) => extract(&cfg, input),
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    match resolve_config_path(user) {
        Some(path) => Config::load(&path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("docprep.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output, so diagnostics go to stderr.
    let console_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(PathBuf::from(&cfg.paths.output_dir).join("docprep.log"))
}

fn batch(cfg: &Config, input: Option<&Path>, out_dir: Option<&Path>) -> Result<()> {
    let input_dir = input
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.input_dir));
    let output_dir = out_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.output_dir));

    info!(
        "batch input={} out={}",
        input_dir.display(),
        output_dir.display()
    );

    let pipeline = Pipeline::native(cfg);
    let processed = pipeline
        .process_folder(&input_dir, &output_dir)
        .with_context(|| format!("processing folder {}", input_dir.display()))?;

    if cfg.output.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "input_dir": input_dir,
                "output_dir": output_dir,
                "processed": processed,
            }))?
        );
    }

    Ok(())
}

fn process(cfg: &Config, input: &Path) -> Result<()> {
    let pipeline = Pipeline::native(cfg);
    let record = pipeline
        .process_one(input)
        .with_context(|| format!("processing {}", input.display()))?;
    println!("{}", record.to_json_pretty(cfg.output.indent)?);
    Ok(())
}

fn extract(cfg: &Config, input: &Path) -> Result<()> {
    let pipeline = Pipeline::native(cfg);
    let (kind, extracted) = pipeline
        .extract(input)
        .with_context(|| format!("extracting {}", input.display()))?;
    let content = match extracted {
        Extracted::Text(text) => serde_json::Value::String(text),
        Extracted::Tables(tables) => serde_json::to_value(&tables)?,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "file_type": kind,
            "content": content,
        }))?
    );
    Ok(())
}
