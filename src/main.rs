use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use token_conv::ast::Target;
use token_conv::error::GenerateError;
use token_conv::generator::TokenGenerator;
use token_conv::output::{read_source, write_artifacts, OutputLayout, DEFAULT_TOKENS};

/// Design token converter - generates CSS, TypeScript and Dart from tokens.json
#[derive(Parser, Debug)]
#[command(name = "token-conv", version)]
#[command(about = "Generate platform sources from a design-token document")]
struct Cli {
    /// Project root; outputs are written relative to it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Token document (defaults to <root>/design-tokens/tokens.json)
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Targets to generate (repeatable; defaults to all)
    #[arg(short = 't', long = "target", value_enum)]
    targets: Vec<Target>,

    /// Stylesheet path, relative to the root
    #[arg(long, value_name = "PATH")]
    css_out: Option<PathBuf>,

    /// TypeScript module path, relative to the root
    #[arg(long, value_name = "PATH")]
    ts_out: Option<PathBuf>,

    /// Dart constants path, relative to the root
    #[arg(long, value_name = "PATH")]
    dart_out: Option<PathBuf>,

    /// Print artifacts to the console instead of writing them
    #[arg(long)]
    stdout: bool,

    /// Leave out the "Last generated" line
    #[arg(long)]
    no_timestamp: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.compact().init(),
    }
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    let tokens_path = cli.tokens.unwrap_or_else(|| cli.root.join(DEFAULT_TOKENS));
    let targets = if cli.targets.is_empty() {
        Target::ALL.to_vec()
    } else {
        let mut targets = cli.targets;
        targets.sort();
        targets.dedup();
        targets
    };

    let mut generator = TokenGenerator::new();
    if !cli.no_timestamp {
        generator = generator.with_timestamp(Utc::now());
    }

    info!(tokens = %tokens_path.display(), "reading design tokens");
    let source = read_source(&tokens_path)?;
    let document = generator.parse(&source)?;

    // Every artifact is assembled before anything touches the disk
    let artifacts = generator.generate_all(&document, &targets)?;

    if cli.stdout {
        for artifact in &artifacts {
            print!("{}", artifact.contents);
        }
        return Ok(());
    }

    let mut layout = OutputLayout::new(&cli.root);
    for (target, path) in [
        (Target::Css, cli.css_out),
        (Target::TypeScript, cli.ts_out),
        (Target::Dart, cli.dart_out),
    ] {
        if let Some(path) = path {
            layout = layout.with_path(target, path);
        }
    }
    let written = write_artifacts(&artifacts, &layout)?;
    for (artifact, path) in artifacts.iter().zip(&written) {
        println!("{} tokens written to '{}'", artifact.target, path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    if let Err(e) = run(cli) {
        error!(kind = ?e.kind(), "{}", e);
        process::exit(1);
    }
}
