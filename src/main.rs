//! Kosei CLI - Japanese text proofreading linter

use clap::{Parser, ValueEnum};
use colored::Colorize;
use kosei::config::{ColorMode, EngineConfig, OutputFormat};
use kosei::engine::Engine;
use kosei::output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
use kosei::rule::RuleSet;
use kosei::source::SourceText;
use kosei::Severity;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Rule packs compiled into the binary; used unless --rules-dir points
/// elsewhere.
const LEXICAL_RULES: &str = include_str!("../rules/lexical.yaml");
const EXPRESSION_RULES: &str = include_str!("../rules/expression.yaml");
const CONTEXT_RULES: &str = include_str!("../rules/context.yaml");

#[derive(Parser)]
#[command(
    name = "kosei",
    version,
    about = "Japanese Text Proofreading Linter",
    long_about = "A fast, rule-driven proofreading linter for Japanese text. \
Checks typos, wording and style, and contextual structure."
)]
struct Cli {
    /// Files to check (reads stdin when omitted)
    files: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (defaults to the configured format, or text)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable specific rules (comma-separated subtype ids)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// Directory with custom rule packs (lexical.yaml, expression.yaml,
    /// context.yaml)
    #[arg(long)]
    rules_dir: Option<PathBuf>,

    /// Skip the lexical (typo) checks
    #[arg(long)]
    no_lexical: bool,

    /// Skip the expression/style checks
    #[arg(long)]
    no_expression: bool,

    /// Skip the contextual/structural checks
    #[arg(long)]
    no_context: bool,

    /// Show statistics and quality score
    #[arg(long)]
    stats: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Exit with 0 even if issues are found
    #[arg(long)]
    exit_zero: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    Low,
    Medium,
    High,
}

impl From<MinSeverity> for Severity {
    fn from(min: MinSeverity) -> Self {
        match min {
            MinSeverity::Low => Severity::Low,
            MinSeverity::Medium => Severity::Medium,
            MinSeverity::High => Severity::High,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if cli.verbose { "debug" } else { "warn" },
    ))
    .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = build_config(&cli)?;

    match config.output.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let lexical = load_rules(&config, "lexical.yaml", LEXICAL_RULES);
    let expression = load_rules(&config, "expression.yaml", EXPRESSION_RULES);
    let context = load_rules(&config, "context.yaml", CONTEXT_RULES);

    if cli.list_rules {
        list_rules(&lexical, &expression, &context);
        return Ok(0);
    }

    let formatter: Box<dyn OutputFormatter> = match config.output.format {
        OutputFormat::Text => {
            let mut f = TextFormatter::new();
            f.show_stats = config.output.stats;
            Box::new(f)
        }
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
    };

    let engine = Engine::new(config, lexical, expression, context);

    let sources = collect_sources(&cli.files)?;
    let mut exit_code = 0;
    for source in &sources {
        let run = engine.check(source)?;
        let rendered = formatter.format(&run);
        print!("{}", rendered);
        // the json formatter ends without a trailing newline
        if !rendered.is_empty() && !rendered.ends_with('\n') {
            println!();
        }
        exit_code = exit_code.max(run.exit_code());
    }

    Ok(if cli.exit_zero { 0 } else { exit_code })
}

/// File config merged with CLI overrides; CLI wins
fn build_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_default()?,
    };

    if cli.jobs != 0 {
        config.jobs = cli.jobs;
    }
    if let Some(format) = cli.format {
        config.output.format = match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Compact => OutputFormat::Compact,
        };
    }
    if let Some(disable) = &cli.disable {
        config.rules.disabled.extend(disable.iter().cloned());
    }
    if let Some(rules_dir) = &cli.rules_dir {
        config.rules.rules_dir = Some(rules_dir.clone());
    }
    if let Some(min) = cli.min_severity {
        config.output.min_severity = Some(min.into());
    }
    if cli.stats {
        config.output.stats = true;
    }
    if cli.no_color {
        config.output.color = ColorMode::Never;
    }
    if cli.no_lexical {
        config.checks.lexical = false;
    }
    if cli.no_expression {
        config.checks.expression = false;
    }
    if cli.no_context {
        config.checks.context = false;
    }

    Ok(config)
}

/// Load one family rule pack
///
/// With --rules-dir the file is loaded from disk; a broken file degrades
/// that family to an empty set so the other families still run. Without it
/// the embedded pack is used.
fn load_rules(config: &EngineConfig, file_name: &str, embedded: &str) -> Arc<RuleSet> {
    let set = match &config.rules.rules_dir {
        Some(dir) => RuleSet::load(&dir.join(file_name)).unwrap_or_else(|e| {
            log::error!("failed to load {}: {}; family disabled", file_name, e);
            RuleSet::default()
        }),
        None => RuleSet::from_yaml(embedded).unwrap_or_else(|e| {
            log::error!("embedded rule pack {} is broken: {}", file_name, e);
            RuleSet::default()
        }),
    };
    Arc::new(set)
}

/// Read all inputs; stdin when no files were given
fn collect_sources(files: &[PathBuf]) -> anyhow::Result<Vec<SourceText>> {
    if files.is_empty() {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(vec![SourceText::new("<stdin>", content)]);
    }

    files
        .iter()
        .map(|path| Ok(SourceText::from_path(path)?))
        .collect()
}

fn list_rules(lexical: &RuleSet, expression: &RuleSet, context: &RuleSet) {
    for (family, set) in [
        ("lexical", lexical),
        ("expression", expression),
        ("context", context),
    ] {
        println!("{} ({} rules)", family.bold(), set.len());
        for (group, rule) in set.iter() {
            let severity = rule
                .severity()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "default".to_string());
            println!("    {} ({}) [{}]", rule.subtype.cyan(), group, severity);
            if !rule.description().is_empty() {
                println!("      {}", rule.description());
            }
        }
        println!();
    }
}
