//! CLI entry point for sysguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and
//! exit codes. All business logic lives in the `sysguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use sysguard_app::{
    AuditInput, SnapshotLookup, parse_report_json, render_annotations, render_markdown,
    run_audit, serialize_report, verdict_exit_code,
};
use sysguard_settings::Overrides;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sysguard",
    version,
    about = "Audit kernel parameters against tagged sysctl rule profiles"
)]
struct Cli {
    /// Path to sysguard config TOML (a missing file means defaults).
    #[arg(long, global = true, default_value = "sysguard.toml")]
    config: Utf8PathBuf,

    /// Rule file or directory of YAML profiles; repeatable. Replaces `rules` from config.
    #[arg(long = "rules", global = true)]
    rules: Vec<Utf8PathBuf>,

    /// Host identity matched against rule host patterns (e.g. "CentOS Linux-7").
    #[arg(long, global = true)]
    host: Option<String>,

    /// Glob over audit tags to evaluate.
    #[arg(long, global = true)]
    tags: Option<String>,

    /// Report full rule entries instead of tag summaries.
    #[arg(long, global = true)]
    verbose: bool,

    /// Record the source profile of every rule.
    #[arg(long, global = true)]
    show_profile: bool,

    /// Tag rollup (last_seen|first_failure).
    #[arg(long, global = true)]
    rollup: Option<String>,

    /// Raise log verbosity (-v debug, -vv trace). `SYSGUARD_LOG` takes precedence.
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    log_level: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate rules against a snapshot of parameter values and write artifacts.
    Audit {
        /// YAML/JSON mapping of parameter name to current value.
        #[arg(long)]
        values: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/sysguard/report.json")]
        report_out: Utf8PathBuf,

        /// Also write a Markdown summary here.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/sysguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations for failing tags from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/sysguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Print the JSON Schema of sysguard.toml.
    ConfigSchema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let result = match &cli.cmd {
        Commands::Audit {
            values,
            report_out,
            markdown_out,
        } => cmd_audit(&cli, values, report_out, markdown_out.as_deref()),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()).map(|()| 0),
        Commands::Annotations { report, max } => cmd_annotations(report, *max).map(|()| 0),
        Commands::ConfigSchema => cmd_config_schema().map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("sysguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(level: u8) {
    let default = match level {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("SYSGUARD_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_audit(
    cli: &Cli,
    values: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    // Missing config file is allowed (defaults apply).
    let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();
    let base_dir = match cli.config.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let cwd = std::env::current_dir().context("read current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd).context("current directory is not UTF-8")?;
    let overrides = Overrides {
        tags: cli.tags.clone(),
        host: cli.host.clone(),
        verbose: cli.verbose.then_some(true),
        show_profile: cli.show_profile.then_some(true),
        rollup: cli.rollup.clone(),
        rules: cli.rules.iter().map(|p| cwd.join(p).into_string()).collect(),
    };

    let values_text =
        std::fs::read_to_string(values).with_context(|| format!("read values: {values}"))?;
    let lookup = SnapshotLookup::from_text(&values_text)
        .with_context(|| format!("load values: {values}"))?;
    debug!(parameters = lookup.len(), "loaded value snapshot");

    let output = run_audit(AuditInput {
        config_text: &cfg_text,
        overrides,
        base_dir: &base_dir,
        lookup: &lookup,
    })?;

    let data = serialize_report(&output.report)?;
    write_text_file(report_out, &data).context("write report json")?;
    if let Some(md_path) = markdown_out {
        write_text_file(md_path, &render_markdown(&output.report)).context("write markdown")?;
    }

    let result =
        serde_json::to_string_pretty(&output.report.result).context("serialize result")?;
    println!("{result}");

    Ok(verdict_exit_code(&output.report))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {parent}"))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("write: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    for annotation in render_annotations(&report, max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_config_schema() -> anyhow::Result<()> {
    println!("{}", sysguard_settings::config_schema_json()?);
    Ok(())
}
