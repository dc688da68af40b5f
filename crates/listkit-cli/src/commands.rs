use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use listkit_batch::{build_candidates, BatchConfig, BatchUpdateData, ReconcileReport, Reconciler};
use listkit_diff::{diff, DiffResult};

use crate::cli::*;
use crate::snapshot::{self, Element, SnapshotSection};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Command::Diff(args) => cmd_diff(&args, cli.format)?,
        Command::Batch(args) => cmd_batch(&args, cli.format)?,
        Command::Config(args) => cmd_config(&args, cli.format)?,
    };
    println!("{output}");
    Ok(())
}

fn cmd_diff(args: &DiffArgs, format: OutputFormat) -> anyhow::Result<String> {
    let old: Vec<Element> = snapshot::load(&args.old)?;
    let new: Vec<Element> = snapshot::load(&args.new)?;
    debug!(old = old.len(), new = new.len(), "loaded flat snapshots");

    let mut result = diff(&old, &new);
    if args.batch_updates {
        result = result.for_batch_updates();
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Ok(render_diff(&old, &new, &result)),
    }
}

fn render_diff(old: &[Element], new: &[Element], result: &DiffResult<String>) -> String {
    if !result.has_changes() {
        return "No changes.".into();
    }

    let mut lines = vec![format!(
        "{} deletes, {} inserts, {} moves, {} updates",
        result.deletes.len().to_string().bold(),
        result.inserts.len().to_string().bold(),
        result.moves.len().to_string().bold(),
        result.updates.len().to_string().bold(),
    )];
    for &i in &result.deletes {
        lines.push(format!("  {} {i:<8} {}", "-".red().bold(), old[i].id));
    }
    for &j in &result.inserts {
        lines.push(format!("  {} {j:<8} {}", "+".green().bold(), new[j].id));
    }
    for mv in &result.moves {
        let span = mv.to_string();
        lines.push(format!("  {} {span:<8} {}", "~".yellow().bold(), old[mv.from].id));
    }
    for id in &result.updates {
        lines.push(format!("  {} {:<8} {id}", "*".cyan().bold(), ""));
    }
    lines.join("\n")
}

fn cmd_batch(args: &BatchArgs, format: OutputFormat) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BatchConfig::default(),
    };
    let old: Vec<SnapshotSection> = snapshot::load(&args.old)?;
    let new: Vec<SnapshotSection> = snapshot::load(&args.new)?;

    let reconciler = Reconciler::new(config);
    let candidates = build_candidates(&old, &new, reconciler.config());
    let (batch, report) = reconciler.reconcile_with_report(&candidates);
    batch
        .validate()
        .context("reconciled batch violates its invariants")?;

    match format {
        OutputFormat::Json if args.explain => Ok(serde_json::to_string_pretty(&json!({
            "batch": batch,
            "candidates": candidates,
            "report": report,
        }))?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&batch)?),
        OutputFormat::Text => {
            let mut out = render_batch(&batch);
            if args.explain {
                out.push('\n');
                out.push_str(&render_report(&report));
            }
            Ok(out)
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<BatchConfig> {
    BatchConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

fn render_batch(batch: &BatchUpdateData) -> String {
    if batch.is_empty() {
        return "No changes.".into();
    }

    let mut lines = vec![format!("{} operations", batch.change_count().to_string().bold())];
    let mut push = |label: &str, values: Vec<String>| {
        if !values.is_empty() {
            lines.push(format!("  {label:<16} {}", values.join(", ")));
        }
    };
    push(
        "delete sections",
        batch.delete_sections().iter().map(|s| s.to_string().red().to_string()).collect(),
    );
    push(
        "insert sections",
        batch.insert_sections().iter().map(|s| s.to_string().green().to_string()).collect(),
    );
    push(
        "move sections",
        batch.move_sections().iter().map(|m| m.to_string().yellow().to_string()).collect(),
    );
    push(
        "delete items",
        batch.delete_item_paths().iter().map(|p| p.to_string().red().to_string()).collect(),
    );
    push(
        "insert items",
        batch.insert_item_paths().iter().map(|p| p.to_string().green().to_string()).collect(),
    );
    push(
        "move items",
        batch.move_item_paths().iter().map(|m| m.to_string().yellow().to_string()).collect(),
    );
    lines.join("\n")
}

fn render_report(report: &ReconcileReport) -> String {
    let mut lines = vec![format!(
        "{} ({} downgraded, {} dropped)",
        "Reconciliation".bold(),
        report.downgraded(),
        report.dropped()
    )];
    for rule in &report.rules {
        let status = if rule.is_noop() {
            "clean".dimmed().to_string()
        } else {
            format!("{} downgraded, {} dropped", rule.downgraded, rule.dropped)
                .yellow()
                .to_string()
        };
        lines.push(format!("  {:<24} {status}", rule.rule));
    }
    lines.join("\n")
}

fn cmd_config(args: &ConfigArgs, format: OutputFormat) -> anyhow::Result<String> {
    let config = if args.strict {
        BatchConfig::strict()
    } else {
        BatchConfig::default()
    };
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => Ok(config.to_toml_string()?.trim_end().to_string()),
    }
}
