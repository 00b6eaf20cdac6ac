use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use funcgen_core::{FunctionRegistry, Manifest};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "funcgen")]
#[command(about = "Inspect function registration manifests: pruning, emission order and output")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the emission order
    Order {
        manifest: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Render the extracted functions as FunC
    Emit {
        manifest: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Group functions by placement section
        #[arg(long)]
        grouped: bool,

        /// Leave a comment where a placeholder would have been emitted
        #[arg(long)]
        annotate_placeholders: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print pruned functions, dangling references and skipped cyclic dependencies
    Report {
        manifest: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Order { manifest, json } => cmd_order(&manifest, json),
        Commands::Emit {
            manifest,
            output,
            grouped,
            annotate_placeholders,
            json,
        } => cmd_emit(&manifest, output, grouped, annotate_placeholders, json),
        Commands::Report { manifest, json } => cmd_report(&manifest, json),
    }
}

fn load_registry(path: &Path) -> Result<FunctionRegistry> {
    let manifest = Manifest::from_path(path)
        .with_context(|| format!("failed to load manifest {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        registrations = manifest.functions.len(),
        "loaded manifest"
    );
    Ok(manifest.into_registry()?)
}

fn cmd_order(manifest: &Path, json: bool) -> Result<()> {
    let registry = load_registry(manifest)?;
    let functions = registry.extract();

    if json {
        println!("{}", funcgen_emit::output::to_json(&functions)?);
    } else {
        for function in functions {
            println!("{}", function.name);
        }
    }

    Ok(())
}

fn cmd_emit(
    manifest: &Path,
    output: Option<PathBuf>,
    grouped: bool,
    annotate_placeholders: bool,
    json: bool,
) -> Result<()> {
    use colored::*;
    use funcgen_emit::{EmitterConfig, FuncEmitter, OutputFormat};
    use std::fs;

    let registry = load_registry(manifest)?;
    let config = EmitterConfig {
        group_by_placement: grouped,
        annotate_placeholders,
        ..EmitterConfig::default()
    };
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let emitter = FuncEmitter::new(registry.extract()).with_config(config);
    let rendered = emitter.render(format)?;

    if let Some(output_path) = output {
        fs::write(&output_path, &rendered)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!(
            " {} Wrote {}",
            "SUCCESS:".bright_green().bold(),
            output_path.display()
        );
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

fn cmd_report(manifest: &Path, json: bool) -> Result<()> {
    use colored::*;

    let registry = load_registry(manifest)?;
    let extraction = registry.extract_report();
    let report = &extraction.report;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", " Extraction Report".bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_cyan());
    println!("Registered: {}", registry.len());
    println!("Emitted: {}", extraction.functions.len());

    println!(
        "\n{}",
        format!("Pruned ({})", report.pruned.len()).bright_yellow()
    );
    for name in &report.pruned {
        println!("  {}", name);
    }

    println!(
        "\n{}",
        format!("Dangling references ({})", report.dangling.len()).bright_yellow()
    );
    for edge in &report.dangling {
        println!("  {} -> {}", edge.caller, edge.callee);
    }

    println!(
        "\n{}",
        format!("Cyclic dependencies skipped ({})", report.back_edges.len()).bright_yellow()
    );
    for edge in &report.back_edges {
        println!("  {} -> {}", edge.caller, edge.callee);
    }

    Ok(())
}
