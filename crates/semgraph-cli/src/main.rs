//! Semgraph CLI
//!
//! Operator surface over the semantic graph engine:
//! - Linting a catalog (`check`)
//! - Resolving (table, column, intent) triples (`resolve`, `compare`)
//! - Ranking intents for a field set (`score`) or raw query text (`infer`)
//! - Compiling build-order manifests into query text (`solder`)
//! - Cross-dialect renderings of one resolution path (`dialects`)
//! - A built-in walkthrough on the sample catalog (`demo`)

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use semgraph_catalog::{sample, GraphSnapshot, GraphStore, InMemoryCatalog, JsonCatalogReader};
use semgraph_core::FieldRef;
use semgraph_resolve::{compare_query_plans, infer_intents, resolve, score_intents, QueryPlan};
use semgraph_solder::{compile_dialects, solder, BuildManifest};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "semgraph")]
#[command(
    author,
    version,
    about = "Semgraph: semantic graph resolution and query compilation"
)]
struct Cli {
    /// Emit machine-readable JSON instead of human output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a catalog and report graph statistics; any integrity
    /// violation fails the load.
    Check {
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Resolve one (table, column, intent) triple to its canonical
    /// business meaning.
    Resolve {
        #[arg(long)]
        catalog: PathBuf,
        table: String,
        column: String,
        intent: String,
        /// Disambiguates when the pair is valid under several
        /// perspectives.
        #[arg(long)]
        perspective: Option<String>,
    },

    /// Resolve under every perspective the pair is valid in, one plan
    /// per perspective.
    Compare {
        #[arg(long)]
        catalog: PathBuf,
        table: String,
        column: String,
        intent: String,
    },

    /// Rank intents against an explicit field set (`table.column`
    /// tokens).
    Score {
        #[arg(long)]
        catalog: PathBuf,
        /// Fields as `table.column`.
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Extract a field set from raw query text and rank intents.
    Infer {
        #[arg(long)]
        catalog: PathBuf,
        text: String,
    },

    /// Compile a build-order manifest (JSON file) into query text.
    Solder {
        #[arg(long)]
        manifest: PathBuf,
    },

    /// Render one resolution path in relational, property-graph, and
    /// document-graph dialects.
    Dialects {
        #[arg(long)]
        catalog: PathBuf,
        table: String,
        column: String,
        intent: String,
        #[arg(long)]
        perspective: Option<String>,
    },

    /// Walk through the built-in quality-domain sample catalog.
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { catalog } => cmd_check(&catalog, cli.json),
        Commands::Resolve {
            catalog,
            table,
            column,
            intent,
            perspective,
        } => {
            let snapshot = load(&catalog)?;
            let plan = resolve(&snapshot, &table, &column, &intent, perspective.as_deref())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
            Ok(())
        }
        Commands::Compare {
            catalog,
            table,
            column,
            intent,
        } => {
            let snapshot = load(&catalog)?;
            let plans = compare_query_plans(&snapshot, &table, &column, &intent)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
            } else {
                for plan in &plans {
                    print_plan(plan);
                }
            }
            Ok(())
        }
        Commands::Score { catalog, fields } => {
            let snapshot = load(&catalog)?;
            let fields = parse_fields(&fields)?;
            let report = score_intents(&snapshot, &fields);
            print_report(&report, cli.json)
        }
        Commands::Infer { catalog, text } => {
            let snapshot = load(&catalog)?;
            let report = infer_intents(&snapshot, &text);
            print_report(&report, cli.json)
        }
        Commands::Solder { manifest } => {
            let text = fs::read_to_string(&manifest)
                .with_context(|| format!("reading {}", manifest.display()))?;
            let manifest: BuildManifest =
                serde_json::from_str(&text).context("parsing build manifest")?;
            println!("{}", solder(&manifest)?);
            Ok(())
        }
        Commands::Dialects {
            catalog,
            table,
            column,
            intent,
            perspective,
        } => {
            let snapshot = load(&catalog)?;
            let plan = resolve(&snapshot, &table, &column, &intent, perspective.as_deref())?;
            let renderings = compile_dialects(&plan);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&renderings)?);
            } else {
                println!("{}\n{}\n", "relational:".bold(), renderings.relational);
                println!("{}\n{}\n", "property-graph:".bold(), renderings.property_graph);
                println!("{}\n{}", "document-graph:".bold(), renderings.document_graph);
            }
            Ok(())
        }
        Commands::Demo => cmd_demo(cli.json),
    }
}

fn load(catalog: &PathBuf) -> Result<std::sync::Arc<GraphSnapshot>> {
    let store = GraphStore::new(JsonCatalogReader::new(catalog));
    Ok(store.snapshot()?)
}

fn parse_fields(tokens: &[String]) -> Result<Vec<FieldRef>> {
    tokens
        .iter()
        .map(|token| {
            FieldRef::parse(token)
                .ok_or_else(|| anyhow!("`{token}` is not a `table.column` reference"))
        })
        .collect()
}

fn cmd_check(catalog: &PathBuf, json: bool) -> Result<()> {
    let snapshot = load(catalog)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "intents": snapshot.intent_count(),
                "perspectives": snapshot.perspective_count(),
                "concepts": snapshot.concept_count(),
                "field_bindings": snapshot.binding_count(),
                "elevations": snapshot.elevation_count(),
            })
        );
    } else {
        println!("{} catalog is well-formed", "ok:".green().bold());
        println!("  intents:        {}", snapshot.intent_count());
        println!("  perspectives:   {}", snapshot.perspective_count());
        println!("  concepts:       {}", snapshot.concept_count());
        println!("  field bindings: {}", snapshot.binding_count());
        println!("  elevations:     {}", snapshot.elevation_count());
    }
    Ok(())
}

fn print_plan(plan: &QueryPlan) {
    let field = plan
        .field()
        .map(|field| field.to_string())
        .unwrap_or_default();
    println!(
        "{} {} {} {}",
        field.cyan(),
        "under".dimmed(),
        plan.intent.bold(),
        format!("({})", plan.perspective).dimmed()
    );
    match plan.resolved_concept() {
        Some(concept) => println!("  {} {}", "->".green(), concept.name.bold()),
        None => println!("  {} unresolved (no opinion)", "->".yellow()),
    }
    for concept in &plan.suppressed_concepts {
        println!("  {} {}", "suppressed:".dimmed(), concept.name);
    }
    if !plan.suggested_joins.is_empty() {
        println!("  {} {}", "joins:".dimmed(), plan.suggested_joins.join(", "));
    }
    println!("  {}", plan.explanation.dimmed());
}

fn print_report(report: &semgraph_resolve::ScoreReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    if report.ranked.is_empty() {
        println!("{}", "no matching intents".yellow());
    }
    for score in &report.ranked {
        println!(
            "{:>6.3}  {}  {}",
            score.confidence,
            score.intent.bold(),
            score.explanation.dimmed()
        );
    }
    for note in &report.field_notes {
        println!("{} {}: {}", "note:".yellow(), note.field, note.note);
    }
    Ok(())
}

fn cmd_demo(json: bool) -> Result<()> {
    let store = GraphStore::new(InMemoryCatalog::new(sample::quality_demo()));
    let snapshot = store.snapshot()?;

    println!("{}", "== resolution: two perspectives, one field ==".bold());
    for perspective in ["Quality", "Finance"] {
        let plan = resolve(
            &snapshot,
            "non_conformant_materials",
            "severity",
            "audit",
            Some(perspective),
        )?;
        if json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(&plan);
        }
    }

    println!("\n{}", "== scoring: supplier fields ==".bold());
    let report = score_intents(
        &snapshot,
        &[
            FieldRef::new("suppliers", "ontime_rate"),
            FieldRef::new("suppliers", "contract_value"),
        ],
    );
    print_report(&report, json)?;

    println!("\n{}", "== solder: hashed dimension filter ==".bold());
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Quality"),
    )?;
    let manifest = BuildManifest {
        target_schema: "quality_mart".to_string(),
        model_name: "non_conformant_materials".to_string(),
        alias: "ncm".to_string(),
        concept: plan
            .resolved_concept()
            .ok_or_else(|| anyhow!("demo plan should resolve"))?
            .clone(),
        projections: vec![
            semgraph_solder::Projection::column("ncm_id"),
            semgraph_solder::Projection::column("defect_description"),
            semgraph_solder::Projection::column("severity"),
        ],
        parameters: std::collections::BTreeMap::from([(
            "product_line".to_string(),
            "Electronics".to_string(),
        )]),
    };
    println!("{}", solder(&manifest)?);

    println!("\n{}", "== dialects ==".bold());
    let renderings = compile_dialects(&plan);
    println!("{}", renderings.relational);
    println!("{}", renderings.property_graph);
    println!("{}", renderings.document_graph);
    Ok(())
}
