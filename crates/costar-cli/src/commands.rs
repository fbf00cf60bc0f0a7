//! CLI command implementations.

use crate::loader;
use crate::InputArgs;
use colored::Colorize;
use costar_graph::{run_bfs, CollabGraph, GraphBuilder, GraphError, QuerySession};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Loads the input files and builds the collaboration graph.
fn build_graph(input: &InputArgs) -> Result<CollabGraph> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Reading records...");

    let start = Instant::now();
    let entities = loader::load_name_table(&input.entities)?;
    let groups = loader::load_name_table(&input.groups)?;
    let memberships = loader::load_memberships(&input.memberships)?;
    debug!(
        entities = entities.len(),
        groups = groups.len(),
        memberships = memberships.len(),
        "records loaded"
    );

    spinner.set_message("Building graph...");
    let mut builder = GraphBuilder::new(entities, groups);
    builder.add_memberships(memberships);
    let outcome = builder.build()?;

    spinner.finish_and_clear();

    println!(
        "{} Built graph with {} entities and {} edges in {}ms",
        "✓".green(),
        outcome.graph.vertex_count().to_string().cyan(),
        outcome.graph.edge_count().to_string().cyan(),
        start.elapsed().as_millis()
    );

    if !outcome.skipped.is_empty() {
        println!(
            "{} {} membership records referenced unknown ids:",
            "⚠".yellow(),
            outcome.skipped.len()
        );
        for record in outcome.skipped.iter().take(5) {
            println!("  {}|{}", record.group_id.red(), record.entity_id.red());
        }
        if outcome.skipped.len() > 5 {
            println!("  ... and {} more", outcome.skipped.len() - 5);
        }
    }

    Ok(outcome.graph)
}

/// Build the graph and answer queries interactively.
pub fn play(input: &InputArgs, root: &str) -> Result<()> {
    let graph = build_graph(input)?;
    let tree = run_bfs(&graph, root)?;
    let session = QuerySession::new(&graph, &tree);

    println!(
        "{} Measuring distances from {}",
        "✓".green(),
        session.root().cyan()
    );
    println!("Press return on an empty line to quit.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter the name of an entity: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let name = line?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }
        answer(&session, name)?;
        println!();
    }

    Ok(())
}

/// Answers one interactive query. `UnknownEntity` and `Unreachable` are
/// reported and the session continues; anything else is an internal
/// failure and propagates.
fn answer(session: &QuerySession, name: &str) -> Result<()> {
    match session.separation(name) {
        Ok(sep) if sep.hops == 0 => {
            println!("{}'s number is 0", session.root());
            println!("{} appears in all of their own groups.", session.root());
        }
        Ok(sep) => {
            println!("{}", sep.summary());
            for step in &sep.steps {
                println!(
                    "{} appeared in {} with {}",
                    step.from.cyan(),
                    step.group.yellow(),
                    step.to.cyan()
                );
            }
        }
        Err(GraphError::UnknownEntity(_)) => {
            println!("{} is not in our graph. Try another name.", name);
        }
        Err(GraphError::Unreachable(_)) => {
            println!(
                "Oops! {} does not have a {} number.",
                name,
                session.root()
            );
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Answer a single query and exit.
pub fn path(input: &InputArgs, root: &str, target: &str, json: bool) -> Result<()> {
    let graph = build_graph(input)?;
    let tree = run_bfs(&graph, root)?;
    let session = QuerySession::new(&graph, &tree);

    match session.separation(target) {
        Ok(sep) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&sep)?);
            } else {
                println!("{}", sep.summary());
                for step in &sep.steps {
                    println!(
                        "{} appeared in {} with {}",
                        step.from.cyan(),
                        step.group.yellow(),
                        step.to.cyan()
                    );
                }
            }
            Ok(())
        }
        Err(e @ (GraphError::UnknownEntity(_) | GraphError::Unreachable(_))) => {
            if json {
                let output = serde_json::json!({
                    "target": target,
                    "error": e.to_string()
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(())
            } else {
                Err(e.into())
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Show graph statistics after a build.
pub fn stats(input: &InputArgs) -> Result<()> {
    let graph = build_graph(input)?;
    let stats = graph.stats();

    println!("{}", "Costar Status".cyan().bold());
    println!();
    println!("  {} {}", "Entities:".dimmed(), stats.vertex_count);
    println!("  {} {}", "Edges:".dimmed(), stats.edge_count);

    Ok(())
}

/// Export the graph to JSON.
pub fn export(input: &InputArgs, output: &Path) -> Result<()> {
    let graph = build_graph(input)?;

    let export = serde_json::json!({
        "version": "1.0",
        "stats": {
            "vertexCount": graph.vertex_count(),
            "edgeCount": graph.edge_count()
        },
        "vertices": graph.vertices().collect::<Vec<_>>(),
        "edges": graph.export_edges()
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}
