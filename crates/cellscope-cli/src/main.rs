//! Cellscope CLI - formula dependency tracing tool

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cellscope_core::CellStore;
use cellscope_trace::{
    resolve_with_options, to_edges, DependencyTree, NodeId, ResolveOptions,
};
use cellscope_xlsx::XlsxReader;

#[derive(Parser)]
#[command(name = "cellscope")]
#[command(author, version, about = "Spreadsheet formula dependency tracer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a cell's dependency tree and render an interactive graph
    Trace {
        /// Input workbook file (xlsx)
        input: PathBuf,

        /// Root cell address (e.g. C1)
        cell: String,

        /// Output HTML file for the graph view
        #[arg(short, long, default_value = "output/dependency_tree.html")]
        output: PathBuf,

        /// Maximum dependency chain depth
        #[arg(long, default_value_t = 1024)]
        max_depth: usize,

        /// Skip writing the HTML graph
        #[arg(long)]
        no_html: bool,
    },

    /// Print the dependency edge list as TSV (referenced cell, then referencer)
    Edges {
        /// Input workbook file (xlsx)
        input: PathBuf,

        /// Root cell address (e.g. C1)
        cell: String,
    },

    /// Show information about a workbook's active sheet
    Info {
        /// Input workbook file (xlsx)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            input,
            cell,
            output,
            max_depth,
            no_html,
        } => trace(&input, &cell, &output, max_depth, no_html),
        Commands::Edges { input, cell } => print_edges(&input, &cell),
        Commands::Info { input } => show_info(&input),
    }
}

fn open_store(input: &Path) -> Result<cellscope_core::SheetStore> {
    XlsxReader::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn resolve_tree(input: &Path, cell: &str, max_depth: usize) -> Result<DependencyTree> {
    let store = open_store(input)?;
    let options = ResolveOptions { max_depth };
    resolve_with_options(&store, cell, &options)
        .with_context(|| format!("Failed to resolve dependencies of {}", cell))
}

fn trace(
    input: &Path,
    cell: &str,
    output: &Path,
    max_depth: usize,
    no_html: bool,
) -> Result<()> {
    let tree = resolve_tree(input, cell, max_depth)?;

    print_tree(&tree, tree.root(), 0);

    let stats = tree.stats();
    eprintln!(
        "Resolved {} cells ({} formulas, longest chain {})",
        stats.cells_resolved, stats.formula_cells, stats.max_depth
    );

    if !no_html {
        let edges = to_edges(&tree);
        let html = render::render_graph(&tree, &edges);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        std::fs::write(output, html)
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
        eprintln!("Wrote graph to '{}'", output.display());
    }

    Ok(())
}

/// Print the tree as indented addresses, leaves with their values
fn print_tree(tree: &DependencyTree, id: NodeId, depth: usize) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);
    match node.value() {
        Some(v) => println!("{}{} = {}", indent, node.address(), v),
        None => println!("{}{}", indent, node.address()),
    }

    for &dep in node.dependencies() {
        print_tree(tree, dep, depth + 1);
    }
}

fn print_edges(input: &Path, cell: &str) -> Result<()> {
    let tree = resolve_tree(input, cell, ResolveOptions::default().max_depth)?;

    for edge in to_edges(&tree) {
        println!("{}\t{}", edge.source, edge.target);
    }

    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let store = open_store(input)?;

    println!("File: {}", input.display());
    println!("Sheet: \"{}\"", store.sheet_name());
    println!("Cells: {}", store.cell_count());
    println!("Formulas: {}", store.formula_count());

    Ok(())
}
