use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{CategoryStore, MoveOutcome};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Forest, LayoutOptions};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::List) => _list(cli),
        Some(Commands::Tree) => _tree(cli),
        Some(Commands::Branches) => _branches(cli),
        Some(Commands::Leaves) => _leaves(cli),
        Some(Commands::Layout {
            node_width,
            node_height,
        }) => _layout(cli, *node_width, *node_height),
        Some(Commands::Move { child, to, to_root }) => _move(cli, *child, *to, *to_root),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Build the service container, applying the `-f` data-file override.
fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(Some(Path::new(".")))?;
    if let Some(file) = &cli.file {
        settings.data_file = file.clone();
    }
    debug!("data file: {}", settings.data_file.display());
    Ok(ServiceContainer::new(settings))
}

fn load_store(container: &ServiceContainer) -> CliResult<CategoryStore> {
    let mut store = CategoryStore::new();
    container.catalog.refresh(&mut store)?;
    Ok(store)
}

#[instrument(skip(cli))]
fn _list(cli: &Cli) -> CliResult<()> {
    let container = build_container(cli)?;
    let store = load_store(&container)?;

    for category in store.categories() {
        let parent = category
            .parent_id()
            .map(|pid| format!("  (parent: {})", pid))
            .unwrap_or_default();
        output::info(&format!("{:>6}  {}{}", category.id, category.name, parent));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli) -> CliResult<()> {
    let container = build_container(cli)?;
    let store = load_store(&container)?;
    let forest = container.catalog.forest(&store);

    output::header(&format!("{} categories, {} roots", forest.len(), forest.roots().len()));
    for &root in forest.roots() {
        println!("{}", to_display_tree(&forest, root));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _branches(cli: &Cli) -> CliResult<()> {
    let container = build_container(cli)?;
    let store = load_store(&container)?;
    let forest = container.catalog.forest(&store);

    for branch in forest.branches() {
        let line = branch.iter().map(|c| c.name.as_str()).join(" > ");
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _leaves(cli: &Cli) -> CliResult<()> {
    let container = build_container(cli)?;
    let store = load_store(&container)?;
    let forest = container.catalog.forest(&store);

    for category in forest
        .leaf_categories()
        .into_iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
    {
        output::info(&category.to_string());
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _layout(cli: &Cli, node_width: Option<f64>, node_height: Option<f64>) -> CliResult<()> {
    let container = build_container(cli)?;
    let store = load_store(&container)?;

    let mut options: LayoutOptions = container.settings.layout_options();
    if let Some(width) = node_width {
        options.node_width = width;
    }
    if let Some(height) = node_height {
        options.node_height = height;
    }

    let result = container.catalog.layout(&store, &options);
    output::header("nodes");
    for node in &result.nodes {
        output::detail(&format!(
            "{:>6}  {:<30} x={:>8.1} y={:>8.1}",
            node.id, node.name, node.x, node.y
        ));
    }
    output::header("edges");
    for edge in &result.edges {
        output::detail(&format!("{} -> {}", edge.source, edge.target));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _move(cli: &Cli, child: u64, to: Option<u64>, to_root: bool) -> CliResult<()> {
    let new_parent = match (to, to_root) {
        (Some(parent), false) => Some(parent),
        (None, true) => None,
        _ => {
            return Err(CliError::InvalidArgs(
                "specify either --to <PARENT> or --to-root".to_string(),
            ))
        }
    };

    let container = build_container(cli)?;
    let mut store = load_store(&container)?;

    match container
        .reparent
        .move_category(&mut store, child, new_parent)?
    {
        MoveOutcome::Unchanged => {
            output::info(&format!("no change: category {} already there", child));
        }
        MoveOutcome::Moved(change) => {
            let target = change
                .new_parent
                .map(|pid| format!("under {}", pid))
                .unwrap_or_else(|| "to top level".to_string());
            output::success(&format!("moved category {} {}", change.category_id, target));
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Render one tree of the forest for terminal display.
fn to_display_tree(forest: &Forest, idx: Index) -> Tree<String> {
    let Some(node) = forest.get_node(idx) else {
        return Tree::new(String::new());
    };
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|&child| to_display_tree(forest, child))
        .collect();
    Tree::new(node.category.to_string()).with_leaves(leaves)
}
