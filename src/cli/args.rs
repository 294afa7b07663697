//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Catalog category hierarchy manager: build, lay out, and safely reparent category trees
#[derive(Parser, Debug)]
#[command(name = "catree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Category data file (default: from config)
    #[arg(short = 'f', long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List categories flat
    List,

    /// Show the hierarchy as a tree
    Tree,

    /// Show all root-to-leaf branches linearly
    Branches,

    /// List leaf categories
    Leaves,

    /// Compute node positions and edges for the visual renderer
    Layout {
        /// Override configured node width
        #[arg(long)]
        node_width: Option<f64>,
        /// Override configured node height
        #[arg(long)]
        node_height: Option<f64>,
    },

    /// Move a category to a new parent (rejects moves that would create a cycle)
    Move {
        /// Category to move
        child: u64,
        /// New parent category
        #[arg(short = 't', long = "to", conflicts_with = "to_root")]
        to: Option<u64>,
        /// Move to top level
        #[arg(long, conflicts_with = "to")]
        to_root: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
