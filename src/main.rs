use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ordtree::{EditOptions, Style, Tree};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ordtree", about = "Inspect and combine linearised ordered trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a tree.
    Render {
        /// Tree file of `count:value` pairs in post-order.
        tree: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print size, width, height and leaf count.
    Stats {
        /// Tree file of `count:value` pairs in post-order.
        tree: PathBuf,
    },
    /// Union of two trees.
    Union {
        left: PathBuf,
        right: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Branch prefixes common to two trees.
    Intersect {
        left: PathBuf,
        right: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Branches of the left tree missing from the right one.
    Diff {
        left: PathBuf,
        right: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Insert a value under the node at a `/`-separated path.
    Insert {
        tree: PathBuf,
        /// Root-inclusive path, e.g. `a/b`.
        #[arg(long)]
        path: String,
        /// Value of the new leaf.
        #[arg(long)]
        value: String,
        /// Allow duplicate sibling values.
        #[arg(long)]
        lax: bool,
        /// Insert before the existing children.
        #[arg(long)]
        prepend: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Remove the node (or whole subtree) at a `/`-separated path.
    Remove {
        tree: PathBuf,
        /// Root-inclusive path, e.g. `a/b`.
        #[arg(long)]
        path: String,
        /// Remove the subtree instead of lifting its children.
        #[arg(long)]
        subtree: bool,
        /// Allow duplicate sibling values when children are lifted.
        #[arg(long)]
        lax: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output layout.
    #[arg(long, value_enum, default_value_t = StyleArg::Nested)]
    style: StyleArg,
    /// Cut branches at this many levels.
    #[arg(long, default_value_t = usize::MAX)]
    max_depth: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Arrays,
    Graph,
    Paths,
    Nested,
}

impl From<StyleArg> for Style {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Arrays => Style::Arrays,
            StyleArg::Graph => Style::Graph,
            StyleArg::Paths => Style::Paths,
            StyleArg::Nested => Style::Nested,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { tree, output } => print(&read_tree(&tree)?, &output),
        Commands::Stats { tree } => {
            let tree = read_tree(&tree)?;
            println!(
                "size={}\twidth={}\theight={}\tleaves={}",
                tree.size(),
                tree.width(),
                tree.height(),
                tree.leaves().len()
            );
        }
        Commands::Union { left, right, output } => {
            print(&read_tree(&left)?.union(&read_tree(&right)?), &output)
        }
        Commands::Intersect { left, right, output } => {
            print(&read_tree(&left)?.intersect(&read_tree(&right)?), &output)
        }
        Commands::Diff { left, right, output } => {
            print(&read_tree(&left)?.diff(&read_tree(&right)?), &output)
        }
        Commands::Insert {
            tree,
            path,
            value,
            lax,
            prepend,
            output,
        } => {
            let options = EditOptions::default()
                .with_keep_distinct(!lax)
                .with_append(!prepend);
            let edited = read_tree(&tree)?.try_insert_value_at(&split_path(&path), value, options);
            report(edited.is_modified(), &path);
            print(&edited.into_inner(), &output);
        }
        Commands::Remove {
            tree,
            path,
            subtree,
            lax,
            output,
        } => {
            let options = EditOptions::default().with_keep_distinct(!lax);
            let tree = read_tree(&tree)?;
            let path_items = split_path(&path);
            let edited = if subtree {
                tree.remove_tree_at(&path_items, options)
            } else {
                tree.remove_value_at(&path_items, options)
            };
            report(edited.is_modified(), &path);
            print(&edited.into_inner(), &output);
        }
    }

    Ok(())
}

fn print(tree: &Tree<String>, output: &OutputArgs) {
    println!("{}", tree.render(output.style.into(), output.max_depth));
}

fn report(modified: bool, path: &str) {
    if !modified {
        info!(path, "path not found, tree left unchanged");
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a tree stored as `count:value` tokens separated by whitespace or commas.
fn read_tree(path: &Path) -> Result<Tree<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tree from {}", path.display()))?;
    let pairs = parse_pairs(&contents)
        .with_context(|| format!("malformed pairs in {}", path.display()))?;
    let tree = Tree::from_pairs(pairs)
        .with_context(|| format!("invalid tree encoding in {}", path.display()))?;
    Ok(tree.deflated())
}

fn parse_pairs(contents: &str) -> Result<Vec<(usize, String)>> {
    contents
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(idx, token)| -> Result<(usize, String)> {
            let (count, value) = token
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("token {} ('{}') is not `count:value`", idx + 1, token))?;
            let count: usize = count
                .parse()
                .with_context(|| format!("invalid child count '{}' in token {}", count, idx + 1))?;
            Ok((count, value.to_string()))
        })
        .collect()
}
