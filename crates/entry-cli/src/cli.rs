use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use entry_types::EntryId;

#[derive(Parser)]
#[command(
    name = "entry",
    about = "Entry console: front matter codec and change preview",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a line diff between two files
    Diff(DiffArgs),
    /// Write a document with a front matter header
    Encode(EncodeArgs),
    /// Split a document into front matter and body
    Decode(DecodeArgs),
    /// Print a stored entry
    Show(ShowArgs),
    /// Preview an edit against the store and optionally save it
    Preview(PreviewArgs),
    /// List stored entries
    List,
    /// Delete a stored entry
    Delete(DeleteArgs),
    /// Print a skeleton document for a new entry
    Template,
    /// List tags in use with entry counts
    Tags(TagsArgs),
    /// List category paths in use
    Categories,
}

#[derive(Args)]
pub struct DiffArgs {
    pub original: PathBuf,
    pub modified: PathBuf,
    /// Show only changes with this many context lines
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
}

#[derive(Args)]
pub struct EncodeArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long = "category")]
    pub categories: Vec<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub updated: Option<String>,
    /// File holding the body; empty body when omitted
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct DecodeArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: EntryId,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Entry to create at, or to edit with --edit
    #[arg(long)]
    pub id: Option<EntryId>,
    #[arg(long, requires = "id")]
    pub edit: bool,
    /// Drop the stored `updated` value instead of keeping it
    #[arg(long, requires = "edit")]
    pub update_timestamp: bool,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub summary: String,
    #[arg(long = "category")]
    pub categories: Vec<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Save without asking
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: EntryId,
    /// Delete without asking
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Most used first instead of by name
    #[arg(short, long)]
    pub sort: bool,
}
