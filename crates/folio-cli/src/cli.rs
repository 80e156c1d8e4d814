use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio", about = "Folio: block-based blog content server and client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Base URL of the Folio API used by client commands
    #[arg(long, global = true, default_value = "http://127.0.0.1:3001/api")]
    pub url: String,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Folio server
    Serve(ServeArgs),
    /// List posts
    List,
    /// Show a post by id or slug
    Show(ShowArgs),
    /// Create an empty post
    Create(CreateArgs),
    /// Stage block edits and deletions and commit them in one batch
    Commit(CommitArgs),
    /// Decode a raw block file into pragma options and body
    Pragma(PragmaArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Posts JSON file
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub post: String,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub lead: String,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    pub post: String,
    /// Replace a block with the raw contents of a file, as BLOCK_ID=FILE
    #[arg(long = "edit", value_parser = parse_edit)]
    pub edits: Vec<(String, PathBuf)>,
    /// Delete a block
    #[arg(long = "delete")]
    pub deletes: Vec<String>,
}

#[derive(Args)]
pub struct PragmaArgs {
    pub file: PathBuf,
}

fn parse_edit(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((id, file)) if !id.is_empty() && !file.is_empty() => {
            Ok((id.to_string(), PathBuf::from(file)))
        }
        _ => Err(format!("expected BLOCK_ID=FILE, got `{s}`")),
    }
}
