use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sealdoc_types::Category;

#[derive(Parser)]
#[command(
    name = "sealdoc",
    about = "sealdoc — ledger-backed document custody and delivery",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List stored documents
    List(ListArgs),
    /// Hash a document, record it on the ledger, and store it
    Upload(UploadArgs),
    /// Record a recipient-tagged ledger entry and deliver a stored document
    Send(SendArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show documents in this category
    #[arg(long)]
    pub category: Option<Category>,
    /// Only show documents matching this term in any field
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,
    #[arg(long)]
    pub category: Category,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Identifier of an already-stored document
    pub doc_id: String,
    /// Recipient email address
    #[arg(long)]
    pub to: String,
}
