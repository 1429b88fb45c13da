use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use sealdoc_backend::{DocumentBackend, HttpBackend};
use sealdoc_catalog::{CatalogFilter, DocumentCatalog};
use sealdoc_types::{DocumentId, DocumentRecord};
use sealdoc_wallet::{RpcSigningAgent, SigningAgent, WalletSession};
use sealdoc_workflow::{TransferWorkflow, UploadWorkflow, WorkflowError};

use crate::cli::{Cli, Command, ListArgs, SendArgs, UploadArgs};
use crate::config::SealdocConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = SealdocConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::List(args) => cmd_list(args, &config).await,
        Command::Upload(args) => cmd_upload(args, &config).await,
        Command::Send(args) => cmd_send(args, &config).await,
    }
}

fn backend(config: &SealdocConfig) -> Arc<dyn DocumentBackend> {
    Arc::new(HttpBackend::new(config.backend()))
}

fn session(config: &SealdocConfig) -> WalletSession {
    let agent = Arc::new(RpcSigningAgent::new(config.agent_url.clone()));
    WalletSession::new(agent as Arc<dyn SigningAgent>)
}

async fn cmd_list(args: ListArgs, config: &SealdocConfig) -> anyhow::Result<()> {
    let backend = backend(config);
    let records = backend.list_documents().await?;

    let filter = CatalogFilter {
        category: args.category,
        search: args.search,
        ..Default::default()
    };
    let catalog = DocumentCatalog::new();
    catalog.replace(records);
    let matches = catalog.filter(&filter);

    if matches.is_empty() {
        println!("No documents.");
        return Ok(());
    }
    for record in &matches {
        print_record(record);
    }
    println!("\n{} document(s)", matches.len().to_string().bold());
    Ok(())
}

fn print_record(record: &DocumentRecord) {
    println!(
        "{}  {}  {}",
        record.id.as_str().yellow(),
        format!("[{}]", record.category).cyan(),
        record.filename.bold(),
    );
    println!("  hash: {}", record.content_hash.short_hex().dimmed());
    if let Some(description) = &record.description {
        println!("  {description}");
    }
}

async fn cmd_upload(args: UploadArgs, config: &SealdocConfig) -> anyhow::Result<()> {
    config.require_contract()?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("file path has no filename")?;

    let catalog = Arc::new(DocumentCatalog::new());
    let workflow = UploadWorkflow::new(backend(config), Arc::clone(&catalog), config.chain());
    let mut session = session(config);

    println!("Uploading {} ({} bytes)...", filename.bold(), bytes.len());
    let mut result = workflow
        .upload(bytes, filename, args.category, args.description, &mut session)
        .await;

    loop {
        match result {
            Ok(receipt) => {
                println!("{} Upload complete", "✓".green().bold());
                println!("  hash: {}", receipt.document_hash.to_hex().cyan());
                println!("  tx:   {}", receipt.transaction.to_string().yellow());
                return Ok(());
            }
            Err(err @ WorkflowError::StoreFailed(_)) => {
                eprintln!("{} {err}", "✗".red().bold());
                println!("The ledger entry is confirmed; retrying will not sign again.");
                if !confirm("Retry the remote store?")? {
                    return Err(err.into());
                }
                result = workflow.retry_store().await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn cmd_send(args: SendArgs, config: &SealdocConfig) -> anyhow::Result<()> {
    config.require_contract()?;
    let backend = backend(config);
    let catalog = Arc::new(DocumentCatalog::new());
    catalog.replace(backend.list_documents().await?);

    let mut session = session(config);
    let address = session.connect().await?;
    println!("Connected as {}", address.short().cyan());

    let workflow = TransferWorkflow::new(backend, catalog, config.chain());
    println!("Sending {} to {}...", args.doc_id.yellow(), args.to.bold());
    let mut result = workflow
        .send(DocumentId::new(args.doc_id), args.to, &session)
        .await;

    loop {
        match result {
            Ok(receipt) => {
                println!("{} Delivery complete", "✓".green().bold());
                println!("  hash:  {}", receipt.document_hash.to_hex().cyan());
                println!("  file:  {}", receipt.file_id);
                println!("  email: {}", receipt.email_id);
                return Ok(());
            }
            Err(err @ WorkflowError::DeliverFailed(_)) => {
                eprintln!("{} {err}", "✗".red().bold());
                println!("The ledger entry is confirmed; retrying will not sign again.");
                if !confirm("Retry the delivery?")? {
                    return Err(err.into());
                }
                result = workflow.retry_delivery().await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
