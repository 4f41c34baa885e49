use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use preview_host::preview::PreviewResolver;
use preview_host::store::memory::read_records;
use preview_host::store::MemoryStore;
use preview_host::templates::Dispatcher;
use preview_host::TemplateRegistry;

#[derive(Parser)]
#[command(name = "preview-cli")]
#[command(about = "Management CLI for the preview host", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, if the server requires one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored previews
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the template catalogue by niche
    Templates,
    /// Check server health
    Health,
    /// Check every record in a record file without a running server
    Check { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    match cli.command {
        Commands::List { search, limit } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(search) = search {
                query.push(("search", search));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            let res = client
                .get(format!("{}/api/previews/list", cli.url))
                .query(&query)
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Templates => {
            let res = client
                .get(format!("{}/api/templates", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Check { file } => {
            let failures = check_file(&file)?;
            if failures > 0 {
                eprintln!("{} record(s) would not render", failures);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Resolve every record the way the server would. Returns the number of
/// records that would be served as not found.
fn check_file(file: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let store = MemoryStore::from_records(read_records(file)?);
    let dispatcher = Dispatcher::new(Arc::new(TemplateRegistry::builtin()?));
    let resolver = PreviewResolver::new(Arc::new(store), Arc::new(dispatcher));

    let outcomes = resolver.resolve_all();
    let mut failures = 0;
    for (slug, outcome) in &outcomes {
        match outcome {
            Ok(page) => println!(
                "{:<40} ok ({}, {} bytes)",
                slug.as_str(),
                page.template_id,
                page.html.len()
            ),
            Err(e) => {
                failures += 1;
                println!("{:<40} {}: {}", slug.as_str(), e.kind(), e);
            }
        }
    }
    println!("{} record(s) checked", outcomes.len());
    Ok(failures)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
