use std::path::PathBuf;

use clap::{Parser, Subcommand};

use localmem::{
    constants, render_transcript, ChatHistory, MemoryError, MemoryStore, SessionChatHistory,
};

#[derive(Parser)]
#[command(name = "localmem", about = "Local memory store for LLM chat sessions")]
struct Cli {
    /// Database file (defaults to ~/.localmem/memory.db)
    #[arg(long, global = true, env = "LOCALMEM_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show entry counts and database size
    Status,
    /// Full-text search across stored memories
    Search {
        query: String,
        #[arg(long, default_value_t = constants::DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// List sessions that have stored history
    Sessions,
    /// Print a session's transcript
    Show { session_id: String },
    /// Save a standalone memory entry
    Remember {
        content: String,
        #[arg(long, default_value_t = constants::DEFAULT_IMPORTANCE)]
        importance: f64,
        #[arg(long, default_value = "note")]
        tag: String,
    },
    /// Delete a session's history
    Forget { session_id: String },
    /// Delete entries older than the given number of days
    Purge {
        #[arg(long)]
        days: u32,
    },
    /// Dump every entry as JSON
    Export,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "localmem=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MemoryError> {
    let store = match cli.db {
        Some(path) => MemoryStore::open(path)?,
        None => MemoryStore::open_default()?,
    };

    match cli.command {
        Command::Status => println!("{}", store.status()?.render()),
        Command::Search { query, limit } => {
            let results = store.search(&query, limit)?;
            if results.is_empty() {
                println!("No results found for \"{query}\"");
                return Ok(());
            }
            println!("Search results for \"{query}\" ({} found):", results.len());
            for entry in &results {
                println!(
                    "- [{}] {}: {}",
                    entry.tag,
                    entry.created_date(),
                    preview(&entry.content)
                );
            }
        }
        Command::Sessions => {
            let ids = store.session_ids()?;
            if ids.is_empty() {
                println!("No stored sessions.");
                return Ok(());
            }
            println!("Sessions with stored history ({}):", ids.len());
            for id in &ids {
                println!("  {id}");
            }
        }
        Command::Show { session_id } => {
            let history = SessionChatHistory::with_store(&session_id, store)?;
            let transcript = render_transcript(&history)?;
            if transcript.is_empty() {
                println!("No messages for session \"{session_id}\".");
            } else {
                println!("{transcript}");
            }
        }
        Command::Remember {
            content,
            importance,
            tag,
        } => {
            let id = store.remember(&content, &tag, importance)?;
            println!("Saved entry {id} under tag \"{tag}\".");
        }
        Command::Forget { session_id } => {
            let history = SessionChatHistory::with_store(&session_id, store)?;
            let removed = history.clear()?;
            if removed == 0 {
                println!("No stored messages for session \"{session_id}\".");
            } else {
                println!("Deleted {removed} messages from session \"{session_id}\".");
            }
        }
        Command::Purge { days } => {
            let removed = store.purge_older_than(days)?;
            println!("Purged {removed} entries older than {days} days.");
        }
        Command::Export => {
            let entries = store.all_entries()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() <= constants::PREVIEW_LEN {
        flat
    } else {
        let cut: String = flat.chars().take(constants::PREVIEW_LEN).collect();
        format!("{cut}...")
    }
}
