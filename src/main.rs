//! Pokedex - an interactive PokeAPI explorer
//!
//! Reads commands from stdin and prints results to stdout. Logs go to stderr.

use std::io::{BufRead, Write};

use anyhow::Context;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{Flow, PROMPT};
use pokedex::{Config, PokeApiClient, Session, TtlCache};

/// Main entry point for the Pokedex explorer.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache (starts its sweep task)
/// 4. Build the API client and session
/// 5. Run the prompt until `exit`, end of input, or Ctrl+C
/// 6. Shut the cache's sweep task down
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way, override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: api={}, cache_ttl={}s, page_size={}, timeout={}s",
        config.api_base_url, config.cache_ttl, config.page_size, config.request_timeout
    );

    let cache = TtlCache::new(config.cache_ttl_duration())
        .context("failed to create the response cache")?;
    let client =
        PokeApiClient::new(&config, cache.clone()).context("failed to build the HTTP client")?;
    let mut session = Session::new(client);

    let result = run_repl(&mut session).await;

    let stats = cache.stats().await;
    info!(
        "Session finished: hits={}, misses={}, hit_rate={:.2}, evictions={}, entries={}",
        stats.hits,
        stats.misses,
        stats.hit_rate(),
        stats.evictions,
        stats.total_entries
    );
    cache.shutdown().await;

    result
}

/// Prompts, reads, and executes lines until the session ends.
async fn run_repl(session: &mut Session) -> anyhow::Result<()> {
    let mut lines = spawn_stdin_reader();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let line = tokio::select! {
            line = lines.recv() => line,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, exiting");
                writeln!(stdout)?;
                break;
            }
        };

        // End of input
        let Some(line) = line else {
            writeln!(stdout)?;
            break;
        };

        if session.handle_line(&line, &mut stdout).await? == Flow::Exit {
            break;
        }
    }

    Ok(())
}

/// Reads stdin on a dedicated thread so a pending read never holds up shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}
