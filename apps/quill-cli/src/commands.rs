//! Command implementations.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use quill_core::domain::Post;
use quill_core::markup;
use quill_core::ports::PostRepository;
use quill_infra::auth::hash_password;
use quill_infra::seed::sample_posts;
use quill_infra::{
    DataApiClient, DataApiConfig, InMemoryBlogStore, LiveSearch, RestPostRepository, RetryPolicy,
    SearchState,
};

use crate::args::{ApiArgs, Cli, Command};

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Seed => seed(&cli.api).await,
        Command::Search { query } => search(&cli.api, &query).await,
        Command::Live { debounce_ms } => live(&cli.api, Duration::from_millis(debounce_ms)).await,
        Command::Format { file, plain } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => read_stdin()?,
            };
            println!("{}", format_text(&raw, plain));
            Ok(())
        }
        Command::HashPassword { password } => {
            let password = match password {
                Some(p) => p,
                None => read_stdin()?.trim_end_matches(['\r', '\n']).to_string(),
            };
            if password.is_empty() {
                bail!("refusing to hash an empty password");
            }
            println!("{}", hash_password(&password)?);
            Ok(())
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read stdin")?;
    Ok(raw)
}

fn client(api: &ApiArgs) -> Result<Option<DataApiClient>> {
    let Some(url) = api.api_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Ok(None);
    };
    let config = DataApiConfig {
        base_url: url.to_string(),
        api_key: api.api_key.clone(),
        timeout: Duration::from_secs(api.timeout_secs),
        retry: RetryPolicy {
            max_retries: api.max_retries,
            initial_backoff: Duration::from_millis(api.retry_backoff_ms),
        },
    };
    Ok(Some(DataApiClient::new(config)?))
}

/// The data API when configured, the bundled samples otherwise.
fn posts(api: &ApiArgs) -> Result<Arc<dyn PostRepository>> {
    Ok(match client(api)? {
        Some(client) => Arc::new(RestPostRepository::new(client)),
        None => {
            tracing::warn!("DATA_API_URL not set; searching the bundled sample posts");
            Arc::new(InMemoryBlogStore::seeded())
        }
    })
}

async fn seed(api: &ApiArgs) -> Result<()> {
    let client = client(api)?.context("seeding needs DATA_API_URL (or --api-url)")?;
    let repo = RestPostRepository::new(client);

    let samples = sample_posts();
    let total = samples.len();
    let mut failed = 0;
    for post in &samples {
        match repo.import_post(post).await {
            Ok(stored) => tracing::info!(id = %stored.id, title = %stored.title, "Inserted post"),
            Err(e) => {
                failed += 1;
                tracing::error!(title = %post.title, error = %e, "Failed to insert post");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} posts could not be inserted");
    }
    tracing::info!(total, "Seeding complete");
    Ok(())
}

async fn search(api: &ApiArgs, query: &str) -> Result<()> {
    let results = posts(api)?.search_posts(query).await?;
    print!("{}", render_results(query, &results));
    Ok(())
}

/// Feed stdin lines through a debounced search, printing each settled result.
async fn live(api: &ApiArgs, debounce: Duration) -> Result<()> {
    let mut search = LiveSearch::new(posts(api)?, debounce);
    let mut updates = search.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line.context("failed to read stdin")? {
                Some(query) => search.update(query.trim()),
                None => input_open = false,
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                match state {
                    SearchState::Pending { .. } => {}
                    SearchState::Idle => println!("(type to search)"),
                    SearchState::Ready { query, results } => {
                        print!("{}", render_results(&query, &results));
                    }
                    SearchState::Failed { query, error } => {
                        eprintln!("search for {query:?} failed: {error}");
                    }
                }
            }
        }

        let settled = !matches!(*updates.borrow(), SearchState::Pending { .. });
        if !input_open && settled && !updates.has_changed().unwrap_or(false) {
            break;
        }
    }
    Ok(())
}

fn render_results(query: &str, posts: &[Post]) -> String {
    let mut out = format!("{} result(s) for {query:?}\n", posts.len());
    for post in posts {
        out.push_str(&format!(
            "  [{}] {} ({}, {})\n",
            post.id,
            post.title,
            post.category.as_deref().unwrap_or("uncategorized"),
            post.created_at.format("%Y-%m-%d"),
        ));
    }
    out
}

fn format_text(raw: &str, plain: bool) -> String {
    let lines = markup::format(raw);
    if plain {
        markup::render_plain(&lines)
    } else {
        markup::render_html(&lines)
    }
}
