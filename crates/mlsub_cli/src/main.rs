use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mlsub_core::ArticleStore;
use mlsub_notify::{dispatch, resolve_notifiers, ChannelSelector, Format, NotifyConfig, Style};
use mlsub_sources::{create_source, SourceKind, SubscriptionPipeline, DEFAULT_ARXIV_QUERY};
use mlsub_storage::JsonStore;
use mlsub_translate::{create_translator, TranslatorConfig};
use mlsub_viz::ArticleVisualizer;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch, translate and deliver ML/DL article updates.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch new articles, notify configured channels and update the store.
    Fetch {
        #[arg(long, value_enum, default_value_t = SourceKind::Arxiv)]
        source: SourceKind,
        /// Search query. Defaults to the ML category for arxiv; hn ignores it.
        #[arg(long)]
        query: Option<String>,
        /// Maximum number of articles to fetch before filtering.
        #[arg(long, default_value_t = 50)]
        max_results: usize,
        /// Only keep articles from the last N days (arxiv only).
        #[arg(long, default_value_t = 1)]
        days: i64,
        /// Maximum number of new articles passed to the notifiers.
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Notification channel. Use "all" for every configured channel.
        #[arg(long, value_enum)]
        notifier: Option<ChannelSelector>,
        /// Overrides the WEBHOOK_URL environment variable.
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long, value_enum, default_value_t = Style::Detailed)]
        style: Style,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, default_value = "output/articles.json")]
        store: PathBuf,
    },
    /// Re-send the stored article set without fetching.
    Notify {
        /// Notification channel. Use "all" for every configured channel.
        #[arg(long, value_enum)]
        notifier: Option<ChannelSelector>,
        /// Overrides the WEBHOOK_URL environment variable.
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long, value_enum, default_value_t = Style::Detailed)]
        style: Style,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, default_value = "output/articles.json")]
        store: PathBuf,
    },
    /// Render the stored article set as an HTML page.
    Visualize {
        #[arg(long, default_value = "output/articles.json")]
        store: PathBuf,
        #[arg(long, default_value = "output/articles.html")]
        output: PathBuf,
    },
}

/// Command-line webhook URL wins over the environment.
fn notify_config(webhook_url: Option<String>) -> NotifyConfig {
    let mut config = NotifyConfig::from_env();
    if webhook_url.is_some() {
        config.webhook_url = webhook_url;
    }
    config
}

fn resolve_query(source: SourceKind, query: Option<String>) -> String {
    match query {
        Some(q) => q,
        None if source == SourceKind::Arxiv => DEFAULT_ARXIV_QUERY.to_string(),
        None => String::new(),
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_fetch(
    source: SourceKind,
    query: Option<String>,
    max_results: usize,
    days: i64,
    limit: usize,
    notifier: Option<ChannelSelector>,
    webhook_url: Option<String>,
    style: Style,
    format: Format,
    store: PathBuf,
) -> anyhow::Result<()> {
    let notifiers = match notifier {
        Some(selector) => {
            resolve_notifiers(selector, &notify_config(webhook_url), style, format)
        }
        None => Vec::new(),
    };
    let translator = create_translator(&TranslatorConfig::from_env());
    info!("🌐 translation backend: {}", translator.name());

    let query = resolve_query(source, query);
    let pipeline = SubscriptionPipeline::new(
        create_source(source, Some(days)),
        Box::new(JsonStore),
        store,
        translator,
        notifiers,
    )
    .with_notify_limit(limit);

    let report = pipeline.run(&query, max_results).await?;
    info!("✅ {}", report);
    Ok(())
}

async fn handle_notify(
    notifier: Option<ChannelSelector>,
    webhook_url: Option<String>,
    style: Style,
    format: Format,
    store: PathBuf,
) -> anyhow::Result<()> {
    let Some(selector) = notifier else {
        warn!("Please specify a notification channel with --notifier (telegram, webhook, or all)");
        return Ok(());
    };

    let notifiers = resolve_notifiers(selector, &notify_config(webhook_url), style, format);
    if notifiers.is_empty() {
        return Ok(());
    }

    let articles = JsonStore.load(&store);
    if articles.is_empty() {
        info!("no stored articles at {}, sending reminder", store.display());
    }
    let outcome = dispatch(&notifiers, &articles).await;
    if !outcome.failed.is_empty() {
        warn!("delivery failed for: {}", outcome.failed.join(", "));
    }
    Ok(())
}

fn handle_visualize(store: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let articles = JsonStore.load(&store);
    if articles.is_empty() {
        warn!(
            "No articles found at {}. Please run 'fetch' first.",
            store.display()
        );
        return Ok(());
    }
    ArticleVisualizer.generate_html(&articles, &output)?;
    info!("📊 visualization generated at {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            source,
            query,
            max_results,
            days,
            limit,
            notifier,
            webhook_url,
            style,
            format,
            store,
        } => {
            handle_fetch(
                source, query, max_results, days, limit, notifier, webhook_url, style, format,
                store,
            )
            .await
        }
        Commands::Notify {
            notifier,
            webhook_url,
            style,
            format,
            store,
        } => handle_notify(notifier, webhook_url, style, format, store).await,
        Commands::Visualize { store, output } => handle_visualize(store, output),
    }
}
