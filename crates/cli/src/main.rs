//! `wikifeed` -- run a recent-changes lookup against the wiki replicas.
//!
//! Prints the matching rows as a JSON array on stdout. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                    | Default            | Description                     |
//! |-----------------------------|--------------------|---------------------------------|
//! | `WIKIFEED_CREDENTIALS_FILE` | `~/replica.my.cnf` | MySQL option file with `[client]` creds |
//! | `WIKIFEED_HOST_SUFFIX`      | `wiki.labsdb`      | Appended to the language code for the host |
//! | `WIKIFEED_DB_SUFFIX`        | `wiki_p`           | Appended to the language code for the database |
//! | `WIKIFEED_DB_PORT`          | `3306`             | Replica port                    |

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wikifeed_core::lookback::DEFAULT_HOURS;
use wikifeed_core::naming::{LanguageCode, DEFAULT_LANG};
use wikifeed_core::params::{FeedParams, DEFAULT_LIMIT};
use wikifeed_db::{ConnectionRegistry, QueryService, ReplicaConfig};

#[derive(Debug, Parser)]
#[command(name = "wikifeed")]
#[command(about = "Query recent wiki edits by hashtag, category or article list")]
struct Cli {
    /// Wiki language code
    #[arg(long, global = true, default_value = DEFAULT_LANG)]
    lang: LanguageCode,

    /// Lookback window in hours
    #[arg(long, global = true, default_value_t = DEFAULT_HOURS)]
    hours: u32,

    /// Maximum number of rows
    #[arg(long, global = true, default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edits whose summary mentions a hashtag (leading `#` optional)
    Hashtag { tag: String },
    /// Edits whose summary contains any hashtag
    Hashtags,
    /// Pages recently added to a category
    Category { name: String },
    /// Recent revisions of the given articles
    Articles {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Recent revisions of pages in a category
    CategoryRevisions { name: String },
}

impl Cli {
    fn params(&self) -> FeedParams {
        FeedParams::new(self.lang.clone())
            .with_hours(self.hours)
            .with_limit(self.limit)
    }
}

async fn run(service: &QueryService, cli: &Cli) -> anyhow::Result<serde_json::Value> {
    let params = cli.params();
    let rows = match &cli.command {
        Command::Hashtag { tag } => {
            serde_json::to_value(service.edits_by_hashtag(tag, &params).await?)?
        }
        Command::Hashtags => serde_json::to_value(service.edits_with_any_hashtag(&params).await?)?,
        Command::Category { name } => {
            serde_json::to_value(service.edits_by_category(name, &params).await?)?
        }
        Command::Articles { titles } => {
            serde_json::to_value(service.revisions_for_articles(titles.as_slice(), &params).await?)?
        }
        Command::CategoryRevisions { name } => serde_json::to_value(
            service
                .revisions_for_category_members(name, &params)
                .await?,
        )?,
    };
    Ok(rows)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wikifeed_cli=info,wikifeed_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ReplicaConfig::from_env()?;
    let registry = ConnectionRegistry::from_config(config)
        .context("Failed to load replica credentials")?;
    let registry = Arc::new(registry);
    let service = QueryService::new(Arc::clone(&registry));

    tracing::info!(lang = %cli.lang, hours = cli.hours, limit = cli.limit, "Running lookup");

    let result = run(&service, &cli).await;
    registry.close_all().await;

    let rows = result?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
