//! Drives the movies list over the seeded catalog and prints the resulting
//! view as JSON.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use vidly_core::{ListConfig, SortColumn};

use vidly_app::{
    seed, telemetry, AppConfig, InMemorySource, LogConfig, MovieColumn, MoviesList,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "vidly-demo", version, about = "Query the Vidly movie catalog")]
struct Args {
    /// Show only movies of this genre (case-insensitive name).
    #[arg(long)]
    genre: Option<String>,

    /// Title prefix to search for. Replaces the genre filter.
    #[arg(long)]
    search: Option<String>,

    /// Column header to click; repeat to toggle direction.
    #[arg(long = "sort", value_name = "COLUMN")]
    sort: Vec<MovieColumn>,

    /// Page to show (1-based).
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page.
    #[arg(long, env = "VIDLY_PAGE_SIZE", default_value_t = vidly_core::list::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "VIDLY_LOG", default_value = "info")]
    log: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "VIDLY_LOG_JSON")]
    json_logs: bool,
}

impl Args {
    fn to_config(&self) -> AppConfig {
        AppConfig {
            list: ListConfig {
                page_size: self.page_size,
            },
            default_sort: SortColumn::asc(MovieColumn::Title),
            log: LogConfig {
                filter: self.log.clone(),
                json: self.json_logs,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.to_config();
    config.validate()?;
    telemetry::init_tracing(&config.log)?;

    let movies = InMemorySource::with_items(seed::movies());
    let genres = InMemorySource::with_items(seed::genres());
    let mut list = MoviesList::load(&movies, &genres, &config).await?;

    if let Some(name) = &args.genre {
        let selected = list
            .genres()
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .cloned()
            .with_context(|| format!("unknown genre `{name}`"))?;
        list.select_genre(Some(selected));
    }
    if let Some(text) = args.search {
        list.set_search(text);
    }
    for column in args.sort {
        list.set_sort(column);
    }
    list.set_page(args.page);

    info!(summary = %list.summary(), "query applied");
    println!("{}", serde_json::to_string_pretty(list.view())?);
    Ok(())
}
