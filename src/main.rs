use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use console::{Emoji, Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use poddir::{
    ALL_GENRES, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, EnrichedPodcast, FetchError,
    GenreFilter, GenreLookup, PodcastStore, ProgressEvent, ProgressReporter, ReqwestClient,
    SharedProgressReporter, SortOption, StoreError, StoreOptions, TracingReporter,
    UnknownGenrePolicy, bundled_genres,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static FAILURE: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");

/// Maximum characters of a description shown on a card
const DESCRIPTION_PREVIEW: usize = 100;

/// Browse a podcast directory: filter by genre, search, sort and page through results
#[derive(Parser, Debug)]
#[command(name = "poddir")]
#[command(about = "Browse, filter, search and sort a podcast directory")]
#[command(version)]
struct Args {
    /// Catalog URL or path to a local JSON file
    #[arg(default_value = DEFAULT_ENDPOINT)]
    source: String,

    /// Only show podcasts in this genre (exact title, or "all-genres")
    #[arg(short, long, default_value = ALL_GENRES)]
    genre: String,

    /// Only show podcasts whose title contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Sort order: default, newest, az, za
    #[arg(long, default_value = "default")]
    sort: SortOption,

    /// Podcasts revealed per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Number of pages to reveal up front
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Prompt to load more after each page
    #[arg(short, long)]
    interactive: bool,

    /// Print the visible podcasts as JSON instead of cards
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Print the genre catalog and exit
    #[arg(long)]
    list_genres: bool,

    /// Handling of genre ids missing from the catalog: drop-id, skip-record, fail-batch
    #[arg(long, default_value = "drop-id")]
    unknown_genres: UnknownGenrePolicy,

    /// Quiet mode - suppress banner and spinner
    #[arg(short, long)]
    quiet: bool,
}

/// Loading spinner driven by store events
struct SpinnerReporter {
    spinner: ProgressBar,
    tracing: TracingReporter,
}

impl SpinnerReporter {
    fn new() -> Result<Self> {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .context("Invalid spinner template")?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);

        Ok(Self {
            spinner,
            tracing: TracingReporter,
        })
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::FetchStarted { source } => {
                self.spinner
                    .set_message(format!("{SEARCH}Loading podcasts from {}", source.cyan()));
                self.spinner
                    .enable_steady_tick(std::time::Duration::from_millis(100));
            }
            ProgressEvent::FetchCompleted { .. }
            | ProgressEvent::FetchFailed { .. }
            | ProgressEvent::FetchCancelled => {
                self.spinner.finish_and_clear();
            }
            _ => {}
        }
        self.tracing.report(event);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}

fn format_updated(podcast: &EnrichedPodcast) -> String {
    podcast
        .updated_at()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| podcast.updated.clone())
}

/// Interpret `--genre`, rejecting titles missing from the catalog
fn parse_genre(lookup: &GenreLookup, value: &str) -> Result<GenreFilter> {
    let genre = GenreFilter::from_selection(value);
    if let GenreFilter::Title(title) = &genre
        && !lookup.has_title(title)
    {
        let known: Vec<&str> = lookup.genres().iter().map(|g| g.title.as_str()).collect();
        bail!("Unknown genre '{}'. Known genres: {}", title, known.join(", "));
    }
    Ok(genre)
}

fn render_card(podcast: &EnrichedPodcast) {
    println!("{HEADPHONES}{}", podcast.title.bold());

    let seasons = if podcast.seasons == 1 {
        "1 season".to_string()
    } else {
        format!("{} seasons", podcast.seasons)
    };
    println!("   {BOOKS}{}", seasons.dimmed());

    if !podcast.genres.is_empty() {
        let genres: Vec<String> = podcast
            .genres
            .iter()
            .map(|genre| genre.cyan().to_string())
            .collect();
        println!("   {}", genres.join(" • "));
    }

    if !podcast.description.is_empty() {
        println!(
            "   {}",
            truncate_chars(&podcast.description, DESCRIPTION_PREVIEW).dimmed()
        );
    }

    println!("   {CALENDAR}Updated: {}", format_updated(podcast));
    println!();
}

fn render_page_info(store: &PodcastStore) {
    let shown = store.visible_podcasts().len();
    let matching = store.podcasts().len();

    let mut info = format!(
        "Showing {} of {} podcasts",
        shown.to_string().green().bold(),
        matching.to_string().cyan()
    );
    if matching < store.total_count() {
        info.push_str(&format!(" ({} in catalog)", store.total_count()));
    }
    if store.total_pages() > 0 {
        info.push_str(&format!(
            " - page {} of {}",
            store.current_page(),
            store.total_pages()
        ));
    }
    println!("{}", info.dimmed());
}

fn render_selection(store: &PodcastStore) {
    let mut parts = Vec::new();
    if let GenreFilter::Title(title) = store.selected_genre() {
        parts.push(format!("genre {}", title.yellow()));
    }
    if !store.search_term().trim().is_empty() {
        parts.push(format!("search \"{}\"", store.search_term().trim().yellow()));
    }
    if store.sort_option() != SortOption::Default {
        parts.push(format!("sorted {}", store.sort_option().label().yellow()));
    }
    if !parts.is_empty() {
        println!("{}\n", parts.join(", "));
    }
}

/// Prompt until the user quits or the result is exhausted
fn browse_interactively(store: &mut PodcastStore) -> Result<()> {
    let term = Term::stdout();
    let mut shown = store.visible_podcasts().len();

    while store.has_more() {
        render_page_info(store);
        println!("{}", "[Enter] load more  [q] quit".dimmed());

        let key = term.read_key().context("Failed to read key")?;
        term.clear_last_lines(2).context("Failed to clear prompt")?;

        match key {
            Key::Enter | Key::Char(' ') | Key::Char('m') => {
                store.load_more();
                for podcast in &store.visible_podcasts()[shown..] {
                    render_card(podcast);
                }
                shown = store.visible_podcasts().len();
            }
            Key::Char('q') | Key::Escape | Key::CtrlC => break,
            _ => {}
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let genres = bundled_genres();

    if args.list_genres {
        for genre in &genres {
            println!("{:>3}  {}", genre.id.to_string().dimmed(), genre.title);
        }
        return Ok(());
    }

    let genre = parse_genre(&GenreLookup::new(&genres), &args.genre)?;
    let show_chrome = !args.quiet && !args.json;

    let reporter: SharedProgressReporter = if show_chrome {
        Arc::new(SpinnerReporter::new()?)
    } else {
        TracingReporter::shared()
    };

    let options = StoreOptions {
        source: args.source.clone(),
        page_size: args.page_size,
        unknown_genre_policy: args.unknown_genres,
    };
    let mut store = PodcastStore::new(&genres, options, reporter);

    store.set_selected_genre(genre);
    store.set_search_term(args.search.clone());
    store.set_sort_option(args.sort);

    if show_chrome {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "poddir".bold().magenta(),
            "- Podcast Directory".dimmed()
        );
    }

    // The fetch is tied to this run: Ctrl-C while loading cancels it
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let client = ReqwestClient::new();
    let loaded = store.load(&client, &cancel).await;
    interrupt.abort();

    if let Err(e) = loaded {
        eprintln!("{FAILURE}{} {}", "Error:".red().bold(), e.to_string().red());
        let code = if matches!(e, StoreError::Fetch(FetchError::Cancelled)) {
            130
        } else {
            1
        };
        std::process::exit(code);
    }

    for _ in 1..args.pages.max(1) {
        if !store.load_more() {
            break;
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(store.visible_podcasts())
            .context("Failed to serialize podcasts")?;
        println!("{json}");
        return Ok(());
    }

    if show_chrome {
        render_selection(&store);
    }

    if store.podcasts().is_empty() {
        println!("{}\n", "No podcasts match the current filters.".yellow());
    }

    for podcast in store.visible_podcasts() {
        render_card(podcast);
    }

    if args.interactive {
        browse_interactively(&mut store)?;
    }

    render_page_info(&store);

    Ok(())
}
