mod cli;

use scenescape::api::{HttpLibraryApi, MovieQuery, ShowQuery};
use scenescape::config::{self, Config};
use scenescape::library;
use scenescape::scan::{ScanNotice, ScanTask, ScanTracker, TrackerConfig};
use scenescape_common::format::format_file_size;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use cli::{recursion_override, Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "scenescape=debug,scenescape_parser=debug".to_string()
        } else {
            "scenescape=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse {
            path,
            recursive,
            no_recursive,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let recursive = recursion_override(recursive, no_recursive);
            parse_local(&path, &config, recursive, json)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("scenescape {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Scan { path } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let api = connect(&config)?;
            scan(Arc::new(api), &path, &config).await
        }
        Commands::Status { task_id } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let task = connect(&config)?
                .scan_status(&task_id)
                .await
                .with_context(|| format!("Failed to fetch status of {task_id}"))?;
            print_task(&task);
            Ok(())
        }
        Commands::Movies {
            search,
            genre,
            year,
            page,
            limit,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let query = MovieQuery {
                search,
                genre,
                year,
                page,
                limit,
            };
            let movies = connect(&config)?
                .movies(&query)
                .await
                .context("Failed to list movies")?;
            for movie in &movies.results {
                match movie.year() {
                    Some(year) => println!("{:>6}  {} ({})", movie.id, movie.display_title(), year),
                    None => println!("{:>6}  {}", movie.id, movie.display_title()),
                }
            }
            print_page_footer(movies.len(), movies.page, movies.total_pages);
            Ok(())
        }
        Commands::Shows {
            search,
            genre,
            status,
            page,
            limit,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let query = ShowQuery {
                search,
                genre,
                status,
                page,
                limit,
            };
            let shows = connect(&config)?
                .tv_shows(&query)
                .await
                .context("Failed to list TV shows")?;
            for show in &shows.results {
                print!("{:>6}  {}", show.id, show.display_title());
                if let Some(seasons) = show.number_of_seasons {
                    print!(" [{} seasons]", seasons);
                }
                if let Some(ref status) = show.status {
                    print!(" ({})", status);
                }
                println!();
            }
            print_page_footer(shows.len(), shows.page, shows.total_pages);
            Ok(())
        }
        Commands::Stats => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let stats = connect(&config)?
                .stats()
                .await
                .context("Failed to fetch stats")?;
            println!("Movies:    {}", stats.total_movies);
            println!("TV shows:  {}", stats.total_tv_shows);
            println!("Episodes:  {}", stats.total_episodes);
            println!("Storage:   {}", stats.storage_used());
            Ok(())
        }
    }
}

fn connect(config: &Config) -> Result<HttpLibraryApi> {
    let api = HttpLibraryApi::new(&config.api)?;
    tracing::debug!("Using library server at {}", api.base_url());
    Ok(api)
}

async fn scan(api: Arc<HttpLibraryApi>, path: &str, config: &Config) -> Result<()> {
    let started = api
        .start_scan(path)
        .await
        .with_context(|| format!("Failed to start scan of {path}"))?;
    println!("Scan started: {}", started.task_id);
    if let Some(ref message) = started.message {
        println!("{}", message);
    }

    let mut tracker = ScanTracker::new(api, TrackerConfig::from(&config.scan));
    let mut updates = tracker.subscribe();
    tracker.start_tracking(started.task_id)?;

    loop {
        let state = updates.borrow_and_update().clone();
        if let Some(notice) = state.notice() {
            println!("{}", notice);
            return match notice {
                ScanNotice::Completed { .. } => Ok(()),
                ScanNotice::Failed { .. } => anyhow::bail!("scan did not complete"),
            };
        }
        if let Some(task) = state.task() {
            print_progress(task);
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    anyhow::bail!("scan tracker stopped unexpectedly");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracker.stop_tracking();
                println!("Stopped following scan; it continues on the server");
                return Ok(());
            }
        }
    }
}

fn print_progress(task: &ScanTask) {
    print!(
        "[{:>5.1}%] {:<9} {}/{}",
        task.progress_percent, task.status, task.processed_files, task.total_files
    );
    if let Some(ref file) = task.current_file {
        print!("  {}", file);
    }
    println!();
}

fn print_task(task: &ScanTask) {
    println!("Task:      {}", task.task_id);
    println!("Status:    {}", task.status);
    println!("Progress:  {:.1}%", task.progress_percent);
    println!("Files:     {}/{}", task.processed_files, task.total_files);
    if let Some(ref file) = task.current_file {
        println!("Current:   {}", file);
    }
    if let Some(ref error) = task.error_message {
        println!("Error:     {}", error);
    }
}

fn print_page_footer(count: usize, page: Option<u32>, total_pages: Option<u32>) {
    match (page, total_pages) {
        (Some(page), Some(total)) => println!("\n{} results (page {}/{})", count, page, total),
        _ => println!("\n{} results", count),
    }
}

fn parse_local(path: &Path, config: &Config, recursive: Option<bool>, json: bool) -> Result<()> {
    let mut media = config.media.clone();
    if let Some(recursive) = recursive {
        media.recursive = recursive;
    }
    let current_year = chrono::Utc::now().year().max(0) as u32;

    let files = library::classify_path(path, &media, current_year)
        .with_context(|| format!("Failed to classify {:?}", path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    for file in &files {
        println!("{}", file.path.display());
        match &file.media {
            Some(parsed) => {
                print!("  {}: {}", parsed.kind(), parsed.title());
                if let Some(year) = parsed.year() {
                    print!(" ({})", year);
                }
                if let scenescape_parser::ParsedMedia::Episode(episode) = parsed {
                    if let (Some(season), Some(number)) = (episode.season, episode.episode) {
                        print!(" S{:02}E{:02}", season, number);
                    }
                }
                println!("  [{}]", format_file_size(file.size));
            }
            None => println!("  unrecognized  [{}]", format_file_size(file.size)),
        }
        for suggestion in &file.suggestions {
            println!("  ! {}", suggestion);
        }
    }
    println!("\n{} media files", files.len());

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  API: {} (timeout {}s)", config.api.base_url, config.api.timeout_secs);
    println!(
        "  Scan polling: every {}ms, discard stale responses: {}",
        config.scan.poll_interval_ms, config.scan.discard_stale_responses
    );
    println!(
        "  Media: max {} MB, skip hidden: {}, recursive: {}",
        config.media.max_file_size_mb, config.media.skip_hidden_files, config.media.recursive
    );

    Ok(())
}
