//! Robots-Sitemap main entry point
//!
//! This is the command-line interface for inspecting a site's robots.txt and
//! expanding its sitemaps.

use clap::Parser;
use robots_sitemap::config::{load_config, Config};
use robots_sitemap::robots::{robots_url, DEFAULT_AGENT};
use robots_sitemap::Robots;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Robots-Sitemap: strict robots.txt inspection and sitemap expansion
///
/// Loads the configured site's robots.txt, prints the parsed rules, and
/// optionally checks a path or lists every URL found through the sitemaps.
#[derive(Parser, Debug)]
#[command(name = "robots-sitemap")]
#[command(version)]
#[command(about = "Inspect robots.txt rules and expand sitemaps", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// User-agent block to query
    #[arg(long, default_value = DEFAULT_AGENT)]
    agent: String,

    /// Report whether PATH is declared allowed or disallowed for the agent
    #[arg(long, value_name = "PATH")]
    check: Option<String>,

    /// Expand sitemaps and print every URL entry
    #[arg(long)]
    sitemaps: bool,

    /// Sitemap to expand instead of the ones declared in robots.txt
    #[arg(long, value_name = "URL", requires = "sitemaps")]
    sitemap_url: Option<String>,

    /// Validate config and show what would be fetched without fetching
    #[arg(long, conflicts_with_all = ["check", "sitemaps"])]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let robots = Robots::from_config(&config)?;
    if let Err(e) = robots.load().await {
        tracing::error!("Failed to load {}: {}", robots.robots_url(), e);
        return Err(e.into());
    }

    print_rules(&robots)?;

    if let Some(path) = &cli.check {
        handle_check(&robots, path, &cli.agent);
    }

    if cli.sitemaps {
        let override_url = cli.sitemap_url.or(config.site.sitemap_url);
        handle_sitemaps(&robots, override_url.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_sitemap=info,warn"),
            1 => EnvFilter::new("robots_sitemap=debug,info"),
            2 => EnvFilter::new("robots_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be fetched
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Robots-Sitemap Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  robots.txt: {}", robots_url(&config.site.base_url)?);
    match &config.site.sitemap_url {
        Some(url) => println!("  Sitemap override: {}", url),
        None => println!("  Sitemap override: (none, using robots.txt)"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  HTTPS only: {}", config.http.https_only);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Prints every agent block, the sitemaps, and the crawl delay
fn print_rules<T: robots_sitemap::Transport>(
    robots: &Robots<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = robots.model()?;

    println!("robots.txt: {}", robots.robots_url());
    println!("\nUser Agents ({}):", model.user_agent_count());
    for agent in model.user_agents() {
        println!("  - {}", agent);
        for path in model.allowed_paths(agent)? {
            println!("    Allow: {}", path);
        }
        for path in model.disallowed_paths(agent)? {
            println!("    Disallow: {}", path);
        }
    }

    println!("\nSitemaps ({}):", model.sitemaps().len());
    for sitemap in model.sitemaps() {
        println!("  - {}", sitemap);
    }

    println!("\nCrawl delay: {}s", model.crawl_delay());

    Ok(())
}

/// Handles --check: reports the declared status of one path
fn handle_check<T: robots_sitemap::Transport>(robots: &Robots<T>, path: &str, agent: &str) {
    let allowed = robots.is_path_allowed(path, agent);
    let disallowed = robots.is_path_disallowed(path, agent);

    println!("\nCheck {} for {}:", path, agent);
    println!("  Declared Allow: {}", if allowed { "yes" } else { "no" });
    println!(
        "  Declared Disallow: {}",
        if disallowed { "yes" } else { "no" }
    );
}

/// Handles --sitemaps: expands sitemaps and prints every entry
async fn handle_sitemaps<T: robots_sitemap::Transport>(
    robots: &Robots<T>,
    sitemap_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match sitemap_url {
        Some(url) => tracing::info!("Expanding sitemap {}", url),
        None => tracing::info!("Expanding sitemaps declared in robots.txt"),
    }

    let entries = robots.sitemap_links(sitemap_url).await?;

    println!("\nSitemap URLs ({}):", entries.len());
    for entry in &entries {
        let mut details = Vec::new();
        if let Some(lastmod) = &entry.lastmod {
            details.push(format!("lastmod {}", lastmod));
        }
        if let Some(changefreq) = &entry.changefreq {
            details.push(format!("changefreq {}", changefreq));
        }
        if let Some(priority) = &entry.priority {
            details.push(format!("priority {}", priority));
        }

        if details.is_empty() {
            println!("  {}", entry.loc);
        } else {
            println!("  {} ({})", entry.loc, details.join(", "));
        }
    }

    Ok(())
}
