use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ArClick, ArLauncher, ArPresenter, CardImage, CatalogSource, CategoryNav, FileCatalogSource,
    GridView, HttpCatalogSource, HttpWarmupHints, MenuApp, ModelPreloader, ModelViewer, Platform,
    ViewerSources,
};
use shared::domain::MenuCatalog;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(about = "Menu document and server tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a menu document and report items that cannot be viewed in AR.
    Validate { path: PathBuf },
    /// Load the menu from a running server and print what a customer would see.
    Browse {
        #[arg(long, default_value = "http://localhost:3000")]
        server_url: String,
        #[arg(long)]
        category: Option<String>,
        /// Press "View in AR" on this card of the selected category.
        #[arg(long, requires = "category")]
        ar: Option<usize>,
        #[arg(long, default_value = "Mozilla/5.0 (X11; Linux x86_64)")]
        user_agent: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { path } => validate(path).await,
        Command::Browse {
            server_url,
            category,
            ar,
            user_agent,
        } => browse(&server_url, category.as_deref(), ar, &user_agent).await,
    }
}

async fn validate(path: PathBuf) -> Result<ExitCode> {
    let source = FileCatalogSource::new(&path);
    let catalog = match source.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{}: {err}", path.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    for line in validation_report(&catalog) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

fn validation_report(catalog: &MenuCatalog) -> Vec<String> {
    let mut lines = Vec::new();
    for category in catalog.categories() {
        lines.push(format!("{} ({} items)", category.name, category.items.len()));
        for (index, item) in category.items.iter().enumerate() {
            if item.glb().is_none() {
                lines.push(format!("  warning: #{index} '{}' has no glb, AR disabled", item.name));
            } else if item.usdz().is_none() {
                lines.push(format!("  note: #{index} '{}' has no usdz, no iOS AR", item.name));
            }
            if item.thumbnail().is_none() {
                lines.push(format!("  note: #{index} '{}' has no thumbnail", item.name));
            }
        }
    }
    lines.push(format!(
        "{} categories, {} items",
        catalog.categories().len(),
        catalog.item_count()
    ));
    lines
}

async fn browse(
    server_url: &str,
    category: Option<&str>,
    ar: Option<usize>,
    user_agent: &str,
) -> Result<ExitCode> {
    let http = reqwest::Client::new();
    let source = HttpCatalogSource::with_client(http.clone(), server_url)
        .with_context(|| format!("invalid server url '{server_url}'"))?;
    let base = Url::parse(server_url)?;

    let platform = Platform::from_user_agent(user_agent);
    let mut app = MenuApp::new(
        ArLauncher::new(ConsoleViewer, ConsolePresenter, platform),
        ModelPreloader::new(HttpWarmupHints::new(http, base)),
    );

    let nav = app.load(&source).await;
    let buttons = match &nav {
        CategoryNav::Buttons(buttons) => buttons,
        CategoryNav::Error { message } => {
            eprintln!("{message}");
            return Ok(ExitCode::FAILURE);
        }
        CategoryNav::Loading => return Ok(ExitCode::FAILURE),
    };

    println!("Categories:");
    for button in buttons {
        println!("  [{}] ({})", button.name, button.item_count);
    }

    let selected: Vec<String> = match category {
        Some(name) => vec![name.to_string()],
        None => buttons.iter().map(|b| b.name.clone()).collect(),
    };
    for name in &selected {
        println!();
        println!("== {name}");
        if let Some(grid) = app.select_category(name) {
            print_grid(grid);
        }
    }

    if let Some(index) = ar {
        match app.click_ar(index) {
            ArClick::Launched(id) => println!("AR session {} loading on {platform:?}", id.0),
            ArClick::Rejected(err) => println!("AR unavailable: {err}"),
            ArClick::Ignored => println!("no card #{index}"),
        }
        app.close_ar();
    }

    // Give the detached preload requests a moment before the runtime shuts down.
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(ExitCode::SUCCESS)
}

fn print_grid(grid: &GridView) {
    match grid {
        GridView::NoItems { message } => println!("  {message}"),
        GridView::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                let image = match &card.image {
                    CardImage::Thumbnail { src, .. } => src.as_str(),
                    CardImage::Hidden => "-",
                };
                println!(
                    "  #{index} {} | {} | {} | {image} | [{}]",
                    card.title, card.description, card.price_label, card.action_label
                );
            }
        }
    }
}

struct ConsoleViewer;

impl ModelViewer for ConsoleViewer {
    fn set_sources(&mut self, sources: &ViewerSources) {
        println!("viewer src={}", sources.src);
        if let Some(ios_src) = &sources.ios_src {
            println!("viewer ios-src={ios_src}");
        }
    }

    fn clear_sources(&mut self) {
        println!("viewer cleared");
    }

    fn can_activate_ar(&self) -> bool {
        false
    }

    fn activate_ar(&mut self) {}
}

struct ConsolePresenter;

impl ArPresenter for ConsolePresenter {
    fn show_overlay(&mut self) {}

    fn hide_overlay(&mut self) {}

    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            println!("loading model...");
        }
    }

    fn alert(&mut self, message: &str) {
        println!("alert: {message}");
    }
}
