//! # pdsc-picker CLI Entry Point
//!
//! Loads a CMSIS-Pack device descriptor and opens an interactive device
//! picker with live search.
//!
//! ## Usage
//!
//! ```bash
//! # Use ./devices.pdsc (or the only *.pdsc in the current directory)
//! pdsc-picker
//!
//! # Use a specific workspace directory
//! pdsc-picker --path /path/to/pack
//!
//! # Use a specific file
//! pdsc-picker --file ./Keil.STM32F4xx_DFP.pdsc
//!
//! # Print the catalog and exit
//! pdsc-picker --debug
//! pdsc-picker --json
//! ```
//!
//! ## Flow
//!
//! 1. **Locate**: find the descriptor in the workspace root
//! 2. **Build**: parse the XML and flatten it into a catalog
//! 3. **Pick**: hand the catalog to the TUI, which filters and selects on its
//!    own until the user closes it
//!
//! Any error in steps 1-2 is reported once and nothing is displayed.
//!
//! ## Key Bindings
//!
//! - `/` - Enter search mode (type to filter, `Esc` to leave)
//! - `j` / `Down`, `k` / `Up` - Move the cursor
//! - `Enter` / `Space` - Select the device under the cursor
//! - `Ctrl+u` - Clear the search
//! - `Tab` - Toggle focus between list and description
//! - `i` - Show/hide help
//! - `q` / `Esc` - Close the picker

use pdsc_picker::catalog::{self, Catalog, PackageDocument};
use pdsc_picker::ui::config::Config;
use pdsc_picker::ui::theme::Theme;
use pdsc_picker::ui::{self, App, SurfaceMessage};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// pdsc-picker - browse and pick devices from a CMSIS-Pack descriptor
#[derive(Parser, Debug)]
#[command(name = "pdsc-picker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive device picker for CMSIS-Pack .pdsc files", long_about = None)]
struct Args {
    /// Workspace directory to look for the descriptor in
    #[arg(short, long, value_name = "DIR", conflicts_with = "file")]
    path: Option<PathBuf>,

    /// Descriptor file to open directly
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        conflicts_with = "path"
    )]
    file: Option<PathBuf>,

    /// Color theme (overrides the config file)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the catalog as text and exit
    #[arg(long, conflicts_with = "json")]
    debug: bool,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    json: bool,

    /// Persist the effective theme and source file name to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    // Restore the terminal before the default hook prints the panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args);

    let _ = panic::take_hook();

    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pdsc_picker=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Resolve config and CLI overrides into the theme and file name to use.
fn resolve_settings(args: &Args, config: &Config) -> (Theme, String) {
    let theme_name = args.theme.as_deref().unwrap_or(&config.theme);
    let theme = match Theme::by_name(theme_name) {
        Some(theme) => theme.clone(),
        None => {
            warn!("Unknown theme '{}', using default", theme_name);
            Theme::default_theme().clone()
        }
    };
    (theme, config.source_file.clone())
}

fn run_application(args: Args) -> Result<()> {
    run_with_config(args, Config::load())
}

fn run_with_config(args: Args, mut config: Config) -> Result<()> {
    let (theme, source_file) = resolve_settings(&args, &config);

    if args.save_config {
        config.theme = theme.name.to_string();
        let path = Config::config_path()?;
        config.save_to(&path)?;
        println!("Saved config to {}", path.display());
    }

    let source = if let Some(file_path) = args.file {
        file_path
    } else {
        let root = match args.path {
            Some(path) => path
                .canonicalize()
                .with_context(|| format!("Failed to access directory: {}", path.display()))?,
            None => std::env::current_dir().context("Failed to get current working directory")?,
        };
        if !root.is_dir() {
            anyhow::bail!("Path '{}' exists but is not a directory", root.display());
        }
        catalog::locate_source(&root, &source_file)?
    };

    let (document, catalog) = catalog::load_catalog(&source)
        .with_context(|| format!("Failed to load device catalog from {}", source.display()))?;
    info!(
        "Loaded {} devices in {} subfamilies",
        catalog.device_count(),
        catalog.groups().len()
    );

    if args.json {
        let json = serde_json::to_string_pretty(&catalog).context("Failed to serialize catalog")?;
        println!("{}", json);
        return Ok(());
    }

    if args.debug {
        print_catalog(&catalog);
        return Ok(());
    }

    let title = package_title(&document, &source);
    let mut app = App::new(catalog, title, theme);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader);

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Header text: the pack's `<vendor>.<name>` if declared, else the file name.
fn package_title(document: &PackageDocument, source: &Path) -> String {
    match (&document.package.vendor, &document.package.name) {
        (Some(vendor), Some(name)) => format!("{}.{}", vendor, name),
        (None, Some(name)) => name.clone(),
        _ => source
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string()),
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("=== Device Catalog ===");
    for group in catalog.groups() {
        println!("{} ({} devices)", group.label, group.devices.len());
        for device in &group.devices {
            println!("  - {}: {}", device.name, device.description);
        }
    }
    println!(
        "\nTotal: {} devices in {} subfamilies",
        catalog.device_count(),
        catalog.groups().len()
    );
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let Some(event) = event_reader.read_event(Duration::from_millis(250))? else {
            continue;
        };

        if let Event::Key(key) = event {
            if let Some(SurfaceMessage::Close) = app.handle_key(key) {
                info!("Picker closed");
                return Ok(());
            }
        }
    }
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}
