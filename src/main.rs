use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use protech::config::{self, ConfigError, SiteConfig, DEFAULT_HOST, DEFAULT_PORT};
use protech::export::export_site;
use protech::location::slug::{is_plausible_slug, normalize_slug};
use protech::location::{location_slug, resolve, to_display_name, to_slug, LocationSignal, ResolvedLocation, Runtime};
use protech::models::AppState;
use protech::routes::build_app;

fn build_state(env_file: Option<&str>, config_dir: Option<PathBuf>, preview: bool) -> Result<AppState, ConfigError> {
    config::load_env_file(env_file);
    let dir = config_dir.or_else(config::get_config_dir);
    let site_config = SiteConfig::load(dir.as_deref())?;
    let runtime = if preview { Runtime::Preview } else { config::get_runtime() };
    let mut state = AppState::new(site_config, runtime, config::get_public_base_url());
    state.geo_debug = config::geo_debug_enabled();
    Ok(state)
}

fn state_or_exit(env_file: Option<&str>, config_dir: Option<PathBuf>, preview: bool) -> AppState {
    match build_state(env_file, config_dir, preview) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(%e, "Failed to load site configuration");
            eprintln!("{}: {}", yansi::Paint::red("Invalid site configuration"), e);
            process::exit(1);
        }
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    tracing::info!(%addr, runtime = state.runtime.as_str(), services = state.catalog.len(), "Starting site server");
    let app = build_app(state);
    println!(
        "{} {}",
        yansi::Paint::new("Site running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_location(location: &ResolvedLocation) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let coord = |v: Option<f64>| v.map(|c| c.to_string()).unwrap_or_default();
    table.add_row(vec!["city".to_string(), text(&location.city)]);
    table.add_row(vec!["region".to_string(), text(&location.region)]);
    table.add_row(vec!["country".to_string(), text(&location.country)]);
    table.add_row(vec!["county".to_string(), text(&location.county)]);
    table.add_row(vec!["timezone".to_string(), text(&location.timezone)]);
    table.add_row(vec!["continent".to_string(), text(&location.continent)]);
    table.add_row(vec!["latitude".to_string(), coord(location.latitude)]);
    table.add_row(vec!["longitude".to_string(), coord(location.longitude)]);
    table.add_row(vec!["detected".to_string(), location.is_detected.to_string()]);
    table.add_row(vec!["service area".to_string(), text(&location.matched_service_area)]);
    table.add_row(vec!["display".to_string(), location.display_location()]);
    table.add_row(vec!["slug".to_string(), location_slug(location)]);
    println!("\n{table}\n");
}

fn print_config_summary(config: &SiteConfig) {
    let mut services = new_table();
    services.set_header(vec!["Slug", "Name", "Meta title"]);
    for service in &config.services {
        services.add_row(vec![
            service.slug.clone(),
            service.name.clone(),
            service.meta_title.clone().unwrap_or_else(|| "(generated)".to_string()),
        ]);
    }
    println!("\n{services}");

    let mut areas = new_table();
    areas.set_header(vec!["Service area", "County", "Cities", "Zips"]);
    for area in &config.service_areas {
        areas.add_row(vec![
            area.name.clone(),
            area.county.clone(),
            area.cities.join(", "),
            area.zips.join(", "),
        ]);
    }
    println!("{areas}\n");
}

#[derive(Parser)]
#[command(
    name = "protech",
    author,
    version,
    about = "Protech localized service site",
    long_about = r#"Protech — a localized marketing site for heating and cooling services.

Every page adapts to where the visitor is: edge geolocation headers are
resolved against the configured service areas, visitors can pin their own
location, and each service has a landing page per location.

Examples:
  1) Run the site (dev):
      cargo run -- serve --host 127.0.0.1 --port 8080
  2) Check a configuration directory:
      protech check-config --config-dir ./config
  3) See how a visitor from Dalton, OH is resolved:
      protech resolve --city Dalton --region OH --country US
  4) Write the static site:
      protech export --out ./dist
"#,
    after_help = "Use `protech <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Directory holding site.json, services.json and service_areas.json
        #[arg(long)]
        config_dir: Option<PathBuf>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
        /// Serve the mock location to every visitor
        #[arg(long, default_value_t = false)]
        preview: bool,
    },
    /// Validate the site configuration
    #[command(
        about = "Validate the site configuration.",
        long_about = "Load site.json, services.json and service_areas.json (falling back to the built-in defaults for missing files), validate them and print the service catalog and service areas."
    )]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Resolve a location the way the site would for a visitor
    #[command(
        about = "Resolve a location from geolocation fields.",
        long_about = "Build a geolocation signal from the given fields and resolve it against the configured service areas. Omit every field to see the placeholder location."
    )]
    Resolve {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        /// Resolve as the preview runtime does
        #[arg(long, default_value_t = false)]
        preview: bool,
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Convert between locations and URL slugs
    Slug {
        #[command(subcommand)]
        sub: SlugCommands,
    },
    /// Render every page to static files
    #[command(
        about = "Export the site as static files.",
        long_about = "Render the home page, the services index and every service and service-location page for the preview location into the output directory."
    )]
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        env_file: Option<String>,
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SlugCommands {
    /// Build a location slug, e.g. `Lewis Center` + `OH` -> `lewis-center-oh`
    ToSlug {
        city: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long, default_value = protech::location::DEFAULT_FALLBACK_SLUG)]
        fallback: String,
    },
    /// Turn a slug back into a display name, e.g. `lewis-center-oh` -> `Lewis Center, OH`
    Display { slug: String },
}

async fn run_export(state: &AppState, out: &Path) {
    match export_site(state, out).await {
        Ok(files) => {
            println!(
                "{} {} {}",
                yansi::Paint::new("Exported").green(),
                files.len(),
                yansi::Paint::new(format!("files to {}", out.display())).green()
            );
        }
        Err(e) => {
            tracing::error!(%e, "Static export failed");
            eprintln!("{}: {}", yansi::Paint::new("Export failed").red(), e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // Dispatch CLI commands. If no command provided, serve the site by default
    let Some(command) = cli.command else {
        let state = state_or_exit(None, None, false);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            config_dir,
            stylesheet,
            preview,
        } => {
            let state = state_or_exit(env_file.as_deref(), config_dir, preview);
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file, config_dir } => {
            config::load_env_file(env_file.as_deref());
            let dir = config_dir.or_else(config::get_config_dir);
            match SiteConfig::load(dir.as_deref()) {
                Ok(site_config) => {
                    print_config_summary(&site_config);
                    println!(
                        "{} ({} services, {} service areas, base URL {})",
                        yansi::Paint::new("Configuration looks valid").green(),
                        site_config.services.len(),
                        site_config.service_areas.len(),
                        config::get_public_base_url()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Resolve {
            city,
            region,
            country,
            zip,
            preview,
            config_dir,
        } => {
            let state = state_or_exit(None, config_dir, preview);
            let signal = LocationSignal {
                city,
                region,
                country,
                zip,
                ..LocationSignal::default()
            };
            let resolved = resolve(&signal, &state.service_areas, state.runtime);
            print_location(&resolved);
        }
        Commands::Slug { sub } => match sub {
            SlugCommands::ToSlug { city, region, fallback } => {
                let slug = to_slug(city.as_deref(), region.as_deref(), &normalize_slug(&fallback));
                if !is_plausible_slug(&slug) {
                    eprintln!("{} '{}'", yansi::Paint::new("Produced an implausible slug").yellow(), slug);
                }
                println!("{}", slug);
            }
            SlugCommands::Display { slug } => {
                let outcome = to_display_name(&slug);
                if let Some(fallback) = &outcome.fallback {
                    eprintln!("{}: {}", yansi::Paint::new("Slug could not be decoded").yellow(), fallback);
                }
                println!("{}", outcome.value);
            }
        },
        Commands::Export {
            out,
            env_file,
            config_dir,
        } => {
            let state = state_or_exit(env_file.as_deref(), config_dir, true);
            run_export(&state, &out).await;
        }
    }
}
