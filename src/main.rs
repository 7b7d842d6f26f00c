use std::{sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use trackmap::{
    config, error,
    lookup::Lookup,
    markets::{MarketResolver, ResolverKind},
    server::{self, AppState},
    spotify::SpotifyClient,
    success,
    types::MarketTableRow,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web server
    Serve(ServeOptions),

    /// Print the markets of an artist's top track
    Markets(MarketsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,

    /// Market resolver, overrides MARKET_RESOLVER
    #[clap(long, value_enum)]
    pub resolver: Option<ResolverKind>,

    /// Open the search page in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MarketsOptions {
    /// Artist to search for
    #[clap(long)]
    pub artist: String,

    /// Market resolver, overrides MARKET_RESOLVER
    #[clap(long, value_enum)]
    pub resolver: Option<ResolverKind>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn build_resolver(kind: Option<ResolverKind>) -> MarketResolver {
    let built = match kind {
        Some(kind) => MarketResolver::from_kind(kind).await,
        None => MarketResolver::from_env().await,
    };

    match built {
        Ok(resolver) => resolver,
        Err(e) => error!("Cannot set up market resolver. Err: {}", e),
    }
}

fn build_spotify() -> SpotifyClient {
    match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    }
}

async fn serve(opt: ServeOptions) {
    let spotify = build_spotify();
    let resolver = build_resolver(opt.resolver).await;
    let state = Arc::new(AppState::new(spotify, resolver));

    let addr = opt.addr.unwrap_or_else(config::server_addr);
    let listener = match server::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    if opt.open {
        let url = format!("http://{}/", addr);
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Please navigate to {} manually.", url);
        }
    }

    if let Err(e) = server::serve(listener, state).await {
        error!("Server stopped. Err: {}", e);
    }
}

async fn markets(opt: MarketsOptions) {
    let spotify = build_spotify();
    let resolver = build_resolver(opt.resolver).await;

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Looking up {}...", opt.artist));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = Lookup::new(&spotify, &resolver).run(&opt.artist).await;
    pb.finish_and_clear();

    match result {
        Ok(lookup) => {
            let rows: Vec<MarketTableRow> =
                lookup.markets.iter().map(MarketTableRow::from).collect();
            println!("{}", Table::new(rows));
            success!(
                "{} - \"{}\": {} markets mapped, {} skipped",
                lookup.artist.name,
                lookup.track.name,
                lookup.markets.len(),
                lookup.skipped()
            );
        }
        Err(e) => error!("Lookup failed. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Markets(opt) => markets(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
