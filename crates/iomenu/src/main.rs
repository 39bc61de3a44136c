//! iomenu command line.
//!
//! Renders or exports a menu declared in a navigation file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use iomenu::{
    ListRenderer, MenuConfig, MenuContext, MenuTree, NavigationConfig, RenderOptions, SecurityRules, SessionUser,
    StaticRoutes,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a menu as nested HTML lists.
    Render(RenderArgs),
    /// Print a menu as JSON.
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Navigation file (YAML).
    #[arg(long)]
    file: PathBuf,

    /// Name of the menu in the navigation file.
    #[arg(long)]
    menu: String,

    /// Route security rules (YAML) whose credentials are copied onto items.
    #[arg(long)]
    security: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Route table (YAML) used to resolve route names.
    #[arg(long)]
    routes: Option<PathBuf>,

    /// URI of the page being served; the matching item is marked current.
    #[arg(long)]
    current_uri: Option<String>,

    /// Levels of children to render.
    #[arg(long)]
    depth: Option<usize>,

    /// Render without indentation.
    #[arg(long)]
    compressed: bool,

    /// Render for an authenticated user.
    #[arg(long)]
    authenticated: bool,

    /// Credential held by the user (repeatable).
    #[arg(long = "credential")]
    credentials: Vec<String>,

    /// Culture of the user.
    #[arg(long)]
    culture: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = MenuConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::Render(args) => render(args, config),
        Command::Export(args) => export(args, config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iomenu=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_navigation(source: &SourceArgs) -> Result<NavigationConfig> {
    let mut navigation = NavigationConfig::from_path(&source.file)?;
    if let Some(path) = &source.security {
        let rules = SecurityRules::from_path(path)?;
        navigation.apply_security(&rules);
    }
    Ok(navigation)
}

fn load_routes(path: &Path) -> Result<StaticRoutes> {
    StaticRoutes::from_path(path).with_context(|| format!("failed to load routes {}", path.display()))
}

fn render(args: RenderArgs, config: MenuConfig) -> Result<()> {
    let navigation = load_navigation(&args.source)?;

    let mut user = if args.authenticated {
        SessionUser::authenticated()
    } else {
        SessionUser::anonymous()
    };
    for credential in args.credentials {
        user = user.with_credential(credential);
    }
    if let Some(culture) = args.culture {
        user = user.with_culture(culture);
    }

    let mut context = MenuContext::new().with_user(user);
    if let Some(path) = &args.routes {
        context = context.with_routes(load_routes(path)?);
    }
    if let Some(uri) = args.current_uri {
        context = context.with_request_uri(uri);
    }

    let mut tree = MenuTree::new().with_config(config).with_context(context);
    let root = navigation.build(&mut tree, &args.source.menu)?;

    let mut options = RenderOptions::from_config(tree.config());
    if args.compressed {
        options.compressed = true;
    }
    let html = tree.render_with(&ListRenderer::new(options), root, args.depth);
    info!(menu = %args.source.menu, bytes = html.len(), "rendered menu");

    if html.ends_with('\n') {
        print!("{html}");
    } else {
        println!("{html}");
    }
    Ok(())
}

fn export(args: ExportArgs, config: MenuConfig) -> Result<()> {
    let navigation = load_navigation(&args.source)?;
    let mut tree = MenuTree::new().with_config(config);
    let root = navigation.build(&mut tree, &args.source.menu)?;

    let json = serde_json::to_string_pretty(&tree.to_array(root, true)).context("failed to serialize menu")?;
    println!("{json}");
    Ok(())
}
