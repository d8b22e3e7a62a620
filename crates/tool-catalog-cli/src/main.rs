//! Tool Catalog CLI - entry point.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tool_catalog::{FilterCriteria, ALL};
use tool_catalog_cli::config::resolve_catalog_path;
use tool_catalog_cli::render::{render_detail, render_facets, render_list, render_table};
use tool_catalog_cli::session::CatalogSession;

#[derive(Parser)]
#[command(
    name = "tool-catalog",
    about = "Search, inspect and compare a catalog of tools",
    version
)]
struct Cli {
    /// Path to the catalog .json file.
    #[arg(short, long, global = true)]
    catalog: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Free-text search over name, descriptions and tags.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Exact category, or 'all'.
    #[arg(long, default_value = ALL)]
    category: String,

    /// Exact skill level, or 'all'.
    #[arg(long, default_value = ALL)]
    skill: String,

    /// Exact pricing model, or 'all'.
    #[arg(long, default_value = ALL)]
    pricing: String,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria::with_query(args.query)
            .category(args.category)
            .skill_level(args.skill)
            .pricing_model(args.pricing)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List tools matching the given filters.
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show details for one tool.
    Show {
        /// Tool id.
        id: String,
    },

    /// Compare two or more tools side by side.
    Compare {
        /// Tool ids to compare.
        ids: Vec<String>,
    },

    /// Show available category, skill and pricing values.
    Facets,

    /// Write the tools matching the given filters to a new catalog file.
    Export {
        /// Output file.
        out: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Validate a catalog file.
    Validate,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   tool-catalog completions bash > ~/.local/share/bash-completion/completions/tool-catalog
    ///   tool-catalog completions zsh > ~/.zfunc/_tool-catalog
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode (default).
    Repl,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let location = resolve_catalog_path(cli.catalog.as_deref());

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::List { filters } => {
            let mut session = CatalogSession::open_location(&location)?;
            session.set_criteria(filters.into());
            let filtered = session.filtered();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else {
                print!("{}", render_list(&filtered, session.selection()));
            }
        }

        Commands::Show { id } => {
            let session = CatalogSession::open_location(&location)?;
            match session.detail(&id) {
                Ok(detail) if cli.json => println!("{}", serde_json::to_string_pretty(&detail)?),
                Ok(detail) => print!("{}", render_detail(&detail)),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Compare { ids } => {
            let session = CatalogSession::open_location(&location)?;
            match session.compare_ids(&ids) {
                Ok(table) if cli.json => println!("{}", serde_json::to_string_pretty(&table)?),
                Ok(table) => print!("{}", render_table(&table)),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Facets => {
            let session = CatalogSession::open_location(&location)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(session.facets())?);
            } else {
                print!("{}", render_facets(session.facets()));
            }
        }

        Commands::Export { out, filters } => {
            let mut session = CatalogSession::open_location(&location)?;
            session.set_criteria(filters.into());
            let count = session.export(&out)?;
            println!("Exported {count} tools to {}", out.display());
        }

        Commands::Validate => match CatalogSession::open(location.path()) {
            Ok(session) => {
                let facets = session.facets();
                println!("Valid catalog: {}", session.source());
                println!("  Tools:          {}", session.records().len());
                println!("  Categories:     {}", facets.categories.len());
                println!("  Skill levels:   {}", facets.skill_levels.len());
                println!("  Pricing models: {}", facets.pricing_models.len());
            }
            Err(e) => {
                eprintln!("Invalid catalog file: {e}");
                std::process::exit(1);
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tool-catalog", &mut std::io::stdout());
        }

        Commands::Repl => {
            let session = CatalogSession::open_location(&location)?;
            tool_catalog_cli::repl::run(session)?;
        }
    }

    Ok(())
}
