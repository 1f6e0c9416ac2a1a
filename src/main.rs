use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikivault::cli::commands::export::{ExportOptions, ExportSource};
use wikivault::cli::ui::Output;
use wikivault::cli::{CommandContext, KeyArgs};
use wikivault::wiki::{CacheKey, ExportFormat};

/// Parse export format from string
fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "wikivault")]
#[command(version, about = "Cache, list and export generated repository wikis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        long,
        short,
        global = true,
        help = "Config file (replaces .wikivault/config.toml)"
    )]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override the configured cache root")]
    cache_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a cached wiki
    Get {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Store a wiki record (wiki_structure + generated_pages) from a JSON file
    Put {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long, help = "Path to the record JSON")]
        file: PathBuf,
    },

    /// Store a cache request JSON that names owner, repo, repo_type and language
    PutRequest {
        #[arg(help = "Path to the request JSON")]
        file: PathBuf,
    },

    /// Delete a cached wiki
    Delete {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// List processed projects in the cache
    Projects {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Export a wiki as Markdown or JSON
    Export {
        #[arg(
            long,
            requires = "repo",
            conflicts_with = "pages",
            help = "Repository owner (export from cache)"
        )]
        owner: Option<String>,
        #[arg(long, requires = "owner", help = "Repository name (export from cache)")]
        repo: Option<String>,
        #[arg(long = "type", default_value = "github", help = "Repository type")]
        repo_type: String,
        #[arg(long, default_value = "en", help = "Wiki language code")]
        language: String,
        #[arg(
            long,
            required_unless_present = "owner",
            help = "JSON array of pages to export instead of a cached wiki"
        )]
        pages: Option<PathBuf>,
        #[arg(long, help = "Repository URL for the document header")]
        repo_url: Option<String>,
        #[arg(
            long,
            value_parser = parse_export_format,
            help = "Export format: markdown, json (default from config)"
        )]
        format: Option<ExportFormat>,
        #[arg(
            long,
            short,
            help = "Directory to write the export into (default: stdout)"
        )]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mwikivault encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // Logs go to stderr so json output on stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    use wikivault::cli::commands;

    // Config is resolved per command so `config init` works before any file exists
    let load_context = || CommandContext::load(cli.config.as_deref(), cli.cache_dir.clone());

    match cli.command {
        Commands::Get { key, format } => {
            let ctx = load_context()?;
            commands::get::run(&ctx, &key, &format)?;
        }
        Commands::Put { key, file } => {
            let ctx = load_context()?;
            commands::put::run(&ctx, &key, &file)?;
        }
        Commands::PutRequest { file } => {
            let ctx = load_context()?;
            commands::put::run_request(&ctx, &file)?;
        }
        Commands::Delete { key } => {
            let ctx = load_context()?;
            commands::delete::run(&ctx, &key)?;
        }
        Commands::Projects { format } => {
            let ctx = load_context()?;
            commands::projects::run(&ctx, &format)?;
        }
        Commands::Export {
            owner,
            repo,
            repo_type,
            language,
            pages,
            repo_url,
            format,
            output,
        } => {
            let source = match (pages, owner, repo) {
                (Some(path), _, _) => ExportSource::File(path),
                (None, Some(owner), Some(repo)) => {
                    ExportSource::Cache(CacheKey::new(owner, repo, repo_type, language))
                }
                _ => anyhow::bail!("export needs either --pages or --owner and --repo"),
            };

            let ctx = load_context()?;
            commands::export::run(
                &ctx,
                ExportOptions {
                    source,
                    repo_url,
                    format,
                    output,
                },
            )?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(&load_context()?, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path(&load_context()?)?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_put_request_takes_file() {
        let cli = Cli::try_parse_from(["wikivault", "put-request", "request.json"]).unwrap();
        match cli.command {
            Commands::PutRequest { file } => assert_eq!(file, PathBuf::from("request.json")),
            _ => panic!("expected put-request"),
        }
    }

    #[test]
    fn test_export_needs_a_source() {
        assert!(Cli::try_parse_from(["wikivault", "export"]).is_err());
        assert!(
            Cli::try_parse_from(["wikivault", "export", "--owner", "acme", "--pages", "p.json"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "wikivault", "export", "--owner", "acme", "--repo", "widgets", "--format", "md",
        ])
        .unwrap();
        match cli.command {
            Commands::Export { format, .. } => assert_eq!(format, Some(ExportFormat::Markdown)),
            _ => panic!("expected export"),
        }
    }
}
