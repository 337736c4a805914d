use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use logfind::{ConfigStore, LogFindError, LogFinder, MatchMode, report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(
    name = "logfind",
    version,
    about = "Search text files under a folder for matching lines",
    long_about = r#"
Search text files under a folder for matching lines

Examples:
  logfind folder ~/logs                 # Remember ~/logs as the search folder
  logfind search "John_Doe says"        # Lines containing the keyword
  logfind search --approx john pay      # Lines where each token is inside some word
  logfind search --dir ./chat -i hello  # Case-insensitive search in another folder
"#
)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the folder for matching lines
    Search(SearchArgs),
    /// Show the remembered folder, or remember a new one
    Folder {
        /// Folder to remember
        dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Keyword, or tokens with --approx
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Folder to search (defaults to the remembered folder)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Match lines where every token appears inside some word
    #[arg(long, conflicts_with = "regex")]
    approx: bool,

    /// Treat the query as a regular expression
    #[arg(long)]
    regex: bool,

    /// Ignore case when matching
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// File extensions to search
    #[arg(long = "ext", default_value = "txt")]
    extensions: Vec<String>,

    /// Maximum directory depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,

    /// Stop after this many matching lines
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    limit: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` wins when set; otherwise warn, or debug with `-v`
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

/// Returns whether anything was found
async fn run(cli: Cli) -> Result<bool> {
    let store = match cli.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::new()?,
    };

    match cli.command {
        Command::Folder { dir: Some(dir) } => {
            let saved = store
                .remember_folder(&dir)
                .with_context(|| format!("could not remember {}", dir.display()))?;
            println!("Selected folder: {}", saved.display());
            Ok(true)
        }
        Command::Folder { dir: None } => match store.load()?.folder_path {
            Some(folder) => {
                println!("{}", folder.display());
                Ok(true)
            }
            None => {
                println!("{}", LogFindError::NoFolderSelected);
                Ok(false)
            }
        },
        Command::Search(args) => search(&store, args).await,
    }
}

async fn search(store: &ConfigStore, args: SearchArgs) -> Result<bool> {
    let folder = match args.dir {
        Some(dir) => dir,
        None => store
            .load()?
            .folder_path
            .ok_or(LogFindError::NoFolderSelected)?,
    };

    let mode = if args.approx {
        MatchMode::Approximate
    } else if args.regex {
        MatchMode::Regex
    } else {
        MatchMode::Keyword
    };

    let mut search = LogFinder::search_dir(&folder)
        .query(&args.query.join(" "), mode)
        .case_sensitive(!args.ignore_case)
        .extensions(&args.extensions)
        .follow_links(args.follow_links);
    if let Some(depth) = args.max_depth {
        search = search.max_depth(depth);
    }
    if let Some(limit) = args.limit {
        search = search.limit(limit as usize);
    }

    let result = search
        .search()
        .await
        .with_context(|| format!("search in {} failed", folder.display()))?;

    if args.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_text(&result));
    }

    Ok(!result.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(false, Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(true, Some("logfind=trace")).to_string(), "logfind=trace");
    }

    #[test]
    fn default_level_without_rust_log() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
        assert_eq!(log_filter(true, None).to_string(), "debug");
        assert_eq!(log_filter(false, Some("")).to_string(), "warn");
    }
}
