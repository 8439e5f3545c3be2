use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedmark_core::AppConfig;

mod commands;
mod render;

use commands::FeedSource;
use render::Palette;

#[derive(Parser)]
#[command(name = "feedmark")]
#[command(author, version, about = "A markdown-driven terminal RSS reader")]
#[command(group(ArgGroup::new("action").args(["add", "list", "tui"])))]
struct Cli {
    /// Add the feed at URL to the feed list
    #[arg(long, value_name = "URL", requires = "name")]
    add: Option<String>,

    /// Display name for the added feed (used with --add)
    #[arg(long, requires = "add")]
    name: Option<String>,

    /// Category heading for the added feed (used with --add)
    #[arg(long, requires = "add")]
    category: Option<String>,

    /// List configured feeds without fetching
    #[arg(long)]
    list: bool,

    /// Start the interactive terminal UI
    #[arg(long)]
    tui: bool,

    /// Articles shown per feed
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_entries: Option<u32>,

    /// Feed list file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load()?;
    init_logging(&config, cli.verbose, cli.tui);

    // Command line flags override the config file
    let explicit_file = cli.file.is_some();
    if let Some(file) = cli.file {
        config.general.feed_file = file;
    }
    if let Some(max_entries) = cli.max_entries {
        config.general.max_entries = max_entries as usize;
    }

    let source = FeedSource::new(config.feed_file(), explicit_file);
    let palette = if std::io::stdout().is_terminal() {
        Palette::for_theme(&config.ui.theme)
    } else {
        Palette::plain()
    };

    if let (Some(url), Some(name)) = (cli.add, cli.name) {
        return commands::add::run(&source, &url, &name, cli.category.as_deref(), &palette);
    }

    if cli.list {
        return commands::list::run(&source, &palette);
    }

    if cli.tui {
        return commands::tui::run(&config, &source).await;
    }

    commands::read::run(&source, &config, &palette).await
}

fn init_logging(config: &AppConfig, verbose: bool, tui: bool) {
    // Anything below error would draw over the alternate screen
    let filter = if tui {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_add_requires_name() {
        let err = Cli::try_parse_from(["feedmark", "--add", "https://example.com/rss"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_name_requires_add() {
        assert!(Cli::try_parse_from(["feedmark", "--name", "HN"]).is_err());
        assert!(Cli::try_parse_from(["feedmark", "--category", "Tech"]).is_err());
    }

    #[test]
    fn test_actions_are_exclusive() {
        let err = Cli::try_parse_from(["feedmark", "--list", "--tui"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_max_entries_must_be_positive() {
        assert!(Cli::try_parse_from(["feedmark", "--max-entries", "0"]).is_err());
        assert!(Cli::try_parse_from(["feedmark", "--max-entries", "-3"]).is_err());

        let cli = Cli::try_parse_from(["feedmark", "--max-entries", "3"]).unwrap();
        assert_eq!(cli.max_entries, Some(3));
    }

    #[test]
    fn test_add_with_category() {
        let cli = Cli::try_parse_from([
            "feedmark",
            "--add",
            "https://news.ycombinator.com/rss",
            "--name",
            "HN",
            "--category",
            "Tech",
            "--file",
            "my.md",
        ])
        .unwrap();

        assert_eq!(cli.add.as_deref(), Some("https://news.ycombinator.com/rss"));
        assert_eq!(cli.name.as_deref(), Some("HN"));
        assert_eq!(cli.category.as_deref(), Some("Tech"));
        assert_eq!(cli.file, Some(PathBuf::from("my.md")));
        assert!(!cli.list && !cli.tui);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
