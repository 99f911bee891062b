//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use rollcall_core::{
    CollectConfig, CollectResult, ProgressReporter, build_vote_table, collect_votes, export_rows,
};
use rollcall_shared::{
    AppConfig, CachePolicy, Congress, DocumentKey, ExportFormat, Session, SourceConfig,
    init_config, load_config,
};
use rollcall_source::{DocumentSource, SenateSource};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Rollcall: Senate roll-call votes and how their ties were broken.
#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Build Senate roll-call vote tables with tie-breaking detail.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv). `-v` logs every processed vote.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory for cached XML documents (overrides config).
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Re-download documents even when a cached copy exists.
    #[arg(long, global = true)]
    pub refresh: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Export file format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the vote table for one Congress session and export it.
    Table {
        /// Congress number (101-117).
        #[arg(short, long)]
        congress: u16,

        /// Session number (1 or 2).
        #[arg(short, long)]
        session: u8,

        /// Output file (defaults to <output_dir>/senate_votes_<congress>_<session>.<ext>).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Export format (defaults to config).
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// Build and concatenate vote tables for a range of Congresses.
    Collect {
        /// First Congress to collect.
        #[arg(long, default_value_t = rollcall_shared::MIN_CONGRESS)]
        from: u16,

        /// Last Congress to collect (inclusive).
        #[arg(long, default_value_t = rollcall_shared::MAX_CONGRESS)]
        to: u16,

        /// Output file (defaults to <output_dir>/senate_votes_<from>-<to>.<ext>).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Export format (defaults to config).
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// Download a vote list, or a single vote record, without parsing it.
    Fetch {
        /// Congress number (101-117).
        #[arg(short, long)]
        congress: u16,

        /// Session number (1 or 2).
        #[arg(short, long)]
        session: u8,

        /// Vote number; omit to fetch the session's vote list.
        #[arg(long)]
        vote: Option<u32>,

        /// Save to this path instead of the cache directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "rollcall=info",
        1 => "rollcall=debug",
        _ => "rollcall=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Source settings given on the command line.
struct SourceOverrides {
    cache_dir: Option<PathBuf>,
    refresh: bool,
}

impl SourceOverrides {
    /// Merge the loaded config with the command-line flags.
    fn apply(&self, config: &AppConfig) -> Result<SourceConfig> {
        let mut source = SourceConfig::try_from(config)?;
        if let Some(dir) = &self.cache_dir {
            source.cache_dir = dir.clone();
        }
        if self.refresh {
            source.cache_policy = CachePolicy::Refresh;
        }
        Ok(source)
    }
}

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let overrides = SourceOverrides {
        cache_dir: cli.cache_dir,
        refresh: cli.refresh,
    };

    match cli.command {
        Command::Table {
            congress,
            session,
            out,
            format,
        } => cmd_table(&overrides, congress, session, out, format).await,
        Command::Collect {
            from,
            to,
            out,
            format,
        } => cmd_collect(&overrides, from, to, out, format).await,
        Command::Fetch {
            congress,
            session,
            vote,
            out,
        } => cmd_fetch(&overrides, congress, session, vote, out.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_table(
    overrides: &SourceOverrides,
    congress: u16,
    session: u8,
    out: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let config = load_config()?;
    let source = SenateSource::new(&overrides.apply(&config)?)?;

    info!(congress, session, "building vote table");
    let table = build_vote_table(&source, congress, session).await?;
    let ties = table.tie_count();

    let format = format.map_or(config.output.format, ExportFormat::from);
    let path = out.unwrap_or_else(|| {
        default_output_path(&config, &format!("senate_votes_{congress}_{session}"), format)
    });
    let rows = table.into_tagged();
    let written = export_rows(&rows, &path, format)?;

    println!();
    println!("  Vote table built!");
    println!("  Congress: {congress}, session {session}");
    println!("  Votes:    {}", rows.len());
    println!("  Ties:     {ties}");
    println!("  Output:   {}", written.display());
    println!();

    Ok(())
}

async fn cmd_collect(
    overrides: &SourceOverrides,
    from: u16,
    to: u16,
    out: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    if from > to {
        return Err(eyre!("--from ({from}) must not exceed --to ({to})"));
    }

    let config = load_config()?;
    let source = SenateSource::new(&overrides.apply(&config)?)?;

    let collect = CollectConfig {
        congresses: from..=to,
        ..CollectConfig::default()
    };

    info!(from, to, "collecting vote tables");
    let reporter = CliProgress::new()?;
    let result = collect_votes(&source, &collect, &reporter).await?;

    let format = format.map_or(config.output.format, ExportFormat::from);
    let path = out.unwrap_or_else(|| {
        default_output_path(&config, &format!("senate_votes_{from}-{to}"), format)
    });
    let written = export_rows(&result.rows, &path, format)?;

    print_collect_summary(&result, &written);
    Ok(())
}

async fn cmd_fetch(
    overrides: &SourceOverrides,
    congress: u16,
    session: u8,
    vote: Option<u32>,
    out: Option<&Path>,
) -> Result<()> {
    let congress = Congress::new(congress)?;
    let session = Session::new(session)?;
    let key = match vote {
        Some(n) => DocumentKey::vote(congress, session, n),
        None => DocumentKey::vote_list(congress, session),
    };

    let config = load_config()?;
    let source = SenateSource::new(&overrides.apply(&config)?)?;

    let path = match out {
        Some(path) => source.download_to(&key, path).await?,
        None => {
            source.fetch(&key).await?;
            source.cache().path_for(&key)
        }
    };

    println!("Saved {key} to {}", path.display());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// `<output_dir>/<stem>.<ext>` from the loaded config.
fn default_output_path(config: &AppConfig, stem: &str, format: ExportFormat) -> PathBuf {
    Path::new(&config.output.output_dir).join(format!("{stem}.{}", format.extension()))
}

fn print_collect_summary(result: &CollectResult, written: &Path) {
    println!();
    println!("  Collection complete!");
    println!("  Tables:   {}", result.tables);
    println!("  Votes:    {}", result.rows.len());
    println!("  Ties:     {}", result.tie_votes);
    println!("  Output:   {}", written.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("invalid progress template: {e}"))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn table_built(
        &self,
        congress: Congress,
        session: Session,
        rows: usize,
        current: usize,
        total: usize,
    ) {
        self.spinner.set_message(format!(
            "Built [{current}/{total}] Congress {congress}, session {session}: {rows} votes"
        ));
    }

    fn done(&self, _result: &CollectResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_defaults_cover_supported_congresses() {
        let cli = Cli::try_parse_from(["rollcall", "collect"]).unwrap();
        match cli.command {
            Command::Collect { from, to, .. } => {
                assert_eq!((from, to), (101, 117));
            }
            _ => panic!("expected collect"),
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let overrides = SourceOverrides {
            cache_dir: Some(PathBuf::from("/tmp/votes")),
            refresh: true,
        };
        let source = overrides.apply(&AppConfig::default()).unwrap();
        assert_eq!(source.cache_dir, PathBuf::from("/tmp/votes"));
        assert_eq!(source.cache_policy, CachePolicy::Refresh);

        let none = SourceOverrides {
            cache_dir: None,
            refresh: false,
        };
        let source = none.apply(&AppConfig::default()).unwrap();
        assert_eq!(source.cache_dir, PathBuf::from("senate_votes_xml"));
        assert_eq!(source.cache_policy, CachePolicy::TrustLocal);
    }

    #[test]
    fn default_output_path_uses_format_extension() {
        let config = AppConfig::default();
        assert_eq!(
            default_output_path(&config, "senate_votes_115_1", ExportFormat::Json),
            PathBuf::from("./senate_votes_115_1.json")
        );
    }

    #[test]
    fn fetch_accepts_optional_vote() {
        let cli = Cli::try_parse_from([
            "rollcall", "--refresh", "fetch", "-c", "115", "-s", "1", "--vote", "54",
        ])
        .unwrap();
        assert!(cli.refresh);
        assert!(matches!(
            cli.command,
            Command::Fetch {
                congress: 115,
                session: 1,
                vote: Some(54),
                out: None
            }
        ));
    }
}
