use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tor_bundle_resolver::config::{self, ResolverConfig};
use tor_bundle_resolver::logging::{self, LogTarget};
use tor_bundle_resolver::version::resolver::BundleResolver;
use tor_bundle_resolver::version::selector::Channel;

#[derive(Parser)]
#[command(name = "tor-bundle-resolver")]
#[command(version, about = "Resolve Tor expert bundle releases from the package archive")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the latest release (default: latest stable)
    Latest {
        /// Consider alpha releases too
        #[arg(long)]
        alpha: bool,
    },
    /// Print every release in the listing
    List {
        /// Only print stable releases
        #[arg(long)]
        stable: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    let _guard = logging::init(target, &config::log_path(), cli.log_json)?;

    let config = match &cli.config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::default(),
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Option<Command>, config: ResolverConfig) -> anyhow::Result<()> {
    let resolver = BundleResolver::from_config(&config)?;

    match command.unwrap_or(Command::Latest { alpha: false }) {
        Command::Latest { alpha } => {
            let channel = if alpha { Channel::Alpha } else { Channel::Stable };
            println!("{}", resolver.latest(channel).await?);
        }
        Command::List { stable } => {
            let versions = resolver.versions().await?;
            for version in versions.iter().filter(|v| !stable || v.is_stable()) {
                match version.release_date() {
                    Some(date) => println!("{version}\t{date}"),
                    None => println!("{version}"),
                }
            }
        }
    }

    Ok(())
}
