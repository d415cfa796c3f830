use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use windeps_builder::Result;
use windeps_builder::layout::Layout;
use windeps_builder::manifest::Manifest;
use windeps_builder::pipeline::{self, BuildRequest};
use windeps_builder::target::{Arch, BuildConfig, default_prefix};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch, extract, configure and build a package into the install prefix
    Build {
        /// Target package, matched as a substring of manifest URLs
        package: String,
        /// Target architecture: x32, x64, uwp32, uwp64
        #[arg(long, default_value_t = Arch::X32)]
        arch: Arch,
        /// Build configuration: debug, release
        #[arg(long, default_value_t = BuildConfig::Release)]
        config: BuildConfig,
        /// Install destination (default: <current drive>/usr_<arch>)
        #[arg(long)]
        prefix: Option<PathBuf>,
        /// Directory holding one TOML descriptor per package
        #[arg(long, default_value = "packages")]
        manifest_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let args = Args::parse();
    let Some(cmd) = args.cmd else {
        let _ = Args::command().print_help();
        return;
    };

    if let Err(e) = run(cmd) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cmd: Command) -> Result<()> {
    match cmd {
        Command::Build {
            package,
            arch,
            config,
            prefix,
            manifest_dir,
        } => {
            let layout = Layout::from_cwd()?;
            let manifest = Manifest::load_dir(&manifest_dir)?;
            let prefix = prefix.unwrap_or_else(|| default_prefix(&layout.root, arch));
            pipeline::build(
                &layout,
                &manifest,
                &BuildRequest {
                    package,
                    arch,
                    config,
                    prefix,
                },
            )
        }
    }
}
