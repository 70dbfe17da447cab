use clap::{Parser, Subcommand};
use showcanvas::layout::LayoutKind;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2025-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "showcanvas", bin_name = "showcanvas", version = get_version())]
#[command(about = "Drop Dragvertising shows into your designs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Dragvertising
    Login {
        /// Token from the browser sign-in (read from stdin when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// List your shows
    #[command(alias = "ls")]
    List {
        /// Only shows whose title or venue contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one show's details
    #[command(alias = "v")]
    View {
        /// List position (1, 2, ...) or show id
        show: String,

        /// Search applied before resolving a list position
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Insert a show into the design
    #[command(alias = "i")]
    Insert {
        /// List position (1, 2, ...) or show id
        show: String,

        /// poster (show details) or grid (performer grid)
        #[arg(short, long)]
        layout: Option<LayoutKind>,

        /// Design file to write into
        #[arg(short, long)]
        design: Option<PathBuf>,

        /// Print the placements instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Search applied before resolving a list position
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Interactive session
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, design-path, default-layout)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
