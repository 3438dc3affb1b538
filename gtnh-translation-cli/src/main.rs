use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use gtnh_translation::{Converter, FiletypeKind, PullTarget};
use gtnh_translation_cli::{
    Overrides, Settings,
    debug::run_debug_command,
    sync::{run_pull_command, run_push_command, run_snapshot_command},
    translate::{TranslateOptions, run_translate_command},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ParaTranz project id
    #[arg(long, env = "PARATRANZ_PROJECT_ID", global = true)]
    project_id: Option<u64>,

    /// ParaTranz API token
    #[arg(long, env = "PARATRANZ_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// ParaTranz API base URL
    #[arg(long, env = "PARATRANZ_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Directory for cached strings and upload records
    #[arg(long, env = "PARATRANZ_CACHE_DIR", global = true)]
    cache_dir: Option<PathBuf>,

    /// Ignore the cache for this run
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Download translations from ParaTranz and apply them to the source files.
    Pull {
        /// Which files to pull: quest-book, lang or gt-lang
        #[arg(short, long, value_parser = parse_target)]
        target: PullTarget,

        /// Directory holding the source-language files
        #[arg(long)]
        source_root: PathBuf,

        /// Directory to write the translated files to; prints them when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload source-language files to ParaTranz.
    Push {
        /// Which files to push: quest-book, lang or gt-lang
        #[arg(short, long, value_parser = parse_target)]
        target: PullTarget,

        /// Modpack or source tree to collect the files from
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Copy a modpack's source-language files into a history tree.
    Snapshot {
        /// Modpack directory
        #[arg(short, long)]
        modpack: PathBuf,

        /// History tree root
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply a ParaTranz string export to a local source file.
    Translate {
        /// The source-language file
        #[arg(short, long)]
        input: PathBuf,

        /// ParaTranz JSON export of the file's strings
        #[arg(short, long)]
        strings: PathBuf,

        /// File kind (lang or gt-lang); inferred from the path when omitted
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<FiletypeKind>,

        /// Relpath the file is known under on ParaTranz
        #[arg(long)]
        relpath: Option<String>,

        /// The output file; prints the result when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the properties of a file as JSON.
    Debug {
        /// The file to parse
        #[arg(short, long)]
        input: PathBuf,

        /// File kind (lang or gt-lang); inferred from the path when omitted
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<FiletypeKind>,

        /// Relpath to treat the file as
        #[arg(long)]
        relpath: Option<String>,
    },
}

fn parse_target(s: &str) -> Result<PullTarget, String> {
    s.parse().map_err(|e: gtnh_translation::Error| e.to_string())
}

fn parse_kind(s: &str) -> Result<FiletypeKind, String> {
    s.parse().map_err(|e: gtnh_translation::Error| e.to_string())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), String> {
    let settings = Settings::load(args.config.as_deref())?.apply(Overrides {
        project_id: args.project_id,
        token: args.token,
        base_url: args.base_url,
        cache_dir: args.cache_dir,
        no_cache: args.no_cache,
    });
    let converter = Converter::new(settings.translation.clone());
    converter.config().validate().map_err(|e| e.to_string())?;

    match args.commands {
        Commands::Pull {
            target,
            source_root,
            output,
        } => run_pull_command(
            &settings,
            &converter,
            target,
            &source_root,
            output.as_deref(),
        ),
        Commands::Push { target, path } => run_push_command(&settings, &converter, target, &path),
        Commands::Snapshot { modpack, output } => {
            run_snapshot_command(&converter, &modpack, &output)
        }
        Commands::Translate {
            input,
            strings,
            kind,
            relpath,
            output,
        } => run_translate_command(
            &converter,
            &TranslateOptions {
                input: &input,
                strings: &strings,
                kind,
                relpath: relpath.as_deref(),
                output: output.as_deref(),
            },
        ),
        Commands::Debug {
            input,
            kind,
            relpath,
        } => run_debug_command(&converter, &input, kind, relpath.as_deref()),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
