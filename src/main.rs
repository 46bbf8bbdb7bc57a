use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use importgraph::builder::{self, BuildResult};
use importgraph::config::{Config, ConfigFile, Overrides};
use importgraph::error::Error;
use importgraph::export::dot::{DotOptions, to_dot};
use importgraph::export::records::GraphRecords;
use importgraph::inventory;
use importgraph::logging;
use importgraph::render::{self, RenderOptions};
use importgraph::report::{self, Summary};

#[derive(Parser)]
#[command(
    name = "importgraph",
    version,
    about = "Import dependency graph for JavaScript/TypeScript source trees"
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScanArgs {
    /// Directories to scan, relative to the project root (default: the root)
    dirs: Vec<PathBuf>,

    /// Project root; relative paths and labels are reported against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Recognized file extensions, in resolution order (repeatable or comma separated)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Extra package names to classify as libraries
    #[arg(long = "lib", value_name = "NAME")]
    libraries: Vec<String>,

    /// Extra project-rooted locator prefixes to classify as local
    #[arg(long = "local-prefix", value_name = "PREFIX")]
    local_prefixes: Vec<String>,

    /// Base directory for project-rooted locators (default: the root)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Walk directories instead of listing git-tracked files
    #[arg(long)]
    no_git: bool,

    /// Config file (default: .importgraph.json in the root, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the generated digraph
    #[arg(long)]
    name: Option<String>,

    /// Prefix for per-node URL attributes (e.g. a repository browser URL)
    #[arg(long)]
    url_prefix: Option<String>,
}

impl ScanArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            scan_dirs: self.dirs.clone(),
            base_dir: self.base_dir.clone(),
            extensions: self.extensions.clone(),
            libraries: self.libraries.clone(),
            local_prefixes: self.local_prefixes.clone(),
            graph_name: self.name.clone(),
            url_prefix: self.url_prefix.clone(),
            no_git: self.no_git,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the graph as a DOT description
    Dot {
        #[command(flatten)]
        scan: ScanArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the graph and render it with a layout engine
    Render {
        #[command(flatten)]
        scan: ScanArgs,

        /// Image file to produce
        #[arg(short, long)]
        output: PathBuf,

        /// Image format (default: the output file's extension)
        #[arg(long)]
        format: Option<String>,

        /// Layout engine executable
        #[arg(long, default_value = render::DEFAULT_ENGINE)]
        engine: String,
    },

    /// Dump the file and import relations as JSON
    Dump {
        #[command(flatten)]
        scan: ScanArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize files, imports, and unresolved locals
    Stats {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Dot { scan, output } => {
            let (config, result) = build(&scan)?;
            let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
            write_output(output.as_deref(), &dot)
        }
        Commands::Render {
            scan,
            output,
            format,
            engine,
        } => {
            // Validate the target before spending time on the scan.
            let opts = RenderOptions::new(&output, format.as_deref(), Some(engine.as_str()))?;
            let (config, result) = build(&scan)?;
            let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
            render::render(&dot, &opts)?;
            info!("rendered {}", opts.output.display());
            Ok(())
        }
        Commands::Dump { scan, output } => {
            let (_, result) = build(&scan)?;
            let records = GraphRecords::from_graph(&result.graph);
            let mut data = serde_json::to_string_pretty(&records).map_err(Error::Serialize)?;
            data.push('\n');
            write_output(output.as_deref(), &data)
        }
        Commands::Stats { scan, json } => {
            let (_, result) = build(&scan)?;
            let summary = Summary::new(&result);
            if json {
                report::print_summary_json(&summary).map_err(Error::Serialize)
            } else {
                report::print_summary(&summary);
                Ok(())
            }
        }
    }
}

fn build(scan: &ScanArgs) -> Result<(Config, BuildResult), Error> {
    let file = ConfigFile::discover(&scan.root, scan.config.as_deref())?;
    let config = Config::resolve(&scan.root, file, scan.overrides())?;
    let lister = inventory::for_config(&config);
    let result = builder::build_graph(&config, lister.as_ref())?;
    Ok((config, result))
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), Error> {
    match path {
        Some(path) => {
            std::fs::write(path, contents).map_err(|e| Error::OutputWrite(path.to_path_buf(), e))?;
            info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{contents}");
            Ok(())
        }
    }
}
