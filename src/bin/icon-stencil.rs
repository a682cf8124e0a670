//! icon-stencil CLI
//!
//! Commands: build, package

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use icon_stencil::{
    AssetSink, DirectoryFetcher, DirectorySink, Generator, GeneratorConfig, GlyphPackage,
    LibraryGroup, fetch_all, library_path, load_catalog, normalize_all,
};

#[derive(Parser)]
#[command(name = "icon-stencil")]
#[command(about = "Build framed icon libraries and stencil packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose all variants from a catalog and package them
    Build {
        /// Catalog JSON (OData envelope or plain array)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Directory holding the downloaded icon files
        #[arg(short, long)]
        icons: PathBuf,

        /// Glyph package JSON files
        #[arg(short, long)]
        glyphs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,

        /// Configuration file (defaults to icon-stencil.json in the working directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the circled variant
        #[arg(long)]
        no_circle: bool,

        /// Split folders and libraries by category
        #[arg(long)]
        group_by_category: bool,

        /// Maximum concurrent composition tasks
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Package an existing folder of assets into one library
    Package {
        /// Folder with the finished assets
        dir: PathBuf,

        /// Library name (defaults to the folder name)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory; the library lands in <out>/libraries/<name>.xml
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> icon_stencil::Result<ExitCode> {
    match command {
        Commands::Build {
            catalog,
            icons,
            glyphs,
            out,
            config,
            no_circle,
            group_by_category,
            workers,
        } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::from_path(&path)?,
                None => GeneratorConfig::discover(&std::env::current_dir().unwrap_or_default())?,
            };
            if no_circle {
                config.circled = false;
            }
            if group_by_category {
                config.group_by_category = true;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if !glyphs.is_empty() {
                config.include_flat_glyphs = true;
            }

            let entries = load_catalog(&catalog)?;
            info!("loaded {} catalog entries from {}", entries.len(), catalog.display());
            let records = normalize_all(fetch_all(entries, &DirectoryFetcher::new(icons)));

            let mut definitions = Vec::new();
            for path in &glyphs {
                definitions.extend(GlyphPackage::from_path(path)?.glyphs());
            }

            let generator = Generator::new(config)?;
            let report = generator.run(&records, &definitions, &mut DirectorySink::new(&out));
            print!("{report}");

            Ok(if report.failed_groups.is_empty() && report.failed_writes.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }

        Commands::Package { dir, name, out } => {
            let name = name.unwrap_or_else(|| {
                dir.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "library".into())
            });
            let group = LibraryGroup::scan(&name, &dir)?;
            let document = group.package()?;

            let path = library_path(&name);
            let mut sink = DirectorySink::new(&out);
            sink.write(&path, document.to_xml()?.as_bytes())?;
            info!(
                "packaged {} entries into {}",
                document.len(),
                out.join(&path).display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

