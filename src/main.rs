use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crxkit::input::{convert_package, fallback_id};
use crxkit::metadata::inspect;
use crxkit::models::OutputFormat;
use crxkit::output::terminal::print_container_report;
use crxkit::unpack;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "crxkit")]
#[command(about = "Inspect and convert Chrome extension (CRX) packages")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a package and print its header and manifest details
    Info {
        /// CRX or ZIP file
        file: PathBuf,
    },

    /// Write the package as CRX or ZIP under a readable file name
    Convert {
        /// CRX or ZIP file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Zip)]
        format: Format,

        /// Extension ID or Chrome Web Store URL, used when no name can be resolved
        #[arg(long)]
        id: Option<String>,

        /// Directory for the output file
        #[arg(long, env = "CRXKIT_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Unpack the package contents into a directory
    Extract {
        /// CRX or ZIP file
        file: PathBuf,

        /// Target directory
        dir: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Crx,
    Zip,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Crx => OutputFormat::Crx,
            Format::Zip => OutputFormat::Zip,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_package(file: &Path) -> Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn convert(file: &Path, format: OutputFormat, id: Option<&str>, out_dir: &Path) -> Result<PathBuf> {
    let fallback = fallback_id(id, file)?;
    let data = read_package(file)?;
    let package = convert_package(&data, format, &fallback)?;

    let path = out_dir.join(&package.file_name);
    std::fs::write(&path, &package.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Wrote {} ({} bytes)", path.display(), package.content.len());
    Ok(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Info { file } => {
            let data = read_package(&file)?;
            let report = inspect(&file.display().to_string(), &data)?;
            print_container_report(&report);
        }
        Command::Convert {
            file,
            format,
            id,
            out_dir,
        } => {
            let path = convert(&file, format.into(), id.as_deref(), &out_dir)?;
            println!("{}", path.display());
        }
        Command::Extract { file, dir } => {
            let data = read_package(&file)?;
            unpack::extract(&data, &dir)?;
            println!("Extracted to {}", dir.display());
        }
    }

    Ok(())
}
