use autoedit::io::{ImageFormat, IoError, write_image};
use autoedit::pipeline::{
    EnhanceOptions, PipelineError, decode, enhance_hdr, enhance_with_report, measure,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "autoedit")]
#[command(version, about = "Adaptive single-image enhancement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance one image
    Enhance {
        /// Input PNG or JPEG
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file; the extension selects PNG or JPEG
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Skip the denoise stage
        #[arg(long)]
        no_denoise: bool,

        /// Apply linear colour balance at the end
        #[arg(long)]
        color_balance: bool,

        /// Apply detail enhancement only
        #[arg(long, conflicts_with_all = ["no_denoise", "color_balance", "options"])]
        hdr_only: bool,

        /// JSON file with enhancement options; flags override it
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Print the measurement, category and stages as JSON
        #[arg(long)]
        report: bool,
    },

    /// Print the measurement and category of an image as JSON
    Measure {
        /// Input PNG or JPEG
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("cannot write output: {0}")]
    Write(#[from] IoError),

    #[error("invalid options file: {0}")]
    Options(#[from] serde_json::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Enhance {
            input,
            output,
            no_denoise,
            color_balance,
            hdr_only,
            options,
            report,
        } => cmd_enhance(
            &input,
            &output,
            no_denoise,
            color_balance,
            hdr_only,
            options.as_deref(),
            report,
        ),
        Commands::Measure { input } => cmd_measure(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_input(path: &Path) -> Result<autoedit::Raster, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes)?)
}

fn load_options(path: Option<&Path>) -> Result<EnhanceOptions, CliError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(EnhanceOptions::default()),
    }
}

fn cmd_enhance(
    input: &Path,
    output: &Path,
    no_denoise: bool,
    color_balance: bool,
    hdr_only: bool,
    options_path: Option<&Path>,
    report: bool,
) -> Result<(), CliError> {
    let format = ImageFormat::from_path(output)?;
    let image = read_input(input)?;

    let enhanced = if hdr_only {
        enhance_hdr(&image)?
    } else {
        let mut options = load_options(options_path)?;
        if no_denoise {
            options = options.with_denoise(false);
        }
        if color_balance {
            options = options.with_color_balance(true);
        }
        let (enhanced, enhance_report) = enhance_with_report(&image, &options)?;
        if report {
            println!("{}", serde_json::to_string_pretty(&enhance_report)?);
        }
        enhanced
    };

    write_image(&enhanced, output, format)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn cmd_measure(input: &Path) -> Result<(), CliError> {
    let image = read_input(input)?;
    let measurement = measure(&image)?;
    let category = autoedit::classify(measurement.brightness);
    let out = serde_json::json!({
        "measurement": measurement,
        "category": category,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
