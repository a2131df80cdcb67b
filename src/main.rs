use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use xmbwave_gradients::gradient_pipeline::{
    AnalysisConfig, AutoTextureReader, GradientAnalysisPipeline, PreviewCompression,
    TextureReader, generate_gradient_json, generate_gradient_module,
};
use xmbwave_gradients::logger;

#[derive(Parser)]
#[command(name = "xmbwave-gradients")]
#[command(version)]
#[command(about = "Recover linear color gradients from DDS textures", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve gradient direction and endpoint colors for each texture
    Analyze {
        /// Input textures (.dds or 8-bit .tiff)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Candidate directions over the half-turn (clamped to 90..=2160)
        #[arg(short, long, default_value = "720")]
        angle_steps: usize,
        /// Run the angle sweep on a single thread
        #[arg(long)]
        sequential: bool,
        /// Write an ES module with the solved presets
        #[arg(long)]
        export_js: Option<PathBuf>,
        /// Write the solved presets as JSON
        #[arg(long)]
        export_json: Option<PathBuf>,
        /// Directory for rebuilt preview TIFFs
        #[arg(long)]
        preview_dir: Option<PathBuf>,
        /// Preview compression: none, lzw, deflate-fast, deflate, deflate-best
        #[arg(long, default_value = "none")]
        preview_compression: PreviewCompression,
    },

    /// Print size and format of each texture
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_with_default(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Commands::Analyze {
            files,
            angle_steps,
            sequential,
            export_js,
            export_json,
            preview_dir,
            preview_compression,
        } => {
            let config = AnalysisConfig::builder()
                .angle_steps(angle_steps)
                .parallel(!sequential)
                .preview_compression(preview_compression)
                .build();
            let pipeline = GradientAnalysisPipeline::new(config);

            info!("Gradient analysis pipeline initialized");
            info!("Angle steps: {}", pipeline.config().effective_angle_steps());
            info!(
                "Search: {}",
                if pipeline.config().parallel {
                    "parallel"
                } else {
                    "sequential"
                }
            );

            let report = pipeline.analyze_batch(&files);
            for failure in &report.failures {
                error!("Failed to parse {}: {}", failure.name, failure.message);
            }
            if report.results.is_empty() {
                bail!("no texture could be analyzed");
            }

            for result in report.results.values() {
                println!("{}\n", result.summary());
            }

            if let Some(dir) = preview_dir {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("creating preview directory {}", dir.display()))?;
                for result in report.results.values() {
                    match pipeline.write_preview_file(result, &dir) {
                        Ok(path) => info!("Preview written to {}", path.display()),
                        Err(e) => error!("Preview for {} failed: {}", result.name, e),
                    }
                }
            }

            let analyses = report.analyses();
            if let Some(path) = export_js {
                std::fs::write(&path, generate_gradient_module(&analyses))
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("Export generated for {} gradient(s): {}", analyses.len(), path.display());
            }
            if let Some(path) = export_json {
                let json = generate_gradient_json(&analyses).context("serializing presets")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("JSON export written to {}", path.display());
            }
        }

        Commands::Inspect { files } => {
            for path in files {
                let name = path.display().to_string();
                let data = match std::fs::read(&path) {
                    Ok(data) => data,
                    Err(e) => {
                        error!("Failed to read {}: {}", name, e);
                        continue;
                    }
                };
                match AutoTextureReader.read_texture(&data, &name) {
                    Ok(image) => println!(
                        "{} ({}x{}, {})",
                        image.name, image.width, image.height, image.format
                    ),
                    Err(e) => error!("Failed to parse {}: {}", name, e),
                }
            }
        }
    }

    Ok(())
}
