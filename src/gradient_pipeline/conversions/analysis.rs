use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::gradient_pipeline::{
    common::error::{PipelineError, Result},
    conversions::timing::PipelineTimings,
    export::preset_id,
    fit::{AnalysisConfig, AnalysisResult, analyze, rebuild_texture},
    preview::{PreviewWriter, StandardPreviewWriter},
    texture::{AutoTextureReader, TextureImage, TextureReader},
};

/// One file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of a batch run: results keyed by source name, failures in input order.
///
/// When two inputs share a file name the later one is kept and the name is
/// listed in `replaced`.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: BTreeMap<String, AnalysisResult>,
    pub failures: Vec<BatchFailure>,
    pub replaced: Vec<String>,
}

impl BatchReport {
    pub fn analyses(&self) -> Vec<AnalysisResult> {
        self.results.values().cloned().collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.replaced.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub struct GradientAnalysisPipeline<R: TextureReader, W: PreviewWriter> {
    reader: R,
    writer: W,
    config: AnalysisConfig,
}

impl GradientAnalysisPipeline<AutoTextureReader, StandardPreviewWriter> {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            reader: AutoTextureReader,
            writer: StandardPreviewWriter,
            config,
        }
    }
}

impl<R: TextureReader, W: PreviewWriter> GradientAnalysisPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: AnalysisConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Validates and analyzes an already decoded texture.
    pub fn analyze_texture(&self, image: &TextureImage) -> Result<AnalysisResult> {
        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width,
                height = image.height
            ).entered();
            self.validate_dimensions(image.width, image.height)?;
        }

        let _span = tracing::info_span!("analyze_gradient",
            angle_steps = self.config.effective_angle_steps()
        ).entered();
        Ok(analyze(image, &self.config))
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn analyze_bytes(&self, input_data: &[u8], name: &str) -> Result<AnalysisResult> {
        let mut timings = PipelineTimings::new();

        if let Some((width, height)) = self.reader.read_dimensions(input_data) {
            let _span = tracing::info_span!("validate_header_dimensions",
                width = width,
                height = height
            ).entered();
            self.validate_dimensions(width, height)?;
        }

        let image = timings.time("decode_texture", || {
            let _span = tracing::info_span!("decode_texture").entered();
            self.reader.read_texture(input_data, name)
        })?;

        let result = timings.time("analyze_gradient", || self.analyze_texture(&image))?;

        info!(
            name = %result.name,
            format = %result.format,
            width = result.width,
            height = result.height,
            angle_deg = result.model.angle_deg,
            rmse = result.rmse,
            "Gradient analysis complete"
        );
        timings.log_summary(name);
        Ok(result)
    }

    #[instrument(skip(self, input_path))]
    pub fn analyze_file<P: AsRef<Path>>(&self, input_path: P) -> Result<AnalysisResult> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Analyzing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.analyze_bytes(&input_data, &display_name(input_path))
    }

    /// Rebuilds the solved gradient at the source size and encodes it.
    pub fn write_preview(&self, result: &AnalysisResult, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("write_preview", name = %result.name).entered();
        let rebuilt = rebuild_texture(result.name.clone(), result.width, result.height, &result.model);
        self.writer.write_preview(&rebuilt, output, self.config.preview_compression)
    }

    /// Writes `<dir>/<id>.rebuilt.tiff` and returns its path.
    pub fn write_preview_file<P: AsRef<Path>>(&self, result: &AnalysisResult, dir: P) -> Result<PathBuf> {
        let path = dir
            .as_ref()
            .join(format!("{}.rebuilt.tiff", preset_id(&result.name)));

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(&path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?
        };

        self.write_preview(result, &mut output_file)?;
        Ok(path)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }
}

impl<R, W> GradientAnalysisPipeline<R, W>
where
    R: TextureReader + Sync,
    W: PreviewWriter + Sync,
{
    /// Analyzes every file; a failing file is reported and the rest continue.
    #[instrument(skip(self, paths), fields(files = paths.len()))]
    pub fn analyze_batch<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> BatchReport {
        let run = |path: &P| {
            let path = path.as_ref();
            (display_name(path), self.analyze_file(path))
        };

        let outcomes: Vec<(String, Result<AnalysisResult>)> = if self.config.parallel {
            paths.par_iter().map(run).collect()
        } else {
            paths.iter().map(run).collect()
        };

        let mut report = BatchReport::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    if let Some(previous) = report.results.insert(result.name.clone(), result) {
                        warn!(
                            file = %previous.name,
                            "Duplicate texture name, earlier result replaced"
                        );
                        report.replaced.push(previous.name);
                    }
                }
                Err(e) => {
                    error!(file = %name, "Analysis failed: {}", e);
                    report.failures.push(BatchFailure {
                        name,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            analyzed = report.results.len(),
            failed = report.failures.len(),
            "Batch complete"
        );
        report
    }
}
