use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use floorgraph::dataset::{
    annotate_file, image_numbers, write_image_numbers, write_split_set, FilePair, FixedScale,
    ImageTransform, SplitSetBuilder,
};
use floorgraph::graph::UniformLabels;
use floorgraph::{PipelineConfig, SlotConflictPolicy};

#[derive(Parser)]
#[command(name = "floorgraph")]
#[command(about = "Wall polygon annotations to junction graphs and COCO split sets")]
struct Cmd {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the graph of one annotation file and print it as JSON
    Annotate {
        annotation: PathBuf,
        /// Defaults to the annotation file stem
        #[arg(long)]
        image_id: Option<String>,
        #[command(flatten)]
        scale: ScaleArgs,
    },
    /// Process the annotation files of one split set and write its artifacts
    Build {
        #[arg(long)]
        split: String,
        #[arg(long)]
        out: PathBuf,
        /// Extension of the image next to each annotation file
        #[arg(long, default_value = "png")]
        image_ext: String,
        /// Seed for the placeholder semantic labels
        #[arg(long)]
        seed: Option<u64>,
        /// Log failed files and continue instead of aborting
        #[arg(long)]
        skip_failed: bool,
        #[command(flatten)]
        scale: ScaleArgs,
        #[arg(required = true)]
        annotations: Vec<PathBuf>,
    },
}

/// Pipeline config file plus per-field overrides.
#[derive(Args)]
struct ConfigArgs {
    /// JSON pipeline config; missing fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// What to do when two walls claim the same direction of a junction
    #[arg(long, global = true, value_enum)]
    slot_conflict: Option<SlotConflictPolicy>,
    #[arg(long, global = true)]
    category_id: Option<u32>,
    /// Distance below which a junction counts as lying on a wall
    #[arg(long, global = true)]
    tolerance: Option<f64>,
    /// Canvas width recorded in image records
    #[arg(long, global = true)]
    width: Option<u32>,
    /// Canvas height recorded in image records
    #[arg(long, global = true)]
    height: Option<u32>,
}

impl ConfigArgs {
    fn load(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(policy) = self.slot_conflict {
            config.slot_conflict = policy;
        }
        if let Some(id) = self.category_id {
            config.category_id = id;
        }
        if let Some(tolerance) = self.tolerance {
            config.on_segment_tolerance = tolerance;
        }
        if let Some(width) = self.width {
            config.resolution.0 = width;
        }
        if let Some(height) = self.height {
            config.resolution.1 = height;
        }
        Ok(config)
    }
}

#[derive(Args)]
struct ScaleArgs {
    #[arg(long, default_value_t = 1.0)]
    scale_x: f64,
    #[arg(long, default_value_t = 1.0)]
    scale_y: f64,
    #[arg(long)]
    left_padding: Option<i64>,
    #[arg(long)]
    top_padding: Option<i64>,
}

impl ScaleArgs {
    fn fixed_scale(&self) -> FixedScale {
        let scale = FixedScale::new(self.scale_x, self.scale_y);
        if self.left_padding.is_some() || self.top_padding.is_some() {
            scale.with_padding(self.left_padding.unwrap_or(0), self.top_padding.unwrap_or(0))
        } else {
            scale
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(Cmd::parse())
}

fn run(cmd: Cmd) -> Result<()> {
    let config = cmd.config.load()?;
    match cmd.action {
        Action::Annotate {
            annotation,
            image_id,
            scale,
        } => annotate(&config, &annotation, image_id, &scale),
        Action::Build {
            split,
            out,
            image_ext,
            seed,
            skip_failed,
            scale,
            annotations,
        } => build(
            config,
            &split,
            &out,
            &image_ext,
            seed,
            skip_failed,
            &scale,
            &annotations,
        ),
    }
}

fn annotate(
    config: &PipelineConfig,
    annotation: &Path,
    image_id: Option<String>,
    scale: &ScaleArgs,
) -> Result<()> {
    let image_id = image_id.unwrap_or_else(|| {
        annotation
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let outcome = scale.fixed_scale().transform(annotation, config.resolution)?;
    let annotated = annotate_file(annotation, image_id, &outcome.scaling(), config)
        .map_err(|e| e.in_file(annotation))?;

    println!("{}", serde_json::to_string_pretty(&annotated.artifact()?)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build(
    config: PipelineConfig,
    split: &str,
    out: &Path,
    image_ext: &str,
    seed: Option<u64>,
    skip_failed: bool,
    scale: &ScaleArgs,
    annotations: &[PathBuf],
) -> Result<()> {
    let mut transform = scale.fixed_scale();
    let mut labels = match seed {
        Some(seed) => UniformLabels::seeded(seed),
        None => UniformLabels::from_entropy(),
    };
    let mut builder = SplitSetBuilder::new(split, config, &mut transform, &mut labels);

    let mut failed = 0_usize;
    for annotation in annotations {
        let pair = FilePair::new(annotation.with_extension(image_ext), annotation);
        if let Err(err) = builder.add_pair(&pair) {
            if !skip_failed {
                return Err(err.into());
            }
            failed += 1;
            tracing::error!(path = %annotation.display(), kind = err.kind(), %err, "skipping file");
        }
    }
    if builder.image_count() == 0 {
        bail!("no file of split {split} could be processed");
    }

    let output = builder.finish();
    write_split_set(&output, out)?;
    write_image_numbers(&image_numbers(&[output]), &out.join("image_numbers.json"))?;
    tracing::info!(split, failed, out = %out.display(), "done");
    Ok(())
}
