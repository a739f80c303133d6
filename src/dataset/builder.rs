use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::coco::{CocoDocument, ImageRecord};
use super::transform::ImageTransform;
use crate::config::PipelineConfig;
use crate::graph::{AnnotatedGraph, AnnotationRecord, GraphAnnotator, GraphArtifact, LabelSource};
use crate::operations::boundary::{dedup_segments, read_records, BoundaryResolver};
use crate::operations::query::BoundingBox;
use crate::operations::transform::ScaleSegments;

/// An image and the annotation file that describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub image: PathBuf,
    pub annotation: PathBuf,
}

impl FilePair {
    #[must_use]
    pub fn new(image: impl Into<PathBuf>, annotation: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            annotation: annotation.into(),
        }
    }
}

/// Per-image side outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifacts {
    pub image_id: String,
    pub graph: GraphArtifact,
    pub bbox: BoundingBox,
}

/// Everything produced for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOutput {
    pub image: ImageRecord,
    pub annotations: Vec<AnnotationRecord>,
    pub artifacts: ImageArtifacts,
    /// First annotation id free for the next image.
    pub next_annot_id: u64,
}

/// Reads one annotation file and builds its junction graph on the canvas.
///
/// Segments that `scaling` collapses or makes coincide are dropped before
/// the graph is built.
///
/// # Errors
///
/// Returns an I/O, parse, boundary or graph error from the failing stage.
pub fn annotate_file(
    annotation: &Path,
    image_id: impl Into<String>,
    scaling: &ScaleSegments,
    config: &PipelineConfig,
) -> crate::Result<AnnotatedGraph> {
    let polygons = read_records(annotation)?;
    let segments = BoundaryResolver::new(polygons)
        .with_tolerance(config.on_segment_tolerance)
        .execute()?;
    let scaled = dedup_segments(scaling.execute(&segments));

    Ok(GraphAnnotator::new(scaled, image_id, config.category_id)
        .with_slot_conflict(config.slot_conflict)
        .execute()?)
}

/// Runs the full pipeline on one file pair.
///
/// Reads the wall records, resolves them into segments, maps them onto the
/// canvas reported by `transform`, and annotates the resulting graph with ids
/// starting at `annot_id`. Labels are drawn only once every other step has
/// succeeded.
///
/// # Errors
///
/// Returns the first error of any stage, unwrapped; callers attach the file
/// path (see [`SplitSetBuilder::add_pair`]).
pub fn process_file_pair(
    pair: &FilePair,
    config: &PipelineConfig,
    transform: &mut dyn ImageTransform,
    labels: &mut dyn LabelSource,
    annot_id: u64,
) -> crate::Result<ImageOutput> {
    let outcome = transform.transform(&pair.image, config.resolution)?;
    let image_id = outcome.image_id().to_owned();

    let annotated = annotate_file(&pair.annotation, image_id.clone(), &outcome.scaling(), config)?;
    let graph = annotated.artifact()?;
    let bbox = annotated.bounding_box()?;
    let (annotations, next_annot_id) = annotated.create_annotations(annot_id, labels)?;

    let (width, height) = config.resolution;
    Ok(ImageOutput {
        image: ImageRecord {
            height,
            width,
            id: image_id.clone(),
            file_name: outcome.file_name,
        },
        annotations,
        artifacts: ImageArtifacts {
            image_id,
            graph,
            bbox,
        },
        next_annot_id,
    })
}

/// Finished split set.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSetOutput {
    pub split: String,
    pub document: CocoDocument,
    pub artifacts: Vec<ImageArtifacts>,
}

impl SplitSetOutput {
    /// Image ids in processing order.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.document.images.iter().map(|i| i.id.as_str())
    }
}

/// Accumulates the images of one split set.
///
/// Files are processed strictly in order, since the annotation-id counter
/// runs through the whole split set starting from 0. A failed file leaves
/// the accumulated document and the counter untouched.
pub struct SplitSetBuilder<'a> {
    split: String,
    config: PipelineConfig,
    transform: &'a mut dyn ImageTransform,
    labels: &'a mut dyn LabelSource,
    document: CocoDocument,
    artifacts: Vec<ImageArtifacts>,
    next_annot_id: u64,
}

impl<'a> SplitSetBuilder<'a> {
    /// Creates a new builder for the split set named `split`.
    #[must_use]
    pub fn new(
        split: impl Into<String>,
        config: PipelineConfig,
        transform: &'a mut dyn ImageTransform,
        labels: &'a mut dyn LabelSource,
    ) -> Self {
        let document = CocoDocument::new(config.category_id);
        Self {
            split: split.into(),
            config,
            transform,
            labels,
            document,
            artifacts: Vec::new(),
            next_annot_id: 0,
        }
    }

    #[must_use]
    pub fn split(&self) -> &str {
        &self.split
    }

    #[must_use]
    pub fn next_annot_id(&self) -> u64 {
        self.next_annot_id
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.document.images.len()
    }

    /// Processes one file pair and commits its output.
    ///
    /// # Errors
    ///
    /// Returns `FloorgraphError::File` naming the annotation file, wrapping
    /// whatever stage failed.
    pub fn add_pair(&mut self, pair: &FilePair) -> crate::Result<&ImageRecord> {
        let out = process_file_pair(
            pair,
            &self.config,
            &mut *self.transform,
            &mut *self.labels,
            self.next_annot_id,
        )
        .map_err(|e| e.in_file(&pair.annotation))?;

        tracing::info!(
            split = %self.split,
            image_id = %out.image.id,
            annotations = out.annotations.len(),
            next_annot_id = out.next_annot_id,
            "processed file pair"
        );
        self.next_annot_id = out.next_annot_id;
        self.document.annotations.extend(out.annotations);
        self.artifacts.push(out.artifacts);
        self.document.images.push(out.image);
        Ok(&self.document.images[self.document.images.len() - 1])
    }

    #[must_use]
    pub fn finish(self) -> SplitSetOutput {
        tracing::info!(
            split = %self.split,
            images = self.document.images.len(),
            annotations = self.document.annotations.len(),
            "finished split set"
        );
        SplitSetOutput {
            split: self.split,
            document: self.document,
            artifacts: self.artifacts,
        }
    }
}

impl std::fmt::Debug for SplitSetBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitSetBuilder")
            .field("split", &self.split)
            .field("images", &self.document.images.len())
            .field("next_annot_id", &self.next_annot_id)
            .finish_non_exhaustive()
    }
}

/// Numbers images 1, 2, ... across split sets in processing order.
///
/// An id seen again in a later split set keeps its later number.
#[must_use]
pub fn image_numbers(outputs: &[SplitSetOutput]) -> BTreeMap<String, u64> {
    let mut numbers = BTreeMap::new();
    let ids = outputs.iter().flat_map(SplitSetOutput::image_ids);
    for (id, no) in ids.zip(1..) {
        numbers.insert(id.to_owned(), no);
    }
    numbers
}

/// Pairs images with annotation files by position.
///
/// Extra entries on the longer side are ignored.
#[must_use]
pub fn pair_files(images: &[impl AsRef<Path>], annotations: &[impl AsRef<Path>]) -> Vec<FilePair> {
    images
        .iter()
        .zip(annotations)
        .map(|(i, a)| FilePair::new(i.as_ref(), a.as_ref()))
        .collect()
}
