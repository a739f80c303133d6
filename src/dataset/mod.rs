//! Split-set assembly: COCO documents, per-image artifacts and their files.

mod builder;
mod coco;
mod transform;
mod writer;

pub use builder::{
    annotate_file, image_numbers, pair_files, process_file_pair, FilePair, ImageArtifacts,
    ImageOutput, SplitSetBuilder, SplitSetOutput,
};
pub use coco::{Category, CocoDocument, ImageRecord, CORNER_CATEGORY};
pub use transform::{FixedScale, ImageTransform, TransformOutcome};
pub use writer::{write_image_numbers, write_split_set};
