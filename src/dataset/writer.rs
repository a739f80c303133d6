use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::builder::SplitSetOutput;

/// Writes the instances document and per-image artifacts of a split set.
///
/// Produces `instances_<split>.json` plus `<image_id>.graph.json` and
/// `<image_id>.bbox.json` for every image, creating `dir` if needed.
/// Returns the written paths, document first.
///
/// # Errors
///
/// Returns an I/O or JSON error if any file cannot be written.
pub fn write_split_set(output: &SplitSetOutput, dir: &Path) -> crate::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(1 + 2 * output.artifacts.len());

    let doc_path = dir.join(format!("instances_{}.json", output.split));
    write_json(&doc_path, &output.document)?;
    written.push(doc_path);

    for art in &output.artifacts {
        let graph_path = dir.join(format!("{}.graph.json", art.image_id));
        write_json(&graph_path, &art.graph)?;
        written.push(graph_path);

        let bbox_path = dir.join(format!("{}.bbox.json", art.image_id));
        write_json(&bbox_path, &art.bbox)?;
        written.push(bbox_path);
    }

    tracing::info!(
        split = %output.split,
        dir = %dir.display(),
        files = written.len(),
        "wrote split set"
    );
    Ok(written)
}

/// Writes the global image numbering as `{ image_id: number }`.
///
/// # Errors
///
/// Returns an I/O or JSON error if the file cannot be written.
pub fn write_image_numbers(numbers: &BTreeMap<String, u64>, path: &Path) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_json(path, numbers)
}

fn write_json(path: &Path, value: &impl Serialize) -> crate::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::dataset::{image_numbers, CocoDocument, FilePair, FixedScale, SplitSetBuilder};
    use crate::graph::{GraphArtifact, UniformLabels};
    use crate::operations::query::BoundingBox;

    #[test]
    fn writes_document_and_artifacts() {
        let src = tempfile::tempdir().unwrap();
        let annotation = src.path().join("plan.txt");
        fs::write(&annotation, "0 0 8 0 8 6 0 6 wall 1\n").unwrap();
        let pair = FilePair::new(src.path().join("plan.jpg"), annotation);

        let mut transform = FixedScale::default();
        let mut labels = UniformLabels::seeded(7);
        let mut builder =
            SplitSetBuilder::new("test", PipelineConfig::default(), &mut transform, &mut labels);
        builder.add_pair(&pair).unwrap();
        let output = builder.finish();

        let out = tempfile::tempdir().unwrap();
        let dir = out.path().join("annotations");
        let written = write_split_set(&output, &dir).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written[0].ends_with("instances_test.json"));

        let doc: CocoDocument =
            serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(doc, output.document);
        assert_eq!(doc.annotations.len(), 4);

        let graph: GraphArtifact =
            serde_json::from_str(&fs::read_to_string(dir.join("plan.graph.json")).unwrap())
                .unwrap();
        assert_eq!(graph.levels.len(), 3);

        let bbox: BoundingBox =
            serde_json::from_str(&fs::read_to_string(dir.join("plan.bbox.json")).unwrap())
                .unwrap();
        assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (0, 0, 8, 6));

        let numbers_path = out.path().join("image_numbers.json");
        write_image_numbers(&image_numbers(&[output]), &numbers_path).unwrap();
        let numbers: BTreeMap<String, u64> =
            serde_json::from_str(&fs::read_to_string(numbers_path).unwrap()).unwrap();
        assert_eq!(numbers["plan"], 1);
    }
}
