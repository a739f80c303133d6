use std::path::Path;

use crate::operations::transform::ScaleSegments;

/// Result of fitting one source raster onto the target canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    /// File name of the canvas image; its stem becomes the image id.
    pub file_name: String,
    pub scale_x: f64,
    pub scale_y: f64,
    pub left_padding: Option<i64>,
    pub top_padding: Option<i64>,
}

impl TransformOutcome {
    /// File name without its extension.
    #[must_use]
    pub fn image_id(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.file_name.as_str())
    }

    /// Segment mapping from annotation space onto the canvas.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scaling(&self) -> ScaleSegments {
        ScaleSegments::new(self.scale_x, self.scale_y).with_offset(
            self.left_padding.unwrap_or(0) as f64,
            self.top_padding.unwrap_or(0) as f64,
        )
    }
}

/// External step that resizes a source image onto the canvas.
///
/// The raster work itself lives outside this crate; implementors only
/// report how annotation coordinates must follow.
pub trait ImageTransform {
    /// Fits `image` onto a canvas of `resolution` (`width`, `height`).
    ///
    /// # Errors
    ///
    /// Implementations return an error if the image cannot be processed.
    fn transform(&mut self, image: &Path, resolution: (u32, u32))
        -> crate::Result<TransformOutcome>;
}

/// Applies the same scale and padding to every image.
///
/// Stands in for a raster step when all sources share one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScale {
    scale_x: f64,
    scale_y: f64,
    left_padding: Option<i64>,
    top_padding: Option<i64>,
}

impl FixedScale {
    #[must_use]
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            left_padding: None,
            top_padding: None,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, left: i64, top: i64) -> Self {
        self.left_padding = Some(left);
        self.top_padding = Some(top);
        self
    }
}

impl Default for FixedScale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl ImageTransform for FixedScale {
    fn transform(
        &mut self,
        image: &Path,
        _resolution: (u32, u32),
    ) -> crate::Result<TransformOutcome> {
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(TransformOutcome {
            file_name,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            left_padding: self.left_padding,
            top_padding: self.top_padding,
        })
    }
}
