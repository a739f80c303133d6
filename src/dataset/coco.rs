use serde::{Deserialize, Serialize};

use crate::graph::AnnotationRecord;

/// Name of the single junction category.
pub const CORNER_CATEGORY: &str = "Corner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub supercategory: String,
    pub id: u32,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn corner(id: u32) -> Self {
        Self {
            supercategory: CORNER_CATEGORY.to_owned(),
            id,
            name: CORNER_CATEGORY.to_owned(),
        }
    }
}

/// One canvas image of a split set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub height: u32,
    pub width: u32,
    pub id: String,
    pub file_name: String,
}

/// COCO-style instances document of one split set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocoDocument {
    pub categories: Vec<Category>,
    pub images: Vec<ImageRecord>,
    pub annotations: Vec<AnnotationRecord>,
}

impl CocoDocument {
    /// Creates an empty document holding only the corner category.
    #[must_use]
    pub fn new(category_id: u32) -> Self {
        Self {
            categories: vec![Category::corner(category_id)],
            images: Vec::new(),
            annotations: Vec::new(),
        }
    }
}
