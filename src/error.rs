use std::path::PathBuf;

use thiserror::Error;

use crate::math::GridPoint;

/// Top-level error type for the floor-plan graph pipeline.
#[derive(Debug, Error)]
pub enum FloorgraphError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any of the above, attributed to the annotation or image file it came from.
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<FloorgraphError>,
    },
}

impl FloorgraphError {
    /// Attaches the path of the file being processed.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Short machine-friendly name of the error kind, used in batch reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::MalformedRecord { .. }) => "MalformedRecord",
            Self::Boundary(BoundaryError::EmptyInput) => "EmptyInput",
            Self::Graph(GraphError::InvalidConnectivity(_)) => "InvalidConnectivity",
            Self::Graph(GraphError::EmptyGraph) => "EmptyGraph",
            Self::Graph(GraphError::ZeroLengthSegment { .. }) => "ZeroLengthSegment",
            Self::Graph(GraphError::SlotConflict { .. }) => "SlotConflict",
            Self::Io(_) => "Io",
            Self::Json(_) => "Json",
            Self::File { source, .. } => source.kind(),
        }
    }
}

/// Errors raised while reading wall records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Errors raised by boundary resolution.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("no polygons in input")]
    EmptyInput,
}

/// Errors raised while building or querying the junction graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("connectivity code {0:?} is not in the edge class table")]
    InvalidConnectivity(String),

    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("zero-length segment at {from}")]
    ZeroLengthSegment { from: GridPoint, to: GridPoint },

    #[error("slot {direction} of vertex {vertex} is already taken")]
    SlotConflict {
        vertex: GridPoint,
        direction: &'static str,
    },
}

/// Convenience type alias for results using [`FloorgraphError`].
pub type Result<T> = std::result::Result<T, FloorgraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_context_keeps_kind() {
        let err: FloorgraphError = BoundaryError::EmptyInput.into();
        let err = err.in_file("plans/a.txt");
        assert_eq!(err.kind(), "EmptyInput");
        assert_eq!(err.to_string(), "plans/a.txt: no polygons in input");
    }

    #[test]
    fn zero_length_message_names_point() {
        let p = GridPoint::new(3, 4);
        let err = GraphError::ZeroLengthSegment { from: p, to: p };
        assert_eq!(err.to_string(), "zero-length segment at (3, 4)");
    }
}
