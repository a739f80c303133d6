mod scale;

pub use scale::ScaleSegments;
