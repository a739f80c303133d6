//! Placeholder room-type labels attached to every annotation record.
//!
//! The labels carry no learned signal: the default source draws uniformly
//! from [`VOCABULARY`]. Sources are injectable so tests can pin the output.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Room-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticLabel {
    Outside,
    Kitchen,
    Bathroom,
    Bedroom,
    Closet,
    Corridor,
    Restroom,
    Balcony,
}

/// The full vocabulary in its fixed order.
pub const VOCABULARY: [SemanticLabel; 8] = [
    SemanticLabel::Outside,
    SemanticLabel::Kitchen,
    SemanticLabel::Bathroom,
    SemanticLabel::Bedroom,
    SemanticLabel::Closet,
    SemanticLabel::Corridor,
    SemanticLabel::Restroom,
    SemanticLabel::Balcony,
];

impl SemanticLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Bedroom => "bedroom",
            Self::Closet => "closet",
            Self::Corridor => "corridor",
            Self::Restroom => "restroom",
            Self::Balcony => "balcony",
        }
    }
}

impl fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier of semantic labels, one per call.
pub trait LabelSource {
    fn next_label(&mut self) -> SemanticLabel;

    /// The four labels of one annotation record.
    fn draw(&mut self) -> [SemanticLabel; 4] {
        [
            self.next_label(),
            self.next_label(),
            self.next_label(),
            self.next_label(),
        ]
    }
}

/// Uniform draw with replacement over [`VOCABULARY`].
#[derive(Debug, Clone)]
pub struct UniformLabels<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformLabels<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformLabels<StdRng> {
    /// Reproducible source.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> LabelSource for UniformLabels<R> {
    fn next_label(&mut self) -> SemanticLabel {
        VOCABULARY[self.rng.gen_range(0..VOCABULARY.len())]
    }
}

/// Cycles through a fixed label sequence.
#[derive(Debug, Clone)]
pub struct FixedLabels {
    sequence: Vec<SemanticLabel>,
    pos: usize,
}

impl FixedLabels {
    /// An empty sequence yields [`SemanticLabel::Outside`] forever.
    #[must_use]
    pub fn new(sequence: Vec<SemanticLabel>) -> Self {
        Self { sequence, pos: 0 }
    }

    #[must_use]
    pub fn constant(label: SemanticLabel) -> Self {
        Self::new(vec![label])
    }
}

impl LabelSource for FixedLabels {
    fn next_label(&mut self) -> SemanticLabel {
        if self.sequence.is_empty() {
            return SemanticLabel::Outside;
        }
        let label = self.sequence[self.pos % self.sequence.len()];
        self.pos += 1;
        label
    }
}
