//! Poses and the ordered phase plan.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One pose the user is asked to hold during a phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    AlignFace,
    Smile,
    BlinkThrice,
    /// A pose defined by configuration, shown to the user verbatim.
    Custom(String),
}

impl Pose {
    /// Prompt rendered while this pose's phase is active.
    pub fn instruction(&self) -> &str {
        match self {
            Self::AlignFace => "Align face in center",
            Self::Smile => "Smile for the camera",
            Self::BlinkThrice => "Blink 3 times",
            Self::Custom(prompt) => prompt,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlignFace => f.write_str("align_face"),
            Self::Smile => f.write_str("smile"),
            Self::BlinkThrice => f.write_str("blink_thrice"),
            Self::Custom(prompt) => write!(f, "custom({prompt})"),
        }
    }
}

/// A non-empty, ordered list of poses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pose>", into = "Vec<Pose>")]
pub struct PhasePlan(Vec<Pose>);

impl PhasePlan {
    pub fn new(poses: Vec<Pose>) -> Result<Self, TypesError> {
        if poses.is_empty() {
            return Err(TypesError::EmptyPhasePlan);
        }
        Ok(Self(poses))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.0.get(index)
    }

    /// Index of the final phase.
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn poses(&self) -> &[Pose] {
        &self.0
    }
}

impl Default for PhasePlan {
    fn default() -> Self {
        Self(vec![Pose::AlignFace, Pose::Smile, Pose::BlinkThrice])
    }
}

impl TryFrom<Vec<Pose>> for PhasePlan {
    type Error = TypesError;

    fn try_from(poses: Vec<Pose>) -> Result<Self, Self::Error> {
        Self::new(poses)
    }
}

impl From<PhasePlan> for Vec<Pose> {
    fn from(plan: PhasePlan) -> Self {
        plan.0
    }
}
