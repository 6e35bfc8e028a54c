//! Face-expression summary embedded in the report.
//!
//! Detection itself happens elsewhere; this module only turns its outcome
//! into the text the report carries.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_FACE_TEXT: &str = "No face detected.";
pub const NO_EXPRESSIONS_TEXT: &str = "No expressions detected.";
pub const DETECTION_FAILED_TEXT: &str = "Error detecting face or expressions.";

/// Expression probabilities for one detected face (0..1 each).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceExpressions {
    #[serde(default)]
    pub neutral: f32,
    #[serde(default)]
    pub happy: f32,
    #[serde(default)]
    pub sad: f32,
    #[serde(default)]
    pub angry: f32,
    #[serde(default)]
    pub fearful: f32,
    #[serde(default)]
    pub disgusted: f32,
    #[serde(default)]
    pub surprised: f32,
}

impl FaceExpressions {
    fn pairs(&self) -> [(&'static str, f32); 7] {
        [
            ("neutral", self.neutral),
            ("happy", self.happy),
            ("sad", self.sad),
            ("angry", self.angry),
            ("fearful", self.fearful),
            ("disgusted", self.disgusted),
            ("surprised", self.surprised),
        ]
    }

    /// Most probable expression; first wins on ties.
    pub fn dominant(&self) -> (&'static str, f32) {
        self.pairs()
            .into_iter()
            .fold(("neutral", f32::MIN), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            })
    }
}

/// What the face-detection side reported for the answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceAnalysis {
    /// Opaque text supplied by the caller, embedded verbatim.
    Text(String),
    /// One entry per detected face.
    Expressions(Vec<FaceExpressions>),
    #[default]
    #[serde(skip)]
    NoFace,
    #[serde(skip)]
    NoExpressions,
    #[serde(skip)]
    DetectionFailed,
}

impl FaceAnalysis {
    /// Text form used in the report.
    pub fn to_report_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Expressions(list) if list.is_empty() => NO_EXPRESSIONS_TEXT.to_string(),
            Self::Expressions(list) => serde_json::to_string_pretty(list)
                .unwrap_or_else(|_| DETECTION_FAILED_TEXT.to_string()),
            Self::NoFace => NO_FACE_TEXT.to_string(),
            Self::NoExpressions => NO_EXPRESSIONS_TEXT.to_string(),
            Self::DetectionFailed => DETECTION_FAILED_TEXT.to_string(),
        }
    }
}

impl fmt::Display for FaceAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_report_text())
    }
}
