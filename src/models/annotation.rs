use serde::{Deserialize, Serialize};

/// Single point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

/// Quadrilateral bounding region, corner order as reported by the detector.
pub type BoundingQuad = [Vertex; 4];

/// One detected text region: the recognized string plus its bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub text: String,
    pub bounding_box: BoundingQuad,
}

impl TextAnnotation {
    /// First corner of the bounding quad (anchor offsets are relative to it).
    pub fn first_vertex(&self) -> Vertex {
        self.bounding_box[0]
    }
}

/// Ordinal mission position tracked per report.
///
/// Ordered so that maps keyed by slot iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl Slot {
    /// Marker string the detector reports for this slot.
    pub fn marker(&self) -> &'static str {
        match self {
            Slot::First => "1st",
            Slot::Second => "2nd",
            Slot::Third => "3rd",
        }
    }

    /// Uppercase form used in debug-image labels.
    pub fn label(&self) -> &'static str {
        match self {
            Slot::First => "1ST",
            Slot::Second => "2ND",
            Slot::Third => "3RD",
        }
    }

    /// Match detected text against the known markers, case-insensitively.
    pub fn from_marker(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "1st" => Some(Slot::First),
            "2nd" => Some(Slot::Second),
            "3rd" => Some(Slot::Third),
            _ => None,
        }
    }
}

/// Pixel coordinate derived from a marker's bounding box, used as the
/// sampling point for that slot's outcome color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub slot: Slot,
    pub x: f64,
    pub y: f64,
}
