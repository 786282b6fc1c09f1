use crate::models::annotation::{AnchorPoint, Slot, TextAnnotation};
use std::collections::BTreeMap;

/// Horizontal offset from a marker's first vertex, as a fraction of width.
const ANCHOR_X_OFFSET_RATIO: f64 = 0.03;
/// Vertical offset from a marker's first vertex, as a fraction of height.
const ANCHOR_Y_OFFSET_RATIO: f64 = 0.05;

/// Scan annotations for the slot markers and derive one sample point per
/// marker found.
///
/// The sample point sits right-and-below the marker text, where the outcome
/// color is drawn on the results screen. If a slot marker appears more than
/// once, the later occurrence in scan order wins. Zero matches is a valid
/// outcome; downstream stages handle the empty map.
pub fn locate_anchors(
    annotations: &[TextAnnotation],
    image_width: u32,
    image_height: u32,
) -> BTreeMap<Slot, AnchorPoint> {
    let mut anchors = BTreeMap::new();

    for annotation in annotations {
        let Some(slot) = Slot::from_marker(&annotation.text) else {
            continue;
        };

        let origin = annotation.first_vertex();
        anchors.insert(
            slot,
            AnchorPoint {
                slot,
                x: origin.x as f64 + ANCHOR_X_OFFSET_RATIO * image_width as f64,
                y: origin.y as f64 + ANCHOR_Y_OFFSET_RATIO * image_height as f64,
            },
        );
    }

    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Vertex;

    fn annotation(text: &str, x: i32, y: i32) -> TextAnnotation {
        TextAnnotation {
            text: text.to_string(),
            bounding_box: [
                Vertex { x, y },
                Vertex { x: x + 30, y },
                Vertex { x: x + 30, y: y + 12 },
                Vertex { x, y: y + 12 },
            ],
        }
    }

    #[test]
    fn test_anchor_offset_math() {
        let annotations = vec![annotation("1st", 100, 200)];
        let anchors = locate_anchors(&annotations, 1000, 800);

        let anchor = anchors.get(&Slot::First).unwrap();
        assert_eq!(anchor.x, 100.0 + 0.03 * 1000.0);
        assert_eq!(anchor.y, 200.0 + 0.05 * 800.0);
    }

    #[test]
    fn test_markers_match_case_insensitively() {
        let annotations = vec![
            annotation("1ST", 0, 0),
            annotation(" 2nd ", 10, 10),
            annotation("3Rd", 20, 20),
        ];

        let anchors = locate_anchors(&annotations, 100, 100);
        assert_eq!(anchors.len(), 3);
    }

    #[test]
    fn test_non_marker_text_is_ignored() {
        let annotations = vec![
            annotation("operation results", 0, 0),
            annotation("4th", 10, 10),
            annotation("1st place", 20, 20),
        ];

        let anchors = locate_anchors(&annotations, 100, 100);
        assert!(anchors.is_empty());
    }

    #[test]
    fn test_duplicate_marker_last_wins() {
        let annotations = vec![annotation("2nd", 50, 50), annotation("2nd", 300, 400)];

        let anchors = locate_anchors(&annotations, 1000, 1000);
        assert_eq!(anchors.len(), 1);

        let anchor = anchors.get(&Slot::Second).unwrap();
        assert_eq!(anchor.x, 300.0 + 30.0);
        assert_eq!(anchor.y, 400.0 + 50.0);
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let annotations = vec![
            annotation("1st", 10, 20),
            annotation("3rd", 60, 20),
            annotation("1st", 110, 20),
        ];

        let first = locate_anchors(&annotations, 640, 480);
        let second = locate_anchors(&annotations, 640, 480);
        assert_eq!(first, second);
    }
}
