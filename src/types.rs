//! Value types shared across the correlation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// One vessel report from the AIS feed.
///
/// Produced by an external loader; the engine treats it as read-only and does
/// not validate individual records beyond the geometric projection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisContact {
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// Latitude in degrees (WGS-84)
    pub latitude: f64,
    /// Longitude in degrees (WGS-84)
    pub longitude: f64,
    /// Reported vessel length in meters
    pub length: f64,
    /// Reported vessel beam in meters
    pub width: f64,
}

impl AisContact {
    pub fn new(mmsi: u32, latitude: f64, longitude: f64, length: f64, width: f64) -> Self {
        Self {
            mmsi,
            latitude,
            longitude,
            length,
            width,
        }
    }
}

/// Pixel-space bounding box in (x, y, w, h) form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Box width in pixels
    pub w: f64,
    /// Box height in pixels
    pub h: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.h != 0.0 {
            self.w / self.h
        } else {
            1.0
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox({}, {}, {}, {})", self.x, self.y, self.w, self.h)
    }
}

/// One visually detected ship in the camera frame.
///
/// Identified downstream by its index in the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
}

impl Detection {
    pub fn new(bbox: BoundingBox, confidence: f64) -> Self {
        Self { bbox, confidence }
    }
}

/// One frame's worth of inputs, the unit of the batch API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub contacts: Vec<AisContact>,
    pub detections: Vec<Detection>,
}

/// One confirmed contact/detection pairing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// MMSI of the matched AIS contact
    pub mmsi: u32,
    /// Index of the matched detection in the input slice
    pub detection: usize,
    /// Composite assignment cost (lower is better)
    pub cost: f64,
    /// Match confidence in [0, 1]
    pub confidence: f64,
}

/// Strategy that produced an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStrategy {
    /// Optimal Kuhn-Munkres assignment
    Exact,
    /// Row-order nearest-neighbour assignment.
    ///
    /// Not globally optimal: an earlier contact can take a detection that
    /// would have suited a later contact better.
    Greedy,
}

/// Output of one correlation round.
///
/// Invariant: no MMSI and no detection index appears in more than one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Confirmed pairings, in projected-contact order
    pub matches: Vec<Match>,
    /// MMSIs of contacts that received no match (including rejected projections)
    pub unmatched_contacts: Vec<u32>,
    /// Indices of detections that received no match
    pub unmatched_detections: Vec<usize>,
    /// Strategy that actually ran, so callers can tell optimal from approximate
    pub strategy: AssignmentStrategy,
}

impl CorrelationResult {
    /// Empty result over the given inputs, everything unmatched
    pub(crate) fn empty(
        contacts: &[AisContact],
        detection_count: usize,
        strategy: AssignmentStrategy,
    ) -> Self {
        Self {
            matches: Vec::new(),
            unmatched_contacts: contacts.iter().map(|c| c.mmsi).collect(),
            unmatched_detections: (0..detection_count).collect(),
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bbox_center() {
        let bbox = BoundingBox::new(100.0, 200.0, 50.0, 30.0);
        assert_abs_diff_eq!(bbox.center_x(), 125.0);
        assert_abs_diff_eq!(bbox.center_y(), 215.0);
        assert_abs_diff_eq!(bbox.area(), 1500.0);
    }

    #[test]
    fn test_bbox_aspect_ratio_degenerate() {
        let bbox = BoundingBox::new(0.0, 0.0, 40.0, 0.0);
        assert_abs_diff_eq!(bbox.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_empty_result_lists_all_inputs() {
        let contacts = vec![
            AisContact::new(123456000, 40.0, 32.0, 120.0, 20.0),
            AisContact::new(123456001, 40.1, 32.1, 80.0, 14.0),
        ];
        let result = CorrelationResult::empty(&contacts, 3, AssignmentStrategy::Exact);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_contacts, vec![123456000, 123456001]);
        assert_eq!(result.unmatched_detections, vec![0, 1, 2]);
    }
}
