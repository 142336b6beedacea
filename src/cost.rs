//! Pairwise dissimilarity between a projected contact and a detection

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::projector::Projection;
use crate::types::Detection;

/// Cost model configuration.
///
/// The weights and the size-error scale come straight from the reference
/// matcher and carry no derivation; treat them as tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Weight of the pixel position error
    pub w_pos: f64,
    /// Weight of the relative size error
    pub w_size: f64,
    /// Multiplier bringing the size-error ratio onto the pixel-error scale
    pub size_scale: f64,
    /// Hard gating distance in pixels. Pairs at or beyond it are ineligible.
    /// No default: the sensible scale depends on the projection mode.
    pub max_distance: f64,
}

impl CostConfig {
    pub fn new(max_distance: f64) -> Self {
        Self {
            w_pos: 0.7,
            w_size: 0.3,
            size_scale: 100.0,
            max_distance,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.max_distance.is_finite() && self.max_distance >= 0.0) {
            return Err(MatchError::config(format!(
                "max_distance must be non-negative and finite, got {}",
                self.max_distance
            )));
        }
        if self.w_pos < 0.0 || self.w_size < 0.0 || self.size_scale < 0.0 {
            return Err(MatchError::config("cost weights must be non-negative"));
        }
        Ok(())
    }
}

/// Score of one contact/detection pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    /// Composite dissimilarity, lower is better
    pub cost: f64,
    /// Normalized confidence in [0, 1]; exactly 0 for ineligible pairs
    pub confidence: f64,
}

impl PairScore {
    /// Whether this pair may take part in the assignment
    pub fn eligible(&self) -> bool {
        self.confidence > 0.0
    }
}

/// Score one projected contact against one detection.
pub fn score(projection: &Projection, detection: &Detection, cfg: &CostConfig) -> PairScore {
    let dx = projection.pixel.0 - detection.bbox.center_x();
    let dy = projection.pixel.1 - detection.bbox.center_y();
    let pos_err = (dx * dx + dy * dy).sqrt();

    if pos_err >= cfg.max_distance {
        return PairScore {
            cost: f64::INFINITY,
            confidence: 0.0,
        };
    }

    // Size term only when the expected size is usable; a zero expected size
    // would otherwise divide away
    let cost = if projection.size_px > 0.0 && detection.bbox.w > 0.0 {
        let size_err = (detection.bbox.w - projection.size_px).abs() / projection.size_px;
        cfg.w_pos * pos_err + cfg.w_size * size_err * cfg.size_scale
    } else {
        pos_err
    };

    let confidence = (1.0 - pos_err / cfg.max_distance).max(0.0) * detection.confidence.clamp(0.0, 1.0);

    PairScore { cost, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;
    use approx::assert_abs_diff_eq;

    fn projection(x: f64, y: f64, size: f64) -> Projection {
        Projection {
            pixel: (x, y),
            size_px: size,
            range_m: 1000.0,
        }
    }

    #[test]
    fn test_composite_cost_weights() {
        let proj = projection(320.0, 200.0, 120.0);
        // Centered 30 px right of the projection, 10% narrower than expected
        let det = Detection::new(BoundingBox::new(296.0, 170.0, 108.0, 60.0), 1.0);
        let cfg = CostConfig::new(200.0);

        let s = score(&proj, &det, &cfg);
        assert_abs_diff_eq!(s.cost, 0.7 * 30.0 + 0.3 * 0.1 * 100.0, epsilon = 1e-9);
        assert!(s.eligible());
    }

    #[test]
    fn test_zero_expected_size_falls_back_to_position_only() {
        let proj = projection(100.0, 100.0, 0.0);
        let det = Detection::new(BoundingBox::new(90.0, 90.0, 20.0, 20.0), 1.0);
        let cfg = CostConfig::new(100.0);

        let s = score(&proj, &det, &cfg);
        // Pure Euclidean distance, no size term, no arithmetic fault
        assert_abs_diff_eq!(s.cost, 0.0, epsilon = 1e-9);
        assert!(s.confidence > 0.99);
    }

    #[test]
    fn test_cutoff_yields_zero_confidence_and_infinite_cost() {
        let proj = projection(100.0, 100.0, 80.0);
        let det = Detection::new(BoundingBox::new(560.0, 90.0, 80.0, 20.0), 1.0);
        let cfg = CostConfig::new(100.0);

        let s = score(&proj, &det, &cfg);
        assert_eq!(s.confidence, 0.0);
        assert!(s.cost.is_infinite());
        assert!(!s.eligible());
    }

    #[test]
    fn test_confidence_scales_with_detector_confidence() {
        let proj = projection(100.0, 100.0, 80.0);
        let det = Detection::new(BoundingBox::new(60.0, 90.0, 80.0, 20.0), 0.5);
        let cfg = CostConfig::new(100.0);

        let s = score(&proj, &det, &cfg);
        assert!(s.confidence > 0.0 && s.confidence <= 0.5);
    }

    #[test]
    fn test_confidence_bounds() {
        let proj = projection(100.0, 100.0, 80.0);
        let cfg = CostConfig::new(100.0);
        for (cx, conf) in [(100.0, 1.0), (150.0, 0.8), (199.0, 1.0)] {
            let det = Detection::new(BoundingBox::new(cx - 40.0, 80.0, 80.0, 40.0), conf);
            let s = score(&proj, &det, &cfg);
            assert!((0.0..=1.0).contains(&s.confidence));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(CostConfig::new(100.0).validate().is_ok());
        // A zero gate is legal and makes every pair ineligible
        assert!(CostConfig::new(0.0).validate().is_ok());
        assert!(CostConfig::new(-1.0).validate().is_err());
        assert!(CostConfig::new(f64::INFINITY).validate().is_err());
        let mut cfg = CostConfig::new(100.0);
        cfg.w_size = -0.1;
        assert!(cfg.validate().is_err());
    }
}
