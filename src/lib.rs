//! AIS/camera correlation engine
//!
//! Correlates geo-referenced vessel reports (AIS) with visually detected ship
//! bounding boxes in a camera frame. Each contact is projected into the pixel
//! frame through the observer's pose and camera geometry, contact/detection
//! pairs are scored on position and apparent size, and a one-to-one
//! assignment is solved either optimally (Kuhn-Munkres) or with a greedy
//! fallback.
//!
//! ```rust,ignore
//! use aismatch::{
//!     AisContact, BoundingBox, CameraIntrinsics, Correlator, CorrelatorConfig,
//!     Detection, ObserverPose,
//! };
//!
//! let config = CorrelatorConfig::new(
//!     ObserverPose::new(40.0, 32.0),
//!     CameraIntrinsics::default(),
//!     100.0, // max matching distance in pixels
//! );
//! let engine = Correlator::new(config)?;
//!
//! let contacts = vec![AisContact::new(123456000, 40.005, 32.004, 120.0, 20.0)];
//! let detections = vec![Detection::new(BoundingBox::new(950.0, 500.0, 80.0, 40.0), 0.9)];
//! let result = engine.correlate(&contacts, &detections);
//! ```
//!
//! Video capture, object detection, and annotation parsing live outside this
//! crate; it only consumes their outputs.

pub mod assignment;
pub mod cost;
pub mod engine;
pub mod error;
pub mod geo;
pub mod projector;
pub mod types;

pub use assignment::AssignmentOutcome;
pub use cost::{CostConfig, PairScore};
pub use engine::{Correlator, CorrelatorConfig};
pub use error::{MatchError, Result};
pub use projector::{
    CameraIntrinsics, CameraMount, Distortion, ObserverPose, Projection, ProjectionMode,
};
pub use types::{
    AisContact, AssignmentStrategy, BoundingBox, CorrelationResult, Detection, Match, Scene,
};
