//! Per-frame correlation of AIS contacts with camera detections
//!
//! `Correlator` holds the read-only observer/camera configuration and runs the
//! project -> score -> assign -> filter pipeline. `correlate` is pure given its
//! inputs, so independent frames may be processed in parallel;
//! `correlate_batch` does exactly that.

use log::debug;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assignment::solve;
use crate::cost::{score, CostConfig, PairScore};
use crate::error::Result;
use crate::projector::{project, CameraIntrinsics, ObserverPose, Projection, ProjectionMode};
use crate::types::{
    AisContact, AssignmentStrategy, CorrelationResult, Detection, Match, Scene,
};

/// Full configuration of one correlation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelatorConfig {
    pub observer: ObserverPose,
    pub intrinsics: CameraIntrinsics,
    pub mode: ProjectionMode,
    pub cost: CostConfig,
    /// Preferred assignment strategy; the engine still falls back to greedy
    /// when the exact path is degenerate
    pub strategy: AssignmentStrategy,
}

impl CorrelatorConfig {
    pub fn new(observer: ObserverPose, intrinsics: CameraIntrinsics, max_distance: f64) -> Self {
        Self {
            observer,
            intrinsics,
            mode: ProjectionMode::default(),
            cost: CostConfig::new(max_distance),
            strategy: AssignmentStrategy::Exact,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: AssignmentStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// The correlation engine. Stateless beyond its configuration.
#[derive(Debug, Clone)]
pub struct Correlator {
    config: CorrelatorConfig,
}

impl Correlator {
    /// Build a correlator, validating the configuration up front.
    pub fn new(config: CorrelatorConfig) -> Result<Self> {
        config.intrinsics.validate()?;
        config.cost.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CorrelatorConfig {
        &self.config
    }

    /// Correlate one frame's AIS contacts with its detections.
    ///
    /// Contacts whose projection is rejected (behind the camera, zero range)
    /// are excluded from the matching round and reported unmatched.
    pub fn correlate(&self, contacts: &[AisContact], detections: &[Detection]) -> CorrelationResult {
        let cfg = &self.config;

        let mut projected: Vec<(usize, Projection)> = Vec::with_capacity(contacts.len());
        for (idx, contact) in contacts.iter().enumerate() {
            if let Some(p) = project(contact, &cfg.observer, &cfg.intrinsics, cfg.mode) {
                projected.push((idx, p));
            }
        }

        if projected.is_empty() || detections.is_empty() {
            debug!(
                "degenerate frame: {} projected contacts, {} detections",
                projected.len(),
                detections.len()
            );
            return CorrelationResult::empty(contacts, detections.len(), cfg.strategy);
        }

        let scores: Vec<PairScore> = projected
            .iter()
            .flat_map(|(_, p)| detections.iter().map(move |d| score(p, d, &cfg.cost)))
            .collect();
        let shape = (projected.len(), detections.len());
        let costs = Array2::from_shape_fn(shape, |(i, j)| scores[i * detections.len() + j].cost);

        let outcome = solve(costs.view(), cfg.strategy);

        let mut matched_contacts = vec![false; contacts.len()];
        let mut matched_detections = vec![false; detections.len()];
        let mut matches = Vec::with_capacity(outcome.pairs.len());

        for (row, col) in outcome.pairs {
            let s = scores[row * detections.len() + col];
            // The solver can park a row on an ineligible column; those pairs
            // are not matches
            if !s.eligible() {
                continue;
            }
            let contact_idx = projected[row].0;
            matched_contacts[contact_idx] = true;
            matched_detections[col] = true;
            matches.push(Match {
                mmsi: contacts[contact_idx].mmsi,
                detection: col,
                cost: s.cost,
                confidence: s.confidence,
            });
        }

        CorrelationResult {
            matches,
            unmatched_contacts: contacts
                .iter()
                .enumerate()
                .filter(|&(i, _)| !matched_contacts[i])
                .map(|(_, c)| c.mmsi)
                .collect(),
            unmatched_detections: (0..detections.len())
                .filter(|&j| !matched_detections[j])
                .collect(),
            strategy: outcome.strategy,
        }
    }

    /// Correlate many independent frames in parallel.
    ///
    /// The configuration is the only shared state and is read-only, so frames
    /// need no locking.
    pub fn correlate_batch(&self, scenes: &[Scene]) -> Vec<CorrelationResult> {
        scenes
            .par_iter()
            .map(|scene| self.correlate(&scene.contacts, &scene.detections))
            .collect()
    }
}
