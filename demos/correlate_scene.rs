//! Example: correlate a synthetic AIS scene with synthetic detections
//!
//! Generates a handful of vessels around the observer, fabricates detections
//! near their projected positions, and prints the match table.
//!
//! Usage:
//!   cargo run --example correlate_scene

use aismatch::{
    AisContact, AssignmentStrategy, BoundingBox, CameraIntrinsics, Correlator, CorrelatorConfig,
    Detection, ObserverPose, ProjectionMode,
};
use rand::prelude::*;

fn sample_contacts(rng: &mut impl Rng, count: usize, base: (f64, f64)) -> Vec<AisContact> {
    (0..count)
        .map(|i| {
            AisContact::new(
                123456000 + i as u32,
                base.0 + rng.gen_range(0.001..0.02),
                base.1 + rng.gen_range(-0.01..0.01),
                rng.gen_range(50.0..200.0),
                rng.gen_range(10.0..30.0),
            )
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🚢 AIS/camera correlation demo");
    println!("═══════════════════════════════\n");

    let mut rng = StdRng::seed_from_u64(7);
    let own_position = (40.0, 32.0);

    let config = CorrelatorConfig::new(
        ObserverPose::new(own_position.0, own_position.1),
        CameraIntrinsics::default(),
        2000.0,
    )
    .with_mode(ProjectionMode::BearingOnly);
    let engine = Correlator::new(config).expect("valid config");

    let contacts = sample_contacts(&mut rng, 5, own_position);

    // Fabricate detections near where the contacts should appear, plus one
    // clutter box nothing reports
    let mut detections = Vec::new();
    for contact in &contacts {
        if let Some(proj) = aismatch::projector::project(
            contact,
            &config.observer,
            &config.intrinsics,
            config.mode,
        ) {
            let w = proj.size_px * rng.gen_range(0.85..1.15);
            detections.push(Detection::new(
                BoundingBox::new(
                    proj.pixel.0 - w / 2.0 + rng.gen_range(-15.0..15.0),
                    proj.pixel.1 - 20.0 + rng.gen_range(-10.0..10.0),
                    w,
                    40.0,
                ),
                rng.gen_range(0.6..1.0),
            ));
        }
    }
    detections.push(Detection::new(
        BoundingBox::new(50.0, 900.0, 60.0, 30.0),
        0.4,
    ));

    println!(
        "📡 {} AIS contacts, 📷 {} detections\n",
        contacts.len(),
        detections.len()
    );

    let result = engine.correlate(&contacts, &detections);

    let strategy = match result.strategy {
        AssignmentStrategy::Exact => "exact (Kuhn-Munkres)",
        AssignmentStrategy::Greedy => "greedy fallback",
    };
    println!("Assignment strategy: {strategy}\n");

    for m in &result.matches {
        println!(
            "  MMSI {}  ->  detection #{}  cost {:>7.1}  confidence {:.3}",
            m.mmsi, m.detection, m.cost, m.confidence
        );
    }
    if !result.unmatched_contacts.is_empty() {
        println!("\nUnmatched contacts:   {:?}", result.unmatched_contacts);
    }
    if !result.unmatched_detections.is_empty() {
        println!("Unmatched detections: {:?}", result.unmatched_detections);
    }

    println!(
        "\n✓ {} of {} detections matched",
        result.matches.len(),
        detections.len()
    );

    println!(
        "\nResult as JSON:\n{}",
        serde_json::to_string_pretty(&result).expect("serializable result")
    );
}
