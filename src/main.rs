use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};

use poi_tracking::hardware::{MockHeadingSource, MockPositionSource};
use poi_tracking::scene::{InMemoryScene, ProjectionInfo};
use poi_tracking::{
    GeodeticCoordinate, HeadingSample, PoiDescriptor, SessionState, TrackingConfig, TrackingEvent,
    TrackingSession,
};

/// Recorded sensor data plus the POIs to place
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: TrackingConfig,
    #[serde(default)]
    pois: Vec<PoiDescriptor>,
    /// Visuals registered in the scene before the session starts
    #[serde(default)]
    projections: Vec<ProjectionInfo>,
    #[serde(default)]
    heading_samples: Vec<HeadingSample>,
    #[serde(default)]
    position_samples: Vec<GeodeticCoordinate>,
}

fn replay(scenario: Scenario) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut scene = InMemoryScene::new();
    for projection in &scenario.projections {
        scene.add_projection(projection.id.clone(), projection.parent_poi_id.as_deref());
    }

    let (heading_source, heading_feed) = MockHeadingSource::new();
    let (position_source, position_feed) = MockPositionSource::new();
    let mut session = TrackingSession::new(scene, Box::new(heading_source), Box::new(position_source));

    session.register_listener(Box::new(|event: &TrackingEvent| match event {
        TrackingEvent::SensorFault { .. } | TrackingEvent::StartupTimedOut { .. } => warn!("{:?}", event),
        _ => info!("{:?}", event),
    }));

    let poll_interval = Duration::from_millis(u64::from(scenario.config.startup_poll_interval_ms));
    // One heading and one position sample per compass tick, on a simulated clock
    let step = Duration::from_millis(u64::from(scenario.config.heading_sample_interval_ms));
    session.initialize(scenario.pois, scenario.config)?;

    let started_at = Instant::now();
    let mut now = started_at;
    session.start_at(now)?;

    let ticks = scenario.heading_samples.len().max(scenario.position_samples.len());
    for tick in 0..ticks {
        if let Some(sample) = scenario.heading_samples.get(tick) {
            heading_feed.push(*sample);
        }
        if let Some(sample) = scenario.position_samples.get(tick) {
            position_feed.push(*sample);
        }
        now += step;
        session.process_at(now)?;
    }

    while session.state() == SessionState::Starting {
        now += poll_interval;
        session.process_at(now)?;
    }

    let pois: Vec<_> = session
        .resolved_positions()
        .map(|resolved| {
            resolved
                .iter()
                .map(|poi| json!({ "poi_id": poi.poi_id, "kind": poi.kind, "position": poi.position }))
                .collect()
        })
        .unwrap_or_default();

    Ok(json!({
        "state": session.state(),
        "heading": session.current_heading(),
        "geolocation": session.current_geolocation(),
        "initial_geolocation": session.initial_geolocation(),
        "pois": pois,
        "camera": session.scene().camera_position(),
        "camera_moves": session.scene().translations().len(),
        "elapsed_ms": now.duration_since(started_at).as_millis() as u64,
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!(
            "Usage: {} <scenario.json>",
            args.first().map_or("poi-tracking", |s| s.as_str())
        );
        return Err("Invalid arguments".into());
    }

    let json_data = std::fs::read_to_string(&args[1])?;
    let scenario: Scenario = serde_json::from_str(&json_data)?;

    let report = replay(scenario)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
