//! Tracking session
//!
//! Owns all mutable tracking state. Sensor sources push into a channel held
//! by the session; [`TrackingSession::process_at`] drains it one message at a
//! time and runs the cooperative startup poll, so nothing re-enters the
//! session from a source callback.

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};

use crate::algorithms::{CameraDriver, PoiResolver, ResolvedPois};
use crate::api::events::{EventListener, ListenerHandle, ListenerRegistry, TrackingEvent};
use crate::api::types::{ReadinessGap, SessionState, TrackingError, TrackingResult};
use crate::core::{EcefCoordinate, GeodeticCoordinate, HeadingSample, LatLng, PoiDescriptor};
use crate::hardware::{
    HeadingSource, HeadingWatchOptions, PositionSource, PositionWatchOptions, RecoveryStrategy,
    SampleSink, SensorError, SensorKind, SensorMessage, SensorPayload, SubscriptionHandle,
};
use crate::processing::{GeolocationTracker, HeadingDecision, HeadingTracker};
use crate::scene::Scene;
use crate::utils::config::TrackingConfig;
use crate::validation::DescriptorValidator;

/// An open watch: the handle we tagged the sink with, and the one the
/// source wants back for `cancel`
#[derive(Debug, Clone, Copy)]
struct Subscription {
    sink: SubscriptionHandle,
    source: SubscriptionHandle,
}

#[derive(Debug, Clone, Copy)]
struct StartupClock {
    started_at: Instant,
    next_poll: Instant,
    deadline: Instant,
}

/// Places configured POIs around the device and keeps the camera in step
/// with the device position.
pub struct TrackingSession<S: Scene> {
    scene: S,
    heading_source: Box<dyn HeadingSource>,
    position_source: Box<dyn PositionSource>,
    config: TrackingConfig,
    descriptors: Vec<PoiDescriptor>,
    initialized: bool,
    state: SessionState,
    heading: HeadingTracker,
    geolocation: GeolocationTracker,
    resolver: PoiResolver,
    camera: CameraDriver,
    resolved: Option<ResolvedPois>,
    pois_ready: bool,
    tx: Sender<SensorMessage>,
    rx: Receiver<SensorMessage>,
    handle_counter: u32,
    heading_subscription: Option<Subscription>,
    position_subscription: Option<Subscription>,
    startup: Option<StartupClock>,
    listeners: ListenerRegistry,
    last_sensor_error: Option<SensorError>,
}

impl<S: Scene> TrackingSession<S> {
    pub fn new(scene: S, heading_source: Box<dyn HeadingSource>, position_source: Box<dyn PositionSource>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            scene,
            heading_source,
            position_source,
            config: TrackingConfig::default(),
            descriptors: Vec::new(),
            initialized: false,
            state: SessionState::Stopped,
            heading: HeadingTracker::default(),
            geolocation: GeolocationTracker::default(),
            resolver: PoiResolver::default(),
            camera: CameraDriver::default(),
            resolved: None,
            pois_ready: false,
            tx,
            rx,
            handle_counter: 0,
            heading_subscription: None,
            position_subscription: None,
            startup: None,
            listeners: ListenerRegistry::new(),
            last_sensor_error: None,
        }
    }

    /// Validate and store the POI set and configuration.
    ///
    /// Only allowed while stopped. Nothing is kept if validation fails.
    pub fn initialize(&mut self, descriptors: Vec<PoiDescriptor>, config: TrackingConfig) -> TrackingResult<()> {
        if self.state != SessionState::Stopped {
            return Err(TrackingError::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }

        let validation = config.validate();
        for warning in &validation.warnings {
            warn!("Configuration: {}", warning);
        }
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(TrackingError::from_validation(error));
        }

        DescriptorValidator::validate_all(&descriptors)?;

        self.heading = HeadingTracker::new(config.min_heading_accuracy, config.heading_warmup_samples);
        self.geolocation = GeolocationTracker::new(config.geolocation_window);
        self.resolver = PoiResolver::new(config.platform, config.axis_corrections.clone());
        self.camera = CameraDriver::new(config.min_camera_delta_m, config.accumulate_sub_threshold_deltas);
        self.resolved = None;
        self.pois_ready = false;

        info!(
            "Tracking session initialized: {} POIs, platform {:?}",
            descriptors.len(),
            config.platform
        );

        self.descriptors = descriptors;
        self.config = config;
        self.initialized = true;
        Ok(())
    }

    pub fn start(&mut self) -> TrackingResult<()> {
        self.start_at(Instant::now())
    }

    /// Open both sensor watches and begin waiting for startup data.
    /// Does nothing unless stopped.
    pub fn start_at(&mut self, now: Instant) -> TrackingResult<()> {
        if !self.initialized {
            return Err(TrackingError::NotInitialized);
        }
        if self.state != SessionState::Stopped {
            debug!("start() ignored while {}", self.state);
            return Ok(());
        }

        let heading = self.watch_heading()?;
        let position = match self.watch_position() {
            Ok(subscription) => subscription,
            Err(error) => {
                self.heading_source.cancel(heading.source);
                return Err(error);
            }
        };
        self.heading_subscription = Some(heading);
        self.position_subscription = Some(position);

        self.startup = Some(StartupClock {
            started_at: now,
            next_poll: now + self.poll_interval(),
            deadline: now + Duration::from_millis(u64::from(self.config.startup_timeout_ms)),
        });
        self.set_state(SessionState::Starting);
        info!("Tracking session starting");
        Ok(())
    }

    /// Cancel both watches and discard all tracking state. Safe in any state.
    pub fn stop(&mut self) {
        self.cancel_watch(SensorKind::Heading);
        self.cancel_watch(SensorKind::Position);

        self.startup = None;
        self.heading.reset();
        self.geolocation.reset();
        self.camera.reset();
        self.resolved = None;
        self.pois_ready = false;

        if self.state != SessionState::Stopped {
            self.set_state(SessionState::Stopped);
            info!("Tracking session stopped");
        }
    }

    pub fn process(&mut self) -> TrackingResult<usize> {
        self.process_at(Instant::now())
    }

    /// Handle queued sensor messages, then run the startup poll if due.
    /// Returns the number of messages handled; messages from cancelled
    /// subscriptions are dropped and not counted.
    ///
    /// Losing a sensor returns `SensorUnavailable` right away and leaves the
    /// rest of the queue for the next call. While starting this also stops
    /// the session; a running session keeps going without that sensor.
    pub fn process_at(&mut self, now: Instant) -> TrackingResult<usize> {
        if !self.initialized {
            return Err(TrackingError::NotInitialized);
        }

        let mut processed = 0;
        while let Ok(message) = self.rx.try_recv() {
            if self.dispatch(message)? {
                processed += 1;
            }
        }

        if self.state == SessionState::Starting {
            self.poll_startup(now)?;
        }

        Ok(processed)
    }

    pub fn register_listener(&mut self, listener: EventListener) -> ListenerHandle {
        self.listeners.register(listener)
    }

    /// Returns false if the handle was not registered
    pub fn unregister_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.unregister(handle)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_heading(&self) -> Option<f64> {
        self.heading.current_heading()
    }

    pub fn current_geolocation(&self) -> Option<LatLng> {
        self.geolocation.current_geolocation()
    }

    pub fn current_anchor(&self) -> Option<EcefCoordinate> {
        self.geolocation.current_anchor()
    }

    pub fn initial_geolocation(&self) -> Option<LatLng> {
        self.geolocation.initial_geolocation()
    }

    /// Positions computed at activation, after heading alignment
    pub fn resolved_positions(&self) -> Option<&ResolvedPois> {
        self.resolved.as_ref()
    }

    pub fn pois_ready(&self) -> bool {
        self.pois_ready
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &[PoiDescriptor] {
        &self.descriptors
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn last_sensor_error(&self) -> Option<&SensorError> {
        self.last_sensor_error.as_ref()
    }

    /// Whether the session holds an open watch on `sensor`
    pub fn is_watching(&self, sensor: SensorKind) -> bool {
        match sensor {
            SensorKind::Heading => self.heading_subscription.is_some(),
            SensorKind::Position => self.position_subscription.is_some(),
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.config.startup_poll_interval_ms))
    }

    fn next_handle(&mut self) -> SubscriptionHandle {
        self.handle_counter = self.handle_counter.wrapping_add(1);
        SubscriptionHandle::new(self.handle_counter)
    }

    fn set_state(&mut self, new_state: SessionState) {
        let old_state = self.state;
        self.state = new_state;
        self.listeners.emit(&TrackingEvent::StateChanged { old_state, new_state });
    }

    fn watch_heading(&mut self) -> TrackingResult<Subscription> {
        let sink_handle = self.next_handle();
        let sink = SampleSink::new(sink_handle, SensorKind::Heading, self.tx.clone());
        let options = HeadingWatchOptions {
            sample_interval_ms: self.config.heading_sample_interval_ms,
        };

        match self.heading_source.watch(sink, options) {
            Ok(source) => Ok(Subscription { sink: sink_handle, source }),
            Err(error) => Err(self.watch_failed(error)),
        }
    }

    fn watch_position(&mut self) -> TrackingResult<Subscription> {
        let sink_handle = self.next_handle();
        let sink = SampleSink::new(sink_handle, SensorKind::Position, self.tx.clone());
        let options = PositionWatchOptions {
            high_accuracy: self.config.high_accuracy_position,
        };

        match self.position_source.watch(sink, options) {
            Ok(source) => Ok(Subscription { sink: sink_handle, source }),
            Err(error) => Err(self.watch_failed(error)),
        }
    }

    /// A source that cannot be watched is unusable for this start attempt,
    /// whatever the underlying error class.
    fn watch_failed(&mut self, error: SensorError) -> TrackingError {
        let sensor = error.sensor();
        warn!("Failed to watch {} sensor: {}", sensor, error);
        let details = error.to_string();
        self.record_fault(error);
        TrackingError::SensorUnavailable { sensor, details }
    }

    fn record_fault(&mut self, error: SensorError) {
        let sensor = error.sensor();
        self.last_sensor_error = Some(error.clone());
        self.listeners.emit(&TrackingEvent::SensorFault { sensor, error });
    }

    fn dispatch(&mut self, message: SensorMessage) -> TrackingResult<bool> {
        let active = match message.sensor {
            SensorKind::Heading => self.heading_subscription,
            SensorKind::Position => self.position_subscription,
        };
        if active.map(|s| s.sink) != Some(message.handle) {
            trace!(
                "Dropping {} message from inactive subscription {}",
                message.sensor,
                message.handle.id()
            );
            return Ok(false);
        }

        match message.payload {
            SensorPayload::Heading(sample) => self.on_heading(&sample),
            SensorPayload::Position(sample) => self.on_position(&sample)?,
            SensorPayload::Error(error) => self.on_sensor_error(error)?,
        }
        Ok(true)
    }

    fn on_heading(&mut self, sample: &HeadingSample) {
        if let HeadingDecision::Accepted(heading) = self.heading.on_sample(sample) {
            self.listeners.emit(&TrackingEvent::HeadingChanged(heading));
        }
    }

    fn on_position(&mut self, sample: &GeodeticCoordinate) -> TrackingResult<()> {
        let update = match self.geolocation.on_sample(sample) {
            Ok(update) => update,
            Err(error) => return self.on_sensor_error(error),
        };

        let translation = self.camera.on_anchor_update(
            &update.previous_anchor,
            &update.anchor,
            self.config.link_camera_to_device_position,
            self.pois_ready,
        );
        if let Some(translation) = translation {
            self.scene.translate_camera(translation);
        }

        self.listeners.emit(&TrackingEvent::PositionChanged(update.geolocation));
        Ok(())
    }

    fn on_sensor_error(&mut self, error: SensorError) -> TrackingResult<()> {
        let sensor = error.sensor();
        let strategy = error.recovery_strategy();
        warn!("{} sensor error ({:?}): {}", sensor, strategy, error);
        self.record_fault(error.clone());

        match strategy {
            RecoveryStrategy::Retry | RecoveryStrategy::RetryWithDelay { .. } => Ok(()),
            RecoveryStrategy::Resubscribe => self.resubscribe(sensor),
            RecoveryStrategy::Fail => {
                self.cancel_watch(sensor);
                Err(self.sensor_lost(error.into()))
            }
        }
    }

    fn resubscribe(&mut self, sensor: SensorKind) -> TrackingResult<()> {
        if !self.cancel_watch(sensor) {
            return Ok(());
        }

        let renewed = match sensor {
            SensorKind::Heading => self.watch_heading().map(|s| self.heading_subscription = Some(s)),
            SensorKind::Position => self.watch_position().map(|s| self.position_subscription = Some(s)),
        };
        match renewed {
            Ok(()) => {
                debug!("Resubscribed {} sensor", sensor);
                Ok(())
            }
            Err(error) => Err(self.sensor_lost(error)),
        }
    }

    /// Returns false if there was no open watch
    fn cancel_watch(&mut self, sensor: SensorKind) -> bool {
        let subscription = match sensor {
            SensorKind::Heading => self.heading_subscription.take(),
            SensorKind::Position => self.position_subscription.take(),
        };
        let Some(subscription) = subscription else {
            return false;
        };
        match sensor {
            SensorKind::Heading => self.heading_source.cancel(subscription.source),
            SensorKind::Position => self.position_source.cancel(subscription.source),
        }
        true
    }

    /// A starting session cannot become ready without both sensors
    fn sensor_lost(&mut self, error: TrackingError) -> TrackingError {
        if self.state == SessionState::Starting {
            warn!("Stopping startup: {}", error);
            self.stop();
        } else {
            warn!("Continuing without sensor: {}", error);
        }
        error
    }

    fn readiness_gaps(&self) -> Vec<ReadinessGap> {
        let mut missing = Vec::new();
        if !(self.heading_source.is_ready() && self.position_source.is_ready()) {
            missing.push(ReadinessGap::SensorsNotReady);
        }
        if !self.heading.has_heading() {
            missing.push(ReadinessGap::NoHeading);
        }
        if !self.geolocation.has_geolocation() {
            missing.push(ReadinessGap::NoGeolocation);
        }
        missing
    }

    fn poll_startup(&mut self, now: Instant) -> TrackingResult<()> {
        let Some(mut clock) = self.startup else {
            return Ok(());
        };
        if now < clock.next_poll {
            return Ok(());
        }
        clock.next_poll = now + self.poll_interval();
        self.startup = Some(clock);

        let missing = self.readiness_gaps();
        if missing.is_empty() {
            return self.activate();
        }

        let waited_ms = now.saturating_duration_since(clock.started_at).as_millis() as u64;
        if now >= clock.deadline {
            warn!("Startup timed out after {}ms, missing: {:?}", waited_ms, missing);
            self.listeners.emit(&TrackingEvent::StartupTimedOut { waited_ms });
            self.stop();
            return Err(TrackingError::StartupTimeout { waited_ms, missing });
        }

        debug!("Startup waiting after {}ms: {:?}", waited_ms, missing);
        Ok(())
    }

    /// One-time placement of the POIs once heading and position are known
    fn activate(&mut self) -> TrackingResult<()> {
        let Some(anchor) = self.geolocation.current_anchor() else {
            return Ok(());
        };

        let mut resolved = self.resolver.resolve_all(&self.descriptors, &anchor);
        if self.config.align_frame_to_heading {
            if let Some(heading) = self.heading.current_heading() {
                PoiResolver::apply_heading_offset(heading, &mut resolved);
            }
        }
        PoiResolver::publish(&resolved, &mut self.scene)?;

        let placed = resolved.len();
        self.resolved = Some(resolved);
        self.startup = None;
        self.pois_ready = true;
        self.listeners.emit(&TrackingEvent::PoisReady);

        self.show_projections();
        self.set_state(SessionState::Running);
        self.apply_visualization();

        info!(
            "Tracking session running: {} POIs placed, heading {:?}",
            placed,
            self.heading.current_heading()
        );
        Ok(())
    }

    fn show_projections(&mut self) {
        for projection in self.scene.projections() {
            let attached = projection
                .parent_poi_id
                .as_deref()
                .is_some_and(|parent| self.descriptors.iter().any(|d| d.poi_id() == parent));
            if !attached {
                continue;
            }
            if let Err(error) = self.scene.set_projection_visible(&projection.id, true) {
                warn!("Could not show projection '{}': {}", projection.id, error);
            }
        }
    }

    fn apply_visualization(&mut self) {
        if self.config.pov_height.is_finite() {
            self.scene.set_camera_height(self.config.pov_height);
        }

        let vis = self.config.visualization;
        if vis.show_axis {
            self.scene.show_axis(vis.axis_length);
        }
        if vis.show_grid {
            self.scene.show_grid(vis.grid_size, vis.grid_divisions, vis.grid_color);
        }
    }
}

impl<S: Scene> Drop for TrackingSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{MockFeed, MockHeadingSource, MockPositionSource};
    use crate::scene::{InMemoryScene, PoiRegistry};
    use approx::assert_abs_diff_eq;
    use std::sync::{Arc, Mutex};

    struct Harness {
        session: TrackingSession<InMemoryScene>,
        heading: MockFeed<HeadingSample>,
        position: MockFeed<GeodeticCoordinate>,
        t0: Instant,
    }

    fn harness(descriptors: Vec<PoiDescriptor>, config: TrackingConfig) -> Harness {
        let (heading_source, heading) = MockHeadingSource::new();
        let (position_source, position) = MockPositionSource::new();
        let mut session = TrackingSession::new(
            InMemoryScene::new(),
            Box::new(heading_source),
            Box::new(position_source),
        );
        session.initialize(descriptors, config).unwrap();
        Harness {
            session,
            heading,
            position,
            t0: Instant::now(),
        }
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    fn warm_heading(feed: &MockFeed<HeadingSample>, heading: f64) {
        for _ in 0..10 {
            feed.push(HeadingSample::new(heading, heading, 5.0));
        }
    }

    #[test]
    fn test_start_requires_initialize() {
        let (h, _) = MockHeadingSource::new();
        let (p, _) = MockPositionSource::new();
        let mut session = TrackingSession::new(InMemoryScene::new(), Box::new(h), Box::new(p));
        assert_eq!(session.start(), Err(TrackingError::NotInitialized));
        assert_eq!(session.process(), Err(TrackingError::NotInitialized));
    }

    #[test]
    fn test_activation_places_pois_and_runs() {
        let mut h = harness(vec![PoiDescriptor::polar("north", 0.0, 50.0, 20.0)], TrackingConfig::default());
        h.session.start_at(h.t0).unwrap();
        assert_eq!(h.session.state(), SessionState::Starting);

        warm_heading(&h.heading, 0.0);
        h.position.push(GeodeticCoordinate::surface(33.0, -96.0));

        h.session.process_at(at(h.t0, 100)).unwrap();
        assert_eq!(h.session.state(), SessionState::Starting);

        h.session.process_at(at(h.t0, 200)).unwrap();
        assert_eq!(h.session.state(), SessionState::Running);
        assert!(h.session.pois_ready());

        let placed = h.session.scene().poi_position("north").unwrap();
        assert_abs_diff_eq!(placed.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(placed.y, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(placed.z, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heading_offset_applied_once() {
        let mut h = harness(vec![PoiDescriptor::polar("p", 0.0, 10.0, 0.0)], TrackingConfig::default());
        h.session.start_at(h.t0).unwrap();
        warm_heading(&h.heading, 90.0);
        h.position.push(GeodeticCoordinate::surface(10.0, 10.0));
        h.session.process_at(at(h.t0, 200)).unwrap();

        let placed = h.session.scene().poi_position("p").unwrap();
        assert_abs_diff_eq!(placed.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(placed.z, 0.0, epsilon = 1e-9);

        // later headings do not move POIs again
        h.heading.push(HeadingSample::new(180.0, 180.0, 5.0));
        h.session.process_at(at(h.t0, 400)).unwrap();
        assert_eq!(h.session.current_heading(), Some(180.0));
        assert_eq!(h.session.scene().poi_position("p"), Some(placed));
    }

    #[test]
    fn test_events_in_emission_order() {
        let mut h = harness(vec![PoiDescriptor::polar("p", 0.0, 10.0, 0.0)], TrackingConfig::default());
        let events = Arc::new(Mutex::new(Vec::new()));
        {
            let events = Arc::clone(&events);
            h.session
                .register_listener(Box::new(move |event: &TrackingEvent| events.lock().unwrap().push(event.clone())));
        }

        h.session.start_at(h.t0).unwrap();
        warm_heading(&h.heading, 0.0);
        h.position.push(GeodeticCoordinate::surface(33.0, -96.0));
        h.session.process_at(at(h.t0, 200)).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            TrackingEvent::StateChanged {
                old_state: SessionState::Stopped,
                new_state: SessionState::Starting
            }
        );
        assert_eq!(events[1], TrackingEvent::HeadingChanged(0.0));
        assert!(matches!(events[2], TrackingEvent::PositionChanged(_)));
        assert_eq!(events[3], TrackingEvent::PoisReady);
        assert_eq!(
            events[4],
            TrackingEvent::StateChanged {
                old_state: SessionState::Starting,
                new_state: SessionState::Running
            }
        );
    }

    #[test]
    fn test_sensors_not_ready_blocks_activation() {
        let mut h = harness(vec![], TrackingConfig::default());
        h.heading.set_ready(false);
        h.session.start_at(h.t0).unwrap();
        warm_heading(&h.heading, 0.0);
        h.position.push(GeodeticCoordinate::surface(1.0, 1.0));

        h.session.process_at(at(h.t0, 200)).unwrap();
        assert_eq!(h.session.state(), SessionState::Starting);

        h.heading.set_ready(true);
        h.session.process_at(at(h.t0, 400)).unwrap();
        assert_eq!(h.session.state(), SessionState::Running);
    }

    #[test]
    fn test_read_failure_resubscribes() {
        let mut h = harness(vec![], TrackingConfig::default());
        h.session.start_at(h.t0).unwrap();

        h.position.fail(SensorError::ReadFailed {
            sensor: SensorKind::Position,
            details: "gps glitch".to_string(),
        });
        h.session.process_at(at(h.t0, 10)).unwrap();

        assert_eq!(h.position.watch_calls(), 2);
        assert_eq!(h.position.cancel_calls(), 1);
        assert!(h.position.is_watching());
        assert!(matches!(
            h.session.last_sensor_error(),
            Some(SensorError::ReadFailed { .. })
        ));

        // fixes on the new subscription are used
        h.position.push(GeodeticCoordinate::surface(5.0, 5.0));
        assert_eq!(h.session.process_at(at(h.t0, 20)).unwrap(), 1);
        assert!(h.session.current_geolocation().is_some());
    }

    #[test]
    fn test_reinitialize_rejected_while_running() {
        let mut h = harness(vec![], TrackingConfig::default());
        h.session.start_at(h.t0).unwrap();
        let err = h.session.initialize(vec![], TrackingConfig::default()).unwrap_err();
        assert!(matches!(err, TrackingError::InvalidState { operation: "initialize", .. }));

        h.session.stop();
        assert!(h.session.initialize(vec![], TrackingConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (hs, _) = MockHeadingSource::new();
        let (ps, _) = MockPositionSource::new();
        let mut session = TrackingSession::new(InMemoryScene::new(), Box::new(hs), Box::new(ps));

        let mut config = TrackingConfig::default();
        config.geolocation_window = 0;
        let err = session.initialize(vec![], config).unwrap_err();
        assert!(matches!(err, TrackingError::InvalidConfiguration { ref parameter, .. } if parameter == "geolocation_window"));
        assert!(!session.is_initialized());
    }
}
