//! Mock sensor sources for testing and replay

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{GeodeticCoordinate, HeadingSample};
use crate::hardware::{
    HeadingSource, HeadingWatchOptions, PositionSource, PositionWatchOptions, SampleSink,
    SensorError, SensorPayload, SensorResult, SubscriptionHandle,
};

#[derive(Debug)]
struct MockState<T> {
    sink: Option<SampleSink<T>>,
    ready: bool,
    fail_next_watch: Option<SensorError>,
    watch_calls: u32,
    cancel_calls: u32,
    heading_options: Option<HeadingWatchOptions>,
    position_options: Option<PositionWatchOptions>,
}

impl<T> Default for MockState<T> {
    fn default() -> Self {
        Self {
            sink: None,
            ready: true,
            fail_next_watch: None,
            watch_calls: 0,
            cancel_calls: 0,
            heading_options: None,
            position_options: None,
        }
    }
}

fn lock<T>(state: &Mutex<MockState<T>>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sensor source driven by a [`MockFeed`]
#[derive(Debug)]
pub struct MockSensor<T> {
    state: Arc<Mutex<MockState<T>>>,
}

/// Test-side handle of a [`MockSensor`]
#[derive(Debug)]
pub struct MockFeed<T> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T> Clone for MockFeed<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

pub type MockHeadingSource = MockSensor<HeadingSample>;
pub type MockPositionSource = MockSensor<GeodeticCoordinate>;

impl<T: Into<SensorPayload>> MockSensor<T> {
    /// Create a source and the feed that drives it
    pub fn new() -> (Self, MockFeed<T>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockFeed { state },
        )
    }

    fn begin_watch(&mut self, sink: SampleSink<T>) -> SensorResult<SubscriptionHandle> {
        let mut state = lock(&self.state);
        state.watch_calls += 1;

        if let Some(error) = state.fail_next_watch.take() {
            return Err(error);
        }

        let handle = sink.handle();
        state.sink = Some(sink);
        Ok(handle)
    }

    fn end_watch(&mut self, handle: SubscriptionHandle) {
        let mut state = lock(&self.state);
        state.cancel_calls += 1;
        if state.sink.as_ref().is_some_and(|s| s.handle() == handle) {
            state.sink = None;
        }
    }
}

impl<T: Into<SensorPayload>> MockFeed<T> {
    /// Deliver a sample to the active watch. Returns false when nobody is watching.
    pub fn push(&self, sample: T) -> bool {
        let state = lock(&self.state);
        match &state.sink {
            Some(sink) => sink.deliver(sample),
            None => false,
        }
    }

    /// Report an error on the active watch
    pub fn fail(&self, error: SensorError) -> bool {
        let state = lock(&self.state);
        match &state.sink {
            Some(sink) => sink.fail(error),
            None => false,
        }
    }

    pub fn set_ready(&self, ready: bool) {
        lock(&self.state).ready = ready;
    }

    /// Make the next `watch` call fail with `error`
    pub fn fail_next_watch(&self, error: SensorError) {
        lock(&self.state).fail_next_watch = Some(error);
    }

    pub fn is_watching(&self) -> bool {
        lock(&self.state).sink.is_some()
    }

    pub fn watch_calls(&self) -> u32 {
        lock(&self.state).watch_calls
    }

    pub fn cancel_calls(&self) -> u32 {
        lock(&self.state).cancel_calls
    }

    pub fn heading_options(&self) -> Option<HeadingWatchOptions> {
        lock(&self.state).heading_options
    }

    pub fn position_options(&self) -> Option<PositionWatchOptions> {
        lock(&self.state).position_options
    }
}

impl HeadingSource for MockSensor<HeadingSample> {
    fn watch(&mut self, sink: SampleSink<HeadingSample>, options: HeadingWatchOptions) -> SensorResult<SubscriptionHandle> {
        lock(&self.state).heading_options = Some(options);
        self.begin_watch(sink)
    }

    fn cancel(&mut self, handle: SubscriptionHandle) {
        self.end_watch(handle);
    }

    fn is_ready(&self) -> bool {
        lock(&self.state).ready
    }
}

impl PositionSource for MockSensor<GeodeticCoordinate> {
    fn watch(&mut self, sink: SampleSink<GeodeticCoordinate>, options: PositionWatchOptions) -> SensorResult<SubscriptionHandle> {
        lock(&self.state).position_options = Some(options);
        self.begin_watch(sink)
    }

    fn cancel(&mut self, handle: SubscriptionHandle) {
        self.end_watch(handle);
    }

    fn is_ready(&self) -> bool {
        lock(&self.state).ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::SensorKind;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_feed_reaches_sink_only_while_watching() {
        let (mut source, feed) = MockHeadingSource::new();
        let (tx, rx) = unbounded();

        assert!(!feed.push(HeadingSample::new(1.0, 1.0, 1.0)));

        let sink = SampleSink::new(SubscriptionHandle::new(3), SensorKind::Heading, tx);
        let handle = source.watch(sink, HeadingWatchOptions::default()).unwrap();
        assert_eq!(handle, SubscriptionHandle::new(3));
        assert!(feed.push(HeadingSample::new(1.0, 1.0, 1.0)));
        assert_eq!(rx.len(), 1);

        source.cancel(handle);
        source.cancel(handle);
        assert!(!feed.is_watching());
        assert!(!feed.push(HeadingSample::new(1.0, 1.0, 1.0)));
        assert_eq!(feed.cancel_calls(), 2);
    }

    #[test]
    fn test_forced_watch_failure() {
        let (mut source, feed) = MockPositionSource::new();
        let (tx, _rx) = unbounded();
        feed.fail_next_watch(SensorError::PermissionDenied { sensor: SensorKind::Position });

        let sink = SampleSink::new(SubscriptionHandle::new(1), SensorKind::Position, tx);
        let options = PositionWatchOptions { high_accuracy: false };
        assert!(source.watch(sink, options).is_err());
        assert_eq!(feed.watch_calls(), 1);
        assert_eq!(feed.position_options(), Some(options));
        assert!(!feed.is_watching());
    }
}
