//! Sensor source traits and subscription plumbing
//!
//! A source delivers samples into a [`SampleSink`] handed to it by the
//! session. Sinks only enqueue; the session drains the queue on its own
//! schedule, one message at a time, so sample handling never re-enters
//! the session from inside a source callback.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::core::{GeodeticCoordinate, HeadingSample, HEADING_SAMPLE_INTERVAL_MS};
use crate::hardware::{SensorError, SensorKind, SensorResult};

/// Identifies one watch on one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u32);

impl SubscriptionHandle {
    pub fn new(id: u32) -> Self {
        SubscriptionHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// What a source can push
#[derive(Debug, Clone, PartialEq)]
pub enum SensorPayload {
    Heading(HeadingSample),
    Position(GeodeticCoordinate),
    Error(SensorError),
}

impl From<HeadingSample> for SensorPayload {
    fn from(sample: HeadingSample) -> Self {
        SensorPayload::Heading(sample)
    }
}

impl From<GeodeticCoordinate> for SensorPayload {
    fn from(sample: GeodeticCoordinate) -> Self {
        SensorPayload::Position(sample)
    }
}

/// Queued sensor message tagged with its subscription
#[derive(Debug, Clone, PartialEq)]
pub struct SensorMessage {
    pub handle: SubscriptionHandle,
    pub sensor: SensorKind,
    pub payload: SensorPayload,
}

/// Delivery end of a subscription
pub struct SampleSink<T> {
    handle: SubscriptionHandle,
    sensor: SensorKind,
    tx: Sender<SensorMessage>,
    _sample: PhantomData<fn(T)>,
}

impl<T> Clone for SampleSink<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            sensor: self.sensor,
            tx: self.tx.clone(),
            _sample: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SampleSink<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSink")
            .field("handle", &self.handle)
            .field("sensor", &self.sensor)
            .finish()
    }
}

impl<T: Into<SensorPayload>> SampleSink<T> {
    pub fn new(handle: SubscriptionHandle, sensor: SensorKind, tx: Sender<SensorMessage>) -> Self {
        Self {
            handle,
            sensor,
            tx,
            _sample: PhantomData,
        }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn sensor(&self) -> SensorKind {
        self.sensor
    }

    /// Queue a sample. Returns false once the receiving session is gone.
    pub fn deliver(&self, sample: T) -> bool {
        self.send(sample.into())
    }

    /// Queue an error for this subscription
    pub fn fail(&self, error: SensorError) -> bool {
        self.send(SensorPayload::Error(error))
    }

    fn send(&self, payload: SensorPayload) -> bool {
        self.tx
            .send(SensorMessage {
                handle: self.handle,
                sensor: self.sensor,
                payload,
            })
            .is_ok()
    }
}

/// Compass watch parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingWatchOptions {
    pub sample_interval_ms: u32,
}

impl Default for HeadingWatchOptions {
    fn default() -> Self {
        Self {
            sample_interval_ms: HEADING_SAMPLE_INTERVAL_MS,
        }
    }
}

/// Position watch parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionWatchOptions {
    pub high_accuracy: bool,
}

impl Default for PositionWatchOptions {
    fn default() -> Self {
        Self { high_accuracy: true }
    }
}

/// Compass provider
pub trait HeadingSource {
    /// Start delivering samples into `sink` until cancelled.
    /// Implementations normally return `sink.handle()`.
    fn watch(&mut self, sink: SampleSink<HeadingSample>, options: HeadingWatchOptions) -> SensorResult<SubscriptionHandle>;

    /// Stop a watch. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: SubscriptionHandle);

    /// Whether the platform sensor layer has finished initializing
    fn is_ready(&self) -> bool {
        true
    }
}

/// Position provider
pub trait PositionSource {
    /// Start delivering fixes into `sink` until cancelled.
    /// Implementations normally return `sink.handle()`.
    fn watch(&mut self, sink: SampleSink<GeodeticCoordinate>, options: PositionWatchOptions) -> SensorResult<SubscriptionHandle>;

    /// Stop a watch. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: SubscriptionHandle);

    /// Whether the platform sensor layer has finished initializing
    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_sink_tags_messages() {
        let (tx, rx) = unbounded();
        let sink: SampleSink<HeadingSample> = SampleSink::new(SubscriptionHandle::new(7), SensorKind::Heading, tx);

        assert!(sink.deliver(HeadingSample::new(1.0, 2.0, 3.0)));
        assert!(sink.fail(SensorError::Timeout { sensor: SensorKind::Heading, timeout_ms: 10 }));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.handle, SubscriptionHandle::new(7));
        assert_eq!(first.payload, SensorPayload::Heading(HeadingSample::new(1.0, 2.0, 3.0)));

        let second = rx.try_recv().unwrap();
        assert!(matches!(second.payload, SensorPayload::Error(_)));
    }

    #[test]
    fn test_sink_reports_closed_receiver() {
        let (tx, rx) = unbounded();
        let sink: SampleSink<GeodeticCoordinate> = SampleSink::new(SubscriptionHandle::new(1), SensorKind::Position, tx);
        drop(rx);
        assert!(!sink.deliver(GeodeticCoordinate::surface(0.0, 0.0)));
    }
}
