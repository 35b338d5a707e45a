//! Per-lap telemetry streams
//!
//! A stream is a set of named channels (Speed, RPM, nGear, Throttle, Brake,
//! ...) sampled along one lap. Every channel of one stream has the same
//! sample count; the document parser rejects streams that do not.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One telemetry sample, kept in the type the provider recorded it in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Telemetry channels for one lap, in chronological sample order
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelemetryStream {
    channels: BTreeMap<String, Vec<SampleValue>>,
}

impl TelemetryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a channel.
    pub fn with_channel(mut self, name: impl Into<String>, samples: Vec<SampleValue>) -> Self {
        self.channels.insert(name.into(), samples);
        self
    }

    /// Samples of a channel, if the stream recorded it.
    pub fn channel(&self, name: &str) -> Option<&[SampleValue]> {
        self.channels.get(name).map(Vec::as_slice)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Shared sample count, or `None` if channels disagree.
    pub fn sample_count(&self) -> Option<usize> {
        let mut lengths = self.channels.values().map(Vec::len);
        let first = lengths.next().unwrap_or(0);
        lengths.all(|len| len == first).then_some(first)
    }
}
