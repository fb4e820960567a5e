//! Adapter outcomes and the accumulating validation combinator.
//!
//! An outcome is either a non-empty list of raw events or a non-empty list of
//! failures, never both. When several candidate events are built from one
//! payload, any failure fails the whole batch and every failure is reported.

use serde::Serialize;
use tracker_core::{AdapterFailure, RawEvent};

/// A vector that holds at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    pub fn one(head: T) -> Self {
        Self(vec![head])
    }

    /// Returns `None` for an empty vector.
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    pub fn first(&self) -> &T {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of running an adapter over one collector payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    Events(NonEmpty<RawEvent>),
    Failures(NonEmpty<AdapterFailure>),
}

impl AdapterOutcome {
    pub fn failure(failure: AdapterFailure) -> Self {
        Self::Failures(NonEmpty::one(failure))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Events(_))
    }

    pub fn events(&self) -> Option<&NonEmpty<RawEvent>> {
        match self {
            Self::Events(events) => Some(events),
            Self::Failures(_) => None,
        }
    }

    pub fn failures(&self) -> Option<&NonEmpty<AdapterFailure>> {
        match self {
            Self::Events(_) => None,
            Self::Failures(failures) => Some(failures),
        }
    }

    /// Human-readable failure reasons; empty for a successful outcome.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Events(_) => Vec::new(),
            Self::Failures(failures) => failures.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Serialize for AdapterOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Events(events) => map.serialize_entry("events", events)?,
            Self::Failures(_) => map.serialize_entry("failures", &self.messages())?,
        }
        map.end()
    }
}

/// Merge per-candidate results into a single outcome.
///
/// All successes yield the events in input order. Any failure yields the
/// concatenation of every failing candidate's errors in input order, and the
/// successes are dropped. An empty input is a failure.
pub fn accumulate<I>(candidates: I) -> AdapterOutcome
where
    I: IntoIterator<Item = Result<RawEvent, NonEmpty<AdapterFailure>>>,
{
    let mut events = Vec::new();
    let mut failures = Vec::new();

    for candidate in candidates {
        match candidate {
            Ok(event) => events.push(event),
            Err(errs) => failures.extend(errs),
        }
    }

    if let Some(failures) = NonEmpty::from_vec(failures) {
        return AdapterOutcome::Failures(failures);
    }
    match NonEmpty::from_vec(events) {
        Some(events) => AdapterOutcome::Events(events),
        None => AdapterOutcome::failure(AdapterFailure::NoEvents),
    }
}
