//! Event-sourcing building blocks shared by aggregates: the envelope every
//! event travels in, the [`Aggregate`] contract and history replay, and the
//! [`Environment`] that hands out identifiers and timestamps.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::*;

/// Position of an event in its aggregate's history, starting at 1.
pub type Version = u32;

/// Opaque aggregate identifier, a canonical UUID string by default.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(String);

impl AggregateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata common to every event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<E> {
    pub aggregate_id: AggregateId,
    pub version: Version,
    pub at: DateTime<Utc>,
    pub payload: E,
}

/// State rebuilt purely from its events.
///
/// `Default` is the empty aggregate that the first event is applied to.
pub trait Aggregate: Default {
    type Event;

    fn aggregate_id(&self) -> Option<&AggregateId>;

    fn version(&self) -> Version;

    /// Mutate state with an already validated event. Must not fail.
    fn apply(&mut self, event: &Envelope<Self::Event>);
}

/// Rebuilds an aggregate from its history.
///
/// Versions must start at 1 and grow by exactly one, and every envelope must
/// name the same aggregate.
pub fn replay<'a, A>(events: impl IntoIterator<Item = &'a Envelope<A::Event>>) -> Result<A>
where
    A: Aggregate,
    A::Event: 'a,
{
    let mut aggregate = A::default();
    let mut owner: Option<&AggregateId> = None;
    let mut expected: Version = 1;

    for event in events {
        if event.version != expected {
            return Err(GameError::OutOfSequence {
                expected,
                found: event.version,
            });
        }
        match owner {
            Some(id) if *id != event.aggregate_id => {
                return Err(GameError::ForeignEvent {
                    expected: id.clone(),
                    found: event.aggregate_id.clone(),
                });
            }
            Some(_) => {}
            None => owner = Some(&event.aggregate_id),
        }

        aggregate.apply(event);
        expected += 1;
    }

    if owner.is_none() {
        return Err(GameError::EmptyHistory);
    }
    Ok(aggregate)
}

/// Source of identifiers and time for new events.
pub trait Environment {
    /// A fresh, globally unique aggregate identifier.
    fn new_id(&self) -> Result<AggregateId>;

    fn now(&self) -> DateTime<Utc>;
}

/// Random UUIDs and the system clock.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn new_id(&self) -> Result<AggregateId> {
        Ok(AggregateId(Uuid::new_v4().hyphenated().to_string()))
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always the same identifier and instant, for reproducible histories.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedEnvironment {
    pub id: AggregateId,
    pub at: DateTime<Utc>,
}

impl FixedEnvironment {
    pub fn new(id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: AggregateId::new(id),
            at,
        }
    }
}

impl Environment for FixedEnvironment {
    fn new_id(&self) -> Result<AggregateId> {
        Ok(self.id.clone())
    }

    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
