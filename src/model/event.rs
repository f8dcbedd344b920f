//! Event: one row of the input relation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// Seconds on an arbitrary but shared clock (typically Unix time).
pub type Timestamp = i64;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { Self(s.to_owned()) }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self { Self(s) }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self { Self(n.to_string()) }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self { Self(n.to_string()) }
        }
    };
}

string_id! {
    /// Identifier of an event (post, reply, reaction...).
    EventId
}

string_id! {
    /// Identifier of the actor performing an event.
    ActorId
}

/// A single event in a causal tree.
///
/// `root` names the originating event of the tree; a root event has
/// `root == id`. `parent` is only consulted in hop mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub actor: ActorId,
    pub time: Timestamp,
    pub root: EventId,
    pub parent: Option<EventId>,
    /// Extra columns, copied through as bipartite edge attributes.
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Event {
    pub fn new(
        id: impl Into<EventId>,
        actor: impl Into<ActorId>,
        time: Timestamp,
        root: impl Into<EventId>,
    ) -> Self {
        Self {
            id: id.into(),
            actor: actor.into(),
            time,
            root: root.into(),
            parent: None,
            properties: PropertyMap::new(),
        }
    }

    /// Same as [`Event::new`] with the time taken from a UTC datetime
    /// (truncated to whole seconds).
    pub fn at(
        id: impl Into<EventId>,
        actor: impl Into<ActorId>,
        time: DateTime<Utc>,
        root: impl Into<EventId>,
    ) -> Self {
        Self::new(id, actor, time.timestamp(), root)
    }

    pub fn with_parent(mut self, parent: impl Into<EventId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// True if this event is the root of its own tree.
    pub fn is_root(&self) -> bool {
        self.id == self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
