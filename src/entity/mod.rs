//! The input model: a message's text and the formatting entities declared over it.
//!
//! Entity offsets and lengths are in UTF-16 code units, since that's how the chat protocol defines them. For example,
//! in `"🦀 rust"` the word `rust` starts at offset 3, not 2: the crab is a single `char`, but two code units.
//!
//! Both types deserialize from the JSON that chat clients commonly dump:
//!
//! ```
//! use tghtml::entity::{EntityKind, Message};
//!
//! let json = r#"{
//!     "message": "hello world",
//!     "entities": [{"_": "MessageEntityBold", "offset": 0, "length": 5}]
//! }"#;
//! let message: Message = serde_json::from_str(json).unwrap();
//! assert_eq!(message.entities()[0].kind, EntityKind::Bold);
//! ```
mod kind;

pub use kind::*;

use serde::{Deserialize, Deserializer};

/// A formatting span over a message's text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "EntityRepr")]
pub struct Entity {
    pub kind: EntityKind,
    /// Start, in UTF-16 code units.
    pub offset: usize,
    /// Length, in UTF-16 code units.
    pub length: usize,
    /// Kind-specific data. For [`EntityKind::TextUrl`], this is the link target.
    pub payload: Option<String>,
}

impl Entity {
    pub fn new(kind: impl Into<EntityKind>, offset: usize, length: usize) -> Self {
        Self {
            kind: kind.into(),
            offset,
            length,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// The exclusive end offset, in UTF-16 code units. Saturates rather than overflowing, so that absurd input still
    /// fails the bounds check instead of wrapping around.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

#[derive(Deserialize)]
struct EntityRepr {
    #[serde(rename = "_", alias = "type")]
    kind: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    url: Option<String>,
}

impl From<EntityRepr> for Entity {
    fn from(value: EntityRepr) -> Self {
        Self {
            kind: EntityKind::from_name(&value.kind),
            offset: value.offset,
            length: value.length,
            payload: value.url,
        }
    }
}

/// A message's text, along with its entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Message {
    #[serde(alias = "text")]
    pub message: String,
    /// A missing or `null` entities list is the same as an empty one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entities: Vec<Entity>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Entity>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Message {
    pub fn new(message: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            message: message.into(),
            entities,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
