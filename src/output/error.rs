use crate::output::Tag;
use std::fmt::{Display, Formatter};

/// Why a message couldn't be converted.
///
/// None of these are transient: converting the same input again will fail the same way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConvertError {
    /// A tag was due to close, but it wasn't the innermost open tag.
    ///
    /// This happens when two entities cross (each starts inside the other), or when entities that share a start
    /// offset are listed inner-first.
    StructuralMismatch {
        offset: usize,
        expected: Tag,
        /// The innermost open tag, if any tags were open at all.
        found: Option<Tag>,
    },

    /// An entity's kind isn't one we know how to render, and isn't one we know to ignore.
    UnknownEntityKind(String),

    /// Tags were still open after the last offset.
    UnclosedTags(Vec<Tag>),

    /// An entity reaches past the end of the message.
    EntityOutOfBounds { start: usize, end: usize, text_len: usize },

    /// An offset lands between the two halves of a surrogate pair.
    SplitSurrogate { start: usize, end: usize },
}

impl std::error::Error for ConvertError {}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::StructuralMismatch { offset, expected, found } => {
                write!(f, "at offset {offset}: can't close {:?}", expected.opening())?;
                match found {
                    Some(found) => write!(f, " while {:?} is still open", found.opening()),
                    None => f.write_str(" because no tags are open"),
                }
            }
            ConvertError::UnknownEntityKind(kind) => write!(f, "unknown entity kind {kind:?}"),
            ConvertError::UnclosedTags(tags) => {
                f.write_str("tags left open at end of message:")?;
                for tag in tags {
                    write!(f, " {:?}", tag.opening())?;
                }
                Ok(())
            }
            ConvertError::EntityOutOfBounds { start, end, text_len } => write!(
                f,
                "entity spanning [{start}, {end}) is outside the message's {text_len} UTF-16 code units"
            ),
            ConvertError::SplitSurrogate { start, end } => {
                write!(f, "range [{start}, {end}) splits a UTF-16 surrogate pair")
            }
        }
    }
}
