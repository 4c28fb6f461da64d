use crate::entity::Entity;
use crate::output::tags::{self, Tag};
use crate::output::utf16::Utf16Text;
use crate::output::{ConvertError, ConvertOptions};
use std::collections::{BTreeMap, VecDeque};

/// Everything that happens at one code-unit offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PositionEvent {
    /// Tags to open, in the order their entities were declared (so outer tags open first).
    pub(crate) to_open: Vec<Tag>,
    /// Tags to close, innermost first.
    pub(crate) to_close: VecDeque<Tag>,
    /// Whether a newline starts here.
    pub(crate) is_break: bool,
}

/// A sparse, ordered map from code-unit offset to the [PositionEvent] there.
///
/// It always has entries for offset 0 and for the end of the text, plus one for every entity boundary and every
/// newline. Between consecutive entries, the text is just text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PositionMap {
    events: BTreeMap<usize, PositionEvent>,
}

impl PositionMap {
    pub(crate) fn build(
        text: &Utf16Text,
        entities: &[Entity],
        options: &ConvertOptions,
    ) -> Result<Self, ConvertError> {
        let mut positions = Self {
            events: BTreeMap::new(),
        };
        positions.at(0);
        positions.at(text.len());

        for entity in entities {
            let (start, end) = (entity.offset, entity.end());
            if end > text.len() {
                return Err(ConvertError::EntityOutOfBounds {
                    start,
                    end,
                    text_len: text.len(),
                });
            }
            positions.at(start);
            positions.at(end);
            let Some(tag) = tags::resolve(entity, options, || text.decode(start..end))? else {
                continue;
            };
            if start == end {
                // The close would be processed before the open at this same offset; an empty span has nothing to
                // style anyway.
                continue;
            }
            positions.at(start).to_open.push(tag.clone());
            positions.at(end).to_close.push_front(tag);
        }

        for offset in text.newline_offsets() {
            positions.at(offset).is_break = true;
        }
        Ok(positions)
    }

    fn at(&mut self, offset: usize) -> &mut PositionEvent {
        self.events.entry(offset).or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    /// Iterates over `(offset, event, next_offset)`, where `next_offset` is `None` for the last entry.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &PositionEvent, Option<usize>)> {
        let mut iter = self.events.iter().peekable();
        std::iter::from_fn(move || {
            let (&offset, event) = iter.next()?;
            let next_offset = iter.peek().map(|(&next, _)| next);
            Some((offset, event, next_offset))
        })
    }
}
