//! Rendering messages as HTML.
//!
//! Rendering happens in two steps. First, each entity is resolved to a [Tag] and indexed by the code-unit offsets
//! where it opens and closes, along with every newline; then a single pass over those offsets emits the markup,
//! keeping a stack of open tags so that each close can be checked against the innermost open tag.
mod error;
mod escape;
mod fmt_html;
mod positions;
pub(crate) mod tags;
mod utf16;

pub use error::*;
pub use fmt_html::*;
pub use tags::Tag;
