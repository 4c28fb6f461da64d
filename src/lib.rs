//! Renders chat messages, with their formatting entities, as HTML.
//!
//! A message is plain text plus a list of [entities](entity::Entity): spans like "bold from offset 3 for 4 code
//! units". This crate turns that into a single, correctly nested HTML string:
//!
//! ```
//! use tghtml::entity::{Entity, EntityKind};
//!
//! let html = tghtml::convert(
//!     "bold and code\nline two",
//!     &[
//!         Entity::new(EntityKind::Bold, 0, 4),
//!         Entity::new(EntityKind::Code, 9, 13),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(html, "<p><b>bold</b> and <pre>code<br/>line two</pre></p>");
//! ```
//!
//! Newlines outside of code start a new paragraph; newlines within code become `<br/>`. A message with no entities and
//! no newlines is returned as-is.
//!
//! The main modules are:
//!
//! - [`entity`]: the input model, including JSON deserialization
//! - [`output`]: rendering to HTML
//! - [`run`]: an end-to-end workflow, as used by the CLI
pub mod entity;
pub mod output;
pub mod run;
mod util;

pub use output::{convert, convert_with_options, ConvertError, ConvertOptions};
