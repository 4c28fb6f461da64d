//! End-to-end runs.
//!
//! This module combines the [`crate::entity`] and [`crate::output`] mods into a single workflow: read JSON messages,
//! render each as HTML, and write the results. It's useful for building functionality like the CLI's, but running it
//! within-process.
//!
//! ## Example
//!
//! ```
//! # use tghtml::run;
//!
//! // First, let's define a mocked I/O. Replace this with whatever you need.
//! #[derive(Default)]
//! struct MockIo {
//!     stdout: Vec<u8>,
//! }
//!
//! impl run::OsFacade for MockIo {
//!     fn read_stdin(&self) -> std::io::Result<String> {
//!         Ok(r#"{"message": "hello world", "entities": [{"type": "italic", "offset": 6, "length": 5}]}"#.to_string())
//!     }
//!
//!     fn read_file(&self, path: &str) -> std::io::Result<String> {
//!         Err(std::io::Error::new(std::io::ErrorKind::NotFound, path))
//!     }
//!
//!     fn stdout(&mut self) -> impl std::io::Write {
//!         &mut self.stdout
//!     }
//!
//!     fn write_error(&mut self, err: run::Error) {
//!         eprintln!("{err}")
//!     }
//! }
//!
//! // Now, use it:
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = run::RunOptions::default();
//! let mut os_facade = MockIo::default();
//! let all_converted = run::run(&options, &mut os_facade);
//! let stdout_text = String::from_utf8(os_facade.stdout)?;
//!
//! assert_eq!(all_converted, true);
//! assert_eq!(stdout_text, "<p>hello <i>world</i></p>\n");
//! #
//! #     Ok(())
//! # }
//! ```
mod cli;
mod run_main;

pub use cli::*;
pub use run_main::*;
