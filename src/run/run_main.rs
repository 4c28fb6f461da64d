use crate::entity::Message;
use crate::output::{ConvertError, HtmlWriter};
use crate::run::cli::OutputFormat;
use crate::run::RunOptions;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::{env, io};

/// The run's overall possible error.
#[derive(Debug)]
pub enum Error {
    /// Couldn't read an input file.
    FileReadError(Input, io::Error),

    /// The input wasn't a message object or an array of them.
    MessageParse(Input, serde_json::Error),

    /// A message couldn't be converted.
    ///
    /// The `usize` is the message's index within its input; it's always 0 for inputs that hold a single message
    /// object.
    Convert(Input, usize, ConvertError),

    /// Couldn't write the output.
    WriteError(io::Error),
}

impl std::error::Error for Error {}

/// Stdin or an input file by path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    Stdin,
    FilePath(String),
}

impl Error {
    pub(crate) fn from_io_error(error: io::Error, file: Input) -> Self {
        Error::FileReadError(file, error)
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Stdin => f.write_str("stdin"),
            Input::FilePath(file) => write!(f, "file {file:?}"),
        }
    }
}

fn portable_errors() -> bool {
    !env::var("TGHTML_PORTABLE_ERRORS").unwrap_or_default().is_empty()
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::FileReadError(file, err) => {
                if portable_errors() {
                    writeln!(f, "{} while reading {file}", err.kind())
                } else {
                    writeln!(f, "{err} while reading {file}")
                }
            }
            Error::MessageParse(file, err) => {
                writeln!(f, "Message parse error in {file}:")?;
                writeln!(f, "{err}")
            }
            Error::Convert(file, index, err) => {
                writeln!(f, "Couldn't convert message {index} in {file}:")?;
                writeln!(f, "{err}")
            }
            Error::WriteError(err) => {
                if portable_errors() {
                    writeln!(f, "{} while writing output", err.kind())
                } else {
                    writeln!(f, "{err} while writing output")
                }
            }
        }
    }
}

/// A simple facade for handling I/O.
///
/// This trait lets you do "I/O-y stuff" like mocking out stdin or reading files. The [`run`] method uses it.
pub trait OsFacade {
    /// Read stdin (or your mock of it) to a `String`.
    fn read_stdin(&self) -> io::Result<String>;

    /// Read a file path (or your mock of one) to a `String`.
    fn read_file(&self, path: &str) -> io::Result<String>;

    /// Get a writer for stdout (or your mock of it).
    fn stdout(&mut self) -> impl Write;

    /// Handle an error.
    fn write_error(&mut self, err: Error);

    /// Read each of the given file paths, or stdin if there are none.
    ///
    /// The default implementation (which you should feel free to use) treats the file path `"-"` as stdin. The first
    /// `"-"` reads all of stdin (via [`Self::read_stdin`]), and subsequent `"-"`s get silently ignored.
    fn read_each(&self, input_file_paths: &[String]) -> Result<Vec<(Input, String)>, Error> {
        if input_file_paths.is_empty() {
            let contents = self.read_stdin().map_err(|err| Error::from_io_error(err, Input::Stdin))?;
            return Ok(vec![(Input::Stdin, contents)]);
        }
        let mut all_contents = Vec::with_capacity(input_file_paths.len());
        let mut have_read_stdin = false;
        for path in input_file_paths {
            if path == "-" {
                if !have_read_stdin {
                    let contents = self.read_stdin().map_err(|err| Error::from_io_error(err, Input::Stdin))?;
                    all_contents.push((Input::Stdin, contents));
                    have_read_stdin = true
                }
            } else {
                let input = Input::FilePath(path.to_string());
                let contents = self
                    .read_file(path)
                    .map_err(|err| Error::from_io_error(err, input.clone()))?;
                all_contents.push((input, contents));
            }
        }
        Ok(all_contents)
    }
}

/// Runs tghtml end to end.
///
/// This uses the provided [RunOptions] and [OsFacade] to read messages, renders each as HTML, and then writes them to
/// the given [`OsFacade`] in the format specified by [`RunOptions::output`]. Nothing is written unless every message
/// converts.
///
/// Returns whether every message converted.
pub fn run(cli: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(cli, os) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "run failed");
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(cli: &RunOptions, os: &mut impl OsFacade) -> Result<(), Error> {
    let writer = HtmlWriter::with_options(cli.into());
    let mut rendered = Vec::new();

    for (input, contents) in os.read_each(&cli.input_file_paths)? {
        let messages = parse_messages(&contents).map_err(|err| Error::MessageParse(input.clone(), err))?;
        tracing::debug!(%input, messages = messages.len(), "read messages");
        for (index, message) in messages.iter().enumerate() {
            let html = writer
                .render(&message.message, message.entities())
                .map_err(|err| Error::Convert(input.clone(), index, err))?;
            rendered.push(html);
        }
    }

    if cli.quiet {
        return Ok(());
    }
    let mut stdout = os.stdout();
    match cli.output {
        OutputFormat::Html => {
            for html in &rendered {
                writeln!(stdout, "{html}").map_err(Error::WriteError)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut stdout, &rendered).map_err(|err| Error::WriteError(err.into()))?;
        }
    }
    stdout.flush().map_err(Error::WriteError)
}

/// Parses either a single message object, or an array of them.
fn parse_messages(contents: &str) -> Result<Vec<Message>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if value.is_array() {
        return Vec::<Message>::deserialize(value);
    }
    Message::deserialize(value).map(|message| vec![message])
}
