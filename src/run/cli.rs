use crate::output::ConvertOptions;
use clap::{Parser, ValueEnum};
use derive_builder::Builder;
use std::fmt::{Display, Formatter};

macro_rules! create_options_structs {
    (
        $(
            $(#[$meta:meta])*
            clap $clap:tt
            pub $name:ident : $ty:ty
        ),* $(,)?
    ) => {
        #[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Parser)]
        #[command(version, about, long_about = None)]
        #[doc(hidden)]
        pub struct CliOptions {
            $(
            $(#[$meta])*
            #[arg$clap]
            pub(crate) $name: $ty,
            )*

            // clap-only stuff:

            /// Turn every kind of link into an `<a href>`. This is the same as `--link-urls --text-links`.
            #[arg(long)]
            pub(crate) links: bool,

            /// An optional list of JSON files to read messages from, by path. If not provided, standard input will be
            /// used.
            ///
            /// Each file holds either a single message object or an array of them. A message object has its text
            /// under "message" (or "text"), and optionally an "entities" array. Each entity names its kind under "_"
            /// (like "MessageEntityBold") or "type" (like "bold"), and has an "offset" and "length" in UTF-16 code
            /// units.
            ///
            /// A path of "-" represents standard input. All but the first "-" paths are ignored.
            #[arg()]
            pub(crate) input_file_paths: Vec<String>,
        }

        /// Options analogous to the tghtml CLI's switches.
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
        pub struct RunOptions {
            $(
            $(#[$meta])*
            pub $name: $ty,
            )*

            pub input_file_paths: Vec<String>,
        }

        impl From<CliOptions> for RunOptions {
            fn from(value: CliOptions) -> Self {
                let mut options = Self {
                    $($name: value.$name,)*
                    input_file_paths: value.input_file_paths,
                };
                if value.links {
                    options.link_urls = true;
                    options.text_links = true;
                }
                options
            }
        }
    };
}

create_options_structs! {
    /// Render bare URL mentions as links to themselves.
    ///
    /// By default, URLs are rendered as plain text.
    clap(long)
    pub link_urls: bool,

    /// Render links that have an explicit target (text links) as links.
    ///
    /// By default, only their display text is rendered.
    clap(long)
    pub text_links: bool,

    /// Output format.
    clap(long, short, value_enum, default_value_t = OutputFormat::Html)
    pub output: OutputFormat,

    /// Quiet: do not print anything to stdout. The exit code will still be 0 if every message converts, and non-0 if
    /// any doesn't.
    clap(long, short)
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            link_urls: false,
            text_links: false,
            output: OutputFormat::Html,
            quiet: false,
            input_file_paths: vec![],
        }
    }
}

impl From<&RunOptions> for ConvertOptions {
    fn from(cli: &RunOptions) -> Self {
        ConvertOptions {
            link_urls: cli.link_urls,
            text_links: cli.text_links,
        }
    }
}

/// Output formats, analogous to `--output` in the CLI.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum OutputFormat {
    /// One rendered message per line.
    #[default]
    Html,

    /// A JSON array of rendered messages, as strings.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        };
        f.write_str(self_str)
    }
}
