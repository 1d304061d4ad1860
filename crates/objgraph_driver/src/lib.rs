//! Contains the main `run()` function of the `objgraph` demo.
//!
//! The demo reads an object graph from a file, writes it back to the
//! standard output, then builds a small cyclic graph of its own and writes
//! that too.

use std::{
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};

use objgraph::{Graph, ObjectID, Session, Style, TypeRegistry};
use objgraph_serialize::text::{de::TextDeserializer, ser::TextSerializer};

pub mod demo;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "objgraph",
    about = "Reads, writes and round-trips persisted object graphs",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The file to read the first object graph from.
    #[clap(default_value = "factory.dat")]
    pub file: PathBuf,

    /// Writes every object graph on a single line.
    #[clap(short, long)]
    pub compact: bool,

    /// The number of spaces per nesting level of the pretty layout.
    #[clap(short, long, default_value_t = 2)]
    pub indent: usize,

    /// Logs every registration, handle assignment and object read.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Returns the layout selected by the arguments.
    #[must_use]
    pub const fn style(&self) -> Style {
        if self.compact {
            Style::Compact
        } else {
            Style::Pretty { indent: self.indent }
        }
    }
}

/// Every failure that aborts the demo.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to write to the output: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Graph(#[from] objgraph::Error),
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(arguments: Arguments) -> ExitCode {
    let filter = if arguments.verbose { "debug" } else { "info" };

    // a logger installed by an embedding program takes precedence
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter),
    )
    .try_init();

    let registry = match TypeRegistry::with_registered() {
        Ok(registry) => registry,
        Err(error) => {
            log::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut output = stdout.lock();

    match execute(&arguments, &registry, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Performs the read phase followed by the write phase, writing every
/// produced graph to `output`.
///
/// A file that cannot be opened or parsed only skips the read phase.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn execute(
    arguments: &Arguments,
    registry: &TypeRegistry,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let style = arguments.style();
    let mut graph = Graph::new();
    let mut session = Session::new(registry);

    writeln!(output, "Reading data:")?;

    match File::open(&arguments.file) {
        Ok(file) => {
            let mut deserializer = TextDeserializer::new(BufReader::new(file));

            match session.read_object(&mut graph, &mut deserializer) {
                Ok(root) => {
                    writeln!(output, "Writing read data:")?;

                    session.reset();
                    write_graph(&mut session, &graph, root, style, output)?;
                }

                Err(error) => log::error!(
                    "{}:{}: {error}",
                    arguments.file.display(),
                    deserializer.line()
                ),
            }
        }

        Err(error) => {
            log::error!("{}: {error}", arguments.file.display());
        }
    }

    writeln!(output, "Creating data:")?;

    let root = demo::ring(&mut graph);

    writeln!(output, "Writing created data:")?;

    session.reset();
    write_graph(&mut session, &graph, Some(root), style, output)
}

fn write_graph(
    session: &mut Session<'_>,
    graph: &Graph,
    root: Option<ObjectID>,
    style: Style,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let mut serializer = TextSerializer::new(&mut *output, style);

    session.write_object(graph, &mut serializer, root)?;
    serializer.finish().map_err(objgraph::Error::from)?;

    Ok(())
}

#[cfg(test)]
mod test;
