use std::{io::Write, path::PathBuf};

use clap::Parser;
use objgraph::{Graph, Session, TypeRegistry};
use objgraph_serialize::text::de::TextDeserializer;

use crate::{demo, execute, Arguments};

const CREATED_COMPACT: &str = "Chain { Chain { Chain { # 1 3 } 2 } 1 }\n";

fn compact(file: PathBuf) -> Arguments {
    Arguments { file, compact: true, indent: 2, verbose: false }
}

fn run_to_string(arguments: &Arguments) -> String {
    let registry = TypeRegistry::with_registered().unwrap();
    let mut output = Vec::new();

    execute(arguments, &registry, &mut output).unwrap();

    String::from_utf8(output).unwrap()
}

#[test]
fn demo_types_are_registered() {
    let registry = TypeRegistry::with_registered().unwrap();

    assert!(registry.contains("Beacon"));
    assert!(registry.contains("Chain"));
}

#[test]
fn read_then_create() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(include_bytes!("../../../inputs/factory.dat")).unwrap();

    let before = demo::awakened();
    let output = run_to_string(&compact(file.path().to_path_buf()));

    assert_eq!(
        output,
        format!(
            "Reading data:\nWriting read data:\nChain {{ Chain {{ Beacon {{ }} \
             2 }} 1 }}\nCreating data:\nWriting created data:\n\
             {CREATED_COMPACT}"
        )
    );
    assert_eq!(demo::awakened() - before, 1);
}

#[test]
fn beacon_wakes_once_per_object() {
    let registry = TypeRegistry::with_registered().unwrap();
    let mut session = Session::new(&registry);
    let mut graph = Graph::new();
    let mut deserializer =
        TextDeserializer::new("Beacon { } # 1 (null)".as_bytes());

    let before = demo::awakened();
    let first = session.read_object(&mut graph, &mut deserializer).unwrap();
    let again = session.read_object(&mut graph, &mut deserializer).unwrap();
    let none = session.read_object(&mut graph, &mut deserializer).unwrap();

    assert_eq!(first, again);
    assert_eq!(none, None);
    assert_eq!(demo::awakened() - before, 1);
}

#[test]
fn missing_file_skips_reading() {
    let directory = tempfile::tempdir().unwrap();

    let output =
        run_to_string(&compact(directory.path().join("missing.dat")));

    assert_eq!(
        output,
        format!(
            "Reading data:\nCreating data:\nWriting created data:\n\
             {CREATED_COMPACT}"
        )
    );
}

#[test]
fn malformed_file_skips_reading() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Ghost {{ }}").unwrap();

    let output = run_to_string(&compact(file.path().to_path_buf()));

    assert!(output.starts_with("Reading data:\nCreating data:\n"));
    assert!(output.ends_with(CREATED_COMPACT));
}

#[test]
fn pretty_layout() {
    let directory = tempfile::tempdir().unwrap();
    let arguments = Arguments {
        file: directory.path().join("missing.dat"),
        compact: false,
        indent: 4,
        verbose: false,
    };

    let output = run_to_string(&arguments);

    assert!(output.ends_with(
        "Writing created data:
Chain {
    Chain {
        Chain {
            # 1
            3
        }
        2
    }
    1
}
"
    ));
}

#[test]
fn argument_defaults() {
    let arguments = Arguments::try_parse_from(["objgraph"]).unwrap();

    assert_eq!(arguments.file, PathBuf::from("factory.dat"));
    assert!(!arguments.compact);
    assert!(!arguments.verbose);
    assert_eq!(arguments.style(), objgraph::Style::Pretty { indent: 2 });
}

#[test]
fn argument_overrides() {
    let arguments = Arguments::try_parse_from([
        "objgraph",
        "--compact",
        "--indent",
        "4",
        "-v",
        "graph.dat",
    ])
    .unwrap();

    assert_eq!(arguments.file, PathBuf::from("graph.dat"));
    assert_eq!(arguments.indent, 4);
    assert!(arguments.verbose);
    assert_eq!(arguments.style(), objgraph::Style::Compact);
}
