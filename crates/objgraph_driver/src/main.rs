//! The `objgraph` demo executable.

use std::process::ExitCode;

use clap::Parser;
use objgraph_driver::Arguments;

fn main() -> ExitCode { objgraph_driver::run(Arguments::parse()) }
