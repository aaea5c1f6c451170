//! Demo instrument — main entry point.
//!
//! Assembles the standard bindings around the kitchen-sink test component
//! and runs the tick loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Session Storage ─ restores tagged endpoints at init  │
//! │ Test Component 1 ─ mirrors inputs onto outputs       │
//! │ OSC ─ UDP in/out on the configured ports             │
//! │ Output Logger ─ prints changed outputs to stdout     │
//! │ CLI ─ /help /list /describe /set over stdin          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The session file path is the first argument (default `session.json`).
//! Try `/set /OSC/destination_address 127.0.0.1` and
//! `/set /OSC/destination_port 9000` to start publishing outputs.

use std::time::Duration;

use anyhow::Result;
use log::info;

use sygaldry::assembly::Assembly;
use sygaldry::cli::{Cli, StdinReader, StdoutConsole};
use sygaldry::osc::OscBinding;
use sygaldry::output_logger::OutputLogger;
use sygaldry::runtime::Runtime;
use sygaldry::session::{FileSessionStore, SessionStorage};
use sygaldry::test_component::TestComponent;

fn main() -> Result<()> {
    env_logger::init();

    let session_path =
        std::env::args().nth(1).unwrap_or_else(|| "session.json".to_string());
    info!("session file: {session_path}");

    let tree = Assembly::builder("demo")
        .component(SessionStorage::new(FileSessionStore::new(session_path)))
        .component(TestComponent::new())
        .component(OscBinding::new())
        .component(OutputLogger::new(StdoutConsole))
        .component(Cli::new(StdinReader::spawn(), StdoutConsole))
        .build()?;

    let mut runtime = Runtime::new(tree);
    runtime.run(Duration::from_millis(10))
}
