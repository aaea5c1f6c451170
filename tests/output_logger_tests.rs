//! Output-change logger behaviour: one line per change or fired flag,
//! silence in the steady state.

use sygaldry::assembly::Assembly;
use sygaldry::cli::{Cli, TestConsole, TestReader};
use sygaldry::output_logger::OutputLogger;
use sygaldry::runtime::Runtime;
use sygaldry::test_component::TestComponent;

type TestCli = Cli<TestReader, TestConsole>;
type Logger = OutputLogger<TestConsole>;

fn rig() -> Runtime {
    let tree = Assembly::builder("test")
        .component(TestComponent::new())
        .component(OutputLogger::new(TestConsole::new()))
        .component(Cli::new(TestReader::new(), TestConsole::new()))
        .build()
        .unwrap();
    let mut runtime = Runtime::new(tree);
    runtime.init();
    runtime
}

/// Type `input` into the CLI, tick, and return what the logger printed.
fn tick_with(runtime: &mut Runtime, input: &str) -> String {
    if !input.is_empty() {
        runtime.tree_mut().find::<TestCli>().unwrap().reader_mut().feed(input);
    }
    runtime.tick();
    runtime.tree_mut().find::<Logger>().unwrap().console_mut().take()
}

#[test]
fn toggling_an_input_logs_the_mirrored_output_once() {
    let mut runtime = rig();

    let logged = tick_with(&mut runtime, "/set /Test_Component_1/toggle_in 1\n");
    assert_eq!(logged, "/Test_Component_1/toggle_out 1\n");

    // No change: nothing printed.
    assert_eq!(tick_with(&mut runtime, ""), "");

    // Change back: printed again.
    let logged = tick_with(&mut runtime, "/set /Test_Component_1/toggle_in 0\n");
    assert_eq!(logged, "/Test_Component_1/toggle_out 0\n");
}

#[test]
fn occasional_outputs_log_path_and_value_when_flagged() {
    let mut runtime = rig();
    let logged = tick_with(&mut runtime, "/set /Test_Component_1/button_in 1\n");
    assert_eq!(logged, "/Test_Component_1/button_out 1\n");

    // The flag cleared at the end of the tick; a quiet tick logs nothing.
    assert_eq!(tick_with(&mut runtime, ""), "");

    // Same value set again still fires, message semantics.
    let logged = tick_with(&mut runtime, "/set /Test_Component_1/button_in 1\n");
    assert_eq!(logged, "/Test_Component_1/button_out 1\n");
}

#[test]
fn bangs_log_their_path_only() {
    let mut runtime = rig();
    let logged = tick_with(&mut runtime, "/set /Test_Component_1/bang_in\n");
    assert_eq!(logged, "/Test_Component_1/bang_out\n");
    assert_eq!(tick_with(&mut runtime, ""), "");
}

#[test]
fn array_changes_log_bracketed_values() {
    let mut runtime = rig();
    let logged = tick_with(&mut runtime, "/set /Test_Component_1/array_in 1 2 3\n");
    assert_eq!(logged, "/Test_Component_1/array_out [1 2 3]\n");
    assert_eq!(tick_with(&mut runtime, ""), "");
}
