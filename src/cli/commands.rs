//! The CLI command table: `/help`, `/list`, `/describe`, `/set`.
//!
//! Each command is a plain function over the console and the tick-scoped
//! peer view; the table of [`CommandSpec`]s drives both dispatch (the first
//! input token is pattern-matched against each name) and `/help` output.
//! Commands return `0` on success and `2` on usage, parse, or dispatch
//! errors, printing a diagnostic to the console in the error cases.

use crate::assembly::Node;
use crate::cli::console::Console;
use crate::endpoints::{Endpoint, EndpointKind, Tags, Value, ValueClass};
use crate::osc::pattern::osc_match_pattern;
use crate::runtime::Context;

/// Static command metadata, printed by `/help`.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        name: "/help",
        usage: "",
        description: "Describe the available commands and their usage",
    },
    CommandSpec {
        name: "/list",
        usage: "",
        description: "List the components available to interact with through the CLI",
    },
    CommandSpec {
        name: "/describe",
        usage: "<osc-address-pattern>",
        description: "Convey metadata about entities that match the given address pattern",
    },
    CommandSpec {
        name: "/set",
        usage: "<endpoint-path> [value] [value] [...]",
        description: "Change the current value of the given endpoint",
    },
];

// ── /help ────────────────────────────────────────────────────

pub fn help(console: &mut dyn Console) -> i32 {
    for command in &COMMANDS {
        if command.usage.is_empty() {
            console.println(command.name);
        } else {
            console.println(&format!("{} {}", command.name, command.usage));
        }
        console.println(&format!("    {}", command.description));
    }
    0
}

// ── /list ────────────────────────────────────────────────────

pub fn list(console: &mut dyn Console, cx: &mut Context<'_>) -> i32 {
    cx.for_each_component(|path, _| console.println(path));
    0
}

// ── /describe ────────────────────────────────────────────────

pub fn describe(args: &[&str], console: &mut dyn Console, cx: &mut Context<'_>) -> i32 {
    let Some(pattern) = args.get(1) else {
        console.println("usage: /describe <osc-address-pattern>");
        return 2;
    };

    let mut matched_any = false;
    // The node list arrives in declaration order, so a matched component is
    // immediately followed by its endpoints; those print nested under it.
    let mut inside_matched_component = false;
    cx.for_each_node(|node| match node {
        Node::Assembly { .. } | Node::InputsContainer { .. } | Node::OutputsContainer { .. } => {}
        Node::Component { path, component } => {
            inside_matched_component = osc_match_pattern(pattern, path);
            if inside_matched_component {
                matched_any = true;
                console.println(&format!("entity: {path}"));
                console.println(&format!("  name: \"{}\"", component.meta().name));
                console.println("  type:  component");
            }
        }
        Node::InputEndpoint { path, endpoint } => {
            if inside_matched_component {
                describe_endpoint(console, "  ", "input:   ", path, endpoint);
            } else if osc_match_pattern(pattern, path) {
                matched_any = true;
                describe_endpoint(console, "", "entity: ", path, endpoint);
            }
        }
        Node::OutputEndpoint { path, endpoint } => {
            if inside_matched_component {
                describe_endpoint(console, "  ", "output:  ", path, endpoint);
            } else if osc_match_pattern(pattern, path) {
                matched_any = true;
                describe_endpoint(console, "", "entity: ", path, endpoint);
            }
        }
    });

    if matched_any {
        0
    } else {
        console.println(&format!("No entities match {pattern}"));
        2
    }
}

fn describe_endpoint(
    console: &mut dyn Console,
    indent: &str,
    preface: &str,
    path: &str,
    endpoint: &dyn Endpoint,
) {
    console.println(&format!("{indent}{preface}{path}"));
    console.println(&format!("{indent}  name: \"{}\"", endpoint.meta().name));
    console.println(&format!("{indent}  type:  {}", endpoint.kind().label()));
    if let Some(range) = endpoint.meta().range {
        console.println(&format!(
            "{indent}  range: {} to {} (init: {})",
            range.min, range.max, range.init
        ));
    }
    console.println(&format!("{indent}  value: {}", value_display(endpoint)));
}

/// The value cell of a describe line: flagged kinds wrap in `(! … !)` /
/// `(…)`, persistent text is quoted, write-only endpoints are masked.
fn value_display(endpoint: &dyn Endpoint) -> String {
    if endpoint.meta().tags.contains(Tags::WRITE_ONLY) {
        return "WRITE ONLY".to_string();
    }
    match endpoint.kind() {
        EndpointKind::Bang => {
            if endpoint.flag_state() {
                "(! bang !)".to_string()
            } else {
                "()".to_string()
            }
        }
        EndpointKind::Occasional(_) | EndpointKind::OccasionalArray(_, _) => {
            let value = endpoint.value().map(|v| v.to_string()).unwrap_or_default();
            if endpoint.flag_state() {
                format!("(! {value} !)")
            } else {
                format!("({value})")
            }
        }
        EndpointKind::Persistent(ValueClass::Text) => {
            let value = endpoint.value().map(|v| v.to_string()).unwrap_or_default();
            format!("\"{value}\"")
        }
        EndpointKind::Persistent(_) | EndpointKind::PersistentArray(_, _) => {
            endpoint.value().map(|v| v.to_string()).unwrap_or_default()
        }
    }
}

// ── /set ─────────────────────────────────────────────────────

pub fn set(args: &[&str], console: &mut dyn Console, cx: &mut Context<'_>) -> i32 {
    let Some(path) = args.get(1) else {
        console.println("usage: /set <endpoint-path> [value] [value] [...]");
        return 2;
    };
    let tokens = &args[2..];
    match cx.with_endpoint_at(path, |endpoint| set_endpoint(console, endpoint, tokens)) {
        Some(code) => code,
        None => {
            console.println(&format!("No endpoint found at path {path}"));
            2
        }
    }
}

fn set_endpoint(console: &mut dyn Console, endpoint: &mut dyn Endpoint, tokens: &[&str]) -> i32 {
    let kind = endpoint.kind();
    match kind {
        EndpointKind::Bang => {
            if !tokens.is_empty() {
                console.println("No arguments are expected when setting a bang.");
                return 2;
            }
            endpoint.set_flag();
            0
        }
        EndpointKind::Persistent(class) | EndpointKind::Occasional(class) => {
            let Some(&token) = tokens.first() else {
                console.println("Not enough arguments to set this endpoint.");
                return 2;
            };
            let Some(value) = parse_scalar(class, token) else {
                console.println(&format!("Unable to parse token '{token}'"));
                return 2;
            };
            write_value(console, endpoint, &value)
        }
        EndpointKind::PersistentArray(class, n) | EndpointKind::OccasionalArray(class, n) => {
            if tokens.len() < n {
                console.println("Not enough arguments to set this endpoint.");
                return 2;
            }
            let Some(value) = parse_array(class, &tokens[..n], console) else {
                return 2;
            };
            write_value(console, endpoint, &value)
        }
    }
}

fn parse_scalar(class: ValueClass, token: &str) -> Option<Value> {
    match class {
        ValueClass::Int => token.parse::<i32>().ok().map(Value::Int),
        ValueClass::Float => token.parse::<f32>().ok().map(Value::Float),
        ValueClass::Text => Some(Value::Text(token.to_string())),
    }
}

fn parse_array(class: ValueClass, tokens: &[&str], console: &mut dyn Console) -> Option<Value> {
    match class {
        ValueClass::Int => {
            let mut xs = Vec::with_capacity(tokens.len());
            for token in tokens {
                let Ok(x) = token.parse::<i32>() else {
                    console.println(&format!("Unable to parse token '{token}'"));
                    return None;
                };
                xs.push(x);
            }
            Some(Value::IntArray(xs))
        }
        ValueClass::Float => {
            let mut xs = Vec::with_capacity(tokens.len());
            for token in tokens {
                let Ok(x) = token.parse::<f32>() else {
                    console.println(&format!("Unable to parse token '{token}'"));
                    return None;
                };
                xs.push(x);
            }
            Some(Value::FloatArray(xs))
        }
        ValueClass::Text => {
            Some(Value::TextArray(tokens.iter().map(|t| (*t).to_string()).collect()))
        }
    }
}

fn write_value(console: &mut dyn Console, endpoint: &mut dyn Endpoint, value: &Value) -> i32 {
    match endpoint.set_value(value) {
        Ok(()) => 0,
        Err(e) => {
            console.println(&format!("{e}"));
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{bng, button, text, text_message};

    #[test]
    fn value_cells_follow_the_describe_grammar() {
        let mut b = button("b");
        assert_eq!(value_display(&b), "(0)");
        b.set(1);
        assert_eq!(value_display(&b), "(! 1 !)");

        let mut bang = bng("pulse");
        assert_eq!(value_display(&bang), "()");
        bang.fire();
        assert_eq!(value_display(&bang), "(! bang !)");

        let mut t = text("t");
        assert_eq!(value_display(&t), "\"\"");
        t.set("hello".to_string());
        assert_eq!(value_display(&t), "\"hello\"");

        let mut msg = text_message("m");
        assert_eq!(value_display(&msg), "()");
        msg.set("hi".to_string());
        assert_eq!(value_display(&msg), "(! hi !)");
    }

    #[test]
    fn write_only_endpoints_are_masked() {
        let mut secret = text("password").tag(Tags::WRITE_ONLY);
        secret.set("hunter2".to_string());
        assert_eq!(value_display(&secret), "WRITE ONLY");
    }

    #[test]
    fn scalar_parsing_by_class() {
        assert_eq!(parse_scalar(ValueClass::Int, "7"), Some(Value::Int(7)));
        assert_eq!(parse_scalar(ValueClass::Int, "7.5"), None);
        assert_eq!(parse_scalar(ValueClass::Float, "0.31459"), Some(Value::Float(0.31459)));
        assert_eq!(parse_scalar(ValueClass::Text, "pie"), Some(Value::Text("pie".into())));
    }
}
