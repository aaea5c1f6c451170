//! The output-change logger component.
//!
//! During `external_destinations`, prints one line per output endpoint that
//! has something to say: a fired bang prints its path, a flagged occasional
//! prints path and value, and a persistent output prints path and value
//! when the value differs from the one last printed. Quiet outputs print
//! nothing, so a steady-state tick is silent.

use std::collections::HashMap;

use crate::cli::console::Console;
use crate::component::{Component, ComponentMeta};
use crate::endpoints::{EndpointKind, Tags, Value};
use crate::runtime::Context;

pub struct OutputLogger<C: Console + 'static> {
    meta: ComponentMeta,
    console: C,
    /// Last printed value per persistent output path.
    last: HashMap<String, Value>,
}

impl<C: Console + 'static> OutputLogger<C> {
    pub fn new(console: C) -> Self {
        Self {
            meta: ComponentMeta::named("Output Logger")
                .describe("Print outputs that fired or changed this tick.")
                .version("0.1.0"),
            console,
            last: HashMap::new(),
        }
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}

impl<C: Console + 'static> Component for OutputLogger<C> {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn init(&mut self, cx: &mut Context<'_>) {
        // Baseline the change detector at the post-init values, so the
        // first tick only reports actual changes.
        let last = &mut self.last;
        cx.for_each_output(|route, endpoint| {
            if !endpoint.kind().flagged() {
                if let Some(value) = endpoint.value() {
                    last.insert(route.path.clone(), value);
                }
            }
        });
    }

    fn external_destinations(&mut self, cx: &mut Context<'_>) {
        let last = &mut self.last;
        let console = &mut self.console;
        cx.for_each_output(|route, endpoint| {
            if endpoint.meta().tags.contains(Tags::WRITE_ONLY) {
                return;
            }
            match endpoint.kind() {
                EndpointKind::Bang => {
                    if endpoint.flag_state() {
                        console.println(&route.path);
                    }
                }
                EndpointKind::Occasional(_) | EndpointKind::OccasionalArray(_, _) => {
                    if endpoint.flag_state() {
                        let value =
                            endpoint.value().map(|v| v.to_string()).unwrap_or_default();
                        console.println(&format!("{} {}", route.path, value));
                    }
                }
                EndpointKind::Persistent(_) | EndpointKind::PersistentArray(_, _) => {
                    let Some(value) = endpoint.value() else { return };
                    if last.get(route.path.as_str()) == Some(&value) {
                        return;
                    }
                    console.println(&format!("{} {}", route.path, value));
                    last.insert(route.path.clone(), value);
                }
            }
        });
    }
}
