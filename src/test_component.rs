//! A component exercising every endpoint kind, used by the demo binary and
//! the test suite. Its `main` mirrors each input onto the matching output;
//! message-semantics inputs only propagate when they were updated this
//! tick.

use crate::component::{Component, ComponentMeta, Direction};
use crate::endpoints::{
    array, bng, button, slider, text, text_message, toggle, Bang, Endpoint, Occasional,
    Persistent,
};
use crate::runtime::Context;

pub struct TestComponentInputs {
    pub button_in: Occasional<i32>,
    pub toggle_in: Persistent<i32>,
    pub slider_in: Persistent<f32>,
    pub bang_in: Bang,
    pub text_in: Persistent<String>,
    pub text_msg_in: Occasional<String>,
    pub array_in: Persistent<[f32; 3]>,
}

pub struct TestComponentOutputs {
    pub button_out: Occasional<i32>,
    pub toggle_out: Persistent<i32>,
    pub slider_out: Persistent<f32>,
    pub bang_out: Bang,
    pub text_out: Persistent<String>,
    pub text_msg_out: Occasional<String>,
    pub array_out: Persistent<[f32; 3]>,
}

pub struct TestComponent {
    meta: ComponentMeta,
    pub inputs: TestComponentInputs,
    pub outputs: TestComponentOutputs,
}

impl TestComponent {
    pub fn new() -> Self {
        Self {
            meta: ComponentMeta::named("Test Component 1"),
            inputs: TestComponentInputs {
                button_in: button("button in"),
                toggle_in: toggle("toggle in"),
                slider_in: slider("slider in"),
                bang_in: bng("bang in"),
                text_in: text("text in"),
                text_msg_in: text_message("text message in"),
                array_in: array("array in"),
            },
            outputs: TestComponentOutputs {
                button_out: button("button out"),
                toggle_out: toggle("toggle out"),
                slider_out: slider("slider out"),
                bang_out: bng("bang out"),
                text_out: text("text out"),
                text_msg_out: text_message("text message out"),
                array_out: array("array out"),
            },
        }
    }
}

impl Default for TestComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TestComponent {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn visit_endpoints(&mut self, visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {
        visit(Direction::Input, &mut self.inputs.button_in);
        visit(Direction::Input, &mut self.inputs.toggle_in);
        visit(Direction::Input, &mut self.inputs.slider_in);
        visit(Direction::Input, &mut self.inputs.bang_in);
        visit(Direction::Input, &mut self.inputs.text_in);
        visit(Direction::Input, &mut self.inputs.text_msg_in);
        visit(Direction::Input, &mut self.inputs.array_in);
        visit(Direction::Output, &mut self.outputs.button_out);
        visit(Direction::Output, &mut self.outputs.toggle_out);
        visit(Direction::Output, &mut self.outputs.slider_out);
        visit(Direction::Output, &mut self.outputs.bang_out);
        visit(Direction::Output, &mut self.outputs.text_out);
        visit(Direction::Output, &mut self.outputs.text_msg_out);
        visit(Direction::Output, &mut self.outputs.array_out);
    }

    fn main(&mut self, _cx: &mut Context<'_>) {
        if self.inputs.button_in.updated() {
            self.outputs.button_out.set(*self.inputs.button_in.get());
        }
        self.outputs.toggle_out.set(*self.inputs.toggle_in.get());
        self.outputs.slider_out.set(*self.inputs.slider_in.get());
        if self.inputs.bang_in.fired() {
            self.outputs.bang_out.fire();
        }
        self.outputs.text_out.set(self.inputs.text_in.get().clone());
        if self.inputs.text_msg_in.updated() {
            self.outputs.text_msg_out.set(self.inputs.text_msg_in.get().clone());
        }
        self.outputs.array_out.set(*self.inputs.array_in.get());
    }
}
