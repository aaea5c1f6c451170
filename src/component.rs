//! The component contract.
//!
//! A component is a named aggregate exposing input/output endpoints and any
//! of the four lifecycle subroutines. The trait is object-safe so the
//! reflection layer can hold a heterogeneous tree; endpoint discovery is by
//! visitation rather than field reflection, with the visit order defining
//! the component's declaration order.

use core::any::Any;

use crate::endpoints::Endpoint;
use crate::runtime::Context;

// ───────────────────────────────────────────────────────────────
// Any upcasting
// ───────────────────────────────────────────────────────────────

/// Upcast helper so `dyn Component` / `dyn Endpoint` can be downcast to
/// their concrete types without each implementor writing the boilerplate.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ───────────────────────────────────────────────────────────────
// Metadata
// ───────────────────────────────────────────────────────────────

/// Whether an endpoint belongs to a component's inputs or outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Documentation strings attached to a component. Only the name is
/// required; it doubles as the component's path segment (snake-spelled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: &'static str,
}

impl ComponentMeta {
    pub fn named(name: &'static str) -> Self {
        Self { name, description: "", author: "", version: "" }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn author(mut self, author: &'static str) -> Self {
        self.author = author;
        self
    }

    pub fn version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }
}

// ───────────────────────────────────────────────────────────────
// Component trait
// ───────────────────────────────────────────────────────────────

/// The component contract.
///
/// All lifecycle subroutines default to no-ops; a component implements the
/// ones it needs. Each receives a [`Context`] — a tick-scoped view of every
/// *other* component in the tree — through which cross-component data flows.
/// Lifecycle calls are infallible at the signature level: a component that
/// hits a recoverable error reports it through a conventional
/// `error message` text output and a `running` toggle, and the runtime
/// simply proceeds to the next component.
pub trait Component: AsAny {
    fn meta(&self) -> &ComponentMeta;

    /// Visit every endpoint in declaration order, inputs before outputs.
    /// The visit order is the component's authoritative endpoint order and
    /// must be stable across calls.
    fn visit_endpoints(&mut self, _visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {}

    /// Called once, after endpoint range defaults have been applied.
    fn init(&mut self, _cx: &mut Context<'_>) {}

    /// Pull phase: bindings ingest from the outside world.
    fn external_sources(&mut self, _cx: &mut Context<'_>) {}

    /// Compute phase.
    fn main(&mut self, _cx: &mut Context<'_>) {}

    /// Push phase: bindings emit to the outside world.
    fn external_destinations(&mut self, _cx: &mut Context<'_>) {}
}
