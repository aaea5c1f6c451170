//! The lifecycle runtime.
//!
//! One tick runs the three steady-state phases over every component in
//! declaration order, with the update-flag discipline pinned down:
//!
//! ```text
//!   external_sources       main          external_destinations
//!  ┌────────────────┐   ┌─────────┐   ┌──────────────────────┐
//!  │ clear input    │   │ compute │   │ run subroutines,     │
//!  │ flags, then    │──▶│         │──▶│ then clear output    │
//!  │ run subroutines│   │         │   │ flags                │
//!  └────────────────┘   └─────────┘   └──────────────────────┘
//! ```
//!
//! A flag raised during `external_sources` or `main` is therefore visible to
//! every later caller in the same tick; input flags survive until the start
//! of the next tick, output flags until the end of the current one.
//!
//! `init` runs once: endpoint range defaults are applied across the whole
//! tree first, then each component's `init` subroutine runs in order — so a
//! component that restores persisted state overwrites the defaults, and
//! components after it observe the restored values.

use std::time::Duration;

use log::debug;

use crate::assembly::{
    count_of_type, first_of_type, visit_components_in, visit_endpoints_in, visit_nodes_in,
    Assembly, AssemblyNode, Node, Route,
};
use crate::component::{Component, Direction};
use crate::endpoints::Endpoint;
use crate::error::FindError;

// ───────────────────────────────────────────────────────────────
// Context — the tick-scoped peer view
// ───────────────────────────────────────────────────────────────

/// Borrowed view of every component in the tree *except* the one currently
/// executing, handed to each lifecycle subroutine.
///
/// This is how cross-component dependencies are expressed: a component asks
/// for a peer by type ([`Context::find`]), walks peer endpoints, or resolves
/// a path. The two halves of the split borrow make aliasing with the active
/// component impossible, and the view lives only for the duration of one
/// subroutine call — references are never stored.
pub struct Context<'a> {
    before: &'a mut [AssemblyNode],
    after: &'a mut [AssemblyNode],
}

impl Context<'_> {
    /// Visit every peer component in declaration order.
    pub fn for_each_component(&mut self, mut f: impl FnMut(&str, &mut dyn Component)) {
        visit_components_in(self.before, &mut f);
        visit_components_in(self.after, &mut f);
    }

    /// Visit every peer endpoint in declaration order.
    pub fn for_each_endpoint(&mut self, mut f: impl FnMut(&Route, &mut dyn Endpoint)) {
        visit_endpoints_in(self.before, None, &mut f);
        visit_endpoints_in(self.after, None, &mut f);
    }

    /// Visit every peer input endpoint in declaration order.
    pub fn for_each_input(&mut self, mut f: impl FnMut(&Route, &mut dyn Endpoint)) {
        visit_endpoints_in(self.before, Some(Direction::Input), &mut f);
        visit_endpoints_in(self.after, Some(Direction::Input), &mut f);
    }

    /// Visit every peer output endpoint in declaration order.
    pub fn for_each_output(&mut self, mut f: impl FnMut(&Route, &mut dyn Endpoint)) {
        visit_endpoints_in(self.before, Some(Direction::Output), &mut f);
        visit_endpoints_in(self.after, Some(Direction::Output), &mut f);
    }

    /// Visit the tagged node list of all peers.
    pub fn for_each_node(&mut self, mut f: impl FnMut(Node<'_>)) {
        visit_nodes_in(self.before, &mut f);
        visit_nodes_in(self.after, &mut f);
    }

    /// Mutable reference to the unique peer of type `T`.
    pub fn find<T: Component>(&mut self) -> Result<&mut T, FindError> {
        let type_name = core::any::type_name::<T>();
        match count_of_type::<T>(self.before) + count_of_type::<T>(self.after) {
            0 => Err(FindError::NotFound(type_name)),
            1 => {
                if let Some(found) = first_of_type::<T>(self.before) {
                    return Ok(found);
                }
                first_of_type::<T>(self.after).ok_or(FindError::NotFound(type_name))
            }
            _ => Err(FindError::Ambiguous(type_name)),
        }
    }

    /// Run `f` against the unique peer endpoint at `path`, if one exists.
    pub fn with_endpoint_at<R>(
        &mut self,
        path: &str,
        f: impl FnOnce(&mut dyn Endpoint) -> R,
    ) -> Option<R> {
        let mut f = Some(f);
        let mut out = None;
        let mut seek = |route: &Route, endpoint: &mut dyn Endpoint| {
            if out.is_none() && route.path == path {
                if let Some(f) = f.take() {
                    out = Some(f(endpoint));
                }
            }
        };
        visit_endpoints_in(self.before, None, &mut seek);
        visit_endpoints_in(self.after, None, &mut seek);
        out
    }
}

// ───────────────────────────────────────────────────────────────
// Runtime
// ───────────────────────────────────────────────────────────────

/// The lifecycle phases, in tick order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    ExternalSources,
    Main,
    ExternalDestinations,
}

/// Drives an [`Assembly`] through the component lifecycle.
///
/// The runtime owns the tree; it hands each subroutine a mutable borrow of
/// the peers for exactly one call. Execution is strictly single-threaded —
/// subroutines must poll and return quickly rather than block.
pub struct Runtime {
    tree: Assembly,
}

impl Runtime {
    pub fn new(tree: Assembly) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Assembly {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Assembly {
        &mut self.tree
    }

    pub fn into_tree(self) -> Assembly {
        self.tree
    }

    /// Apply endpoint range defaults across the whole tree, then run every
    /// component's `init` subroutine in declaration order. Call once,
    /// before the first [`tick`](Self::tick).
    pub fn init(&mut self) {
        self.tree.for_each_endpoint(|_, endpoint| endpoint.apply_range_init());
        debug!("runtime: initializing {} components", self.tree.len());
        run_phase(&mut self.tree, Phase::Init);
    }

    /// Run one full tick: `external_sources` → `main` →
    /// `external_destinations`, with flag clears at the prescribed points.
    pub fn tick(&mut self) {
        self.tree.for_each_input(|_, endpoint| endpoint.clear_flag());
        run_phase(&mut self.tree, Phase::ExternalSources);
        run_phase(&mut self.tree, Phase::Main);
        run_phase(&mut self.tree, Phase::ExternalDestinations);
        self.tree.for_each_output(|_, endpoint| endpoint.clear_flag());
    }

    /// Initialize, then tick forever with a fixed pause between ticks.
    pub fn run(&mut self, period: Duration) -> ! {
        self.init();
        loop {
            self.tick();
            std::thread::sleep(period);
        }
    }
}

fn run_phase(tree: &mut Assembly, phase: Phase) {
    let nodes = tree.nodes_mut();
    for i in 0..nodes.len() {
        let (before, rest) = nodes.split_at_mut(i);
        let Some((node, after)) = rest.split_first_mut() else { continue };
        let mut cx = Context { before, after };
        match phase {
            Phase::Init => node.component.init(&mut cx),
            Phase::ExternalSources => node.component.external_sources(&mut cx),
            Phase::Main => node.component.main(&mut cx),
            Phase::ExternalDestinations => node.component.external_destinations(&mut cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentMeta;
    use crate::endpoints::{bng, slider, toggle, Bang, Endpoint, Persistent};

    struct Source {
        meta: ComponentMeta,
        pub level: Persistent<f32>,
        pub edge: Bang,
    }

    impl Source {
        fn new() -> Self {
            Self {
                meta: ComponentMeta::named("Source"),
                level: slider("level").range(0.0, 1.0, 0.25),
                edge: bng("edge"),
            }
        }
    }

    impl Component for Source {
        fn meta(&self) -> &ComponentMeta {
            &self.meta
        }

        fn visit_endpoints(&mut self, visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {
            visit(Direction::Output, &mut self.level);
            visit(Direction::Output, &mut self.edge);
        }

        fn main(&mut self, _cx: &mut Context<'_>) {
            self.edge.fire();
        }
    }

    struct Sink {
        meta: ComponentMeta,
        pub seen_level: Persistent<f32>,
        pub seen_edge: Persistent<i32>,
    }

    impl Sink {
        fn new() -> Self {
            Self {
                meta: ComponentMeta::named("Sink"),
                seen_level: slider("seen level"),
                seen_edge: toggle("seen edge"),
            }
        }
    }

    impl Component for Sink {
        fn meta(&self) -> &ComponentMeta {
            &self.meta
        }

        fn visit_endpoints(&mut self, visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {
            visit(Direction::Output, &mut self.seen_level);
            visit(Direction::Output, &mut self.seen_edge);
        }

        fn main(&mut self, cx: &mut Context<'_>) {
            if let Ok(source) = cx.find::<Source>() {
                self.seen_level.set(*source.level.get());
                if source.edge.fired() {
                    self.seen_edge.set(1);
                }
            }
        }
    }

    fn rig() -> Runtime {
        let tree = Assembly::builder("rig")
            .component(Source::new())
            .component(Sink::new())
            .build()
            .unwrap();
        Runtime::new(tree)
    }

    #[test]
    fn init_applies_range_defaults_before_subroutines() {
        let mut runtime = rig();
        runtime.init();
        let source = runtime.tree_mut().find::<Source>().unwrap();
        assert_eq!(*source.level.get(), 0.25);
    }

    #[test]
    fn peer_data_flows_within_one_tick() {
        let mut runtime = rig();
        runtime.init();
        runtime.tick();
        let sink = runtime.tree_mut().find::<Sink>().unwrap();
        assert_eq!(*sink.seen_level.get(), 0.25, "Sink runs after Source in the same tick");
        assert_eq!(*sink.seen_edge.get(), 1, "flags raised in main are visible downstream");
    }

    #[test]
    fn output_flags_clear_at_end_of_tick() {
        let mut runtime = rig();
        runtime.init();
        runtime.tick();
        let source = runtime.tree_mut().find::<Source>().unwrap();
        assert!(!source.edge.fired(), "output flags are cleared after external_destinations");
    }

    #[test]
    fn context_excludes_the_active_component() {
        struct Selfish {
            meta: ComponentMeta,
            pub found_self: bool,
        }

        impl Component for Selfish {
            fn meta(&self) -> &ComponentMeta {
                &self.meta
            }

            fn main(&mut self, cx: &mut Context<'_>) {
                self.found_self = cx.find::<Selfish>().is_ok();
            }
        }

        let tree = Assembly::builder("rig")
            .component(Selfish { meta: ComponentMeta::named("Selfish"), found_self: true })
            .build()
            .unwrap();
        let mut runtime = Runtime::new(tree);
        runtime.tick();
        let selfish = runtime.tree_mut().find::<Selfish>().unwrap();
        assert!(!selfish.found_self);
    }
}
