//! Session-storage round trips: restore at init, fold back changes, write
//! only when something was touched.

use sygaldry::assembly::Assembly;
use sygaldry::component::{Component, ComponentMeta, Direction};
use sygaldry::endpoints::{array, slider, text, Endpoint, Persistent, Tags};
use sygaldry::runtime::Runtime;
use sygaldry::session::{MemoryStore, SessionStorage};

type Storage = SessionStorage<MemoryStore>;

/// A component with session-persisted preferences.
struct Prefs {
    meta: ComponentMeta,
    pub label: Persistent<String>,
    pub gain: Persistent<f32>,
    pub trim: Persistent<[f32; 3]>,
}

impl Prefs {
    fn new() -> Self {
        Self {
            meta: ComponentMeta::named("Prefs"),
            label: text("label").tag(Tags::SESSION_DATA),
            gain: slider("gain").range(0.0, 100.0, 0.0).tag(Tags::SESSION_DATA),
            trim: array("trim").tag(Tags::SESSION_DATA),
        }
    }
}

impl Component for Prefs {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn visit_endpoints(&mut self, visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {
        visit(Direction::Input, &mut self.label);
        visit(Direction::Input, &mut self.gain);
        visit(Direction::Input, &mut self.trim);
    }
}

fn rig(contents: &str) -> Runtime {
    let tree = Assembly::builder("test")
        .component(SessionStorage::new(MemoryStore::with_contents(contents)))
        .component(Prefs::new())
        .build()
        .unwrap();
    let mut runtime = Runtime::new(tree);
    runtime.init();
    runtime
}

#[test]
fn init_restores_tagged_endpoints_with_coercion() {
    let mut runtime = rig(
        "{\"/Prefs/label\":\"hello world\",\"/Prefs/gain\":42.0,\"/Prefs/trim\":[1,2,3]}",
    );
    let prefs = runtime.tree_mut().find::<Prefs>().unwrap();
    assert_eq!(prefs.label.get(), "hello world");
    assert_eq!(*prefs.gain.get(), 42.0);
    assert_eq!(*prefs.trim.get(), [1.0, 2.0, 3.0], "integer elements coerce to float");
}

#[test]
fn malformed_input_leaves_defaults() {
    let mut runtime = rig("this is not json");
    let prefs = runtime.tree_mut().find::<Prefs>().unwrap();
    assert_eq!(prefs.label.get(), "");
    assert_eq!(*prefs.gain.get(), 0.0);
}

#[test]
fn unmatched_keys_and_wrong_types_are_ignored() {
    let mut runtime = rig("{\"/Prefs/gain\":\"loud\",\"/Nobody/home\":1}");
    let prefs = runtime.tree_mut().find::<Prefs>().unwrap();
    assert_eq!(*prefs.gain.get(), 0.0, "string value cannot write a float endpoint");
}

#[test]
fn changes_serialise_and_round_trip_into_a_fresh_tree() {
    let mut runtime = rig("{}");
    {
        let prefs = runtime.tree_mut().find::<Prefs>().unwrap();
        prefs.label.set("concert A".to_string());
        prefs.gain.set(7.5);
        prefs.trim.set([0.1, 0.2, 0.3]);
    }
    runtime.tick();

    let stored = {
        let storage = runtime.tree_mut().find::<Storage>().unwrap();
        assert_eq!(storage.store_mut().writes, 1);
        storage.store_mut().contents.clone()
    };

    let mut fresh = rig(&stored);
    let prefs = fresh.tree_mut().find::<Prefs>().unwrap();
    assert_eq!(prefs.label.get(), "concert A");
    assert_eq!(*prefs.gain.get(), 7.5);
    assert_eq!(*prefs.trim.get(), [0.1, 0.2, 0.3]);
}

#[test]
fn unchanged_trees_cause_no_rewrites() {
    let mut runtime = rig("{}");
    runtime.tick();
    let writes = runtime.tree_mut().find::<Storage>().unwrap().store_mut().writes;
    assert_eq!(writes, 1, "first tick inserts the missing keys");

    runtime.tick();
    runtime.tick();
    let writes = runtime.tree_mut().find::<Storage>().unwrap().store_mut().writes;
    assert_eq!(writes, 1, "steady-state ticks must not rewrite the store");
}
