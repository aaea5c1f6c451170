//! Endpoint carriers and their metadata.
//!
//! An endpoint is a typed data port of a component. Three carriers cover the
//! semantics the runtime distinguishes:
//!
//! - [`Persistent<T>`] holds a value across ticks; writes always succeed and
//!   there is no update flag.
//! - [`Occasional<T>`] holds a value plus an `updated` flag; writing sets the
//!   flag, clearing resets the flag but keeps the stored value.
//! - [`Bang`] is a payloadless pulse; "fired this tick" is all it carries.
//!
//! `T` ranges over scalars (`i32`, `f32`), `String`, and fixed-length arrays
//! of the same, via the sealed [`ValueRepr`] trait. Bindings act on endpoints
//! through the object-safe [`Endpoint`] trait, exchanging [`Value`]s — the
//! tagged sum that also maps 1:1 onto the session-storage JSON encoding.

use core::fmt;
use core::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::component::AsAny;
use crate::error::ValueError;

// ───────────────────────────────────────────────────────────────
// Value sum type
// ───────────────────────────────────────────────────────────────

/// A dynamically-typed endpoint value.
///
/// The untagged serde representation makes `Value` serialise as a bare JSON
/// number / string / array, which is exactly the session-storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i32),
    Float(f32),
    Text(String),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    TextArray(Vec<String>),
}

fn write_array<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::IntArray(xs) => write_array(f, xs),
            Self::FloatArray(xs) => write_array(f, xs),
            Self::TextArray(xs) => write_array(f, xs),
        }
    }
}

/// The element class of an endpoint's value slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Int,
    Float,
    Text,
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// The shape of an endpoint, as seen through the uniform binding surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Bang,
    Persistent(ValueClass),
    Occasional(ValueClass),
    PersistentArray(ValueClass, usize),
    OccasionalArray(ValueClass, usize),
}

impl EndpointKind {
    /// Element class, where one exists.
    pub fn class(self) -> Option<ValueClass> {
        match self {
            Self::Bang => None,
            Self::Persistent(c)
            | Self::Occasional(c)
            | Self::PersistentArray(c, _)
            | Self::OccasionalArray(c, _) => Some(c),
        }
    }

    /// Number of value slots carried per message (bangs have none).
    pub fn arity(self) -> usize {
        match self {
            Self::Bang => 0,
            Self::Persistent(_) | Self::Occasional(_) => 1,
            Self::PersistentArray(_, n) | Self::OccasionalArray(_, n) => n,
        }
    }

    /// True for kinds that carry an update flag.
    pub fn flagged(self) -> bool {
        matches!(self, Self::Bang | Self::Occasional(_) | Self::OccasionalArray(_, _))
    }

    /// Human-readable kind label as printed by `/describe`.
    pub fn label(self) -> String {
        match self {
            Self::Bang => "bang".to_string(),
            Self::Persistent(c) => format!("persistent {c}"),
            Self::Occasional(c) => format!("occasional {c}"),
            Self::PersistentArray(c, _) | Self::OccasionalArray(c, _) => {
                format!("array of {c}")
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Metadata
// ───────────────────────────────────────────────────────────────

/// Expected minimum, maximum, and initial value of a numeric endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub init: f64,
}

impl Range {
    /// Invariant: `min <= init <= max`.
    pub fn new(min: f64, max: f64, init: f64) -> Self {
        assert!(min <= init && init <= max, "endpoint range must satisfy min <= init <= max");
        Self { min, max, init }
    }
}

/// Endpoint tag bitfield.
///
/// `WRITE_ONLY` endpoints are never displayed nor emitted (e.g. a WiFi
/// password); `SESSION_DATA` endpoints persist across process restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags(u8);

impl Tags {
    pub const NONE: Tags = Tags(0);
    pub const WRITE_ONLY: Tags = Tags(0b0000_0001);
    pub const SESSION_DATA: Tags = Tags(0b0000_0010);

    /// True when every tag in `other` is set in `self`.
    pub const fn contains(self, other: Tags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two tag sets.
    pub const fn with(self, other: Tags) -> Tags {
        Tags(self.0 | other.0)
    }
}

/// Static metadata attached to every endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointMeta {
    /// Free-form human label; paths use its snake spelling.
    pub name: &'static str,
    pub description: &'static str,
    pub unit: Option<&'static str>,
    pub range: Option<Range>,
    pub tags: Tags,
}

impl EndpointMeta {
    fn named(name: &'static str) -> Self {
        Self { name, description: "", unit: None, range: None, tags: Tags::NONE }
    }
}

// ───────────────────────────────────────────────────────────────
// Value representations
// ───────────────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// The types an endpoint can carry. Sealed: the binding layer enumerates
/// these representations exhaustively through [`Value`].
pub trait ValueRepr: sealed::Sealed + Clone + PartialEq + 'static {
    /// Element class of this representation.
    const CLASS: ValueClass;
    /// `Some(n)` for fixed-length arrays, `None` for scalars and text.
    const ARITY: Option<usize>;

    /// Snapshot into the dynamic sum type.
    fn to_value(&self) -> Value;

    /// Write from the dynamic sum type, coercing by kind. Rejected writes
    /// leave `self` untouched.
    fn assign(&mut self, value: &Value) -> Result<(), ValueError>;

    /// Overwrite with a range's initial value (no-op for text).
    fn apply_init(&mut self, init: f64);
}

fn mismatch(expected: ValueClass) -> ValueError {
    ValueError::TypeMismatch { expected }
}

impl sealed::Sealed for i32 {}
impl ValueRepr for i32 {
    const CLASS: ValueClass = ValueClass::Int;
    const ARITY: Option<usize> = None;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::Int(x) => {
                *self = *x;
                Ok(())
            }
            Value::Float(x) if x.fract() == 0.0 => {
                *self = *x as i32;
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Int)),
        }
    }

    fn apply_init(&mut self, init: f64) {
        *self = init as i32;
    }
}

impl sealed::Sealed for f32 {}
impl ValueRepr for f32 {
    const CLASS: ValueClass = ValueClass::Float;
    const ARITY: Option<usize> = None;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::Float(x) => {
                *self = *x;
                Ok(())
            }
            Value::Int(x) => {
                *self = *x as f32;
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Float)),
        }
    }

    fn apply_init(&mut self, init: f64) {
        *self = init as f32;
    }
}

impl sealed::Sealed for String {}
impl ValueRepr for String {
    const CLASS: ValueClass = ValueClass::Text;
    const ARITY: Option<usize> = None;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::Text(s) => {
                self.clone_from(s);
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Text)),
        }
    }

    fn apply_init(&mut self, _init: f64) {}
}

fn check_arity(expected: usize, got: usize) -> Result<(), ValueError> {
    if expected == got { Ok(()) } else { Err(ValueError::ArityMismatch { expected, got }) }
}

impl<const N: usize> sealed::Sealed for [i32; N] {}
impl<const N: usize> ValueRepr for [i32; N] {
    const CLASS: ValueClass = ValueClass::Int;
    const ARITY: Option<usize> = Some(N);

    fn to_value(&self) -> Value {
        Value::IntArray(self.to_vec())
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::IntArray(xs) => {
                check_arity(N, xs.len())?;
                self.copy_from_slice(xs);
                Ok(())
            }
            Value::FloatArray(xs) if xs.iter().all(|x| x.fract() == 0.0) => {
                check_arity(N, xs.len())?;
                for (slot, x) in self.iter_mut().zip(xs) {
                    *slot = *x as i32;
                }
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Int)),
        }
    }

    fn apply_init(&mut self, init: f64) {
        self.fill(init as i32);
    }
}

impl<const N: usize> sealed::Sealed for [f32; N] {}
impl<const N: usize> ValueRepr for [f32; N] {
    const CLASS: ValueClass = ValueClass::Float;
    const ARITY: Option<usize> = Some(N);

    fn to_value(&self) -> Value {
        Value::FloatArray(self.to_vec())
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::FloatArray(xs) => {
                check_arity(N, xs.len())?;
                self.copy_from_slice(xs);
                Ok(())
            }
            Value::IntArray(xs) => {
                check_arity(N, xs.len())?;
                for (slot, x) in self.iter_mut().zip(xs) {
                    *slot = *x as f32;
                }
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Float)),
        }
    }

    fn apply_init(&mut self, init: f64) {
        self.fill(init as f32);
    }
}

impl<const N: usize> sealed::Sealed for [String; N] {}
impl<const N: usize> ValueRepr for [String; N] {
    const CLASS: ValueClass = ValueClass::Text;
    const ARITY: Option<usize> = Some(N);

    fn to_value(&self) -> Value {
        Value::TextArray(self.to_vec())
    }

    fn assign(&mut self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::TextArray(xs) => {
                check_arity(N, xs.len())?;
                self.clone_from_slice(xs);
                Ok(())
            }
            _ => Err(mismatch(ValueClass::Text)),
        }
    }

    fn apply_init(&mut self, _init: f64) {}
}

// ───────────────────────────────────────────────────────────────
// Uniform endpoint surface
// ───────────────────────────────────────────────────────────────

/// Object-safe view of any endpoint, used by the reflection layer and every
/// binding. `value` yields the last stored value regardless of flag state;
/// `set_value` coerces by kind and raises the update flag on flagged kinds.
pub trait Endpoint: AsAny {
    fn meta(&self) -> &EndpointMeta;
    fn kind(&self) -> EndpointKind;

    /// Last stored value; `None` for bangs, which carry no payload.
    fn value(&self) -> Option<Value>;

    /// Write a value, coercing by kind. Flagged kinds also raise their flag.
    fn set_value(&mut self, value: &Value) -> Result<(), ValueError>;

    /// Update-flag state; always false for persistent endpoints.
    fn flag_state(&self) -> bool;

    /// Raise the update flag (fire, for bangs). No-op for persistent kinds.
    fn set_flag(&mut self);

    /// Reset the update flag, leaving the stored value intact.
    fn clear_flag(&mut self);

    /// Write the declared range's initial value, if a range is declared.
    fn apply_range_init(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Persistent
// ───────────────────────────────────────────────────────────────

/// A value-semantics endpoint: always holds a `T`, no update flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Persistent<T: ValueRepr> {
    meta: EndpointMeta,
    value: T,
}

impl<T: ValueRepr> Persistent<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self { meta: EndpointMeta::named(name), value: initial }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.meta.description = description;
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.meta.unit = Some(unit);
        self
    }

    pub fn range(mut self, min: f64, max: f64, init: f64) -> Self {
        self.meta.range = Some(Range::new(min, max, init));
        self
    }

    pub fn tag(mut self, tags: Tags) -> Self {
        self.meta.tags = self.meta.tags.with(tags);
        self
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: ValueRepr> Deref for Persistent<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ValueRepr> DerefMut for Persistent<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: ValueRepr> Endpoint for Persistent<T> {
    fn meta(&self) -> &EndpointMeta {
        &self.meta
    }

    fn kind(&self) -> EndpointKind {
        match T::ARITY {
            Some(n) => EndpointKind::PersistentArray(T::CLASS, n),
            None => EndpointKind::Persistent(T::CLASS),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(self.value.to_value())
    }

    fn set_value(&mut self, value: &Value) -> Result<(), ValueError> {
        self.value.assign(value)
    }

    fn flag_state(&self) -> bool {
        false
    }

    fn set_flag(&mut self) {}

    fn clear_flag(&mut self) {}

    fn apply_range_init(&mut self) {
        if let Some(range) = self.meta.range {
            self.value.apply_init(range.init);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Occasional
// ───────────────────────────────────────────────────────────────

/// A message-semantics endpoint: a `T` plus an `updated` flag. The stored
/// state survives flag clears, so downstream consumers may read the most
/// recent message at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Occasional<T: ValueRepr> {
    meta: EndpointMeta,
    state: T,
    updated: bool,
}

impl<T: ValueRepr> Occasional<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self { meta: EndpointMeta::named(name), state: initial, updated: false }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.meta.description = description;
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.meta.unit = Some(unit);
        self
    }

    pub fn range(mut self, min: f64, max: f64, init: f64) -> Self {
        self.meta.range = Some(Range::new(min, max, init));
        self
    }

    pub fn tag(mut self, tags: Tags) -> Self {
        self.meta.tags = self.meta.tags.with(tags);
        self
    }

    pub fn get(&self) -> &T {
        &self.state
    }

    /// Store a new value and raise the update flag.
    pub fn set(&mut self, value: T) {
        self.state = value;
        self.updated = true;
    }

    pub fn updated(&self) -> bool {
        self.updated
    }

    /// Reset the flag; the stored state is kept.
    pub fn clear(&mut self) {
        self.updated = false;
    }
}

impl<T: ValueRepr> Deref for Occasional<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.state
    }
}

impl<T: ValueRepr> Endpoint for Occasional<T> {
    fn meta(&self) -> &EndpointMeta {
        &self.meta
    }

    fn kind(&self) -> EndpointKind {
        match T::ARITY {
            Some(n) => EndpointKind::OccasionalArray(T::CLASS, n),
            None => EndpointKind::Occasional(T::CLASS),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(self.state.to_value())
    }

    fn set_value(&mut self, value: &Value) -> Result<(), ValueError> {
        self.state.assign(value)?;
        self.updated = true;
        Ok(())
    }

    fn flag_state(&self) -> bool {
        self.updated
    }

    fn set_flag(&mut self) {
        self.updated = true;
    }

    fn clear_flag(&mut self) {
        self.updated = false;
    }

    fn apply_range_init(&mut self) {
        if let Some(range) = self.meta.range {
            self.state.apply_init(range.init);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Bang
// ───────────────────────────────────────────────────────────────

/// A semantically value-less endpoint that signals an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Bang {
    meta: EndpointMeta,
    fired: bool,
}

impl Bang {
    pub fn new(name: &'static str) -> Self {
        Self { meta: EndpointMeta::named(name), fired: false }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.meta.description = description;
        self
    }

    pub fn tag(mut self, tags: Tags) -> Self {
        self.meta.tags = self.meta.tags.with(tags);
        self
    }

    pub fn fire(&mut self) {
        self.fired = true;
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn clear(&mut self) {
        self.fired = false;
    }
}

impl Endpoint for Bang {
    fn meta(&self) -> &EndpointMeta {
        &self.meta
    }

    fn kind(&self) -> EndpointKind {
        EndpointKind::Bang
    }

    fn value(&self) -> Option<Value> {
        None
    }

    fn set_value(&mut self, _value: &Value) -> Result<(), ValueError> {
        self.fired = true;
        Ok(())
    }

    fn flag_state(&self) -> bool {
        self.fired
    }

    fn set_flag(&mut self) {
        self.fired = true;
    }

    fn clear_flag(&mut self) {
        self.fired = false;
    }

    fn apply_range_init(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Constructor helpers
// ───────────────────────────────────────────────────────────────
//
// Named after the canonical endpoint vocabulary: a `button` is a two-state
// message, a `toggle` a two-state value, a `slider` a ranged scalar, and so
// on. Components compose these in their `inputs`/`outputs` structs.

/// Two-state integer endpoint with message semantics.
pub fn button(name: &'static str) -> Occasional<i32> {
    Occasional::new(name, 0).range(0.0, 1.0, 0.0)
}

/// Two-state integer endpoint with value semantics.
pub fn toggle(name: &'static str) -> Persistent<i32> {
    Persistent::new(name, 0).range(0.0, 1.0, 0.0)
}

/// Ranged float endpoint with value semantics, defaulting to `0..1`.
pub fn slider(name: &'static str) -> Persistent<f32> {
    Persistent::new(name, 0.0).range(0.0, 1.0, 0.0)
}

/// Ranged float endpoint with message semantics, defaulting to `0..1`.
pub fn slider_message(name: &'static str) -> Occasional<f32> {
    Occasional::new(name, 0.0).range(0.0, 1.0, 0.0)
}

/// Text endpoint with value semantics.
pub fn text(name: &'static str) -> Persistent<String> {
    Persistent::new(name, String::new())
}

/// Text endpoint with message semantics.
pub fn text_message(name: &'static str) -> Occasional<String> {
    Occasional::new(name, String::new())
}

/// Fixed-length float vector with value semantics, defaulting to `0..1`.
pub fn array<const N: usize>(name: &'static str) -> Persistent<[f32; N]> {
    Persistent::new(name, [0.0; N]).range(0.0, 1.0, 0.0)
}

/// Fixed-length float vector with message semantics, defaulting to `0..1`.
pub fn array_message<const N: usize>(name: &'static str) -> Occasional<[f32; N]> {
    Occasional::new(name, [0.0; N]).range(0.0, 1.0, 0.0)
}

/// Event pulse endpoint.
pub fn bng(name: &'static str) -> Bang {
    Bang::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistent_set_always_succeeds_and_never_flags() {
        let mut t = toggle("t");
        t.set(1);
        assert_eq!(*t.get(), 1);
        assert!(!t.flag_state());
        t.set_value(&Value::Int(0)).unwrap();
        assert_eq!(*t.get(), 0);
        assert!(!t.flag_state());
    }

    #[test]
    fn occasional_write_raises_flag_clear_keeps_state() {
        let mut b = button("b");
        assert!(!b.updated());
        b.set(1);
        assert!(b.updated());
        b.clear();
        assert!(!b.updated());
        assert_eq!(*b.get(), 1, "clearing must not reset the stored state");
    }

    #[test]
    fn bang_fire_and_clear() {
        let mut bang = bng("pulse");
        assert!(!bang.fired());
        bang.fire();
        assert!(bang.fired());
        assert_eq!(bang.value(), None);
        bang.clear();
        assert!(!bang.fired());
    }

    #[test]
    fn set_value_coerces_by_kind() {
        let mut s = slider("s");
        s.set_value(&Value::Int(1)).unwrap();
        assert_eq!(*s.get(), 1.0);

        let mut t = toggle("t");
        t.set_value(&Value::Float(1.0)).unwrap();
        assert_eq!(*t.get(), 1);
        assert!(t.set_value(&Value::Float(0.5)).is_err());
        assert_eq!(*t.get(), 1, "rejected writes leave the value untouched");
        assert!(t.set_value(&Value::Text("x".into())).is_err());
    }

    #[test]
    fn array_arity_is_checked() {
        let mut a = array::<3>("a");
        a.set_value(&Value::FloatArray(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(*a.get(), [1.0, 2.0, 3.0]);
        assert_eq!(
            a.set_value(&Value::FloatArray(vec![1.0])),
            Err(ValueError::ArityMismatch { expected: 3, got: 1 })
        );
        a.set_value(&Value::IntArray(vec![4, 5, 6])).unwrap();
        assert_eq!(*a.get(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn range_init_applies_only_where_declared() {
        let mut s = Persistent::new("s", 0.0f32).range(0.0, 10.0, 5.0);
        s.apply_range_init();
        assert_eq!(*s.get(), 5.0);

        let mut t = text("t");
        t.set("hello".to_string());
        t.apply_range_init();
        assert_eq!(t.get(), "hello");
    }

    #[test]
    #[should_panic(expected = "min <= init <= max")]
    fn range_invariant_is_enforced() {
        let _ = Range::new(0.0, 1.0, 2.0);
    }

    #[test]
    fn tags_bitfield() {
        let tags = Tags::SESSION_DATA.with(Tags::WRITE_ONLY);
        assert!(tags.contains(Tags::SESSION_DATA));
        assert!(tags.contains(Tags::WRITE_ONLY));
        assert!(!Tags::SESSION_DATA.contains(Tags::WRITE_ONLY));
    }

    #[test]
    fn value_display_matches_console_grammar() {
        assert_eq!(Value::Int(1).to_string(), "1");
        assert_eq!(Value::Float(0.31459).to_string(), "0.31459");
        assert_eq!(Value::Float(1.0).to_string(), "1");
        assert_eq!(Value::FloatArray(vec![0.0, 0.0, 0.0]).to_string(), "[0 0 0]");
        assert_eq!(Value::Text("hi".into()).to_string(), "hi");
    }

    #[test]
    fn value_json_round_trip() {
        let v: Value = serde_json::from_str("42").unwrap();
        assert_eq!(v, Value::Int(42));
        let v: Value = serde_json::from_str("42.5").unwrap();
        assert_eq!(v, Value::Float(42.5));
        let v: Value = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(v, Value::IntArray(vec![1, 2, 3]));
        let v: Value = serde_json::from_str("\"hello world\"").unwrap();
        assert_eq!(v, Value::Text("hello world".into()));
    }
}
