//! OSC path and type-tag derivation.
//!
//! Every endpoint is addressable at `/<component>/<endpoint>` with both
//! names in their snake spelling. The type tag string is `,` followed by
//! one character per value slot: `i` for integral, `f` for floating point,
//! `s` for string-like, one character per element for arrays, and nothing
//! at all for bangs.

use crate::endpoints::{EndpointKind, ValueClass};
use crate::spelling::snake_case;

/// `/<snake component name>`.
pub fn component_path(component_name: &str) -> String {
    format!("/{}", snake_case(component_name))
}

/// `/<snake component name>/<snake endpoint name>`.
pub fn endpoint_path(component_name: &str, endpoint_name: &str) -> String {
    format!("/{}/{}", snake_case(component_name), snake_case(endpoint_name))
}

fn class_tag(class: ValueClass) -> char {
    match class {
        ValueClass::Int => 'i',
        ValueClass::Float => 'f',
        ValueClass::Text => 's',
    }
}

/// The OSC type tag string for an endpoint of the given kind.
pub fn type_tag(kind: EndpointKind) -> String {
    let mut tag = String::with_capacity(1 + kind.arity());
    tag.push(',');
    if let Some(class) = kind.class() {
        for _ in 0..kind.arity() {
            tag.push(class_tag(class));
        }
    }
    tag
}
