//! Open Sound Control: addressing, pattern matching, wire codec, and the
//! UDP binding component.

pub mod address;
pub mod binding;
pub mod codec;
pub mod pattern;

pub use address::{component_path, endpoint_path, type_tag};
pub use binding::OscBinding;
pub use pattern::osc_match_pattern;
