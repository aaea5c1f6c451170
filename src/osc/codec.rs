//! OSC 1.0 wire codec.
//!
//! Element layout:
//! ```text
//! ┌──────────────────┬─────────────────┬──────────────────────┐
//! │ address (padded) │ ,tags (padded)  │ args (i32/f32 BE,    │
//! │ "/foo/bar\0..."  │ ",if\0"         │ padded strings)      │
//! └──────────────────┴─────────────────┴──────────────────────┘
//! ```
//!
//! Strings are NUL-terminated and zero-padded to a four-byte boundary;
//! numbers are big-endian. A bundle is `"#bundle"` + an eight-byte time
//! tag + a sequence of size-prefixed elements, each of which may itself be
//! a message or a nested bundle. Only the `immediately` time tag is ever
//! produced; inbound time tags are ignored (there is no scheduling in the
//! core).
//!
//! The argument vocabulary is deliberately the three types endpoints can
//! carry on the wire: `i`, `f`, `s`.

use crate::error::CodecError;

/// Largest datagram the binding will emit or accept.
pub const MAX_PACKET_SIZE: usize = 1536;

/// The `immediately` OSC time tag.
const TIME_TAG_IMMEDIATELY: u64 = 1;

const BUNDLE_HEADER: &[u8; 8] = b"#bundle\0";

// ── Messages ─────────────────────────────────────────────────

/// One OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl Arg {
    fn tag(&self) -> char {
        match self {
            Self::Int(_) => 'i',
            Self::Float(_) => 'f',
            Self::Str(_) => 's',
        }
    }
}

/// A single OSC message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub address: String,
    pub args: Vec<Arg>,
}

impl Message {
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into(), args: Vec::new() }
    }

    /// The message's type tag string, `,` followed by one char per arg.
    pub fn type_tag(&self) -> String {
        let mut tag = String::with_capacity(1 + self.args.len());
        tag.push(',');
        for arg in &self.args {
            tag.push(arg.tag());
        }
        tag
    }

    /// Append the wire form of this message to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        write_padded_str(out, &self.address);
        write_padded_str(out, &self.type_tag());
        for arg in &self.args {
            match arg {
                Arg::Int(x) => out.extend_from_slice(&x.to_be_bytes()),
                Arg::Float(x) => out.extend_from_slice(&x.to_be_bytes()),
                Arg::Str(s) => write_padded_str(out, s),
            }
        }
    }
}

// ── Bundles ──────────────────────────────────────────────────

/// A bundle of messages stamped `immediately`. Messages are moved in and
/// freed with the bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    pub messages: Vec<Message>,
}

impl Bundle {
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Wire form of the whole bundle.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_PACKET_SIZE);
        out.extend_from_slice(BUNDLE_HEADER);
        out.extend_from_slice(&TIME_TAG_IMMEDIATELY.to_be_bytes());
        let mut element = Vec::new();
        for message in &self.messages {
            element.clear();
            message.encode(&mut element);
            out.extend_from_slice(&(element.len() as u32).to_be_bytes());
            out.extend_from_slice(&element);
        }
        out
    }
}

// ── Decoding ─────────────────────────────────────────────────

/// A decoded datagram: either a single message or a bundle's elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Message(Message),
    Bundle(Vec<Packet>),
}

impl Packet {
    /// Visit every message in the packet, recursing through bundles in
    /// order.
    pub fn for_each_message(&self, f: &mut impl FnMut(&Message)) {
        match self {
            Self::Message(m) => f(m),
            Self::Bundle(elements) => {
                for element in elements {
                    element.for_each_message(f);
                }
            }
        }
    }
}

/// Decode one datagram.
pub fn decode(bytes: &[u8]) -> Result<Packet, CodecError> {
    if bytes.len() >= 8 && &bytes[..8] == BUNDLE_HEADER {
        decode_bundle(&bytes[8..])
    } else {
        decode_message(bytes).map(Packet::Message)
    }
}

fn decode_bundle(bytes: &[u8]) -> Result<Packet, CodecError> {
    // Skip the time tag; elements follow as size-prefixed blobs.
    if bytes.len() < 8 {
        return Err(CodecError::BadBundle);
    }
    let mut rest = &bytes[8..];
    let mut elements = Vec::new();
    while !rest.is_empty() {
        if rest.len() < 4 {
            return Err(CodecError::BadBundle);
        }
        let size = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        rest = &rest[4..];
        if rest.len() < size {
            return Err(CodecError::BadBundle);
        }
        elements.push(decode(&rest[..size])?);
        rest = &rest[size..];
    }
    Ok(Packet::Bundle(elements))
}

fn decode_message(bytes: &[u8]) -> Result<Message, CodecError> {
    let (address, rest) = read_padded_str(bytes)?;
    let (tags, mut rest) = read_padded_str(rest)?;
    let Some(tags) = tags.strip_prefix(',') else {
        return Err(CodecError::MissingTypeTag);
    };

    let mut args = Vec::with_capacity(tags.len());
    for tag in tags.chars() {
        match tag {
            'i' => {
                let (raw, r) = read_word(rest)?;
                args.push(Arg::Int(i32::from_be_bytes(raw)));
                rest = r;
            }
            'f' => {
                let (raw, r) = read_word(rest)?;
                args.push(Arg::Float(f32::from_be_bytes(raw)));
                rest = r;
            }
            's' => {
                let (s, r) = read_padded_str(rest)?;
                args.push(Arg::Str(s.to_string()));
                rest = r;
            }
            other => return Err(CodecError::UnsupportedType(other)),
        }
    }
    Ok(Message { address: address.to_string(), args })
}

// ── Primitives ───────────────────────────────────────────────

fn padded_len(len_with_nul: usize) -> usize {
    len_with_nul.div_ceil(4) * 4
}

fn write_padded_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    let padded = padded_len(s.len() + 1);
    out.resize(out.len() + padded - s.len(), 0);
}

fn read_padded_str(bytes: &[u8]) -> Result<(&str, &[u8]), CodecError> {
    let nul = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or(CodecError::UnterminatedString)?;
    let s = core::str::from_utf8(&bytes[..nul]).map_err(|_| CodecError::BadString)?;
    let consumed = padded_len(nul + 1);
    if consumed > bytes.len() {
        return Err(CodecError::Truncated);
    }
    Ok((s, &bytes[consumed..]))
}

fn read_word(bytes: &[u8]) -> Result<([u8; 4], &[u8]), CodecError> {
    if bytes.len() < 4 {
        return Err(CodecError::Truncated);
    }
    Ok(([bytes[0], bytes[1], bytes[2], bytes[3]], &bytes[4..]))
}
