//! The OSC-over-UDP binding component.
//!
//! Pulls inbound datagrams off a non-blocking UDP socket during
//! `external_sources`, dispatching each message to the input endpoints its
//! address matches; pushes one bundle per tick during
//! `external_destinations`, containing every output that fired or changed.
//!
//! Configuration flows through the binding's own endpoints, which are
//! session-persisted: a restored or newly written `source port` /
//! `destination port` / `destination address` re-runs setup during `main`.
//! Invalid configuration drops the relevant `running` toggle and reports
//! through `error message`; later writes recover.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr, UdpSocket};

use log::{debug, info, warn};

use crate::component::{Component, ComponentMeta, Direction};
use crate::endpoints::{
    text, text_message, toggle, Endpoint, EndpointKind, Occasional, Persistent, Tags, Value,
    ValueClass,
};
use crate::osc::address::{endpoint_path, type_tag};
use crate::osc::codec::{self, Arg, Bundle, Message, MAX_PACKET_SIZE};
use crate::osc::pattern::osc_match_pattern;
use crate::runtime::Context;

const NAME: &str = "OSC";

/// Valid user-configurable UDP port range.
fn parse_port(text: &str) -> Option<u16> {
    match text.parse::<u32>() {
        Ok(port) if (1024..=65535).contains(&port) => Some(port as u16),
        _ => None,
    }
}

pub struct OscInputs {
    pub src_port: Occasional<String>,
    pub dst_port: Occasional<String>,
    pub dst_addr: Occasional<String>,
}

pub struct OscOutputs {
    pub server_running: Persistent<i32>,
    pub output_running: Persistent<i32>,
    pub error_message: Persistent<String>,
}

pub struct OscBinding {
    meta: ComponentMeta,
    pub inputs: OscInputs,
    pub outputs: OscOutputs,
    socket: Option<UdpSocket>,
    dst: Option<SocketAddr>,
    /// Last value sent per persistent output path; a persistent output only
    /// re-emits when it differs from this.
    sent: HashMap<String, Value>,
    /// Paths of the binding's own inputs, which are addressable like any
    /// peer endpoint.
    own_paths: [String; 3],
}

impl OscBinding {
    pub fn new() -> Self {
        Self {
            meta: ComponentMeta::named(NAME)
                .describe("Open Sound Control bindings over UDP")
                .version("0.1.0"),
            inputs: OscInputs {
                src_port: text_message("source port")
                    .describe("The UDP port on which to receive incoming messages.")
                    .tag(Tags::SESSION_DATA),
                dst_port: text_message("destination port")
                    .describe("The UDP port on which to send outgoing messages.")
                    .tag(Tags::SESSION_DATA),
                dst_addr: text_message("destination address")
                    .describe("The IP address to send outgoing messages to.")
                    .tag(Tags::SESSION_DATA),
            },
            outputs: OscOutputs {
                server_running: toggle("server running"),
                output_running: toggle("output running"),
                error_message: text("error message"),
            },
            socket: None,
            dst: None,
            sent: HashMap::new(),
            own_paths: [
                endpoint_path(NAME, "source port"),
                endpoint_path(NAME, "destination port"),
                endpoint_path(NAME, "destination address"),
            ],
        }
    }

    /// The UDP port the server is bound to, when it is running.
    pub fn bound_port(&self) -> Option<u16> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok()).map(|a| a.port())
    }

    fn fail_server(&mut self, message: String) {
        warn!("osc: {message}");
        self.outputs.error_message.set(message);
        self.outputs.server_running.set(0);
    }

    fn fail_output(&mut self, message: String) {
        warn!("osc: {message}");
        self.outputs.error_message.set(message);
        self.outputs.output_running.set(0);
        self.dst = None;
    }

    /// (Re)bind the receive socket. A running server is left alone unless
    /// the source port input was validly updated.
    fn set_server(&mut self) {
        let configured = parse_port(self.inputs.src_port.get());
        let running = *self.outputs.server_running.get() == 1;
        if running && !(self.inputs.src_port.updated() && configured.is_some()) {
            return;
        }

        info!("osc: setting up server");
        let bind = match configured {
            Some(port) => UdpSocket::bind(("0.0.0.0", port)),
            None => {
                info!("osc: searching for unused port");
                UdpSocket::bind(("0.0.0.0", 0))
            }
        };
        let socket = match bind {
            Ok(socket) => socket,
            Err(e) => {
                self.fail_server(format!("server setup failed: {e}"));
                return;
            }
        };
        if let Err(e) = socket.set_nonblocking(true) {
            self.fail_server(format!("server setup failed: {e}"));
            return;
        }

        if configured.is_none() {
            if let Ok(addr) = socket.local_addr() {
                // Publish the chosen port, clearing the flag so the write
                // does not re-trigger setup on the next tick.
                self.inputs.src_port.set(addr.port().to_string());
                self.inputs.src_port.clear();
            }
        }
        info!("osc: listening on port {}", self.inputs.src_port.get());

        self.socket = Some(socket);
        self.outputs.server_running.set(1);
    }

    /// (Re)create the send address when the destination inputs were updated
    /// and are valid.
    fn set_dst(&mut self) {
        if !(self.inputs.dst_port.updated() || self.inputs.dst_addr.updated()) {
            return;
        }
        let Some(port) = parse_port(self.inputs.dst_port.get()) else {
            self.fail_output(format!("invalid destination port {}", self.inputs.dst_port.get()));
            return;
        };
        if self.inputs.dst_addr.get().len() < 7 {
            self.fail_output(format!(
                "invalid destination address {}",
                self.inputs.dst_addr.get()
            ));
            return;
        }
        match self.inputs.dst_addr.get().parse::<IpAddr>() {
            Ok(ip) => {
                let dst = SocketAddr::new(ip, port);
                info!("osc: sending to {dst}");
                self.dst = Some(dst);
                self.outputs.output_running.set(1);
            }
            Err(_) => {
                self.fail_output(format!(
                    "invalid destination address {}",
                    self.inputs.dst_addr.get()
                ));
            }
        }
    }

    fn dispatch(&mut self, cx: &mut Context<'_>, message: &Message) {
        let mut hit = false;
        {
            let own: [(&String, &mut dyn Endpoint); 3] = [
                (&self.own_paths[0], &mut self.inputs.src_port),
                (&self.own_paths[1], &mut self.inputs.dst_port),
                (&self.own_paths[2], &mut self.inputs.dst_addr),
            ];
            for (path, endpoint) in own {
                if osc_match_pattern(&message.address, path) {
                    hit = true;
                    write_message(path, endpoint, message);
                }
            }
        }
        cx.for_each_input(|route, endpoint| {
            if osc_match_pattern(&message.address, &route.path) {
                hit = true;
                write_message(&route.path, endpoint, message);
            }
        });
        if !hit {
            debug!("osc: no input endpoint matches {}", message.address);
        }
    }
}

impl Default for OscBinding {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-check an inbound message against the endpoint's derived tag and
/// write it through; mismatches are discarded with a diagnostic.
fn write_message(path: &str, endpoint: &mut dyn Endpoint, message: &Message) {
    let expected = type_tag(endpoint.kind());
    let got = message.type_tag();
    if got != expected {
        warn!("osc: {path}: wrong type; expected '{expected}', got '{got}'");
        return;
    }
    if endpoint.kind() == EndpointKind::Bang {
        endpoint.set_flag();
        return;
    }
    let Some(value) = value_from_args(endpoint.kind(), &message.args) else {
        warn!("osc: {path}: malformed argument list");
        return;
    };
    if let Err(e) = endpoint.set_value(&value) {
        warn!("osc: {path}: {e}");
    }
}

fn value_from_args(kind: EndpointKind, args: &[Arg]) -> Option<Value> {
    let class = kind.class()?;
    match kind {
        EndpointKind::Persistent(_) | EndpointKind::Occasional(_) => match (class, args.first()) {
            (ValueClass::Int, Some(Arg::Int(x))) => Some(Value::Int(*x)),
            (ValueClass::Float, Some(Arg::Float(x))) => Some(Value::Float(*x)),
            (ValueClass::Text, Some(Arg::Str(s))) => Some(Value::Text(s.clone())),
            _ => None,
        },
        EndpointKind::PersistentArray(_, n) | EndpointKind::OccasionalArray(_, n) => {
            if args.len() != n {
                return None;
            }
            match class {
                ValueClass::Int => {
                    let mut xs = Vec::with_capacity(n);
                    for arg in args {
                        let Arg::Int(x) = arg else { return None };
                        xs.push(*x);
                    }
                    Some(Value::IntArray(xs))
                }
                ValueClass::Float => {
                    let mut xs = Vec::with_capacity(n);
                    for arg in args {
                        let Arg::Float(x) = arg else { return None };
                        xs.push(*x);
                    }
                    Some(Value::FloatArray(xs))
                }
                ValueClass::Text => {
                    let mut xs = Vec::with_capacity(n);
                    for arg in args {
                        let Arg::Str(s) = arg else { return None };
                        xs.push(s.clone());
                    }
                    Some(Value::TextArray(xs))
                }
            }
        }
        EndpointKind::Bang => None,
    }
}

fn push_args(message: &mut Message, value: &Value) {
    match value {
        Value::Int(x) => message.args.push(Arg::Int(*x)),
        Value::Float(x) => message.args.push(Arg::Float(*x)),
        Value::Text(s) => message.args.push(Arg::Str(s.clone())),
        Value::IntArray(xs) => message.args.extend(xs.iter().map(|x| Arg::Int(*x))),
        Value::FloatArray(xs) => message.args.extend(xs.iter().map(|x| Arg::Float(*x))),
        Value::TextArray(xs) => message.args.extend(xs.iter().map(|s| Arg::Str(s.clone()))),
    }
}

impl Component for OscBinding {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn visit_endpoints(&mut self, visit: &mut dyn FnMut(Direction, &mut dyn Endpoint)) {
        visit(Direction::Input, &mut self.inputs.src_port);
        visit(Direction::Input, &mut self.inputs.dst_port);
        visit(Direction::Input, &mut self.inputs.dst_addr);
        visit(Direction::Output, &mut self.outputs.server_running);
        visit(Direction::Output, &mut self.outputs.output_running);
        visit(Direction::Output, &mut self.outputs.error_message);
    }

    fn init(&mut self, _cx: &mut Context<'_>) {
        self.outputs.server_running.set(0);
        self.set_server();
        self.outputs.output_running.set(0);
        self.set_dst();
    }

    fn external_sources(&mut self, cx: &mut Context<'_>) {
        if *self.outputs.server_running.get() != 1 {
            return;
        }
        let mut inbound = Vec::new();
        {
            let Some(socket) = self.socket.as_ref() else { return };
            let mut buf = [0u8; MAX_PACKET_SIZE];
            loop {
                match socket.recv_from(&mut buf) {
                    Ok((len, _)) => match codec::decode(&buf[..len]) {
                        Ok(packet) => {
                            packet.for_each_message(&mut |m| inbound.push(m.clone()));
                        }
                        Err(e) => warn!("osc: discarding malformed packet: {e}"),
                    },
                    Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                    Err(e) => {
                        warn!("osc: receive failed: {e}");
                        break;
                    }
                }
            }
        }
        for message in inbound {
            self.dispatch(cx, &message);
        }
    }

    fn main(&mut self, _cx: &mut Context<'_>) {
        self.set_server();
        self.set_dst();
    }

    fn external_destinations(&mut self, cx: &mut Context<'_>) {
        if *self.outputs.output_running.get() != 1 {
            return;
        }
        let (Some(socket), Some(dst)) = (self.socket.as_ref(), self.dst) else {
            return;
        };

        let mut bundle = Bundle::new();
        let sent = &mut self.sent;
        cx.for_each_output(|route, endpoint| {
            if endpoint.meta().tags.contains(Tags::WRITE_ONLY) {
                return;
            }
            if endpoint.kind().flagged() {
                if !endpoint.flag_state() {
                    return;
                }
            } else {
                let Some(value) = endpoint.value() else { return };
                if sent.get(route.path.as_str()) == Some(&value) {
                    return;
                }
                sent.insert(route.path.clone(), value);
            }
            let mut message = Message::new(route.path.clone());
            if let Some(value) = endpoint.value() {
                push_args(&mut message, &value);
            }
            bundle.push(message);
        });

        if bundle.is_empty() {
            return;
        }
        let wire = bundle.encode();
        if let Err(e) = socket.send_to(&wire, dst) {
            warn!("osc: send to {dst} failed: {e}");
        }
    }
}
