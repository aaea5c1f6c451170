//! OSC binding round trips over loopback UDP: inbound messages reach input
//! endpoints, qualifying outputs leave as one bundle per tick.

use std::net::UdpSocket;
use std::time::{Duration, Instant};

use sygaldry::assembly::Assembly;
use sygaldry::osc::codec::{decode, Arg, Message, Packet};
use sygaldry::osc::OscBinding;
use sygaldry::runtime::Runtime;
use sygaldry::test_component::TestComponent;

/// Builds a runtime with the OSC binding preconfigured to send to
/// `listener`, initialises it, and returns it with the bound source port.
fn rig(listener: &UdpSocket) -> (Runtime, u16) {
    let dst_port = listener.local_addr().unwrap().port();

    let tree = Assembly::builder("test")
        .component(TestComponent::new())
        .component(OscBinding::new())
        .build()
        .unwrap();
    let mut runtime = Runtime::new(tree);

    {
        let osc = runtime.tree_mut().find::<OscBinding>().unwrap();
        osc.inputs.dst_addr.set("127.0.0.1".to_string());
        osc.inputs.dst_port.set(dst_port.to_string());
    }
    // init binds the server, publishes the chosen port, and picks up the
    // destination configuration written above.
    runtime.init();

    let osc = runtime.tree_mut().find::<OscBinding>().unwrap();
    assert_eq!(*osc.outputs.server_running.get(), 1);
    assert_eq!(*osc.outputs.output_running.get(), 1);
    let src_port = osc.bound_port().expect("server must be bound");
    assert_eq!(osc.inputs.src_port.get(), &src_port.to_string(), "chosen port is published");

    (runtime, src_port)
}

fn encode_message(address: &str, args: Vec<Arg>) -> Vec<u8> {
    let mut message = Message::new(address);
    message.args = args;
    let mut wire = Vec::new();
    message.encode(&mut wire);
    wire
}

/// Tick until the listener receives a datagram or the deadline passes.
fn receive_bundle(runtime: &mut Runtime, listener: &UdpSocket) -> Vec<Message> {
    let mut buf = [0u8; 2048];
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        runtime.tick();
        match listener.recv_from(&mut buf) {
            Ok((len, _)) => {
                let packet = decode(&buf[..len]).expect("well-formed bundle");
                assert!(matches!(packet, Packet::Bundle(_)), "outbound traffic is bundled");
                let mut messages = Vec::new();
                packet.for_each_message(&mut |m| messages.push(m.clone()));
                return messages;
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("listener receive failed: {e}"),
        }
    }
    panic!("no bundle arrived within the deadline");
}

#[test]
fn inbound_toggle_is_set_and_mirrored_output_is_bundled() {
    let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let (mut runtime, src_port) = rig(&listener);

    // Flush the initial persistent-output snapshot so the next bundle
    // holds only the mirrored change.
    for _ in 0..3 {
        runtime.tick();
    }
    std::thread::sleep(Duration::from_millis(50));
    let mut buf = [0u8; 2048];
    while listener.recv_from(&mut buf).is_ok() {}

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender
        .send_to(
            &encode_message("/Test_Component_1/toggle_in", vec![Arg::Int(1)]),
            ("127.0.0.1", src_port),
        )
        .unwrap();

    let messages = receive_bundle(&mut runtime, &listener);
    let toggle_out = messages
        .iter()
        .find(|m| m.address == "/Test_Component_1/toggle_out")
        .expect("mirrored output present in the bundle");
    assert_eq!(toggle_out.args, vec![Arg::Int(1)]);

    let tc = runtime.tree_mut().find::<TestComponent>().unwrap();
    assert_eq!(*tc.inputs.toggle_in.get(), 1);
}

#[test]
fn type_mismatched_messages_are_discarded() {
    let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let (mut runtime, src_port) = rig(&listener);

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    // toggle_in expects ",i"; send ",f" instead.
    sender
        .send_to(
            &encode_message("/Test_Component_1/toggle_in", vec![Arg::Float(1.0)]),
            ("127.0.0.1", src_port),
        )
        .unwrap();

    // Give the datagram time to arrive, then tick a few times.
    std::thread::sleep(Duration::from_millis(50));
    for _ in 0..5 {
        runtime.tick();
    }
    let tc = runtime.tree_mut().find::<TestComponent>().unwrap();
    assert_eq!(*tc.inputs.toggle_in.get(), 0, "mismatched message must not write");
}

#[test]
fn steady_state_sends_nothing() {
    let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let (mut runtime, _) = rig(&listener);

    // First ticks flush the initial persistent-output snapshot.
    for _ in 0..3 {
        runtime.tick();
    }
    std::thread::sleep(Duration::from_millis(50));
    let mut buf = [0u8; 2048];
    while listener.recv_from(&mut buf).is_ok() {}

    // With no changes, further ticks must not emit bundles.
    for _ in 0..3 {
        runtime.tick();
    }
    std::thread::sleep(Duration::from_millis(50));
    assert!(
        listener.recv_from(&mut buf).is_err(),
        "no bundle may be sent when no output qualifies"
    );
}

#[test]
fn bang_messages_fire_bangs_and_are_bundled() {
    let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let (mut runtime, src_port) = rig(&listener);

    // Flush the initial snapshot so the next bundle is bang-only traffic.
    for _ in 0..3 {
        runtime.tick();
    }
    std::thread::sleep(Duration::from_millis(50));
    let mut buf = [0u8; 2048];
    while listener.recv_from(&mut buf).is_ok() {}

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender
        .send_to(&encode_message("/Test_Component_1/bang_in", vec![]), ("127.0.0.1", src_port))
        .unwrap();

    let messages = receive_bundle(&mut runtime, &listener);
    let bang_out = messages
        .iter()
        .find(|m| m.address == "/Test_Component_1/bang_out")
        .expect("mirrored bang present in the bundle");
    assert!(bang_out.args.is_empty());
    assert_eq!(bang_out.type_tag(), ",");
}
