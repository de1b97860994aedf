/// Tests for the invoker stub boundary: decode and callee failures are
/// reported through the runtime error channel, the authority guard drops
/// commands silently, and the dispatch loop always continues.

mod common;

use common::{MockBehaviour, MockRuntime};
use netweave_runtime::{
    ByteReader, ByteWriter, DispatchError, InvokerDispatch, PeerRole, RuntimeWarning, WireValue,
};
use netweave_weaver::{WeaveConfig, WeavePass};

fn woven_player() -> netweave_weaver::WeaveOutcome {
    let module = common::player_module();
    let outcome = WeavePass::new(WeaveConfig::builder().build()).run(&module, &[]);
    assert!(!outcome.has_errors());
    outcome
}

fn cmd_move_payload(dx: i32, dy: i32) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer.write_i32(dx);
    writer.write_i32(dy);
    writer.to_bytes()
}

#[test]
fn truncated_payload_reports_decode_error_and_never_calls_the_method() {
    let outcome = woven_player();
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    let stub = woven.invoker("cmd_move").expect("stub generated");

    let runtime = MockRuntime::new(true, true);
    let mut instance = MockBehaviour::new(31, PeerRole::Authority, Vec::new());

    // only one of the two i32 arguments is present
    let payload = {
        let mut writer = ByteWriter::new();
        writer.write_i32(7);
        writer.to_bytes()
    };
    let mut reader = ByteReader::new(&payload);
    stub.dispatch(&mut instance, &mut reader, &runtime);

    assert!(instance.calls.is_empty());
    let errors = runtime.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        DispatchError::DecodeFailed {
            object_id: 31,
            index: 1,
            ..
        }
    ));
}

#[test]
fn dispatch_continues_after_a_bad_payload() {
    let outcome = woven_player();
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    let stub = woven.invoker("cmd_move").expect("stub generated");

    let runtime = MockRuntime::new(true, true);
    let mut instance = MockBehaviour::new(32, PeerRole::Authority, Vec::new());

    let mut empty = ByteReader::new(&[]);
    stub.dispatch(&mut instance, &mut empty, &runtime);
    assert_eq!(runtime.errors().len(), 1);

    // the next, well-formed payload still dispatches
    let payload = cmd_move_payload(5, 6);
    let mut reader = ByteReader::new(&payload);
    stub.dispatch(&mut instance, &mut reader, &runtime);

    assert_eq!(
        instance.calls,
        vec![(
            "cmd_move".to_string(),
            vec![WireValue::I32(5), WireValue::I32(6)],
        )]
    );
}

#[test]
fn command_stub_without_authority_drops_silently_with_one_warning() {
    let outcome = woven_player();
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    let stub = woven.invoker("cmd_move").expect("stub generated");

    let runtime = MockRuntime::new(false, true);
    let mut instance = MockBehaviour::new(33, PeerRole::Remote, Vec::new());

    let payload = cmd_move_payload(1, 2);
    let mut reader = ByteReader::new(&payload);
    stub.dispatch(&mut instance, &mut reader, &runtime);

    assert!(instance.calls.is_empty());
    assert_eq!(
        runtime.warnings(),
        vec![RuntimeWarning::MissingAuthority {
            object_id: 33,
            method_id: stub.method_id(),
        }]
    );
    assert!(runtime.errors().is_empty());
}

#[test]
fn broadcast_stub_needs_no_authority() {
    let outcome = woven_player();
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    let stub = woven.invoker("rpc_celebrate").expect("stub generated");

    let runtime = MockRuntime::new(false, true);
    let mut instance = MockBehaviour::new(34, PeerRole::Remote, Vec::new());

    let payload = {
        let mut writer = ByteWriter::new();
        writer.write_u8(2);
        writer.to_bytes()
    };
    let mut reader = ByteReader::new(&payload);
    stub.dispatch(&mut instance, &mut reader, &runtime);

    assert_eq!(
        instance.calls,
        vec![("rpc_celebrate".to_string(), vec![WireValue::U8(2)])]
    );
    assert!(runtime.warnings().is_empty());
}

#[test]
fn callee_failure_is_contained_at_the_stub_boundary() {
    let outcome = woven_player();
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    let stub = woven.invoker("cmd_move").expect("stub generated");

    let runtime = MockRuntime::new(true, true);
    let mut instance =
        MockBehaviour::new(35, PeerRole::Authority, Vec::new()).with_failing_method("cmd_move");

    let payload = cmd_move_payload(1, 2);
    let mut reader = ByteReader::new(&payload);
    stub.dispatch(&mut instance, &mut reader, &runtime);

    let errors = runtime.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        DispatchError::InvokeFailed { object_id: 35, .. }
    ));
}
