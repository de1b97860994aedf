/// Tests for the all-or-nothing commit gate: with any error recorded, no
/// module output is ever written or touched.

mod common;

use common::{behaviour, method, module, param, plain_method};
use netweave_weaver::{
    CommitError, InvocationKind, Module, WeaveConfig, WeavePass, WireType,
};

fn run(module: &Module) -> netweave_weaver::WeaveOutcome {
    WeavePass::new(WeaveConfig::builder().build()).run(module, &[])
}

fn broken_module() -> Module {
    // parameter type that nothing declares
    module(
        "game",
        vec![behaviour(
            "Player",
            Some("NetBehaviour"),
            vec![method(
                "cmd_equip",
                InvocationKind::Command,
                0,
                vec![param("item", WireType::Named("Item".to_string()))],
            )],
            Vec::new(),
        )],
        Vec::new(),
    )
}

#[test]
fn unresolvable_parameter_fails_the_build() {
    let outcome = run(&broken_module());

    assert_eq!(outcome.diagnostics.error_count(), 1);
    let diagnostic = outcome.diagnostics.iter().next().expect("one diagnostic");
    assert_eq!(diagnostic.member.as_deref(), Some("cmd_equip"));
    assert!(diagnostic.message.contains("item"));
    assert!(diagnostic.message.contains("Item"));
}

#[test]
fn commit_refuses_when_errors_are_recorded_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out_path = dir.path().join("game.woven.json");

    let outcome = run(&broken_module());
    let result = outcome.commit(&out_path);

    assert!(matches!(
        result,
        Err(CommitError::ErrorsPresent { errors: 1 })
    ));
    assert!(!out_path.exists());
}

#[test]
fn failed_in_place_weave_leaves_the_input_untouched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("game.module.json");
    broken_module().save(&path).expect("fixture written");
    let before = std::fs::read_to_string(&path).expect("fixture readable");

    let input = Module::load(&path).expect("fixture loads");
    let outcome = run(&input);
    assert!(outcome.commit(&path).is_err());

    let after = std::fs::read_to_string(&path).expect("fixture readable");
    assert_eq!(before, after);
}

#[test]
fn successful_commit_writes_the_rewritten_module() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out_path = dir.path().join("game.woven.json");

    let outcome = run(&common::player_module());
    assert!(!outcome.has_errors());
    outcome.commit(&out_path).expect("commit succeeds");

    let rewritten = Module::load(&out_path).expect("output loads");
    let player = rewritten.behaviour("Player").expect("behaviour present");

    // original members survive untouched
    assert!(player.method("on_health_changed").is_some());
    assert!(player.field("score").is_some());

    // generated members are recorded
    let woven = player.woven.as_ref().expect("woven record present");
    assert_eq!(woven.invokers.len(), 3);
    assert_eq!(woven.forwarders.len(), 3);
    assert_eq!(woven.accessors.len(), 2);
    assert_eq!(woven.mask_accessor, "dirty_mask");
    assert_eq!(woven.invokers[0].method_id, woven.forwarders[0].method_id);
}

#[test]
fn module_document_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("game.module.json");

    let original = common::player_module();
    original.save(&path).expect("saves");
    let loaded = Module::load(&path).expect("loads");

    assert_eq!(loaded, original);
}

#[test]
fn input_without_woven_sections_gains_them_only_on_success() {
    let outcome = run(&common::player_module());

    // the outcome's module carries the woven record in memory
    assert!(outcome
        .woven
        .module()
        .behaviour("Player")
        .expect("behaviour present")
        .woven
        .is_some());

    // a broken weave leaves the rewritten document accessible for
    // inspection but the gate refuses to persist it
    let broken = run(&broken_module());
    assert!(broken.has_errors());
    let dir = tempfile::tempdir().expect("temp dir");
    let out_path = dir.path().join("never.json");
    assert!(broken.commit(&out_path).is_err());
    assert!(!out_path.exists());
}

#[test]
fn plain_methods_are_left_untouched() {
    let module = module(
        "game",
        vec![behaviour(
            "Player",
            Some("NetBehaviour"),
            vec![plain_method("helper", vec![param("x", WireType::I32)])],
            Vec::new(),
        )],
        Vec::new(),
    );

    let outcome = run(&module);

    assert!(!outcome.has_errors());
    let woven = outcome.woven.woven_type("Player").expect("type woven");
    assert!(woven.invokers.is_empty());
    assert!(woven.forwarders.is_empty());
}
