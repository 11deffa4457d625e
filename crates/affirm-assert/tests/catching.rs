mod common;

use std::io;

use affirm_assert::{
    expect, expect_catching, expect_catching_panic, AffirmError, Captured, Collector,
    FailureKind, Panicked, Rule,
};

use common::{counts, init_tracing, kind, summary};

fn lookup(name: &str) -> io::Result<&'static str> {
    match name {
        "greeting" => Ok("kthxbye"),
        _ => Err(io::Error::other("o noes")),
    }
}

#[test]
fn succeeded_narrows_to_the_value() -> Result<(), AffirmError> {
    init_tracing();
    expect_catching(|| lookup("greeting"))
        .succeeded()?
        .is_equal_to("kthxbye")?;
    Ok(())
}

#[test]
fn failed_narrows_to_the_error() -> Result<(), AffirmError> {
    expect_catching(|| lookup("missing"))
        .failed()?
        .is_a::<io::Error>()?
        .message()
        .is_equal_to("o noes")?;
    Ok(())
}

#[test]
fn failed_on_a_successful_action_is_a_violation() {
    let err = expect_catching(|| lookup("greeting"))
        .failed()
        .err()
        .expect("the action succeeded");
    assert_eq!(kind(&err), FailureKind::ExpectationViolated);
    assert_eq!(counts(&err), (1, 0, 1));
    assert_eq!(summary(&err).failures[0].code, "failed");
}

#[test]
fn succeeded_on_a_failed_action_is_a_violation() {
    let err = expect_catching(|| lookup("missing"))
        .succeeded()
        .err()
        .expect("the action failed");
    assert_eq!(kind(&err), FailureKind::ExpectationViolated);
    assert_eq!(summary(&err).failures[0].context["error"], "o noes");
}

#[test]
fn wrong_error_type_is_a_check_failure() {
    let err = expect_catching(|| lookup("missing"))
        .failed()
        .and_then(|error| error.is_a::<std::fmt::Error>())
        .err()
        .expect("io errors are not fmt errors");
    assert_eq!(kind(&err), FailureKind::CheckFailed);
    assert!(summary(&err).failures[0].context["actual"].contains("o noes"));
}

#[test]
fn panics_are_captured() -> Result<(), AffirmError> {
    expect_catching_panic(|| -> u32 { panic!("o noes") })
        .failed()?
        .is_a::<Panicked>()?
        .message()
        .is_equal_to("o noes")?;
    expect_catching_panic(|| 42u32).succeeded()?.is_equal_to(42u32)?;
    Ok(())
}

#[test]
fn the_action_runs_exactly_once() {
    let mut calls = 0;
    let captured = Captured::capture(|| {
        calls += 1;
        lookup("greeting")
    });
    assert!(captured.is_succeeded());
    assert_eq!(calls, 1);
}

#[test]
fn and_blocks_chain_on_the_captured_result() {
    let err = expect_catching(|| lookup("greeting"))
        .and(|it| {
            it.failed().message().contains_substring("o noes");
        })
        .err()
        .expect("the action succeeded");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (1, 0, 1));
    assert_eq!(summary(&err).failures[0].code, "failed");
}

#[test]
fn and_blocks_pass_on_matching_outcomes() -> Result<(), AffirmError> {
    expect_catching(|| lookup("missing")).and(|it| {
        it.failed().is_a::<&io::Error>().message().is_equal_to("o noes");
    })?;
    expect_catching(|| lookup("greeting")).and(|it| {
        it.succeeded().cloned().is_equal_to("kthxbye");
    })?;
    Ok(())
}

#[test]
fn captures_inside_a_block_do_not_interrupt_siblings() {
    let err = expect("lookups")
        .nested("lookups", Rule::All, |_, scope: &mut Collector| {
            scope.expect_catching(|| lookup("missing")).succeeded();
            scope.expect_catching(|| lookup("greeting")).succeeded();
            scope.expect_catching(|| lookup("greeting")).failed();
        })
        .err()
        .expect("two captures break their expectation");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (3, 1, 2));
}

#[test]
fn error_messages_compare_with_text_literals() -> Result<(), AffirmError> {
    expect_catching(|| Err::<(), _>(io::Error::other("msg")))
        .failed()?
        .message()
        .is_equal_to("msg")?;
    let err = expect_catching(|| Err::<(), _>(io::Error::other("msg")))
        .failed()
        .and_then(|error| error.message().is_equal_to("other"))
        .err()
        .expect("messages differ");
    let detail = &summary(&err).failures[0];
    assert_eq!(detail.code, "is-equal-to");
    assert!(detail.hint.is_none());
    Ok(())
}
