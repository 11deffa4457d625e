mod common;

use std::cell::RefCell;

use affirm_assert::{
    expect, report, AffirmError, Collector, FailureSummary, Policy, ReportSink, Reporter, Rule,
};

use common::init_tracing;

#[derive(Default)]
struct RecordingSink {
    published: RefCell<Vec<String>>,
}

impl ReportSink for RecordingSink {
    fn publish(&self, _summary: &FailureSummary, rendered: &str) {
        self.published.borrow_mut().push(rendered.to_string());
    }
}

fn pets_failure() -> AffirmError {
    expect(vec!["catflap", "rubberplant", "marzipan"])
        .all(|it| {
            it.starts_with('c');
        })
        .err()
        .expect("two elements do not start with c")
}

#[test]
fn render_lists_failures_with_context() {
    let err = pets_failure();
    let reporter = Reporter::new(Policy::default());
    let rendered = reporter.render(err.summary().expect("summary"));
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines[0],
        "subject: all elements match predicate: 3 assertions, 1 passed, 2 failed"
    );
    assert_eq!(lines[1], "  - text does not start with the prefix (starts-with)");
    assert_eq!(lines[2], "    actual: \"rubberplant\"");
    assert_eq!(lines[3], "    expected: \"c\"");
    assert_eq!(lines.len(), 7);
}

#[test]
fn render_honours_the_policy() {
    let err = pets_failure();
    let policy = Policy {
        max_listed_failures: 1,
        show_context: false,
        indent: 4,
        ..Policy::default()
    };
    let rendered = Reporter::new(policy).render(err.summary().expect("summary"));
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        [
            "subject: all elements match predicate: 3 assertions, 1 passed, 2 failed",
            "    - text does not start with the prefix (starts-with)",
            "    ... and 1 more",
        ]
    );
}

#[test]
fn render_tree_indents_by_depth() {
    let mut scope = Collector::new();
    scope.expect("catflap").starts_with('c');
    scope.expect("catflap").is_upper_case();
    let record = scope.fold("pet door", Rule::All);

    let reporter = Reporter::new(Policy::default());
    let tree = reporter.render_tree(&record);
    let lines: Vec<&str> = tree.lines().collect();
    assert_eq!(lines[0], "[FAIL] pet door: 1 of 2 children did not hold");
    assert_eq!(lines[1], "  [pass] subject: starts with \"c\"");
    assert_eq!(
        lines[2],
        "  [FAIL] subject: is upper case: expected upper case text"
    );

    let quiet = Reporter::new(Policy {
        show_passed: false,
        ..Policy::default()
    });
    assert_eq!(quiet.render_tree(&record).lines().count(), 2);
}

#[test]
fn conclude_publishes_failures_only() {
    init_tracing();
    let reporter = Reporter::with_sink(Policy::default(), RecordingSink::default());

    let passed = reporter.conclude(expect("catflap").starts_with('c'));
    assert!(passed.is_ok());
    assert!(reporter.sink().published.borrow().is_empty());

    let failed = reporter.conclude(expect("catflap").is_upper_case());
    assert!(failed.is_err());
    let published = reporter.sink().published.borrow();
    assert_eq!(published.len(), 1);
    assert!(published[0].starts_with("subject: is upper case: 1 assertions, 0 passed, 1 failed"));
}

#[test]
fn report_is_a_no_op_for_passed_records() -> Result<(), AffirmError> {
    let mut scope = Collector::new();
    scope.expect(1u8).is_equal_to(1u8);
    report(&scope.fold("scope", Rule::All))?;
    report(&affirm_assert::Record::pending("untouched"))?;
    Ok(())
}

#[test]
fn tracing_sink_logs_without_panicking() {
    init_tracing();
    let err = pets_failure();
    let reporter: Reporter = Reporter::default();
    assert!(reporter.conclude::<()>(Err(err)).is_err());
}
