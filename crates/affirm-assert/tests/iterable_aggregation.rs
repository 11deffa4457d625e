mod common;

use affirm_assert::{expect, AffirmError, FailureKind, Rule};

use common::{counts, init_tracing, kind, summary};

#[test]
fn all_reports_every_element() {
    init_tracing();
    let err = expect(vec!["catflap", "rubberplant", "marzipan"])
        .all(|it| {
            it.starts_with('c');
        })
        .err()
        .expect("two elements do not start with c");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (3, 1, 2));
    let summary = summary(&err);
    assert_eq!(summary.description, "subject: all elements match predicate");
    let actual: Vec<&str> = summary
        .failures
        .iter()
        .map(|detail| detail.context["actual"].as_str())
        .collect();
    assert_eq!(actual, ["\"rubberplant\"", "\"marzipan\""]);
}

#[test]
fn any_fails_when_no_element_matches() {
    let err = expect(vec!["CATFLAP", "RUBBERPLANT", "MARZIPAN"])
        .any(|it| {
            it.is_lower_case();
        })
        .err()
        .expect("no element is lower case");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (3, 0, 3));
}

#[test]
fn none_fails_when_some_element_matches() {
    let err = expect(vec!["catflap", "RUBBERPLANT", "MARZIPAN"])
        .none(|it| {
            it.is_upper_case();
        })
        .err()
        .expect("two elements are upper case");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (3, 2, 1));
    let failures = &summary(&err).failures;
    assert_eq!(failures[0].code, "none");
    assert_eq!(failures[0].context["held"], "element [1], element [2]");
    assert_eq!(failures.len(), 2);
}

#[test]
fn none_with_every_element_matching_lists_the_rule_violation() {
    let err = expect(vec!["CATFLAP", "RUBBERPLANT", "MARZIPAN"])
        .none(|it| {
            it.is_upper_case();
        })
        .err()
        .expect("every element is upper case");
    assert_eq!(counts(&err), (3, 3, 0));
    let failures = &summary(&err).failures;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].code, "none");
}

#[test]
fn passing_compositions() -> Result<(), AffirmError> {
    let pets = vec!["catflap", "rubberplant", "marzipan"];
    expect(pets.clone()).all(|it| {
        it.is_lower_case();
    })?;
    expect(pets.clone()).any(|it| {
        it.starts_with('r');
    })?;
    expect(pets).none(|it| {
        it.is_upper_case();
    })?;
    Ok(())
}

#[test]
fn element_blocks_fold_every_check() {
    let err = expect(vec!["catflap", "rubberplant"])
        .all(|it| {
            it.is_lower_case().has_length(7);
        })
        .err()
        .expect("rubberplant has 11 characters");
    assert_eq!(counts(&err), (4, 3, 1));
    assert_eq!(summary(&err).failures[0].code, "has-length");
}

#[test]
fn empty_all_and_none_pass() -> Result<(), AffirmError> {
    expect(Vec::<&str>::new()).all(|it| {
        it.is_lower_case();
    })?;
    expect(Vec::<&str>::new()).none(|it| {
        it.is_lower_case();
    })?;
    Ok(())
}

#[test]
fn empty_any_fails() {
    let err = expect(Vec::<&str>::new())
        .any(|it| {
            it.is_lower_case();
        })
        .err()
        .expect("nothing to match");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(summary(&err).failures[0].message, "no children were checked");
}

#[test]
fn nested_runs_every_sibling() {
    let err = expect("catflap")
        .nested("several checks", Rule::All, |subject, scope| {
            scope.expect(*subject).has_length(3);
            scope.expect(*subject).starts_with('c');
            scope.expect(*subject).is_upper_case();
        })
        .err()
        .expect("two siblings fail");
    assert_eq!(counts(&err), (3, 1, 2));
    assert_eq!(summary(&err).description, "subject: several checks");
}

#[test]
fn and_groups_checks_on_the_same_subject() {
    let err = expect("catflap")
        .and(|it| {
            it.has_length(3).starts_with('c').is_upper_case();
        })
        .err()
        .expect("failed checks do not stop the chain");
    assert_eq!(kind(&err), FailureKind::AggregateFailed);
    assert_eq!(counts(&err), (3, 1, 2));
}

#[test]
fn nested_compositions_count_leaves() {
    let err = expect(vec![vec!["catflap"], vec!["RUBBERPLANT", "marzipan"]])
        .all(|group| {
            group.any(|it| {
                it.is_upper_case();
            });
        })
        .err()
        .expect("first group has no upper case element");
    assert_eq!(counts(&err), (3, 1, 2));
}

#[test]
fn borrowed_subjects_iterate_in_place() -> Result<(), AffirmError> {
    let pets = vec!["catflap".to_string(), "marzipan".to_string()];
    expect(&pets).all(|it| {
        it.is_lower_case();
    })?;
    expect(&pets).has_size(2)?;
    Ok(())
}
