// This is actually defined at `crate::chart::tests_for_chart`

use std::sync::Arc;

use crate::chart::*;
use crate::grammar::{Bounds, Term};
use crate::tests::*;

fn ab() -> Arc<crate::grammar::RuleBody> {
    Arc::new(body(vec![t("a"), nt("b")]))
}

#[test]
fn insert_stamps_end_and_dedups() {
    let mut column = TableColumn::new(2, None);
    let (i, changed) = column.insert(TableState::rule("s", ab(), 0));
    assert_eq!((i, changed), (0, true));
    assert_eq!(column.states()[0].end(), 2);

    // a structurally equal state, built from a separate allocation
    let (i, changed) = column.insert(TableState::rule("s", ab(), 0));
    assert_eq!((i, changed), (0, false));

    let (i, changed) = column.insert(TableState::rule("s", ab(), 0).advanced());
    assert_eq!((i, changed), (1, true));
    let (i, changed) = column.insert(TableState::rule("s", ab(), 1));
    assert_eq!((i, changed), (2, true));
    assert_eq!(column.states().len(), 3);
}

#[test]
fn wildcards_with_the_same_span_collapse() {
    let bounded = TableState { end: 3, dot: 1, ..TableState::wildcard(Some(Bounds { min: 1, max: 2 }), 2) };
    let unbounded = TableState { end: 3, dot: 1, ..TableState::wildcard(None, 2) };
    assert!(same_entry(&unbounded, &bounded));

    let elsewhere = TableState { end: 3, dot: 2, ..TableState::wildcard(None, 1) };
    assert!(!same_entry(&elsewhere, &bounded));

    let mut column = TableColumn::new(3, None);
    column.insert(bounded.clone());
    assert_eq!(column.insert(unbounded), (0, false));
    assert_eq!(column.states()[0].kind(), &StateKind::Wildcard(Some(Bounds { min: 1, max: 2 })));
    assert_eq!(column.insert(elsewhere), (1, true));
}

#[test]
fn rule_states_never_match_wildcards() {
    let rule = TableState::rule(ANY_RULE, ab(), 0);
    let wildcard = TableState::wildcard(None, 0);
    assert!(!same_entry(&rule, &wildcard));
    assert!(!same_entry(&wildcard, &rule));
}

#[test]
fn completion() {
    let s = TableState::rule("s", ab(), 0);
    assert!(!s.is_completed());
    assert_eq!(s.next_term(), Some(&t("a")));
    let s = s.advanced().advanced();
    assert!(s.is_completed());
    assert_eq!(s.next_term(), None);

    let empty = TableState::rule("e", Arc::new(body(vec![])), 0);
    assert!(empty.is_completed());

    let mut w = TableState::wildcard(None, 0);
    assert!(!w.is_completed());
    assert!(w.can_extend());
    w = w.advanced();
    assert!(w.is_completed());
    assert_eq!(w.next_term(), None);

    let mut w = TableState::wildcard(Some(Bounds { min: 1, max: 2 }), 0);
    let mut seen = vec![];
    loop {
        seen.push((w.dot(), w.is_completed()));
        if !w.can_extend() { break; }
        w = w.advanced();
    }
    assert_eq!(seen, vec![(0, false), (1, true), (2, true)]);

    let w = TableState::wildcard(Some(Bounds { min: 0, max: 1 }), 0);
    assert!(w.is_completed());
}

#[test]
fn awaiting() {
    let s = TableState::rule("s", Arc::new(body(vec![nt("b"), Term::wildcard()])), 0);
    let b = TableState::rule("b", ab(), 0).advanced().advanced();
    let c = TableState::rule("c", ab(), 0).advanced().advanced();
    let w = TableState::wildcard(None, 0).advanced();
    assert!(s.awaits(&b));
    assert!(!s.awaits(&c));
    assert!(!s.awaits(&w));

    let s = s.advanced();
    assert!(s.awaits(&w));
    assert!(!s.awaits(&b));

    // wildcard states advance by scanning only
    assert!(!TableState::wildcard(None, 0).awaits(&w));
}

#[test]
fn dotted_notation() {
    let s = TableState { end: 1, ..TableState::rule("s", ab(), 0).advanced() };
    assert_eq!(s.to_string(), r#"s -> "a" • <b> [0, 1]"#);
    let done = TableState { end: 2, ..s.advanced() };
    assert_eq!(done.to_string(), r#"s -> "a" <b> • [0, 2]"#);
    let w = TableState { end: 3, ..TableState::wildcard(Some(Bounds { min: 1, max: 2 }), 1).advanced().advanced() };
    assert_eq!(w.to_string(), "\u{2217} -> (any){1,2} x2 [1, 3]");
}
