// This is actually defined at `crate::grammar::tests_for_grammar`

use crate::grammar::*;
use crate::chart::{ANY_RULE, GAMMA_RULE};
use crate::tests::*;

#[test]
fn lookup_keeps_rule_order() {
    let g = list_grammar();
    assert_eq!(g.len(), 3);
    assert!(!g.is_empty());
    assert!(Grammar::default().is_empty());
    let names: Vec<&str> = g.rules().map(|r| r.name()).collect();
    assert_eq!(names, vec!["list", "items", "item"]);
    assert_eq!(g.rule("items").map(|r| r.bodies().len()), Some(2));
    assert!(g.rule("missing").is_none());
}

#[test]
fn reserved_names_are_rejected() {
    for name in [GAMMA_RULE, ANY_RULE] {
        let err = Grammar::new(vec![Rule::new(name, vec![body(vec![t("a")])])]).unwrap_err();
        assert_eq!(err, GrammarError::ReservedName(name.to_string()));
    }
}

#[test]
fn reserved_names_cannot_be_referenced() {
    for name in [GAMMA_RULE, ANY_RULE] {
        let err = Grammar::new(vec![
            Rule::new("s", vec![body(vec![nt(name), t("b")])]),
        ]).unwrap_err();
        assert_eq!(err, GrammarError::ReservedName(name.to_string()));
    }
}

#[test]
fn duplicate_rules_are_rejected() {
    let err = Grammar::new(vec![
        Rule::new("a", vec![body(vec![t("x")])]),
        Rule::new("a", vec![body(vec![t("y")])]),
    ]).unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule("a".into()));
}

#[test]
fn malformed_bodies_are_rejected() {
    assert_eq!(Grammar::new(vec![Rule::new("a", vec![])]).unwrap_err(),
               GrammarError::EmptyRule("a".into()));
    assert_eq!(Grammar::new(vec![Rule::new("a", vec![body(vec![t("")])])]).unwrap_err(),
               GrammarError::EmptyTerminal { rule: "a".into() });
    assert_eq!(Grammar::new(vec![Rule::new("a", vec![body(vec![Term::bounded(3, 2)])])]).unwrap_err(),
               GrammarError::InvertedBounds { rule: "a".into(), min: 3, max: 2 });
}

#[test]
fn empty_bodies_are_allowed() {
    let g = Grammar::new(vec![Rule::new("a", vec![body(vec![])])]).unwrap();
    assert!(g.rule("a").unwrap().bodies()[0].terms().is_empty());
}

#[test]
fn undefined_references() {
    let g = Grammar::new(vec![Rule::new("a", vec![body(vec![nt("b")])])]).unwrap();
    assert_eq!(g.check_references().unwrap_err(),
               GrammarError::UndefinedNonTerminal { rule: "a".into(), missing: "b".into() });

    let h = Grammar::new(vec![Rule::new("b", vec![body(vec![t("b")])])]).unwrap();
    assert_eq!(Grammar::check_references_across(&[g, h]), Ok(()));
    assert_eq!(list_grammar().check_references(), Ok(()));
}

#[test]
fn notation() {
    let g = list_grammar();
    assert_eq!(g.rule("items").unwrap().to_string(),
               r#"<items> = <items> " " <item> {sum($1, $3)} | <item> {nf.I($1)} ;"#);
    let any = Rule::new("any", vec![
        body(vec![Term::wildcard(), Term::bounded(1, 2)]),
        body(vec![]),
    ]);
    assert_eq!(any.to_string(), "<any> = (any) (any){1,2} | \u{03B5} ;");
}

#[test]
fn bounds() {
    let b = Bounds { min: 1, max: 2 };
    assert!(!b.contains(0));
    assert!(b.contains(1));
    assert!(b.contains(2));
    assert!(!b.contains(3));
}
