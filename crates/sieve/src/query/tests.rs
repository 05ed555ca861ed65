use super::*;
use crate::{
    compare::{CompFunc, CondFunc},
    test_fixtures::{Person, person},
};
use proptest::prelude::*;

fn is_adult() -> Query<Person> {
    compose_query(Accessor::new(|p: &Person| p.age), gt_eq_query(18)).expect("valid composition")
}

fn is_named(name: &'static str) -> Query<Person> {
    compose_query(Accessor::new(|p: &Person| p.name.clone()), eq_query(name.to_string()))
        .expect("valid composition")
}

#[test]
fn composed_queries_read_through_accessor() {
    let alice = person("Alice", 30);
    let bob = person("Bob", 10);
    let john = person("John", 25);

    assert!(is_adult().matches(&alice));
    assert!(!is_adult().matches(&bob));
    assert!(is_named("John").matches(&john));
    assert!(!is_named("John").matches(&alice));
}

#[test]
fn absent_function_matches_everything() {
    let query = Query::<Person>::default();

    assert!(query.matches(&person("Alice", 30)));
    assert!(QueryFunc::<Person>::absent().matches(&person("Bob", 1)));
}

#[test]
fn adult_named_john_or_bob_matches_john_only() {
    let query = is_adult().and(is_named("John").or(is_named("Bob")));

    assert!(query.matches(&person("John", 25)));
    assert!(!query.matches(&person("Bob", 10)));
    assert!(!query.matches(&person("Alice", 30)));
}

#[test]
fn match_any_ignores_absent_entries() {
    let any = match_any([Some(is_adult()), None, Some(is_named("John"))]);

    assert!(any.matches(&person("Alice", 30)));
    assert!(any.matches(&person("John", 15)));
    assert!(!any.matches(&person("Bob", 10)));
}

#[test]
fn match_all_ignores_absent_entries() {
    let all = match_all([Some(is_adult()), None, Some(is_named("John"))]);

    assert!(all.matches(&person("John", 25)));
    assert!(!all.matches(&person("John", 15)));
    assert!(!all.matches(&person("Alice", 30)));
}

#[test]
fn empty_lists_have_identity_semantics() {
    let someone = person("Alice", 30);

    assert!(match_all(Vec::<Query<Person>>::new()).matches(&someone));
    assert!(!match_any(Vec::<Query<Person>>::new()).matches(&someone));
    assert!(match_all([None::<Query<Person>>]).matches(&someone));
    assert!(!match_any([None::<Query<Person>>]).matches(&someone));
}

#[test]
fn and_chain_flattens_into_one_list() {
    let query = is_adult()
        .and(is_named("John"))
        .and(None::<Query<Person>>)
        .and_all([is_named("John"), is_adult()]);

    let Query::All(children) = &query else {
        panic!("expected AND-list, got {query:?}");
    };
    assert_eq!(children.len(), 5);
    assert!(children[2].is_none());
}

#[test]
fn or_chain_flattens_into_one_list() {
    let query = is_named("Bob").or(is_named("John")).or(is_named("Alice"));

    let Query::Any(children) = &query else {
        panic!("expected OR-list, got {query:?}");
    };
    assert_eq!(children.len(), 3);
    assert!(query.matches(&person("Alice", 3)));
}

#[test]
fn and_after_or_nests_instead_of_flattening() {
    let query = is_named("Bob").or(is_named("John")).and(is_adult());

    let Query::All(children) = &query else {
        panic!("expected AND-list, got {query:?}");
    };
    assert!(matches!(children[0], Some(Query::Any(_))));
    assert!(query.matches(&person("John", 40)));
    assert!(!query.matches(&person("Bob", 10)));
}

#[test]
fn cloned_list_is_independent_of_the_original() {
    let base = match_all([is_adult()]);
    let widened = base.clone().and(is_named("John"));

    let (Query::All(base_children), Query::All(widened_children)) = (&base, &widened) else {
        panic!("expected AND-lists");
    };
    assert_eq!(base_children.len(), 1);
    assert_eq!(widened_children.len(), 2);
    assert!(base.matches(&person("Alice", 30)));
    assert!(!widened.matches(&person("Alice", 30)));
}

#[test]
fn operators_mirror_methods() {
    let query = is_adult() & (is_named("John") | is_named("Bob"));
    let negated = !is_adult();

    assert!(query.matches(&person("John", 25)));
    assert!(!query.matches(&person("Bob", 10)));
    assert!(negated.matches(&person("Bob", 10)));
}

#[test]
fn compose_rejects_absent_arguments() {
    let err = compose_query(Accessor::<Person, u32>::absent(), gt_eq_query(18)).unwrap_err();
    assert_eq!(err, QueryError::NilAccessor);

    let err = compose_query(Accessor::new(|p: &Person| p.age), None::<Query<u32>>).unwrap_err();
    assert_eq!(err, QueryError::NilQuery);
}

#[test]
fn value_queries_bind_their_constant() {
    let cases: [(Query<i32>, [bool; 3]); 6] = [
        // inputs 4, 5, 6 against constant 5
        (eq_query(5), [false, true, false]),
        (not_eq_query(5), [true, false, true]),
        (gt_query(5), [false, false, true]),
        (gt_eq_query(5), [false, true, true]),
        (lt_query(5), [true, false, false]),
        (lt_eq_query(5), [true, true, false]),
    ];

    for (query, expected) in cases {
        let actual = [4, 5, 6].map(|x| query.matches(&x));
        assert_eq!(actual, expected, "{query:?}");
    }
}

#[test]
fn custom_function_queries_match_default_variants() {
    let cmp = CompFunc::<i32>::natural();
    let less = CondFunc::new(|a: &i32, b: &i32| a < b);
    let equal = CondFunc::new(|a: &i32, b: &i32| a == b);

    let pairs: Vec<(Query<i32>, Query<i32>)> = vec![
        (eq_query(5), eq_query_fn(5, &cmp).unwrap()),
        (eq_query(5), eq_query_fn2(5, &equal).unwrap()),
        (not_eq_query(5), not_eq_query_fn(5, &cmp).unwrap()),
        (not_eq_query(5), not_eq_query_fn2(5, &equal).unwrap()),
        (gt_query(5), gt_query_fn(5, &cmp).unwrap()),
        (gt_query(5), gt_query_fn2(5, &less).unwrap()),
        (gt_eq_query(5), gt_eq_query_fn(5, &cmp).unwrap()),
        (gt_eq_query(5), gt_eq_query_fn2(5, &less).unwrap()),
        (lt_query(5), lt_query_fn(5, &cmp).unwrap()),
        (lt_query(5), lt_query_fn2(5, &less).unwrap()),
        (lt_eq_query(5), lt_eq_query_fn(5, &cmp).unwrap()),
        (lt_eq_query(5), lt_eq_query_fn2(5, &less).unwrap()),
    ];

    for (default, custom) in pairs {
        for x in 3..8 {
            assert_eq!(default.matches(&x), custom.matches(&x), "x = {x}");
        }
    }
}

#[test]
fn custom_function_queries_reject_absent_functions() {
    let cmp = CompFunc::<i32>::absent();
    let cond = CondFunc::<i32>::absent();
    let nil_cmp = QueryError::Compare(CompareError::NilCompFunc);
    let nil_cond = QueryError::Compare(CompareError::NilCondFunc);

    assert_eq!(eq_query_fn(1, &cmp).unwrap_err(), nil_cmp);
    assert_eq!(not_eq_query_fn(1, &cmp).unwrap_err(), nil_cmp);
    assert_eq!(gt_query_fn(1, &cmp).unwrap_err(), nil_cmp);
    assert_eq!(gt_eq_query_fn(1, &cmp).unwrap_err(), nil_cmp);
    assert_eq!(lt_query_fn(1, &cmp).unwrap_err(), nil_cmp);
    assert_eq!(lt_eq_query_fn(1, &cmp).unwrap_err(), nil_cmp);

    assert_eq!(eq_query_fn2(1, &cond).unwrap_err(), nil_cond);
    assert_eq!(not_eq_query_fn2(1, &cond).unwrap_err(), nil_cond);
    assert_eq!(gt_query_fn2(1, &cond).unwrap_err(), nil_cond);
    assert_eq!(gt_eq_query_fn2(1, &cond).unwrap_err(), nil_cond);
    assert_eq!(lt_query_fn2(1, &cond).unwrap_err(), nil_cond);
    assert_eq!(lt_eq_query_fn2(1, &cond).unwrap_err(), nil_cond);
}

// ----------------------------------------------------------------------
// Algebra laws
// ----------------------------------------------------------------------

fn arb_leaf() -> impl Strategy<Value = Query<i64>> {
    prop_oneof![
        (-10i64..10).prop_map(gt_query),
        (-10i64..10).prop_map(lt_eq_query),
        (-10i64..10).prop_map(eq_query),
        (2i64..5).prop_map(|m| Query::func(move |x: &i64| x % m == 0)),
        Just(Query::default()),
    ]
}

fn arb_query() -> impl Strategy<Value = Query<i64>> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        let slot = prop_oneof![Just(None), inner.clone().prop_map(Some)];
        prop_oneof![
            prop::collection::vec(slot.clone(), 0..4).prop_map(Query::All),
            prop::collection::vec(slot, 0..4).prop_map(Query::Any),
            inner.prop_map(|q| !q),
        ]
    })
}

proptest! {
    #[test]
    fn and_is_conjunction(a in arb_query(), b in arb_query(), x in -20i64..20) {
        let expected = a.matches(&x) && b.matches(&x);
        prop_assert_eq!(a.and(b).matches(&x), expected);
    }

    #[test]
    fn or_is_disjunction(a in arb_query(), b in arb_query(), x in -20i64..20) {
        let expected = a.matches(&x) || b.matches(&x);
        prop_assert_eq!(a.or(b).matches(&x), expected);
    }

    #[test]
    fn absent_entries_are_transparent(p in arb_query(), q in arb_query(), x in -20i64..20) {
        let with_gap = match_all([Some(p.clone()), None, Some(q.clone())]);
        let without = match_all([p.clone(), q.clone()]);
        prop_assert_eq!(with_gap.matches(&x), without.matches(&x));

        let with_gap = match_any([Some(p.clone()), None, Some(q.clone())]);
        let without = match_any([p, q]);
        prop_assert_eq!(with_gap.matches(&x), without.matches(&x));
    }

    #[test]
    fn and_is_commutative(a in arb_query(), b in arb_query(), x in -20i64..20) {
        prop_assert_eq!(
            a.clone().and(b.clone()).matches(&x),
            b.and(a).matches(&x)
        );
    }
}
