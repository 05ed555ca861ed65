use super::*;
use proptest::prelude::*;

fn int_cmp() -> CompFunc<i64> {
    CompFunc::natural()
}

fn int_less() -> CondFunc<i64> {
    CondFunc::new(|a: &i64, b: &i64| a < b)
}

#[test]
fn plain_operators_follow_std_ordering() {
    let cases = [
        // (a, b, eq, ne, gt, ge, lt, le)
        (5, 5, true, false, false, true, false, true),
        (5, 10, false, true, false, false, true, true),
        (10, 5, false, true, true, true, false, false),
        (-5, -10, false, true, true, true, false, false),
        (0, 0, true, false, false, true, false, true),
    ];

    for (a, b, e, ne, g, ge, l, le) in cases {
        assert_eq!(eq(&a, &b), e, "eq({a}, {b})");
        assert_eq!(not_eq(&a, &b), ne, "not_eq({a}, {b})");
        assert_eq!(gt(&a, &b), g, "gt({a}, {b})");
        assert_eq!(gt_eq(&a, &b), ge, "gt_eq({a}, {b})");
        assert_eq!(lt(&a, &b), l, "lt({a}, {b})");
        assert_eq!(lt_eq(&a, &b), le, "lt_eq({a}, {b})");
    }
}

#[test]
fn plain_operators_accept_unsized_text() {
    assert!(eq("hello", "hello"));
    assert!(not_eq("", "hello"));
    assert!(lt("apple", "banana"));
}

#[test]
fn comparator_operators_agree_with_plain_operators() {
    let cmp = int_cmp();

    for (a, b) in [(5, 5), (5, 10), (10, 5)] {
        assert_eq!(eq_fn(&a, &b, &cmp), Ok(eq(&a, &b)));
        assert_eq!(not_eq_fn(&a, &b, &cmp), Ok(not_eq(&a, &b)));
        assert_eq!(gt_fn(&a, &b, &cmp), Ok(gt(&a, &b)));
        assert_eq!(gt_eq_fn(&a, &b, &cmp), Ok(gt_eq(&a, &b)));
        assert_eq!(lt_fn(&a, &b, &cmp), Ok(lt(&a, &b)));
        assert_eq!(lt_eq_fn(&a, &b, &cmp), Ok(lt_eq(&a, &b)));
    }
}

#[test]
fn condition_operators_agree_with_plain_operators() {
    let less = int_less();
    let equal = CondFunc::new(|a: &i64, b: &i64| a == b);

    for (a, b) in [(5, 5), (5, 10), (10, 5)] {
        assert_eq!(eq_fn2(&a, &b, &equal), Ok(eq(&a, &b)));
        assert_eq!(not_eq_fn2(&a, &b, &equal), Ok(not_eq(&a, &b)));
        assert_eq!(gt_fn2(&a, &b, &less), Ok(gt(&a, &b)));
        assert_eq!(gt_eq_fn2(&a, &b, &less), Ok(gt_eq(&a, &b)));
        assert_eq!(lt_fn2(&a, &b, &less), Ok(lt(&a, &b)));
        assert_eq!(lt_eq_fn2(&a, &b, &less), Ok(lt_eq(&a, &b)));
    }
}

#[test]
fn absent_comparator_is_rejected_everywhere() {
    let cmp = CompFunc::<i64>::absent();

    assert_eq!(eq_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));
    assert_eq!(not_eq_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));
    assert_eq!(gt_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));
    assert_eq!(gt_eq_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));
    assert_eq!(lt_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));
    assert_eq!(lt_eq_fn(&1, &2, &cmp), Err(CompareError::NilCompFunc));

    assert_eq!(as_less(&cmp).unwrap_err(), CompareError::NilCompFunc);
    assert_eq!(as_equal(&cmp).unwrap_err(), CompareError::NilCompFunc);
    assert_eq!(reverse(&cmp).unwrap_err(), CompareError::NilCompFunc);
}

#[test]
fn absent_condition_is_rejected_everywhere() {
    let cond = CondFunc::<i64>::default();

    assert_eq!(eq_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
    assert_eq!(not_eq_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
    assert_eq!(gt_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
    assert_eq!(gt_eq_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
    assert_eq!(lt_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
    assert_eq!(lt_eq_fn2(&1, &2, &cond), Err(CompareError::NilCondFunc));
}

#[test]
fn signed_comparator_only_reads_the_sign() {
    struct Keyed {
        key: i64,
    }

    let cmp = CompFunc::from_sign(|a: &Keyed, b: &Keyed| a.key - b.key);
    let small = Keyed { key: 3 };
    let large = Keyed { key: 300 };

    assert_eq!(cmp.compare(&small, &large), Ok(Ordering::Less));
    assert_eq!(cmp.compare(&large, &small), Ok(Ordering::Greater));
    assert_eq!(cmp.compare(&small, &small), Ok(Ordering::Equal));
}

#[test]
fn reversed_comparator_flips_strict_results_only() {
    let reversed = reverse(&int_cmp()).expect("present comparator");

    assert_eq!(reversed.compare(&1, &2), Ok(Ordering::Greater));
    assert_eq!(reversed.compare(&2, &1), Ok(Ordering::Less));
    assert_eq!(reversed.compare(&7, &7), Ok(Ordering::Equal));
}

#[test]
fn debug_reports_presence() {
    assert_eq!(format!("{:?}", CompFunc::<u8>::absent()), "CompFunc(\"absent\")");
    assert_eq!(format!("{:?}", int_less()), "CondFunc(\"present\")");
}

proptest! {
    #[test]
    fn as_less_matches_negative_comparison(a in any::<i64>(), b in any::<i64>()) {
        let cmp = int_cmp();
        let less = as_less(&cmp).expect("present comparator");
        let expected = cmp.compare(&a, &b).expect("present comparator") == Ordering::Less;
        prop_assert_eq!(less.test(&a, &b), Ok(expected));
    }

    #[test]
    fn as_equal_matches_zero_comparison(a in -4i64..4, b in -4i64..4) {
        let cmp = int_cmp();
        let equal = as_equal(&cmp).expect("present comparator");
        prop_assert_eq!(equal.test(&a, &b), Ok(a == b));
    }

    #[test]
    fn reverse_is_an_involution(a in any::<i64>(), b in any::<i64>()) {
        let cmp = int_cmp();
        let twice = reverse(&reverse(&cmp).expect("present")).expect("present");
        prop_assert_eq!(twice.compare(&a, &b), cmp.compare(&a, &b));
    }
}
