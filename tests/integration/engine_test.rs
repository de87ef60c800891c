use proptest::prelude::*;
use quadrature::function::{BoundedFunction, Exp, FnFunction, Log};
use quadrature::integration::{
    IntegrationError, StepSearchConfig, convergence_table, find_optimal_step, integrate,
    search_step,
};

const E_MINUS_ONE: f64 = std::f64::consts::E - 1.0;

#[test]
fn test_exp_unit_interval_fine_step() {
    let value = integrate(&Exp, 0.0, 1.0, 0.0001).unwrap();
    assert!((value - 1.718281828).abs() < 1e-3);
}

#[test]
fn test_double_x_on_zero_three() {
    let double = FnFunction::unbounded("2x", |x| 2.0 * x);
    let value = integrate(&double, 0.0, 3.0, 0.001).unwrap();
    assert!((value - 9.0).abs() < 1e-2);
}

#[test]
fn test_converges_as_step_shrinks() {
    let steps = [0.5, 0.1, 0.01, 0.001, 0.0001];
    let errors: Vec<f64> = steps
        .iter()
        .map(|&h| (integrate(&Exp, 0.0, 1.0, h).unwrap() - E_MINUS_ONE).abs())
        .collect();

    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0], "errors did not decrease: {:?}", errors);
    }
    assert!(errors[errors.len() - 1] < 1e-8);
}

#[test]
fn test_log_matches_closed_form() {
    let log = Log::new(10.0).unwrap();
    let exact = log.exact_integral(1.0, 100.0).unwrap();
    let value = integrate(&log, 1.0, 100.0, 0.001).unwrap();
    assert!((value - exact).abs() < 1e-4);
}

#[test]
fn test_domain_errors() {
    let log = Log::natural();
    assert!(matches!(
        integrate(&log, -0.5, 1.0, 0.01),
        Err(IntegrationError::Domain { .. })
    ));

    let unit = FnFunction::new("unit", 0.0, 1.0, |x| x);
    assert!(matches!(
        integrate(&unit, 0.5, 1.5, 0.01),
        Err(IntegrationError::Domain { .. })
    ));
    assert!(matches!(
        find_optimal_step(&unit, 0.5, 1.5, 1e-3, 0.1),
        Err(IntegrationError::Domain { .. })
    ));
}

#[test]
fn test_log_from_zero_is_rejected_everywhere() {
    let ln = Log::natural();
    assert!(matches!(
        integrate(&ln, 0.0, 1.0, 0.1),
        Err(IntegrationError::NonFinite { .. })
    ));
    assert!(matches!(
        find_optimal_step(&ln, 0.0, 1.0, 1e-6, 0.1),
        Err(IntegrationError::NonFinite { .. })
    ));
    assert!(matches!(
        convergence_table(&ln, 0.0, 1.0, &[0.5, 0.1]),
        Err(IntegrationError::NonFinite { .. })
    ));
}

#[test]
fn test_optimal_step_for_every_target() {
    for target in [1e-3, 1e-4, 1e-5, 1e-6, 1e-7, 1e-8] {
        let h = find_optimal_step(&Exp, 0.0, 1.0, target, 0.1).unwrap();
        let coarse = integrate(&Exp, 0.0, 1.0, h).unwrap();
        let fine = integrate(&Exp, 0.0, 1.0, h / 2.0).unwrap();
        assert!((coarse - fine).abs() < target);
    }
}

#[test]
fn test_optimal_step_with_different_initial_steps() {
    for initial in [1.0, 0.5, 0.1, 0.05] {
        let h = find_optimal_step(&Exp, 0.0, 1.0, 1e-7, initial).unwrap();
        assert!(h <= initial);
    }
}

#[test]
fn test_non_convergence_is_reported() {
    let config = StepSearchConfig::default().with_max_halvings(3);
    let err = search_step(&Exp, 0.0, 1.0, 1e-12, 1.0, &config).unwrap_err();
    assert!(matches!(err, IntegrationError::NonConvergence { .. }));
    assert!(err.to_string().contains("did not converge"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_returned_step_never_exceeds_initial(
        initial in 0.01f64..1.0,
        exponent in 3i32..8,
    ) {
        let target = 10f64.powi(-exponent);
        let h = find_optimal_step(&Exp, 0.0, 1.0, target, initial).unwrap();
        prop_assert!(h <= initial);
    }

    #[test]
    fn prop_smaller_target_gives_smaller_or_equal_step(
        initial in 0.01f64..1.0,
        exponent in 3i32..7,
    ) {
        let loose = find_optimal_step(&Exp, 0.0, 1.0, 10f64.powi(-exponent), initial).unwrap();
        let tight = find_optimal_step(&Exp, 0.0, 1.0, 10f64.powi(-exponent - 1), initial).unwrap();
        prop_assert!(tight <= loose);
    }

    #[test]
    fn prop_linear_functions_are_exact(
        slope in -10.0f64..10.0,
        intercept in -10.0f64..10.0,
        left in -5.0f64..0.0,
        width in 0.1f64..5.0,
        step in 0.01f64..1.0,
    ) {
        let line = FnFunction::unbounded("line", move |x| slope * x + intercept);
        let right = left + width;
        let exact = slope / 2.0 * (right * right - left * left) + intercept * width;
        let value = integrate(&line, left, right, step).unwrap();
        prop_assert!((value - exact).abs() < 1e-9);
    }

    #[test]
    fn prop_invalid_step_rejected(step in -10.0f64..=0.0) {
        let rejected = matches!(
            integrate(&Exp, 0.0, 1.0, step),
            Err(IntegrationError::InvalidArgument { .. })
        );
        prop_assert!(rejected);
    }
}
