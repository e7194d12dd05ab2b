use aeolus_econ::{DiscountRate, EconError, Financing, lcoe, simple_lcoe};
use approx::assert_abs_diff_eq;

#[test]
fn simple_lcoe_with_defaults() {
    let v = simple_lcoe(1000.0, 100.0, &Financing::default()).unwrap();
    assert_abs_diff_eq!(v, 1.218_522_088_231_505_8, epsilon = 1e-12);
}

#[test]
fn simple_lcoe_scales_with_capex() {
    let f = Financing::default();
    let a = simple_lcoe(1000.0, 100.0, &f).unwrap();
    let b = simple_lcoe(2000.0, 100.0, &f).unwrap();
    assert_abs_diff_eq!(b, 2.0 * a, epsilon = 1e-12);
}

#[test]
fn lcoe_uniform_rate() {
    let v = lcoe(
        &[1000.0, 50.0, 50.0, 50.0],
        &[0.0, 200.0, 200.0, 200.0],
        &DiscountRate::Uniform(0.08),
    )
    .unwrap();
    assert_abs_diff_eq!(v, 2.190_167_570_231_641_7, epsilon = 1e-12);
}

#[test]
fn lcoe_per_year_rate() {
    let v = lcoe(
        &[1000.0, 50.0, 50.0, 50.0],
        &[0.0, 200.0, 200.0, 200.0],
        &DiscountRate::PerYear(vec![0.05, 0.06, 0.07, 0.08]),
    )
    .unwrap();
    assert_abs_diff_eq!(v, 2.165_219_223_736_832, epsilon = 1e-12);
}

#[test]
fn lcoe_errors() {
    assert_eq!(
        lcoe(&[], &[], &DiscountRate::default()).unwrap_err(),
        EconError::EmptyData
    );
    assert!(matches!(
        lcoe(&[1.0, 2.0], &[1.0], &DiscountRate::default()),
        Err(EconError::LengthMismatch { expected: 2, got: 1, .. })
    ));
    assert!(matches!(
        lcoe(&[1.0, 2.0], &[0.0, 0.0], &DiscountRate::default()),
        Err(EconError::NoProduction { .. })
    ));
}

#[test]
fn financing_fills_missing_fields() {
    let f: Financing = serde_json::from_str(r#"{"lifetime": 25}"#).unwrap();
    assert_eq!(f.lifetime, 25);
    assert_abs_diff_eq!(f.discount_rate, 0.08);
}
