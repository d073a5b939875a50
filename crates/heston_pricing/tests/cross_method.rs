//! Cross-method consistency: the Monte Carlo engine against the
//! semi-analytic characteristic-function pricer.

use heston_models::params::{EuropeanCall, HestonParams, Market};
use heston_models::semi_analytic;
use heston_pricing::mc::{McConfig, McPricer, VarianceScheme};

const ALL_SCHEMES: [VarianceScheme; 4] = [
    VarianceScheme::Absorption,
    VarianceScheme::Reflection,
    VarianceScheme::ReflectionMilstein,
    VarianceScheme::Alfonsi,
];

fn pricer(n_paths: usize, n_steps: usize, scheme: VarianceScheme, seed: u64) -> McPricer {
    let config = McConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .scheme(scheme)
        .seed(seed)
        .build()
        .unwrap();
    McPricer::new(config).unwrap()
}

/// All four schemes agree with the analytic price when the Feller
/// condition holds and discretisation bias is small.
#[test]
fn schemes_agree_with_semi_analytic_under_feller() {
    let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
    let market = Market::new(100.0, 0.03).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    let analytic = semi_analytic::call_price(&params, &market, &contract).unwrap();

    for scheme in ALL_SCHEMES {
        let result = pricer(20_000, 250, scheme, 42)
            .simulate(&params, &market, &contract)
            .unwrap();

        // 3 standard errors plus a small discretisation-bias allowance.
        let tolerance = 3.0 * result.std_error + 0.05;
        assert!(
            (result.price - analytic).abs() < tolerance,
            "{scheme:?}: mc = {}, analytic = {analytic}, std_error = {}",
            result.price,
            result.std_error
        );
    }
}

/// The reference scenario violates Feller, so the corrective schemes earn
/// their keep here. The widened interval allows for the residual
/// discretisation bias each scheme carries at this step size.
#[test]
fn reference_scenario_brackets_semi_analytic_price() {
    let params = HestonParams::new(6.21, 0.019, 0.61, -0.7, 0.010201).unwrap();
    let market = Market::new(100.0, 0.0319).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    let analytic = semi_analytic::call_price(&params, &market, &contract).unwrap();
    assert!(analytic > 6.5 && analytic < 7.2);

    for scheme in ALL_SCHEMES {
        let result = pricer(3000, 2000, scheme, 20240817)
            .simulate(&params, &market, &contract)
            .unwrap();

        let tolerance = 2.0 * result.std_error + 0.3;
        assert!(
            (result.price - analytic).abs() < tolerance,
            "{scheme:?}: mc = {}, analytic = {analytic}, std_error = {}",
            result.price,
            result.std_error
        );
        assert!(
            result.negative_variance_fraction > 0.0,
            "{scheme:?}: expected negative raw updates under Feller violation"
        );
    }
}

/// Alfonsi is downgraded to ReflectionMilstein when Feller fails; with the
/// same seed the two requests must produce bit-identical results.
#[test]
fn alfonsi_downgrade_matches_reflection_milstein_exactly() {
    let params = HestonParams::new(6.21, 0.019, 0.61, -0.7, 0.010201).unwrap();
    let market = Market::new(100.0, 0.0319).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();
    assert!(!params.satisfies_feller());

    let alfonsi = pricer(2000, 200, VarianceScheme::Alfonsi, 5)
        .simulate(&params, &market, &contract)
        .unwrap();
    let milstein = pricer(2000, 200, VarianceScheme::ReflectionMilstein, 5)
        .simulate(&params, &market, &contract)
        .unwrap();

    assert_eq!(alfonsi, milstein);
}

/// Out-of-the-money and in-the-money strikes, not just ATM.
#[test]
fn strike_ladder_agrees_with_semi_analytic() {
    let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
    let market = Market::new(100.0, 0.03).unwrap();

    for &strike in &[85.0, 100.0, 115.0] {
        let contract = EuropeanCall::new(strike, 1.0).unwrap();
        let analytic = semi_analytic::call_price(&params, &market, &contract).unwrap();

        let result = pricer(20_000, 200, VarianceScheme::ReflectionMilstein, 99)
            .simulate(&params, &market, &contract)
            .unwrap();

        let tolerance = 3.0 * result.std_error + 0.05;
        assert!(
            (result.price - analytic).abs() < tolerance,
            "strike {strike}: mc = {}, analytic = {analytic}",
            result.price
        );
    }
}

/// Repeating a seeded simulation across separate pricer instances must
/// reproduce the result exactly.
#[test]
fn seeded_runs_reproduce_across_instances() {
    let params = HestonParams::new(6.21, 0.019, 0.61, -0.7, 0.010201).unwrap();
    let market = Market::new(100.0, 0.0319).unwrap();
    let contract = EuropeanCall::new(100.0, 1.0).unwrap();

    let a = pricer(10_000, 100, VarianceScheme::Absorption, 7)
        .simulate(&params, &market, &contract)
        .unwrap();
    let b = pricer(10_000, 100, VarianceScheme::Absorption, 7)
        .simulate(&params, &market, &contract)
        .unwrap();

    assert_eq!(a, b);
}
