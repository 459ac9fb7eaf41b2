//! Fuzzy brake-pressure controller.
//!
//! Distance to an obstacle and vehicle speed are fuzzified against three terms each,
//! a fixed 3×3 rule matrix infers how strongly each brake pressure term applies, and
//! the activations are defuzzified into one percentage.
//!
//! ```
//! assert_eq!(fuzzy_brake::compute_brake_pressure(0., 140.).unwrap(), "60.00%");
//! ```

mod config;
mod defuzz;
mod error;
mod fuzzify;
mod inference;
mod inputs;
mod membership;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{Config, InferenceConfig, RangeTable};
pub use defuzz::{defuzzify, Percentage};
pub use error::{Error, Result};
pub use fuzzify::{fuzzify, Memberships};
pub use inference::{Activations, MamdaniInference};
pub use inputs::Inputs;
pub use membership::{trapezoid_l, trapezoid_r, triangular, Shape, TermRange};
pub use ops::{AndOp, OrOp};
pub use outputs::Outputs;
pub use rules::Rules;
pub use terms::{Distance, LinguisticTerm, Pressure, Speed, Terms};
pub use variable::{LinguisticVariable, Region, Variables, DISTANCE_RANGES, PRESSURE_RANGES, SPEED_RANGES};

/// Recommended brake pressure for the stock tables and min/max inference, e.g. `"42.00%"`.
///
/// Negative or non-finite readings are rejected with [`Error::InvalidInput`].
pub fn compute_brake_pressure(distance: f64, speed: f64) -> Result<String> {
    let inputs = Inputs::new(distance, speed)?;
    let vars = Variables::reference()?;
    let outputs = MamdaniInference::default().eval(&vars, &Rules::default(), &inputs)?;

    Ok(outputs.pressure().to_string())
}

#[test]
fn test_scenarios() {
    // Both inputs sit on a plateau, so exactly one rule fires at full strength
    assert_eq!(compute_brake_pressure(0., 0.).unwrap(), "50.00%");
    assert_eq!(compute_brake_pressure(100., 0.).unwrap(), "0.00%");
    assert_eq!(compute_brake_pressure(0., 140.).unwrap(), "60.00%");

    // CLOSE is 2/3 at 10 and SLOW is 3/4, so MEDIUM fires at 2/3
    assert_eq!(compute_brake_pressure(10., 10.).unwrap(), "56.67%");

    assert_eq!(compute_brake_pressure(55., 70.).unwrap(), "56.71%");
}

#[test]
fn test_out_of_range_inputs_saturate() {
    assert_eq!(compute_brake_pressure(1000., 0.).unwrap(), compute_brake_pressure(100., 0.).unwrap());
    assert_eq!(compute_brake_pressure(0., 300.).unwrap(), compute_brake_pressure(0., 140.).unwrap());
}

#[test]
fn test_pipeline_is_idempotent() {
    for (distance, speed) in [(12., 35.), (25., 105.), (45., 75.), (58., 120.)] {
        assert_eq!(compute_brake_pressure(distance, speed).unwrap(), compute_brake_pressure(distance, speed).unwrap());
    }
}

#[test]
fn test_rejects_invalid_input() {
    assert!(matches!(compute_brake_pressure(-1., 10.), Err(Error::InvalidInput { .. })));
    assert!(matches!(compute_brake_pressure(10., f64::INFINITY), Err(Error::InvalidInput { .. })));
}

#[test]
fn test_results_stay_within_output_universe() {
    for distance in (0..=110).step_by(5) {
        for speed in (0..=150).step_by(5) {
            let vars = Variables::reference().unwrap();
            let inputs = Inputs::new(distance as f64, speed as f64).unwrap();
            let outputs = MamdaniInference::default().eval(&vars, &Rules::default(), &inputs).unwrap();
            let value = outputs.pressure().value();

            assert!((0. ..=100.).contains(&value), "({distance}, {speed}) gave {value}");
        }
    }
}

#[test]
fn test_variables_are_shareable_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let vars = Arc::new(Variables::reference().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let vars = Arc::clone(&vars);
            thread::spawn(move || {
                let inputs = Inputs::new(10. * i as f64, 30. * i as f64).unwrap();
                MamdaniInference::default().eval(&vars, &Rules::default(), &inputs).unwrap().pressure()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = compute_brake_pressure(10. * i as f64, 30. * i as f64).unwrap();

        assert_eq!(handle.join().unwrap().to_string(), expected);
    }
}
