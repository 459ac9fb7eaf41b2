use std::fmt;

use crate::error::{Error, Result};
use crate::inference::Activations;
use crate::terms::{LinguisticTerm, Pressure};
use crate::variable::LinguisticVariable;

/// A crisp brake pressure in percent.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding zero turns -0.0 into 0.0
        write!(f, "{:.2}%", self.0 + 0.)
    }
}

/// Weighted reduction of the three output activations into one percentage.
///
/// Each term contributes `d * (end - (end - lower) * d)` over its defuzzification span
/// `(lower, end)`, and the sum is divided by the total activation.
pub fn defuzzify(activations: &Activations, output: &LinguisticVariable<Pressure>) -> Result<Percentage> {
    let mut weighted = 0.;
    let mut total = 0.;

    for term in Pressure::ALL {
        let degree = activations.get(term);
        let (lower, end) = output.defuzz_span(term);

        weighted += degree * (end - (end - lower) * degree);
        total += degree;
    }

    if total == 0. {
        return Err(Error::NoApplicableRule);
    }

    Ok(Percentage(weighted / total))
}

#[test]
fn test_defuzzify_single_terms() {
    use crate::fuzzify::Memberships;
    use crate::inference::MamdaniInference;
    use crate::rules::Rules;
    use crate::terms::{Distance, Speed};
    use crate::variable::Variables;

    let vars = Variables::reference().unwrap();
    let model = MamdaniInference::default();
    let pressure = |speed: Speed, distance: Distance| {
        let speed: Memberships<Speed> = [(speed, 1.)].into_iter().collect();
        let distance: Memberships<Distance> = [(distance, 1.)].into_iter().collect();

        defuzzify(&model.infer(&Rules::default(), &speed, &distance), &vars.brake_pressure).unwrap()
    };

    assert_eq!(pressure(Speed::Slow, Distance::Long).to_string(), "0.00%");
    assert_eq!(pressure(Speed::Slow, Distance::Close).to_string(), "50.00%");
    assert_eq!(pressure(Speed::Fast, Distance::Close).to_string(), "60.00%");
    assert_eq!(pressure(Speed::Medium, Distance::Intermediate).value(), 50.);
}

#[test]
fn test_all_zero_activations_is_an_error() {
    use crate::fuzzify::Memberships;
    use crate::inference::MamdaniInference;
    use crate::rules::Rules;
    use crate::variable::Variables;

    let vars = Variables::reference().unwrap();
    let activations = MamdaniInference::default().infer(&Rules::default(), &Memberships::new(), &Memberships::new());

    assert_eq!(activations.total(), 0.);
    assert!(matches!(defuzzify(&activations, &vars.brake_pressure), Err(Error::NoApplicableRule)));
}

#[test]
fn test_percentage_display() {
    assert_eq!(Percentage(42.).to_string(), "42.00%");
    assert_eq!(Percentage(170. / 3.).to_string(), "56.67%");
    assert_eq!(Percentage(-0.).to_string(), "0.00%");
}
