use std::fmt;

use fixed_map::Map as FixedMap;

use crate::defuzz::defuzzify;
use crate::error::Result;
use crate::fuzzify::{fuzzify, Memberships};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::{Distance, LinguisticTerm, Pressure, Speed};
use crate::variable::Variables;

/// Aggregated activation of each brake pressure term. Terms no rule concluded stay at zero.
pub struct Activations(FixedMap<Pressure, f64>);

impl Activations {
    fn zeroed() -> Self {
        let mut activations = FixedMap::new();

        for term in Pressure::ALL {
            activations.insert(term, 0.);
        }

        Self(activations)
    }

    pub fn get(&self, term: Pressure) -> f64 {
        self.0.get(term).copied().unwrap_or(0.)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pressure, f64)> + '_ {
        Pressure::ALL.into_iter().map(move |term| (term, self.get(term)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, activation)| activation).sum()
    }
}

impl fmt::Debug for Activations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Mamdani-style inference: fuzzify, fire the rule matrix, aggregate, defuzzify.
#[derive(Clone, Copy, Debug, Default)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
}

impl MamdaniInference {
    pub fn new(and_op: AndOp, or_op: OrOp) -> Self {
        Self { and_op, or_op }
    }

    /// Fires every rule whose two premises are both defined and folds the firing
    /// strengths into the term each rule concludes.
    pub fn infer(&self, rules: &Rules, speed: &Memberships<Speed>, distance: &Memberships<Distance>) -> Activations {
        let mut activations = Activations::zeroed();

        for (speed_term, distance_term, conclusion) in rules.iter() {
            let (Some(speed_degree), Some(distance_degree)) = (speed.get(speed_term), distance.get(distance_term))
            else {
                continue;
            };

            let strength = self.and_op.call(speed_degree, distance_degree);
            let aggregated = self.or_op.call(activations.get(conclusion), strength);

            tracing::trace!(%speed_term, %distance_term, %conclusion, strength, "rule fired");

            activations.0.insert(conclusion, aggregated);
        }

        activations
    }

    pub fn eval(&self, vars: &Variables, rules: &Rules, inputs: &Inputs) -> Result<Outputs> {
        let (distance, speed) = fuzzify(vars, inputs);
        let activations = self.infer(rules, &speed, &distance);
        let pressure = defuzzify(&activations, &vars.brake_pressure)?;

        tracing::debug!(
            distance = inputs.distance(),
            speed = inputs.speed(),
            ?activations,
            %pressure,
            "evaluated brake pressure"
        );

        Ok(Outputs::new(distance, speed, activations, pressure))
    }
}

#[cfg(test)]
fn close_to(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

#[test]
fn test_infer_single_rule() {
    let speed: Memberships<Speed> = [(Speed::Fast, 1.)].into_iter().collect();
    let distance: Memberships<Distance> = [(Distance::Close, 1.)].into_iter().collect();

    let activations = MamdaniInference::default().infer(&Rules::default(), &speed, &distance);

    assert_eq!(activations.get(Pressure::Hard), 1.);
    assert_eq!(activations.get(Pressure::Medium), 0.);
    assert_eq!(activations.get(Pressure::Soft), 0.);
}

#[test]
fn test_infer_takes_max_over_rules_with_same_conclusion() {
    // FAST∧CLOSE, FAST∧INTERMEDIATE and MEDIUM∧CLOSE all conclude HARD
    let speed: Memberships<Speed> = [(Speed::Medium, 0.4), (Speed::Fast, 0.6)].into_iter().collect();
    let distance: Memberships<Distance> = [(Distance::Close, 0.3), (Distance::Intermediate, 0.9)].into_iter().collect();

    let activations = MamdaniInference::default().infer(&Rules::default(), &speed, &distance);

    assert_eq!(activations.get(Pressure::Hard), 0.6);
    assert_eq!(activations.get(Pressure::Medium), 0.4);
    assert_eq!(activations.get(Pressure::Soft), 0.);
}

#[test]
fn test_undefined_terms_do_not_fire() {
    let speed: Memberships<Speed> = [(Speed::Medium, 0.5)].into_iter().collect();
    let distance: Memberships<Distance> = [(Distance::Intermediate, 0.8)].into_iter().collect();

    let activations = MamdaniInference::default().infer(&Rules::default(), &speed, &distance);

    assert_eq!(activations.iter().collect::<Vec<_>>(), [
        (Pressure::Soft, 0.),
        (Pressure::Medium, 0.5),
        (Pressure::Hard, 0.)
    ]);
}

#[test]
fn test_infer_with_product_and_probabilistic_or() {
    let speed: Memberships<Speed> = [(Speed::Slow, 0.5), (Speed::Medium, 0.5)].into_iter().collect();
    let distance: Memberships<Distance> = [(Distance::Long, 1.)].into_iter().collect();
    let model = MamdaniInference::new(AndOp::Prod, OrOp::ProbOr);

    // SLOW∧LONG and MEDIUM∧LONG both conclude SOFT
    let activations = model.infer(&Rules::default(), &speed, &distance);

    assert_eq!(activations.get(Pressure::Soft), 0.75);
    assert_eq!(activations.total(), 0.75);
}

#[test]
fn test_eval_transition_zone() {
    let vars = Variables::reference().unwrap();
    let inputs = Inputs::new(55., 70.).unwrap();

    let outputs = MamdaniInference::default().eval(&vars, &Rules::default(), &inputs).unwrap();

    // 55 overlaps INTERMEDIATE and LONG; 70 is the MEDIUM speed peak
    assert_eq!(outputs.distance().len(), 2);
    assert_eq!(outputs.speed().get(Speed::Medium), Some(1.));
    assert_eq!(outputs.activations().get(Pressure::Medium), 0.25);
    assert_eq!(outputs.activations().get(Pressure::Soft), 0.1);
    assert_eq!(outputs.activations().get(Pressure::Hard), 0.);
    assert!(close_to(outputs.pressure().value(), 19.85 / 0.35));
    assert_eq!(outputs.pressure().to_string(), "56.71%");
}

#[test]
fn test_eval_is_idempotent() {
    let vars = Variables::reference().unwrap();
    let rules = Rules::default();
    let model = MamdaniInference::default();
    let inputs = Inputs::new(27., 105.).unwrap();

    let first = model.eval(&vars, &rules, &inputs).unwrap();
    let second = model.eval(&vars, &rules, &inputs).unwrap();

    assert_eq!(first.pressure().to_string(), second.pressure().to_string());
    assert_eq!(first.distance(), second.distance());
    assert_eq!(first.speed(), second.speed());
}
