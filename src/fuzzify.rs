use std::fmt;

use fixed_map::Map as FixedMap;

use crate::inputs::Inputs;
use crate::terms::{Distance, LinguisticTerm, Speed};
use crate::variable::{LinguisticVariable, Variables};

/// Membership degrees of a crisp value, one per term it overlaps.
///
/// Terms the value does not overlap have no entry at all, which keeps them out of
/// inference. That is not the same as a computed degree of zero.
pub struct Memberships<K: LinguisticTerm>(FixedMap<K, f64>);

impl<K: LinguisticTerm> Memberships<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub(crate) fn insert(&mut self, term: K, degree: f64) {
        self.0.insert(term, degree);
    }

    /// `None` when `term` was not evaluated for this input
    pub fn get(&self, term: K) -> Option<f64> {
        self.0.get(term).copied()
    }

    /// Defined degrees in term order
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        K::ALL.into_iter().filter_map(move |term| self.get(term).map(|degree| (term, degree)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: LinguisticTerm> Default for Memberships<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LinguisticTerm> FromIterator<(K, f64)> for Memberships<K> {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut memberships = Self::new();

        for (term, degree) in iter {
            memberships.insert(term, degree);
        }

        memberships
    }
}

impl<K: LinguisticTerm> Clone for Memberships<K> {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl<K: LinguisticTerm> PartialEq for Memberships<K> {
    fn eq(&self, other: &Self) -> bool {
        K::ALL.into_iter().all(|term| self.get(term) == other.get(term))
    }
}

impl<K: LinguisticTerm> fmt::Debug for Memberships<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: LinguisticTerm> LinguisticVariable<K> {
    pub fn fuzzify(&self, x: f64) -> Memberships<K> {
        let memberships: Memberships<K> = self.active_terms(x).map(|term| (term, self.degree(term, x))).collect();

        tracing::trace!(variable = K::VARIABLE, input = x, degrees = ?memberships, "fuzzified");

        memberships
    }
}

/// Fuzzifies both crisp inputs against their variables.
pub fn fuzzify(vars: &Variables, inputs: &Inputs) -> (Memberships<Distance>, Memberships<Speed>) {
    (vars.distance.fuzzify(inputs.distance()), vars.speed.fuzzify(inputs.speed()))
}

#[test]
fn test_fuzzify_single_term() {
    let vars = Variables::reference().unwrap();

    let distance = vars.distance.fuzzify(0.);

    assert_eq!(distance.get(Distance::Close), Some(1.));
    assert_eq!(distance.get(Distance::Intermediate), None);
    assert_eq!(distance.get(Distance::Long), None);

    let speed = vars.speed.fuzzify(10.);

    assert_eq!(speed.get(Speed::Slow), Some(0.75));
    assert_eq!(speed.len(), 1);
}

#[test]
fn test_fuzzify_overlap() {
    let vars = Variables::reference().unwrap();
    let inputs = Inputs::new(55., 35.).unwrap();

    let (distance, speed) = fuzzify(&vars, &inputs);

    assert_eq!(distance.iter().collect::<Vec<_>>(), [(Distance::Intermediate, 0.25), (Distance::Long, 0.1)]);
    assert_eq!(speed.get(Speed::Slow), Some(0.125));
    assert_eq!(speed.get(Speed::Medium), Some(0.125));
    assert_eq!(speed.get(Speed::Fast), None);
}

#[test]
fn test_zero_degree_is_still_defined() {
    let vars = Variables::reference().unwrap();

    // 20 opens the CLOSE/INTERMEDIATE band but sits on the triangle's excluded start
    let distance = vars.distance.fuzzify(20.);

    assert_eq!(distance.get(Distance::Intermediate), Some(0.));
    assert!((distance.get(Distance::Close).unwrap() - 1. / 3.).abs() < 1e-12);
}

#[test]
fn test_partition_of_unity_for_mirrored_terms() {
    use crate::membership::TermRange;
    use crate::terms::Terms;

    let terms: Terms<Distance> = [
        (Distance::Close, TermRange::new(0., 0., 30.)),
        (Distance::Intermediate, TermRange::new(0., 30., 60.)),
        (Distance::Long, TermRange::new(30., 60., 60.)),
    ]
    .into_iter()
    .collect();
    let distance = LinguisticVariable::new(&terms).unwrap();

    for step in 1..120 {
        let x = step as f64 * 0.5;
        let memberships = distance.fuzzify(x);
        let sum: f64 = memberships.iter().map(|(_, degree)| degree).sum();

        assert!((sum - 1.).abs() < 1e-12, "degrees at {x} sum to {sum}");
        assert!(memberships.iter().all(|(_, degree)| (0. ..=1.).contains(&degree)));
    }
}

#[test]
fn test_fuzzify_is_deterministic() {
    let vars = Variables::reference().unwrap();

    assert_eq!(vars.speed.fuzzify(105.), vars.speed.fuzzify(105.));
}
