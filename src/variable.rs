use std::marker::PhantomData;
use std::ops::Bound;

use crate::error::{Error, Result};
use crate::membership::{Shape, TermRange};
use crate::terms::{Distance, LinguisticTerm, Pressure, Speed, Terms};

/// One band of the input axis and the term positions that overlap it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub upper: Bound<f64>,
    pub active: &'static [usize],
}

impl Region {
    fn contains(&self, x: f64) -> bool {
        match self.upper {
            Bound::Excluded(upper) => x < upper,
            Bound::Included(upper) => x <= upper,
            Bound::Unbounded => true,
        }
    }
}

/// A validated linguistic variable: three term ranges plus the region table used to
/// decide which of them a crisp value overlaps.
#[derive(Clone, Debug)]
pub struct LinguisticVariable<K> {
    ranges: [TermRange; 3],
    regions: [Region; 5],
    _terms: PhantomData<K>,
}

impl<K: LinguisticTerm> LinguisticVariable<K> {
    pub fn new(terms: &Terms<K>) -> Result<Self> {
        let mut ranges = [TermRange::new(0., 0., 0.); 3];

        for term in K::ALL {
            let range = terms
                .get(term)
                .ok_or_else(|| Error::invalid_configuration(K::VARIABLE, term.name(), "term is missing"))?;

            Shape::BY_POSITION[term.position()]
                .check(range)
                .map_err(|reason| Error::invalid_configuration(K::VARIABLE, term.name(), reason))?;

            ranges[term.position()] = *range;
        }

        let [first, middle, last] = ranges;
        let [first_term, middle_term, last_term] = K::ALL;

        // Adjacent terms may only overlap their direct neighbour
        if middle.start > first.end {
            return Err(Error::invalid_configuration(
                K::VARIABLE,
                middle_term.name(),
                format!("must start at or before {} ends", first_term.name()),
            ));
        }
        if first.end > last.start {
            return Err(Error::invalid_configuration(
                K::VARIABLE,
                last_term.name(),
                format!("must start at or after {} ends", first_term.name()),
            ));
        }
        if last.start > middle.end {
            return Err(Error::invalid_configuration(
                K::VARIABLE,
                last_term.name(),
                format!("must start at or before {} ends", middle_term.name()),
            ));
        }

        let regions = [
            Region { upper: Bound::Excluded(middle.start), active: &[0] },
            Region { upper: Bound::Included(first.end), active: &[0, 1] },
            Region { upper: Bound::Excluded(last.start), active: &[1] },
            Region { upper: Bound::Included(middle.end), active: &[1, 2] },
            Region { upper: Bound::Unbounded, active: &[2] },
        ];

        Ok(Self { ranges, regions, _terms: PhantomData })
    }

    pub fn range(&self, term: K) -> &TermRange {
        &self.ranges[term.position()]
    }

    pub fn regions(&self) -> &[Region; 5] {
        &self.regions
    }

    /// Terms whose support overlaps `x`, in term order
    pub fn active_terms(&self, x: f64) -> impl Iterator<Item = K> {
        let active = self.regions.iter().find(|region| region.contains(x)).map_or(&[][..], |region| region.active);

        active.iter().map(|&position| K::ALL[position])
    }

    pub fn degree(&self, term: K, x: f64) -> f64 {
        Shape::BY_POSITION[term.position()].degree(x, self.range(term))
    }

    pub(crate) fn defuzz_span(&self, term: K) -> (f64, f64) {
        Shape::BY_POSITION[term.position()].defuzz_span(self.range(term))
    }
}

pub const DISTANCE_RANGES: [(Distance, TermRange); 3] = [
    (Distance::Close, TermRange::new(0., 0., 30.)),
    (Distance::Intermediate, TermRange::new(20., 40., 60.)),
    (Distance::Long, TermRange::new(50., 100., 100.)),
];

pub const SPEED_RANGES: [(Speed, TermRange); 3] = [
    (Speed::Slow, TermRange::new(0., 0., 40.)),
    (Speed::Medium, TermRange::new(30., 70., 110.)),
    (Speed::Fast, TermRange::new(100., 140., 140.)),
];

pub const PRESSURE_RANGES: [(Pressure, TermRange); 3] = [
    (Pressure::Soft, TermRange::new(0., 0., 40.)),
    (Pressure::Medium, TermRange::new(30., 50., 70.)),
    (Pressure::Hard, TermRange::new(60., 100., 100.)),
];

/// The three variables the controller reasons over.
#[derive(Clone, Debug)]
pub struct Variables {
    pub distance: LinguisticVariable<Distance>,
    pub speed: LinguisticVariable<Speed>,
    pub brake_pressure: LinguisticVariable<Pressure>,
}

impl Variables {
    pub fn new(distance: &Terms<Distance>, speed: &Terms<Speed>, brake_pressure: &Terms<Pressure>) -> Result<Self> {
        Ok(Self {
            distance: LinguisticVariable::new(distance)?,
            speed: LinguisticVariable::new(speed)?,
            brake_pressure: LinguisticVariable::new(brake_pressure)?,
        })
    }

    /// Variables built from the stock range tables
    pub fn reference() -> Result<Self> {
        Self::new(
            &DISTANCE_RANGES.into_iter().collect(),
            &SPEED_RANGES.into_iter().collect(),
            &PRESSURE_RANGES.into_iter().collect(),
        )
    }
}

#[test]
fn test_reference_tables_are_valid() {
    let vars = Variables::reference().unwrap();

    assert_eq!(vars.distance.range(Distance::Intermediate), &TermRange::new(20., 40., 60.));
    assert_eq!(vars.speed.range(Speed::Fast), &TermRange::new(100., 140., 140.));
    assert_eq!(vars.brake_pressure.defuzz_span(Pressure::Medium), (50., 70.));
}

#[test]
fn test_region_table_layout() {
    let vars = Variables::reference().unwrap();
    let regions = vars.speed.regions();

    assert_eq!(regions[0].upper, Bound::Excluded(30.));
    assert_eq!(regions[1].upper, Bound::Included(40.));
    assert_eq!(regions[2].upper, Bound::Excluded(100.));
    assert_eq!(regions[3].upper, Bound::Included(110.));
    assert_eq!(regions[4].upper, Bound::Unbounded);

    // Every band activates one or two neighbouring terms, and neighbouring bands share a term
    for pair in regions.windows(2) {
        assert!(pair[0].active.iter().any(|term| pair[1].active.contains(term)));
    }
    for region in regions {
        assert!(matches!(region.active.len(), 1 | 2));
    }
}

#[test]
fn test_active_terms() {
    let vars = Variables::reference().unwrap();
    let active = |x| vars.distance.active_terms(x).collect::<Vec<_>>();

    assert_eq!(active(0.), [Distance::Close]);
    assert_eq!(active(19.9), [Distance::Close]);
    assert_eq!(active(20.), [Distance::Close, Distance::Intermediate]);
    assert_eq!(active(30.), [Distance::Close, Distance::Intermediate]);
    assert_eq!(active(40.), [Distance::Intermediate]);
    assert_eq!(active(50.), [Distance::Intermediate, Distance::Long]);
    assert_eq!(active(60.), [Distance::Intermediate, Distance::Long]);
    assert_eq!(active(60.1), [Distance::Long]);
    assert_eq!(active(500.), [Distance::Long]);
}

#[test]
fn test_invalid_term_ordering() {
    let mut distance: Terms<Distance> = DISTANCE_RANGES.into_iter().collect();

    distance.insert(Distance::Intermediate, TermRange::new(20., 60., 40.));

    let err = LinguisticVariable::new(&distance).unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidConfiguration { variable: "distance", ref term, .. } if term == "intermediate"
    ));
}

#[test]
fn test_missing_term() {
    let speed: Terms<Speed> = SPEED_RANGES.into_iter().take(2).collect();

    let err = LinguisticVariable::new(&speed).unwrap_err();

    assert!(matches!(err, Error::InvalidConfiguration { ref term, .. } if term == "fast"));
}

#[test]
fn test_non_adjacent_overlap_is_rejected() {
    // LONG starting before CLOSE ends would overlap three terms at once
    let distance: Terms<Distance> = [
        (Distance::Close, TermRange::new(0., 0., 30.)),
        (Distance::Intermediate, TermRange::new(20., 40., 60.)),
        (Distance::Long, TermRange::new(25., 100., 100.)),
    ]
    .into_iter()
    .collect();

    assert!(LinguisticVariable::new(&distance).is_err());
}
