use num::Float;
use serde::Deserialize;

/// Right-open trapezoid: full membership below `a`, falling to zero at `b`.
pub fn trapezoid_r<F: Float>(x: F, a: F, b: F) -> F {
    if x > b {
        F::zero()
    } else if a <= x {
        (b - x) / (b - a)
    } else {
        F::one()
    }
}

/// Left-open trapezoid: zero below `a`, rising to full membership at `b`.
pub fn trapezoid_l<F: Float>(x: F, a: F, b: F) -> F {
    if x < a {
        F::zero()
    } else if x <= b {
        (x - a) / (b - a)
    } else {
        F::one()
    }
}

/// Triangle with support `(a, b)` and peak `m`. The support bounds themselves are excluded.
pub fn triangular<F: Float>(x: F, a: F, b: F, m: F) -> F {
    if x <= a || x >= b {
        F::zero()
    } else if x <= m {
        (x - a) / (m - a)
    } else {
        (b - x) / (b - m)
    }
}

/// The `(start, peak, end)` triple describing one linguistic term.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(from = "[f64; 3]")]
pub struct TermRange {
    pub start: f64,
    pub peak: f64,
    pub end: f64,
}

impl TermRange {
    pub const fn new(start: f64, peak: f64, end: f64) -> Self {
        Self { start, peak, end }
    }

    fn is_finite(&self) -> bool {
        self.start.is_finite() && self.peak.is_finite() && self.end.is_finite()
    }
}

impl From<[f64; 3]> for TermRange {
    fn from([start, peak, end]: [f64; 3]) -> Self {
        Self::new(start, peak, end)
    }
}

/// Membership shape. Every variable uses the same three, one per term position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    TrapezoidR,
    Triangular,
    TrapezoidL,
}

impl Shape {
    pub const BY_POSITION: [Shape; 3] = [Shape::TrapezoidR, Shape::Triangular, Shape::TrapezoidL];

    pub fn degree(self, x: f64, range: &TermRange) -> f64 {
        match self {
            Self::TrapezoidR => trapezoid_r(x, range.start, range.end),
            Self::Triangular => triangular(x, range.start, range.end, range.peak),
            Self::TrapezoidL => trapezoid_l(x, range.start, range.end),
        }
    }

    /// Checks the parameter ordering this shape needs, returning the violated rule.
    pub(crate) fn check(self, range: &TermRange) -> Result<(), &'static str> {
        if !range.is_finite() {
            return Err("parameters must be finite");
        }

        match self {
            Self::TrapezoidR | Self::TrapezoidL if range.start >= range.end => Err("start must be below end"),
            Self::Triangular if !(range.start < range.peak && range.peak < range.end) => {
                Err("start < peak < end must hold")
            },
            _ => Ok(()),
        }
    }

    /// Lower and upper bound fed to the defuzzification formula.
    ///
    /// Triangles only contribute their falling edge; trapezoids use their whole slope.
    pub(crate) fn defuzz_span(self, range: &TermRange) -> (f64, f64) {
        match self {
            Self::Triangular => (range.peak, range.end),
            Self::TrapezoidR | Self::TrapezoidL => (range.start, range.end),
        }
    }
}

#[test]
fn test_degrees_stay_in_unit_interval() {
    let ranges = [TermRange::new(0., 0., 30.), TermRange::new(20., 40., 60.), TermRange::new(50., 100., 100.)];

    for step in -100..=400 {
        let x = step as f64 * 0.5;

        for (shape, range) in Shape::BY_POSITION.into_iter().zip(&ranges) {
            let degree = shape.degree(x, range);

            assert!((0. ..=1.).contains(&degree), "{shape:?} at {x} gave {degree}");
        }
    }
}

#[test]
fn test_plateau_and_peak_are_full_membership() {
    assert_eq!(trapezoid_r(-5., 0., 30.), 1.);
    assert_eq!(trapezoid_r(0., 0., 30.), 1.);
    assert_eq!(trapezoid_l(100., 50., 100.), 1.);
    assert_eq!(trapezoid_l(250., 50., 100.), 1.);
    assert_eq!(triangular(40., 20., 60., 40.), 1.);
    assert_eq!(triangular(70.0f32, 30., 110., 70.), 1.);
}

#[test]
fn test_boundaries() {
    assert_eq!(trapezoid_r(30., 0., 30.), 0.);
    assert_eq!(trapezoid_r(31., 0., 30.), 0.);
    assert_eq!(trapezoid_r(15., 0., 30.), 0.5);
    assert_eq!(trapezoid_l(49., 50., 100.), 0.);
    assert_eq!(trapezoid_l(50., 50., 100.), 0.);
    assert_eq!(trapezoid_l(75., 50., 100.), 0.5);
    // Support bounds are excluded rather than partially included
    assert_eq!(triangular(20., 20., 60., 40.), 0.);
    assert_eq!(triangular(60., 20., 60., 40.), 0.);
    assert_eq!(triangular(30., 20., 60., 40.), 0.5);
    assert_eq!(triangular(55., 20., 60., 40.), 0.25);
}

#[test]
fn test_shape_checks() {
    assert!(Shape::TrapezoidR.check(&TermRange::new(0., 0., 30.)).is_ok());
    assert!(Shape::TrapezoidR.check(&TermRange::new(30., 30., 30.)).is_err());
    assert!(Shape::TrapezoidL.check(&TermRange::new(100., 100., 50.)).is_err());
    assert!(Shape::Triangular.check(&TermRange::new(20., 40., 60.)).is_ok());
    assert!(Shape::Triangular.check(&TermRange::new(20., 20., 60.)).is_err());
    assert!(Shape::Triangular.check(&TermRange::new(20., 70., 60.)).is_err());
    assert!(Shape::Triangular.check(&TermRange::new(20., f64::NAN, 60.)).is_err());
}

#[test]
fn test_defuzz_span() {
    assert_eq!(Shape::TrapezoidR.defuzz_span(&TermRange::new(0., 0., 40.)), (0., 40.));
    assert_eq!(Shape::Triangular.defuzz_span(&TermRange::new(30., 50., 70.)), (50., 70.));
    assert_eq!(Shape::TrapezoidL.defuzz_span(&TermRange::new(60., 100., 100.)), (60., 100.));
}
