use crate::error::{Error, Result};

/// The two crisp readings the controller works from. Both are finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inputs {
    distance: f64,
    speed: f64,
}

impl Inputs {
    pub fn new(distance: f64, speed: f64) -> Result<Self> {
        Ok(Self { distance: check(distance, distance)?, speed: check(speed, speed)? })
    }

    /// Parses raw text as typed by a user, e.g. `"42"` or `" 12.5 "`.
    pub fn parse(distance: &str, speed: &str) -> Result<Self> {
        Ok(Self { distance: parse_crisp(distance)?, speed: parse_crisp(speed)? })
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

fn parse_crisp(raw: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidInput { input: raw.to_owned(), reason: "not a number" })?;

    check(raw, value)
}

fn check(input: impl ToString, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidInput { input: input.to_string(), reason: "not a finite number" });
    }
    if value < 0. {
        return Err(Error::InvalidInput { input: input.to_string(), reason: "must not be negative" });
    }

    Ok(value)
}

#[test]
fn test_parse_valid() {
    let inputs = Inputs::parse("42", " 12.5 ").unwrap();

    assert_eq!(inputs.distance(), 42.);
    assert_eq!(inputs.speed(), 12.5);
    assert_eq!(Inputs::parse("0", "0").unwrap(), Inputs::new(0., 0.).unwrap());
}

#[test]
fn test_parse_rejects_bad_text() {
    for (distance, speed) in [("abc", "10"), ("10", ""), ("-5", "10"), ("10", "-0.1"), ("NaN", "1"), ("1", "inf")] {
        let err = Inputs::parse(distance, speed).unwrap_err();

        assert!(matches!(err, Error::InvalidInput { .. }), "{distance:?}/{speed:?} gave {err}");
    }
}

#[test]
fn test_new_rejects_negative_and_non_finite() {
    assert!(matches!(Inputs::new(-1., 10.), Err(Error::InvalidInput { reason: "must not be negative", .. })));
    assert!(matches!(Inputs::new(1., f64::NAN), Err(Error::InvalidInput { reason: "not a finite number", .. })));
    assert!(Inputs::new(500., 300.).is_ok());
}
