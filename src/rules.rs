use crate::terms::{Distance, LinguisticTerm, Pressure, Speed};

/// The rule matrix: `conclusions[speed][distance]` is the pressure the rule
/// `IF speed AND distance` concludes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rules {
    conclusions: [[Pressure; 3]; 3],
}

impl Default for Rules {
    fn default() -> Self {
        use Pressure::*;

        Rules {
            conclusions: [
                // CLOSE, INTERMEDIATE, LONG
                [Medium, Soft, Soft], // SLOW
                [Hard, Medium, Soft], // MEDIUM
                [Hard, Hard, Medium], // FAST
            ],
        }
    }
}

impl Rules {
    pub fn new(conclusions: [[Pressure; 3]; 3]) -> Self {
        Rules { conclusions }
    }

    pub fn conclusion(&self, speed: Speed, distance: Distance) -> Pressure {
        self.conclusions[speed.position()][distance.position()]
    }

    /// All cells as `(speed, distance, conclusion)`, speed-major
    pub fn iter(&self) -> impl Iterator<Item = (Speed, Distance, Pressure)> + '_ {
        Speed::ALL.into_iter().flat_map(move |speed| {
            Distance::ALL.into_iter().map(move |distance| (speed, distance, self.conclusion(speed, distance)))
        })
    }
}

#[test]
fn test_default_rules() {
    let rules = Rules::default();

    assert_eq!(rules.conclusion(Speed::Slow, Distance::Close), Pressure::Medium);
    assert_eq!(rules.conclusion(Speed::Slow, Distance::Long), Pressure::Soft);
    assert_eq!(rules.conclusion(Speed::Medium, Distance::Close), Pressure::Hard);
    assert_eq!(rules.conclusion(Speed::Medium, Distance::Intermediate), Pressure::Medium);
    assert_eq!(rules.conclusion(Speed::Fast, Distance::Intermediate), Pressure::Hard);
    assert_eq!(rules.conclusion(Speed::Fast, Distance::Long), Pressure::Medium);
}

#[test]
fn test_every_combination_has_one_rule() {
    let rules = Rules::default();
    let cells: Vec<_> = rules.iter().collect();

    assert_eq!(cells.len(), 9);

    for speed in Speed::ALL {
        for distance in Distance::ALL {
            assert_eq!(cells.iter().filter(|(s, d, _)| *s == speed && *d == distance).count(), 1);
        }
    }
    for pressure in Pressure::ALL {
        assert_eq!(cells.iter().filter(|(_, _, p)| *p == pressure).count(), 3, "{pressure}");
    }
}
