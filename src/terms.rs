use std::fmt;
use std::hash::Hash;

pub use fixed_map::Key as FixedKey;
use fixed_map::Map as FixedMap;

use crate::membership::TermRange;

/// A term of one of the controller's linguistic variables.
///
/// Every variable has exactly three terms. `ALL` lists them in the order the shapes and
/// the rule matrix are laid out in.
pub trait LinguisticTerm: FixedKey + Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// Name of the variable, used in errors and configuration sections
    const VARIABLE: &'static str;
    const ALL: [Self; 3];

    fn position(self) -> usize;

    /// Lower-case name used as the configuration key
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|term| term.name() == name)
    }
}

macro_rules! linguistic_terms {
    ($(#[$meta:meta])* $ty:ident($variable:literal) { $($term:ident => $name:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, fixed_map::Key, Ord, PartialEq, PartialOrd)]
        pub enum $ty {
            $($term),+
        }

        impl LinguisticTerm for $ty {
            const VARIABLE: &'static str = $variable;
            const ALL: [Self; 3] = [$(Self::$term),+];

            fn position(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$term => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.name().to_uppercase())
            }
        }
    };
}

linguistic_terms! {
    /// Distance to the obstacle
    Distance("distance") { Close => "close", Intermediate => "intermediate", Long => "long" }
}

linguistic_terms! {
    /// Vehicle speed
    Speed("speed") { Slow => "slow", Medium => "medium", Fast => "fast" }
}

linguistic_terms! {
    /// Recommended brake pressure
    Pressure("brake_pressure") { Soft => "soft", Medium => "medium", Hard => "hard" }
}

/// Term ranges of one variable, collected before validation.
pub struct Terms<K: FixedKey>(pub(crate) FixedMap<K, TermRange>);

impl<K: FixedKey> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FixedKey> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: TermRange) {
        self.0.insert(key, value);
    }

    pub(crate) fn get(&self, key: K) -> Option<&TermRange> {
        self.0.get(key)
    }
}

impl<K: FixedKey> FromIterator<(K, TermRange)> for Terms<K> {
    fn from_iter<T: IntoIterator<Item = (K, TermRange)>>(iter: T) -> Self {
        let mut terms = Self::new();

        for (key, value) in iter {
            terms.insert(key, value);
        }

        terms
    }
}

#[test]
fn test_term_order_and_names() {
    assert_eq!(Distance::ALL.map(LinguisticTerm::position), [0, 1, 2]);
    assert_eq!(Speed::Fast.position(), 2);
    assert_eq!(Pressure::Soft.name(), "soft");
    assert_eq!(Distance::Intermediate.to_string(), "INTERMEDIATE");
    assert_eq!(Speed::from_name("medium"), Some(Speed::Medium));
    assert_eq!(Speed::from_name("MEDIUM"), None);
    assert_eq!(Pressure::VARIABLE, "brake_pressure");
}

#[test]
fn test_terms_builder_keeps_last_insert() {
    let mut terms = Terms::new();

    terms.insert(Speed::Slow, TermRange::new(0., 0., 40.));
    terms.insert(Speed::Slow, TermRange::new(0., 0., 35.));

    assert_eq!(terms.get(Speed::Slow), Some(&TermRange::new(0., 0., 35.)));
    assert_eq!(terms.get(Speed::Fast), None);
}
