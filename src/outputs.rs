use crate::defuzz::Percentage;
use crate::fuzzify::Memberships;
use crate::inference::Activations;
use crate::terms::{Distance, Speed};

/// Everything one evaluation produced, from the fuzzified inputs to the crisp pressure.
#[derive(Debug)]
pub struct Outputs {
    distance: Memberships<Distance>,
    speed: Memberships<Speed>,
    activations: Activations,
    pressure: Percentage,
}

impl Outputs {
    pub(crate) fn new(
        distance: Memberships<Distance>,
        speed: Memberships<Speed>,
        activations: Activations,
        pressure: Percentage,
    ) -> Self {
        Self { distance, speed, activations, pressure }
    }

    pub fn distance(&self) -> &Memberships<Distance> {
        &self.distance
    }

    pub fn speed(&self) -> &Memberships<Speed> {
        &self.speed
    }

    pub fn activations(&self) -> &Activations {
        &self.activations
    }

    pub fn pressure(&self) -> Percentage {
        self.pressure
    }
}
