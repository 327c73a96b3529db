use keel::domain::registry::{CandidateType, Declare};
use keel::service;

/// Percentage added on top of the base fare.
const TAX_PERCENT: u64 = 12;

pub trait FareCalculator: Send + Sync {
    fn total(&self, base_cents: u64, passengers: u32) -> u64;
}

#[service(implements(dyn FareCalculator))]
#[derive(Debug, Default)]
pub struct TaxedFareCalculator;

impl FareCalculator for TaxedFareCalculator {
    fn total(&self, base_cents: u64, passengers: u32) -> u64 {
        let subtotal = base_cents.saturating_mul(u64::from(passengers));
        subtotal + subtotal * TAX_PERCENT / 100
    }
}

/// Scratch type kept out of the container on purpose.
#[service(implements(dyn FareCalculator), global)]
#[derive(Debug, Default)]
pub struct FreeFareCalculator;

impl FareCalculator for FreeFareCalculator {
    fn total(&self, _base_cents: u64, _passengers: u32) -> u64 {
        0
    }
}

#[must_use]
pub fn declared_types() -> Vec<CandidateType> {
    vec![TaxedFareCalculator::declare(), FreeFareCalculator::declare()]
}
