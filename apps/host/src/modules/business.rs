use super::domain::{FareCalculator, TaxedFareCalculator};
use crate::models::{Quote, Route};
use keel::domain::registry::{CandidateType, Declare};
use keel::service;

pub trait QuoteService: Send + Sync {
    fn quote(&self, route: &Route, passengers: u32) -> Quote;
}

#[service(implements(dyn QuoteService), key = "domestic")]
#[derive(Debug, Default)]
pub struct DomesticQuotes {
    fares: TaxedFareCalculator,
}

impl QuoteService for DomesticQuotes {
    fn quote(&self, _route: &Route, passengers: u32) -> Quote {
        Quote { passengers, total_cents: self.fares.total(4_900, passengers) }
    }
}

#[service(implements(dyn QuoteService), key = "international", key = 2)]
#[derive(Debug, Default)]
pub struct InternationalQuotes {
    fares: TaxedFareCalculator,
}

impl QuoteService for InternationalQuotes {
    fn quote(&self, route: &Route, passengers: u32) -> Quote {
        let long_haul = route.origin.len() + route.destination.len() > 6;
        let base = if long_haul { 42_000 } else { 18_500 };
        Quote { passengers, total_cents: self.fares.total(base, passengers) }
    }
}

#[must_use]
pub fn declared_types() -> Vec<CandidateType> {
    vec![DomesticQuotes::declare(), InternationalQuotes::declare()]
}
