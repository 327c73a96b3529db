use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self { origin: origin.into(), destination: destination.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub passengers: u32,
    pub total_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: u64,
    pub route: Route,
    pub departure: NaiveDateTime,
    pub quote: Quote,
}

/// Flattened, display-ready view of a [`Booking`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub reference: String,
    pub itinerary: String,
    pub total: String,
}
