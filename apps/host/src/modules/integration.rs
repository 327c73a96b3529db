use crate::models::{Booking, BookingSummary};
use keel::domain::mapping::{MapperConfiguration, MappingProfile};
use keel::domain::registry::{CandidateType, Declare};
use keel::{profile, service};

pub trait AirlineGateway: Send + Sync {
    fn carrier(&self) -> &str;
    fn confirm(&self, booking: &Booking) -> String;
}

#[service(implements(dyn AirlineGateway))]
#[derive(Debug, Default)]
pub struct SandboxGateway;

impl AirlineGateway for SandboxGateway {
    fn carrier(&self) -> &str {
        "sandbox"
    }

    fn confirm(&self, booking: &Booking) -> String {
        format!("SBX-{:06}", booking.id)
    }
}

#[profile]
#[derive(Debug, Default)]
pub struct BookingProfile;

impl MappingProfile for BookingProfile {
    fn configure(&self, config: &mut MapperConfiguration) {
        config.create_map(|booking: &Booking| BookingSummary {
            reference: format!("KEEL-{:06}", booking.id),
            itinerary: format!(
                "{} -> {} on {}",
                booking.route.origin,
                booking.route.destination,
                booking.departure.format("%Y-%m-%d %H:%M")
            ),
            total: format!(
                "{}.{:02}",
                booking.quote.total_cents / 100,
                booking.quote.total_cents % 100
            ),
        });
    }
}

#[must_use]
pub fn declared_types() -> Vec<CandidateType> {
    vec![SandboxGateway::declare(), BookingProfile::declare()]
}
