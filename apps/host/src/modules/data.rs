use crate::models::Booking;
use keel::domain::registry::{CandidateType, Declare};
use keel::service;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait BookingRepository: Send + Sync {
    /// Stores the booking under a fresh id and returns it.
    fn save(&self, booking: Booking) -> Booking;
    fn find(&self, id: u64) -> Option<Booking>;
    fn count(&self) -> usize;
}

#[service(implements(dyn BookingRepository))]
#[derive(Debug)]
pub struct InMemoryBookings {
    next_id: AtomicU64,
    bookings: RwLock<Vec<Booking>>,
}

impl Default for InMemoryBookings {
    fn default() -> Self {
        Self { next_id: AtomicU64::new(1), bookings: RwLock::new(Vec::new()) }
    }
}

impl BookingRepository for InMemoryBookings {
    fn save(&self, mut booking: Booking) -> Booking {
        booking.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.bookings.write().push(booking.clone());
        booking
    }

    fn find(&self, id: u64) -> Option<Booking> {
        self.bookings.read().iter().find(|booking| booking.id == id).cloned()
    }

    fn count(&self) -> usize {
        self.bookings.read().len()
    }
}

#[must_use]
pub fn declared_types() -> Vec<CandidateType> {
    vec![InMemoryBookings::declare()]
}
