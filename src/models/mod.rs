pub mod activity;
pub mod bookings;
pub mod budget;
pub mod itinerary;
pub mod location;
pub mod trip;
pub mod weather;
