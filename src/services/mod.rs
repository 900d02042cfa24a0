pub mod ai_service;
pub mod geocoding_service;
pub mod trip_store;
pub mod weather_service;
pub mod weather_window;
