// Infrastructure layer - External dependencies and adapters
pub mod ais_stream;
pub mod config;
pub mod opensky;
pub mod vesselfinder;
