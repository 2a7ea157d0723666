// Application layer - Use cases and seams
pub mod classifier;
pub mod kpi;
pub mod movement;
pub mod radar_service;
pub mod state_feed;
