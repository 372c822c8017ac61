// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Ranking of scored traders
pub mod ranking;

// K-ratio scoring
pub mod scoring;

// Core leaderboard domain types
pub mod types;
