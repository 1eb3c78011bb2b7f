pub mod baseline;
pub mod config;
pub mod facts;
pub mod metrics;
pub mod positions;
pub mod readability;
pub mod standing;
