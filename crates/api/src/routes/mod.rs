pub mod entities;
pub mod health;
pub mod metrics;
pub mod views;
