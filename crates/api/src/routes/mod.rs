pub mod exposition;
pub mod health;
