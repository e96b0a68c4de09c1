pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
mod testing;

pub use domain::article;
pub use domain::user;
pub use outbound::repositories;
