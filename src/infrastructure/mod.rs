pub mod backends;
pub mod credentials;
pub mod stores;
