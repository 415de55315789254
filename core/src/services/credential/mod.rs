//! Credential lifecycle protocols
//!
//! Session issuance, refresh token rotation, logout, password reset and email
//! verification, built on the expiring token stores.

mod config;
mod service;
mod stores;


pub use config::LifecycleConfig;
pub use service::CredentialLifecycleManager;
pub use stores::CredentialStores;
