mod auth;
pub mod client;
pub mod events;
mod invitations;
mod profiles;
pub mod session_store;
pub mod storage;
mod therapists;
pub mod types;
pub mod url_session;

pub use client::*;
pub use events::Subscription;
pub use types::*;
