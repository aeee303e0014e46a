pub mod error;
pub mod event;
pub mod id;
pub mod notification;
pub mod provider;
