pub mod authenticator;
pub mod event_mapper;
pub mod retry;
pub mod webhook_pipeline;
