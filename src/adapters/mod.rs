pub mod api_errors;
pub mod bharatx_client;
pub mod sqs;
pub mod webhook;
