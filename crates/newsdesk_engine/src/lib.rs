//! Newsdesk engine: HTTP dispatch, response decoding and effect execution.
mod decode;
mod dispatch;
mod engine;
mod types;

pub use decode::{decode_payload, server_error_message};
pub use dispatch::{DispatchSettings, Dispatcher, Endpoints, ReqwestDispatcher};
pub use engine::EngineHandle;
pub use types::{DispatchError, EngineEvent, FailureKind, MALFORMED_MESSAGE, NO_RESPONSE_MESSAGE};
