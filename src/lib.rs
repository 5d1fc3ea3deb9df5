pub mod authenticator;
pub mod ber;
pub mod config;
pub mod error;
pub mod messages;
pub mod result_code;

pub use authenticator::attempt_login;
pub use config::Config;
pub use error::{BindError, CodecError};
pub use messages::{BindRequest, BindResponse, UnbindRequest};
