pub mod builder;
pub mod handler;
pub mod listener;
pub mod probe;
pub mod response;
mod error;

pub use builder::ProbeServerBuilder;
pub use error::ServerError;
pub use handler::ProbeHandler;
pub use probe::{ProbeServer, ShutdownHandle};
pub use response::ProbeResponse;
