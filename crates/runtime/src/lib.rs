pub mod event_bus;
pub mod host;
pub mod locate;
pub mod route;
pub mod router;
pub mod state;

pub use event_bus::*;
pub use host::*;
pub use locate::{LocateConfig, LocateControl, LocateEffect, LocateError, LocateOutcome};
pub use route::*;
pub use router::*;
pub use state::*;
