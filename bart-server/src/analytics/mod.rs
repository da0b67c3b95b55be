//! Usage analytics.
//!
//! Every inbound request to a public endpoint produces one analytics event,
//! emitted fire-and-forget so analytics latency or failure never touches
//! the response path. Identity is taken from explicit caller headers when
//! both are present, otherwise derived deterministically from connection
//! metadata (see [`identity`]).

mod identity;
mod recorder;
mod sink;

pub use identity::{Identity, IdentificationMethod, RequestMeta, resolve_identity};
pub use recorder::AnalyticsRecorder;
pub use sink::{AnalyticsEvent, MemorySink, SinkError, Summary};
