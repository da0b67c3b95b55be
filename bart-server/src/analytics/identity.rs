//! User/session identity resolution.
//!
//! Callers may identify themselves explicitly via the `X-User-ID` and
//! `X-Session-ID` headers. When either is missing, a deterministic
//! pseudo-identity is derived from connection metadata so that repeat
//! visits still aggregate: the user id hashes (ip, user-agent) and the
//! session id additionally folds in a 30-minute time bucket, giving the
//! same client a stable session within a half-hour window.
//!
//! The hash is a plain 31-multiplier string fold to 32 bits rendered as
//! fixed-width hex. The ids only need to be stable, not unique, so
//! collisions are tolerated and no cryptographic primitive is involved.

use serde::Serialize;

/// Seconds per fallback session window.
const SESSION_BUCKET_SECS: i64 = 30 * 60;

/// How an event's identity pair was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentificationMethod {
    Explicit,
    Fallback,
}

/// Identity-relevant request metadata, extracted at the web boundary.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    /// `X-User-ID` header value.
    pub user_id: Option<String>,
    /// `X-Session-ID` header value.
    pub session_id: Option<String>,
    /// Client IP: `CF-Connecting-IP`, else the first `X-Forwarded-For` hop.
    pub ip: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: Option<String>,
}

/// A resolved identity pair with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub session_id: String,
    pub method: IdentificationMethod,
}

/// Non-cryptographic string fold to 32 bits.
fn fold_hash(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

fn hex32(value: u32) -> String {
    format!("{value:08x}")
}

/// Resolve the identity pair for a request observed at `now_secs` (Unix
/// seconds).
///
/// Both explicit headers present: their values are used verbatim. Anything
/// less falls back to the derived pair; an event never mixes explicit and
/// derived values.
pub fn resolve_identity(meta: &RequestMeta, now_secs: i64) -> Identity {
    if let (Some(user_id), Some(session_id)) = (&meta.user_id, &meta.session_id) {
        return Identity {
            user_id: user_id.clone(),
            session_id: session_id.clone(),
            method: IdentificationMethod::Explicit,
        };
    }

    let ip = meta.ip.as_deref().unwrap_or("unknown");
    let user_agent = meta.user_agent.as_deref().unwrap_or("unknown");
    let bucket = now_secs.div_euclid(SESSION_BUCKET_SECS);

    Identity {
        user_id: hex32(fold_hash(&format!("{ip}:{user_agent}"))),
        session_id: hex32(fold_hash(&format!("{ip}:{user_agent}:{bucket}"))),
        method: IdentificationMethod::Fallback,
    }
}
