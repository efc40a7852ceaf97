//! Opaque pagination cursor codec
//!
//! A cursor captures the `(created_at, id)` sort key of the last record on a
//! page so the next page can resume strictly after it. Tokens are URL-safe
//! base64 over a versioned `v1|<timestamp>|<id>` payload; the version tag
//! lets future format changes be rejected instead of misparsed.
//!
//! The codec is pure and stateless. Decoding never falls back to a default
//! page: any structural problem is a `MalformedCursor` error.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{DbError, DbResult};

/// Current cursor format version tag
const VERSION: &str = "v1";

/// Field separator inside the decoded payload.
///
/// Safe because RFC 3339 timestamps and record ids never contain `|`.
const SEPARATOR: char = '|';

/// Encode a `(created_at, id)` sort key into an opaque token.
///
/// The timestamp keeps its full sub-second precision so the token
/// round-trips exactly through [`decode`].
pub fn encode(created_at: DateTime<Utc>, id: &str) -> String {
    let payload = format!(
        "{VERSION}{SEPARATOR}{}{SEPARATOR}{id}",
        created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    );
    URL_SAFE_NO_PAD.encode(payload)
}

/// Decode an opaque token back into its `(created_at, id)` sort key.
///
/// # Errors
///
/// Returns `DbError::MalformedCursor` if the token is not valid base64, the
/// payload is not UTF-8, the field count or version tag is wrong, the
/// timestamp fails to parse, or the id is empty.
pub fn decode(token: &str) -> DbResult<(DateTime<Utc>, String)> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| malformed("token is not valid base64"))?;
    let payload = String::from_utf8(bytes).map_err(|_| malformed("payload is not UTF-8"))?;

    let parts: Vec<&str> = payload.split(SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(malformed("wrong number of fields"));
    }
    if parts[0] != VERSION {
        return Err(malformed("unknown cursor version"));
    }

    let created_at = DateTime::parse_from_rfc3339(parts[1])
        .map_err(|_| malformed("unparsable timestamp"))?
        .with_timezone(&Utc);

    let id = parts[2];
    if id.is_empty() {
        return Err(malformed("empty record id"));
    }

    Ok((created_at, id.to_string()))
}

fn malformed(reason: &str) -> DbError {
    DbError::MalformedCursor {
        reason: reason.to_string(),
    }
}
