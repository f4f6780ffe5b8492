use std::sync::OnceLock;

use chrono_tz::Tz;

use crate::error::{TimelineError, TimelineResult};

static LOCAL_ZONE: OnceLock<Tz> = OnceLock::new();

/// The platform-local IANA timezone, discovered once and cached.
///
/// Discovery is idempotent and side-effect free, so concurrent first use
/// needs no coordination; only a successful lookup is cached. On platforms
/// without a discoverable zone this fails with `UnsupportedPlatform` and the
/// caller decides whether to fall back to UTC.
pub fn local_timezone() -> TimelineResult<Tz> {
    if let Some(tz) = LOCAL_ZONE.get() {
        return Ok(*tz);
    }

    let name = iana_time_zone::get_timezone().map_err(|source| {
        TimelineError::UnsupportedPlatform {
            detail: source.to_string(),
        }
    })?;
    let tz = name
        .parse::<Tz>()
        .map_err(|_| TimelineError::UnsupportedPlatform {
            detail: format!("platform reported unrecognized zone {name:?}"),
        })?;
    Ok(*LOCAL_ZONE.get_or_init(|| tz))
}

/// An explicit zone wins; otherwise the platform-local zone is used.
pub fn resolve_timezone(explicit: Option<Tz>) -> TimelineResult<Tz> {
    match explicit {
        Some(tz) => Ok(tz),
        None => local_timezone(),
    }
}
