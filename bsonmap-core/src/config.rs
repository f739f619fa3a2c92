//! Process-wide default tag.
//!
//! New [`RecordMapper`](crate::mapper::RecordMapper) handles read their tag from
//! [`default_tag`]. The default may be replaced once, at startup, before any
//! handle is created; handles created earlier keep the tag they captured.

use std::sync::OnceLock;

use crate::error::{MapperError, MapperResult};

/// Tag read when no other default has been configured.
pub const DEFAULT_TAG: &str = "bson";

static CONFIGURED_TAG: OnceLock<String> = OnceLock::new();

/// Replaces the process-wide default tag.
///
/// # Errors
///
/// Returns [`MapperError::Initialization`] if a default tag was already set.
pub fn set_default_tag(tag: impl Into<String>) -> MapperResult<()> {
    CONFIGURED_TAG.set(tag.into()).map_err(|rejected| {
        MapperError::Initialization(format!(
            "default tag is already `{}`, cannot set it to `{}`",
            default_tag(),
            rejected
        ))
    })
}

/// The tag new mapper handles start with.
pub fn default_tag() -> &'static str {
    CONFIGURED_TAG
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_TAG)
}
