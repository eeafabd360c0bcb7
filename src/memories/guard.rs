//! Ownership and visibility rules for memories
//!
//! | action | public | owner | outcome |
//! |--------|--------|-------|---------|
//! | read   | yes    | any   | allow   |
//! | read   | no     | yes   | allow   |
//! | read   | no     | no    | deny    |
//! | update / delete | any | yes | allow |
//! | update / delete | any | no  | deny  |
//!
//! Listing and creation never consult this table: both are scoped to the
//! authenticated subject by construction.

use tracing::warn;

use super::models::Memory;
use crate::common::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryAction {
    Read,
    Update,
    Delete,
}

pub fn is_owner(memory: &Memory, subject: Option<&str>) -> bool {
    subject.is_some_and(|s| s == memory.user_id)
}

/// Decides whether `subject` (absent for anonymous callers) may perform
/// `action` on `memory`. Every denial is the same `Unauthorized`.
pub fn authorize(action: MemoryAction, memory: &Memory, subject: Option<&str>) -> Result<(), ApiError> {
    let owner = is_owner(memory, subject);
    let allowed = match action {
        MemoryAction::Read => memory.is_public || owner,
        MemoryAction::Update | MemoryAction::Delete => owner,
    };

    if allowed {
        Ok(())
    } else {
        warn!(
            memory_id = %memory.id,
            action = ?action,
            subject = subject.unwrap_or("anonymous"),
            "Memory access denied"
        );
        Err(ApiError::unauthorized())
    }
}
