//! Mailbox error taxonomy (spec §7).

use thiserror::Error;

/// Failure modes surfaced by [`crate::mailbox::Mailbox`] operations.
///
/// `Full` and `Sealed` are deliberately *not* distinguishable by a caller of
/// `post_user` (spec §7, §9 Open Question 3): both drop the message silently
/// from the sender's point of view. This enum still carries both variants so
/// the mailbox can report the precise reason to the monitoring layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// The target lane's ring buffer is at capacity; the message was
    /// tail-dropped.
    #[error("mailbox lane is full")]
    Full,

    /// The mailbox is sealed (post-error) or suspended; the message was
    /// dropped without being enqueued.
    #[error("mailbox is sealed or suspended")]
    Sealed,
}
