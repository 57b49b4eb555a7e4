//! Decoded write requests and the reply channel back to their submitter.

use arbor_core::{Entry, Response};
use arbor_store::Retryable;
use std::sync::Arc;

/// The reply channel for one request's submitter.
///
/// Wire encoding and connection bookkeeping live outside the write path;
/// this is the narrow seam the engine answers through. A queued retry keeps
/// its responder, so the eventual result still reaches the original
/// submitter - unless the connection is gone, in which case the queued
/// entry is discarded without a reply.
pub trait Responder: Send + Sync {
    /// Deliver one protocol response.
    fn respond(&self, response: Response);

    /// The submitter's bound identity, or `None` when anonymous.
    fn bind_dn(&self) -> Option<String>;

    /// False once the submitting connection is gone.
    fn is_connected(&self) -> bool;
}

/// One decoded mutation payload.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Create the entry at a key.
    Add { dn: String, entry: Entry },
    /// Remove the entry at a key (leaves only).
    Delete { dn: String },
    /// Apply an ordered list of attribute edits to the entry at a key.
    Modify { dn: String, items: Vec<ModifyItem> },
}

impl WriteOp {
    /// The raw target key of this operation.
    pub fn target(&self) -> &str {
        match self {
            WriteOp::Add { dn, .. } | WriteOp::Delete { dn } | WriteOp::Modify { dn, .. } => dn,
        }
    }

    /// Operation name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            WriteOp::Add { .. } => "add",
            WriteOp::Delete { .. } => "delete",
            WriteOp::Modify { .. } => "modify",
        }
    }
}

/// How one modify item edits its attribute's value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyKind {
    /// Union the given values into the attribute, creating it if absent.
    Add,
    /// Remove the given values, or the whole attribute if none are given.
    Delete,
    /// Replace the value set, or remove the attribute if none are given.
    Replace,
}

/// One element of a modify operation's ordered edit list.
#[derive(Debug, Clone)]
pub struct ModifyItem {
    pub kind: ModifyKind,
    pub attr: String,
    pub values: Vec<String>,
}

impl ModifyItem {
    pub fn add(attr: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            kind: ModifyKind::Add,
            attr: attr.into(),
            values,
        }
    }

    pub fn delete(attr: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            kind: ModifyKind::Delete,
            attr: attr.into(),
            values,
        }
    }

    pub fn replace(attr: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            kind: ModifyKind::Replace,
            attr: attr.into(),
            values,
        }
    }
}

/// A decoded request paired with its reply channel.
pub struct WriteRequest {
    pub op: WriteOp,
    pub responder: Arc<dyn Responder>,
}

impl WriteRequest {
    pub fn new(op: WriteOp, responder: Arc<dyn Responder>) -> Self {
        Self { op, responder }
    }
}

impl Retryable for WriteRequest {
    fn is_live(&self) -> bool {
        self.responder.is_connected()
    }
}
