//! Partitions and their retry queues.
//!
//! A partition is a named, disjoint region of the key space backed by one
//! ordered namespace. At most one transaction is open on a partition at any
//! instant; a second begin fails busy rather than blocking. Requests that
//! hit a busy partition may queue for FIFO retry, drained one at a time by
//! whoever terminates the holding transaction.

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use crate::txn::Transaction;
use arbor_core::Dn;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;

/// Default bound on queued retries per partition.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

/// A queued item that may outlive the connection that submitted it.
pub trait Retryable {
    /// False once the submitting connection is gone; dead items are
    /// discarded on drain without being executed.
    fn is_live(&self) -> bool;
}

impl Retryable for () {
    fn is_live(&self) -> bool {
        true
    }
}

/// One partition of the key space, with its namespace and pending-request
/// queue. `R` is the request type queued for retry.
pub struct Partition<R> {
    suffix: Dn,
    relax: bool,
    indexed_attrs: Vec<String>,
    queue_depth: usize,
    namespace: Mutex<Namespace>,
    queue: Mutex<VecDeque<R>>,
}

impl<R> Partition<R> {
    /// Create a partition rooted at `suffix`.
    pub fn new(suffix: Dn) -> Self {
        Self {
            suffix,
            relax: false,
            indexed_attrs: Vec::new(),
            queue_depth: DEFAULT_QUEUE_DEPTH,
            namespace: Mutex::new(Namespace::new()),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Tolerate unknown attribute types (administrative/bulk loads).
    pub fn with_relax(mut self) -> Self {
        self.relax = true;
        self
    }

    /// Maintain an equality index for the named attribute.
    pub fn with_index(mut self, attr: impl Into<String>) -> Self {
        self.indexed_attrs.push(attr.into().to_ascii_lowercase());
        self
    }

    /// Override the retry queue bound.
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth;
        self
    }

    /// The partition's root key.
    pub fn suffix(&self) -> &Dn {
        &self.suffix
    }

    /// Whether unknown attribute types are tolerated here.
    pub fn relax(&self) -> bool {
        self.relax
    }

    /// Attributes indexed in this partition.
    pub fn indexed_attrs(&self) -> &[String] {
        &self.indexed_attrs
    }

    /// True if a transaction is currently open on this partition.
    pub fn is_busy(&self) -> bool {
        self.namespace.is_locked()
    }

    /// Begin an exclusive transaction, failing `Busy` immediately if one is
    /// already open.
    pub fn begin(&self) -> StoreResult<Transaction<'_>> {
        match self.namespace.try_lock() {
            Some(slot) => Ok(Transaction::new(slot)),
            None => Err(StoreError::Busy),
        }
    }
}

impl<R: Retryable> Partition<R> {
    /// Queue a request for retry. Accepted only while the partition is
    /// busy and the queue has room; the caller must still answer the
    /// requester busy immediately.
    pub fn queue_request(&self, request: R) -> StoreResult<()> {
        // Busy is checked under the queue lock, so a concurrent drain
        // cannot empty the queue between the check and the push.
        let mut queue = self.queue.lock();
        if !self.is_busy() {
            return Err(StoreError::NotBusy);
        }
        if queue.len() >= self.queue_depth {
            return Err(StoreError::QueueFull);
        }
        queue.push_back(request);
        debug!(partition = %self.suffix, depth = queue.len(), "queued request for retry");
        Ok(())
    }

    /// Put a drained request back at the queue front after it hit
    /// contention again, preserving its FIFO position ahead of requests
    /// queued after it. Never rejected: the request held a queue slot a
    /// moment ago.
    pub fn requeue_front(&self, request: R) {
        let mut queue = self.queue.lock();
        queue.push_front(request);
        debug!(partition = %self.suffix, depth = queue.len(), "re-queued request at queue front");
    }

    /// Dequeue the oldest still-live request, discarding entries whose
    /// connection is gone. Called once per transaction termination.
    pub fn take_queued(&self) -> Option<R> {
        let mut queue = self.queue.lock();
        while let Some(request) = queue.pop_front() {
            if request.is_live() {
                debug!(partition = %self.suffix, remaining = queue.len(), "draining queued request");
                return Some(request);
            }
            debug!(partition = %self.suffix, "dropping queued request from dead connection");
        }
        None
    }

    /// Number of requests waiting for retry.
    pub fn queued_len(&self) -> usize {
        self.queue.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: u32,
        live: bool,
    }

    impl Retryable for Item {
        fn is_live(&self) -> bool {
            self.live
        }
    }

    #[test]
    fn test_second_begin_fails_busy() {
        // GIVEN
        let p: Partition<()> = Partition::new(Dn::parse("dc=x"));
        let _txn = p.begin().unwrap();

        // WHEN
        let second = p.begin();

        // THEN
        assert!(matches!(second, Err(StoreError::Busy)));
    }

    #[test]
    fn test_slot_released_on_termination() {
        // GIVEN
        let p: Partition<()> = Partition::new(Dn::parse("dc=x"));
        p.begin().unwrap().abort();

        // THEN
        assert!(p.begin().is_ok());
    }

    #[test]
    fn test_queue_rejected_when_not_busy() {
        // GIVEN
        let p: Partition<Item> = Partition::new(Dn::parse("dc=x"));

        // WHEN
        let result = p.queue_request(Item { id: 1, live: true });

        // THEN
        assert!(matches!(result, Err(StoreError::NotBusy)));
    }

    #[test]
    fn test_queue_bounded() {
        // GIVEN
        let p: Partition<Item> = Partition::new(Dn::parse("dc=x")).with_queue_depth(1);
        let _txn = p.begin().unwrap();
        p.queue_request(Item { id: 1, live: true }).unwrap();

        // WHEN
        let result = p.queue_request(Item { id: 2, live: true });

        // THEN
        assert!(matches!(result, Err(StoreError::QueueFull)));
    }

    #[test]
    fn test_drain_is_fifo() {
        // GIVEN
        let p: Partition<Item> = Partition::new(Dn::parse("dc=x"));
        let txn = p.begin().unwrap();
        p.queue_request(Item { id: 1, live: true }).unwrap();
        p.queue_request(Item { id: 2, live: true }).unwrap();
        txn.abort();

        // THEN
        assert_eq!(p.take_queued().unwrap().id, 1);
        assert_eq!(p.take_queued().unwrap().id, 2);
        assert!(p.take_queued().is_none());
    }

    #[test]
    fn test_requeue_front_precedes_earlier_queued() {
        // GIVEN
        let p: Partition<Item> = Partition::new(Dn::parse("dc=x"));
        let txn = p.begin().unwrap();
        p.queue_request(Item { id: 1, live: true }).unwrap();
        p.queue_request(Item { id: 2, live: true }).unwrap();

        // WHEN: a drained request goes back at the front
        p.requeue_front(Item { id: 3, live: true });
        txn.abort();

        // THEN
        assert_eq!(p.take_queued().unwrap().id, 3);
        assert_eq!(p.take_queued().unwrap().id, 1);
        assert_eq!(p.take_queued().unwrap().id, 2);
    }

    #[test]
    fn test_drain_discards_dead_connections() {
        // GIVEN
        let p: Partition<Item> = Partition::new(Dn::parse("dc=x"));
        let txn = p.begin().unwrap();
        p.queue_request(Item { id: 1, live: false }).unwrap();
        p.queue_request(Item { id: 2, live: true }).unwrap();
        txn.abort();

        // WHEN
        let drained = p.take_queued().unwrap();

        // THEN
        assert_eq!(drained.id, 2);
    }
}
