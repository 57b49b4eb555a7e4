//! The write engine - drives one request through the full mutation
//! algorithm.
//!
//! Shared preamble for all three operations: normalize the target key,
//! resolve its partition (or refer), authorize, begin an exclusive
//! transaction. Contention takes the queued-retry path: the requester gets
//! an immediate busy acknowledgment and the engine re-drives the captured
//! request when the holding transaction terminates. All other failures are
//! terminal for the request.

use crate::error::MutationResult;
use crate::ops;
use crate::request::{WriteOp, WriteRequest};
use crate::validation::{Authorizer, EntryValidator};
use arbor_core::{Dn, Response, ResultCode};
use arbor_schema::Schema;
use arbor_store::{Directory, Partition, StoreError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which pass over the algorithm a request is on.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Fresh submission from a connection.
    Initial,
    /// Re-driven from a partition's retry queue; its submitter already
    /// holds a busy acknowledgment.
    Redrive,
}

/// How one pass through the algorithm ended.
struct Disposition {
    response: Response,
    /// Set when the partition's retry queue should be drained: a
    /// transaction was terminated here, or a request was enqueued and the
    /// slot was observed free afterwards (the holder terminated between
    /// the failed begin and the push, so nothing else would drain it).
    terminated: Option<Arc<Partition<WriteRequest>>>,
    /// The request was captured into a retry queue.
    queued: bool,
}

impl Disposition {
    fn replied(response: Response) -> Self {
        Self {
            response,
            terminated: None,
            queued: false,
        }
    }

    fn code(code: ResultCode) -> Self {
        Self::replied(Response::code(code))
    }
}

/// The entry mutation engine.
pub struct WriteEngine {
    directory: Directory<WriteRequest>,
    schema: Arc<Schema>,
    authorizer: Arc<dyn Authorizer>,
    validator: Arc<dyn EntryValidator>,
}

impl WriteEngine {
    /// Create an engine over a directory of partitions.
    pub fn new(
        directory: Directory<WriteRequest>,
        schema: Arc<Schema>,
        authorizer: Arc<dyn Authorizer>,
        validator: Arc<dyn EntryValidator>,
    ) -> Self {
        Self {
            directory,
            schema,
            authorizer,
            validator,
        }
    }

    /// The directory this engine mutates.
    pub fn directory(&self) -> &Directory<WriteRequest> {
        &self.directory
    }

    /// Drive one request through the full mutation algorithm.
    ///
    /// The response is delivered through the request's responder and also
    /// returned. After a transaction termination, queued retries on that
    /// partition are re-driven in FIFO order.
    pub fn submit(&self, request: WriteRequest) -> Response {
        let disposition = self.execute(request, Attempt::Initial);
        if let Some(partition) = disposition.terminated.clone() {
            self.drain(&partition);
        }
        disposition.response
    }

    /// Re-drive queued requests until the queue is empty or the partition
    /// is contended again (the new holder drains on its own termination).
    fn drain(&self, partition: &Arc<Partition<WriteRequest>>) {
        while let Some(request) = partition.take_queued() {
            debug!(partition = %partition.suffix(), "re-driving queued request");
            let disposition = self.execute(request, Attempt::Redrive);
            if disposition.queued && disposition.terminated.is_none() {
                break;
            }
        }
    }

    /// One pass: run the algorithm and answer the submitter. A re-driven
    /// request that lands back in the queue keeps its original busy
    /// acknowledgment instead of receiving a second one.
    fn execute(&self, request: WriteRequest, attempt: Attempt) -> Disposition {
        let responder = request.responder.clone();
        let disposition = self.execute_inner(request, attempt);
        if !(disposition.queued && attempt == Attempt::Redrive) {
            responder.respond(disposition.response.clone());
        }
        disposition
    }

    fn execute_inner(&self, request: WriteRequest, attempt: Attempt) -> Disposition {
        let dn = Dn::parse(request.op.target());
        debug!(%dn, op = request.op.kind(), "write request");

        // Reject an empty target before partition resolution; delete falls
        // through to the naming check like any other unowned key.
        if dn.is_empty() && !matches!(request.op, WriteOp::Delete { .. }) {
            return Disposition::code(ResultCode::InvalidDnSyntax);
        }

        let Some(partition) = self.directory.resolve(&dn) else {
            return match self.directory.referrals(&dn) {
                Some(targets) => Disposition::replied(Response::referral(targets)),
                None => Disposition::code(ResultCode::NamingViolation),
            };
        };

        let identity = request.responder.bind_dn();
        if !self
            .authorizer
            .allow_write(identity.as_deref(), partition.suffix(), &dn)
        {
            return Disposition::code(ResultCode::InsufficientAccess);
        }

        // Cheap schema screen for add, before the transaction.
        if let WriteOp::Add { entry, .. } = &request.op {
            if let Err(e) = ops::screen_add(&self.schema, entry) {
                return Disposition::code(e.result_code());
            }
        }

        let mut txn = match partition.begin() {
            Ok(txn) => txn,
            Err(StoreError::Busy) => {
                return match attempt {
                    Attempt::Initial => match partition.queue_request(request) {
                        Ok(()) => Disposition {
                            response: Response::code(ResultCode::Busy),
                            // The holder may have terminated between the
                            // failed begin and the push; if the slot is
                            // free now, drive the drain from here.
                            terminated: (!partition.is_busy()).then(|| partition.clone()),
                            queued: true,
                        },
                        Err(e) => {
                            debug!(partition = %partition.suffix(), error = %e, "retry queue rejected request");
                            Disposition::code(ResultCode::Busy)
                        }
                    },
                    Attempt::Redrive => {
                        partition.requeue_front(request);
                        Disposition {
                            response: Response::code(ResultCode::Busy),
                            terminated: (!partition.is_busy()).then(|| partition.clone()),
                            queued: true,
                        }
                    }
                };
            }
            Err(e) => {
                warn!(partition = %partition.suffix(), error = %e, "begin failed");
                return Disposition::code(ResultCode::Other);
            }
        };

        let result: MutationResult<()> = match request.op {
            WriteOp::Add { entry, .. } => ops::apply_add(
                self.validator.as_ref(),
                &partition,
                &mut txn,
                &dn,
                entry,
                identity.as_deref(),
            ),
            WriteOp::Delete { .. } => ops::apply_delete(&partition, &mut txn, &dn),
            WriteOp::Modify { items, .. } => ops::apply_modify(
                &self.schema,
                self.validator.as_ref(),
                &partition,
                &mut txn,
                &dn,
                &items,
                identity.as_deref(),
            ),
        };

        // Single termination point: commit on the one success path, abort
        // on every other.
        let response = match result {
            Ok(()) => {
                txn.commit();
                Response::code(ResultCode::Success)
            }
            Err(e) => {
                txn.abort();
                debug!(%dn, error = %e, "write failed");
                Response::code(e.result_code())
            }
        };

        Disposition {
            response,
            terminated: Some(partition),
            queued: false,
        }
    }
}
