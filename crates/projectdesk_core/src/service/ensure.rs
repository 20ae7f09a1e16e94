//! Shared own-vs-join transaction logic for the ensure-resolvers.
//!
//! All four resolvers follow the same shape: probe by natural key without
//! requiring a transaction, then perform any needed write inside a
//! transaction that is started here only when the caller has not already
//! started one. This module implements that shape once so ownership
//! bookkeeping cannot drift between resolvers.

use super::{WorkflowError, WorkflowResult};
use crate::db::UnitOfWork;
use crate::repo::RepoResult;
use log::error;
use rusqlite::Connection;

/// Outcome of probing for an existing row by natural key.
pub(crate) enum Resolution<K> {
    /// Row exists and needs no write.
    Exists(K),
    /// Row exists but needs an in-place write (e.g. a drifted price).
    ExistsStale(K),
    /// No row matches the natural key; an insert is needed.
    Absent,
}

/// Runs `work` inside a transaction owned by this call when none is active.
///
/// Ownership contract: begin only if idle, commit only if this call began
/// it, roll back only if this call began it, and always propagate the
/// original error unchanged. A rollback failure is logged, never allowed to
/// shadow the causing error.
pub(crate) fn run_owned<T, E>(
    uow: &UnitOfWork,
    work: impl FnOnce(&UnitOfWork) -> Result<T, E>,
) -> WorkflowResult<T>
where
    WorkflowError: From<E>,
{
    let owned = !uow.has_active_transaction();
    if owned {
        uow.begin()?;
    }
    match work(uow) {
        Ok(value) => {
            if owned {
                uow.commit()?;
            }
            Ok(value)
        }
        Err(err) => {
            if owned {
                if let Err(rollback_err) = uow.rollback() {
                    error!(
                        "event=tx_rollback module=service status=error error={rollback_err}"
                    );
                }
            }
            Err(WorkflowError::from(err))
        }
    }
}

/// Generic ensure-or-create: returns the existing key, reconciles a stale
/// row, or inserts a new one, writing only inside an owned-or-joined
/// transaction.
///
/// `write` receives `Some(key)` when reconciling an existing row and `None`
/// when inserting a fresh one.
pub(crate) fn ensure_or_create<K>(
    uow: &UnitOfWork,
    probe: impl FnOnce(&Connection) -> RepoResult<Resolution<K>>,
    write: impl FnOnce(&Connection, Option<K>) -> RepoResult<K>,
) -> WorkflowResult<K> {
    match probe(uow.connection())? {
        Resolution::Exists(key) => Ok(key),
        Resolution::ExistsStale(key) => {
            run_owned(uow, |uow| write(uow.connection(), Some(key)))
        }
        Resolution::Absent => run_owned(uow, |uow| write(uow.connection(), None)),
    }
}
