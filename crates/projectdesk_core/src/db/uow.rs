//! Unit of work: one explicit transaction context per workflow invocation.
//!
//! # Responsibility
//! - Own the primary connection and at most one active transaction on it.
//! - Let callers decide transaction boundaries ("start if none active, else
//!   join") via [`UnitOfWork::has_active_transaction`].
//!
//! # Invariants
//! - State machine: Idle -> Active -> (Committed | RolledBack) -> Idle.
//! - `begin` while Active is a conflict, never a nested transaction.
//! - Dropping an Active unit of work rolls the transaction back; an open
//!   transaction is never leaked.
//! - The context is an owned value passed by reference, so concurrent
//!   workflow invocations cannot cross-contaminate transaction ownership.

use log::{error, info, warn};
use rusqlite::Connection;
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UowResult<T> = Result<T, UowError>;

#[derive(Debug)]
pub enum UowError {
    /// `begin` was called while a transaction is already in progress.
    TransactionActive,
    Sqlite(rusqlite::Error),
}

impl Display for UowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransactionActive => write!(f, "a transaction is already in progress"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TransactionActive => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for UowError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Scope object owning the write connection and its single transaction.
pub struct UnitOfWork {
    conn: Connection,
    active: Cell<bool>,
}

impl UnitOfWork {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            active: Cell::new(false),
        }
    }

    /// Whether a transaction is currently in progress. Callers use this to
    /// decide whether they own the boundary or merely join it.
    pub fn has_active_transaction(&self) -> bool {
        self.active.get()
    }

    /// The connection all reads and writes of this unit of work go through.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Starts a transaction. Fails with [`UowError::TransactionActive`] when
    /// one is already in progress; joining is the caller's job, not ours.
    pub fn begin(&self) -> UowResult<()> {
        if self.active.get() {
            warn!("event=tx_begin module=uow status=conflict");
            return Err(UowError::TransactionActive);
        }
        self.conn.execute_batch("BEGIN IMMEDIATE;")?;
        self.active.set(true);
        info!("event=tx_begin module=uow status=ok");
        Ok(())
    }

    /// Persists all writes made since `begin` and returns to Idle.
    ///
    /// A commit failure triggers this unit of work's own rollback before the
    /// commit error is propagated. Calling with no active transaction is a
    /// logged no-op.
    pub fn commit(&self) -> UowResult<()> {
        if !self.active.get() {
            warn!("event=tx_commit module=uow status=noop detail=no_active_transaction");
            return Ok(());
        }
        match self.conn.execute_batch("COMMIT;") {
            Ok(()) => {
                self.active.set(false);
                info!("event=tx_commit module=uow status=ok");
                Ok(())
            }
            Err(commit_err) => {
                error!("event=tx_commit module=uow status=error error={commit_err}");
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK;") {
                    error!("event=tx_rollback module=uow status=error error={rollback_err}");
                }
                self.active.set(false);
                Err(UowError::Sqlite(commit_err))
            }
        }
    }

    /// Discards all writes made since `begin` and returns to Idle. Calling
    /// with no active transaction is a logged no-op.
    pub fn rollback(&self) -> UowResult<()> {
        if !self.active.get() {
            warn!("event=tx_rollback module=uow status=noop detail=no_active_transaction");
            return Ok(());
        }
        let result = self.conn.execute_batch("ROLLBACK;");
        self.active.set(false);
        match result {
            Ok(()) => {
                info!("event=tx_rollback module=uow status=ok");
                Ok(())
            }
            Err(err) => {
                error!("event=tx_rollback module=uow status=error error={err}");
                Err(UowError::Sqlite(err))
            }
        }
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.active.get() {
            warn!("event=uow_drop module=uow status=rollback detail=transaction_still_active");
            if let Err(err) = self.conn.execute_batch("ROLLBACK;") {
                error!("event=uow_drop module=uow status=error error={err}");
            }
            self.active.set(false);
        }
    }
}
