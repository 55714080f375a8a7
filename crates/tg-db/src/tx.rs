//! Gated access to the shared connection.
//!
//! `ThinkgraphDb` holds a single libSQL connection, so an open transaction's
//! writes are visible to every statement issued on it. The gate keeps the
//! two apart: a `WriteTx` holds it exclusively for the life of an
//! `IMMEDIATE` transaction, and a `ReadConn` holds it shared while a read
//! runs. Readers therefore only ever see committed state.

use std::ops::Deref;

use libsql::{Connection, Transaction, TransactionBehavior};
use tokio::sync::{RwLockReadGuard, RwLockWriteGuard};

use crate::ThinkgraphDb;
use crate::error::DatabaseError;

/// An open write transaction. Derefs to `libsql::Connection` for queries.
///
/// Dropping a `WriteTx` without calling [`WriteTx::commit`] or
/// [`WriteTx::finish`] releases the gate; the enclosed transaction is left
/// to libSQL's drop behavior.
pub struct WriteTx<'a> {
    tx: Transaction,
    _gate: RwLockWriteGuard<'a, ()>,
}

impl Deref for WriteTx<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

/// Shared access to the connection for reads. Keep it alive until the
/// rows have been consumed.
pub struct ReadConn<'a> {
    conn: &'a Connection,
    _gate: RwLockReadGuard<'a, ()>,
}

impl Deref for ReadConn<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        self.conn
    }
}

impl WriteTx<'_> {
    /// Commit all statements issued through this transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard all statements issued through this transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }

    /// Commit on `Ok`, roll back on `Err`, and pass the result through.
    ///
    /// A failed rollback is logged; the original error is what the caller sees.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `result`, or the commit error.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed mutation also failed");
                }
                Err(err)
            }
        }
    }
}

impl ThinkgraphDb {
    /// Acquire the write gate and open an `IMMEDIATE` transaction.
    ///
    /// Must not be called while the same task already holds a `WriteTx`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN IMMEDIATE` fails.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.write().await;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx { tx, _gate: gate })
    }

    /// Wait for any open write to finish and borrow the connection for reads.
    ///
    /// Must not be called while the same task holds a `WriteTx`; use the
    /// transaction itself there.
    pub async fn read(&self) -> ReadConn<'_> {
        let gate = self.gate.read().await;
        ReadConn {
            conn: &self.conn,
            _gate: gate,
        }
    }
}
