//! The seam between the reconciler and a concrete graph store.
//!
//! Everything here is synchronous: each call blocks until the store answers
//! or the driver's own timeout fires. No extra timeout is layered on top.

pub mod neo4j;

#[cfg(test)]
pub(crate) mod fake;

use std::ops::{Deref, DerefMut};

use graphtext_core::model::ConnectionConfig;

use crate::error::StoreError;

pub use neo4j::{Neo4jSession, Neo4jStore};

/// Opens sessions against a graph store.
pub trait GraphStore {
    type Session: GraphSession;

    /// Connect and verify the credentials, failing on a bad endpoint or login.
    fn connect(&self, config: &ConnectionConfig) -> Result<Self::Session, StoreError>;
}

/// A live session. Statements run one at a time, in call order.
pub trait GraphSession {
    /// Execute a statement and discard any rows it returns.
    fn run(&mut self, statement: &str) -> Result<(), StoreError>;

    /// Execute a statement and read `column` from every row as a string.
    fn query_column(&mut self, statement: &str, column: &str) -> Result<Vec<String>, StoreError>;

    /// Release the session. Must be safe to call more than once and after a
    /// failed statement.
    fn close(&mut self);
}

/// Closes the wrapped session exactly once: on [`SessionGuard::close`] or on
/// drop, whichever comes first. Drop covers early returns and panics.
pub struct SessionGuard<S: GraphSession> {
    session: S,
    closed: bool,
}

impl<S: GraphSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            closed: false,
        }
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.session.close();
            tracing::debug!("Session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<S: GraphSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: GraphSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: GraphSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeStore;
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig::new("bolt://fake:7687", "neo4j", "pw")
    }

    #[test]
    fn test_guard_closes_on_drop() {
        let store = FakeStore::new();
        {
            let _guard = SessionGuard::new(store.connect(&config()).unwrap());
        }
        assert_eq!(store.closes(), 1);
    }

    #[test]
    fn test_explicit_close_then_drop_closes_once() {
        let store = FakeStore::new();
        let mut guard = SessionGuard::new(store.connect(&config()).unwrap());
        guard.close();
        assert!(guard.is_closed());
        drop(guard);
        assert_eq!(store.closes(), 1);
    }

    #[test]
    fn test_guard_closes_when_unwinding() {
        let store = FakeStore::new();
        let session = store.connect(&config()).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = SessionGuard::new(session);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(store.closes(), 1);
    }
}
