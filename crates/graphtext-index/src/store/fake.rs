use std::cell::RefCell;
use std::rc::Rc;

use graphtext_core::model::ConnectionConfig;

use super::{GraphSession, GraphStore};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    labels: Vec<String>,
    property_keys: Vec<String>,
    indexes: Vec<String>,
    refuse_connect: bool,
    failures: Vec<(String, String)>,
    statements: Vec<String>,
    connects: usize,
    closes: usize,
}

/// Scripted in-memory store that records every statement it sees.
///
/// Understands just enough of the statement surface to keep a list of
/// full-text index names, so drop/create interplay behaves like a server.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    state: Rc<RefCell<State>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(self, labels: &[&str]) -> Self {
        self.state.borrow_mut().labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_property_keys(self, keys: &[&str]) -> Self {
        self.state.borrow_mut().property_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_index(self, name: &str) -> Self {
        self.state.borrow_mut().indexes.push(name.to_string());
        self
    }

    pub fn refusing_connections(self) -> Self {
        self.state.borrow_mut().refuse_connect = true;
        self
    }

    /// Fail any statement starting with `prefix`.
    pub fn failing_on(self, prefix: &str, message: &str) -> Self {
        self.state
            .borrow_mut()
            .failures
            .push((prefix.to_string(), message.to_string()));
        self
    }

    pub fn add_label(&self, label: &str) {
        self.state.borrow_mut().labels.push(label.to_string());
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.borrow().statements.clone()
    }

    pub fn indexes(&self) -> Vec<String> {
        self.state.borrow().indexes.clone()
    }

    pub fn connects(&self) -> usize {
        self.state.borrow().connects
    }

    pub fn closes(&self) -> usize {
        self.state.borrow().closes
    }
}

impl GraphStore for FakeStore {
    type Session = FakeSession;

    fn connect(&self, _config: &ConnectionConfig) -> Result<FakeSession, StoreError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_connect {
            return Err(StoreError::Connect("connection refused".into()));
        }
        state.connects += 1;
        Ok(FakeSession {
            state: Rc::clone(&self.state),
        })
    }
}

pub struct FakeSession {
    state: Rc<RefCell<State>>,
}

impl FakeSession {
    fn record(&self, statement: &str) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        state.statements.push(statement.to_string());
        let failure = state
            .failures
            .iter()
            .find(|(prefix, _)| statement.starts_with(prefix.as_str()));
        match failure {
            Some((_, message)) => Err(StoreError::Statement {
                statement: statement.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl GraphSession for FakeSession {
    fn run(&mut self, statement: &str) -> Result<(), StoreError> {
        self.record(statement)?;

        let words: Vec<&str> = statement.split_whitespace().collect();
        let mut state = self.state.borrow_mut();
        match words.as_slice() {
            ["DROP", "INDEX", name, ..] => state.indexes.retain(|i| i.as_str() != *name),
            ["CREATE", "FULLTEXT", "INDEX", name, ..] => {
                if state.indexes.iter().any(|i| i.as_str() == *name) {
                    return Err(StoreError::Statement {
                        statement: statement.to_string(),
                        message: format!("An equivalent index already exists: {name}"),
                    });
                }
                state.indexes.push(name.to_string());
            }
            _ => {}
        }
        Ok(())
    }

    fn query_column(&mut self, statement: &str, column: &str) -> Result<Vec<String>, StoreError> {
        self.record(statement)?;

        let state = self.state.borrow();
        let rows = match (statement, column) {
            ("CALL db.labels()", "label") => state.labels.clone(),
            ("CALL db.propertyKeys()", "propertyKey") => state.property_keys.clone(),
            (s, "name") if s.starts_with("SHOW FULLTEXT INDEXES") => state.indexes.clone(),
            _ => return Err(StoreError::Row(format!("no column `{column}`"))),
        };
        Ok(rows)
    }

    fn close(&mut self) {
        self.state.borrow_mut().closes += 1;
    }
}
