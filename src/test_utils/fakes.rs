//! Fake data sources.

use std::sync::Mutex;

use crate::data::{DataSource, DataSourceError, Row};
use crate::request::RequestContext;

/// Returns fixed rows and records the parameters of every call.
#[derive(Debug, Default)]
pub struct RecordingDataSource {
    rows: Vec<Row>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingDataSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Parameters received so far, one entry per call.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl DataSource for RecordingDataSource {
    fn fetch(&self, params: &[String], _ctx: &RequestContext) -> Result<Vec<Row>, DataSourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(params.to_vec());
        }
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingDataSource {
    error: DataSourceError,
}

impl FailingDataSource {
    pub fn new(error: DataSourceError) -> Self {
        Self {
            error,
        }
    }

    /// A recoverable query failure.
    pub fn query(message: &str) -> Self {
        Self::new(DataSourceError::Query {
            message: message.to_string(),
        })
    }

    /// A fatal misconfiguration.
    pub fn misconfigured(message: &str) -> Self {
        Self::new(DataSourceError::Misconfigured {
            message: message.to_string(),
        })
    }
}

impl DataSource for FailingDataSource {
    fn fetch(&self, _params: &[String], _ctx: &RequestContext) -> Result<Vec<Row>, DataSourceError> {
        Err(self.error.clone())
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
