//! Data fetch results and the rows a part is rendered with.

use crate::data::{DataSourceError, Row};
use crate::registry::Component;
use crate::request::RequestContext;

/// Result of asking a component's data source for rows.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The source returned at least one row
    Rows(Vec<Row>),
    /// The component has no data source
    Unbound,
    /// The source failed or returned nothing; render with child data only
    Recovered(Recovery),
    /// The source failed in a way the render cannot absorb
    Fatal(DataSourceError),
}

/// Why a fetch fell back to child data.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    EmptyResult,
    Failed(DataSourceError),
}

impl FetchOutcome {
    /// Query the component's data source with already escaped parameters.
    pub fn fetch(component: &Component, params: &[String], ctx: &RequestContext) -> Self {
        let Some(source) = component.data_source() else {
            return FetchOutcome::Unbound;
        };

        match source.fetch(params, ctx) {
            Ok(rows) if rows.is_empty() => FetchOutcome::Recovered(Recovery::EmptyResult),
            Ok(rows) => FetchOutcome::Rows(rows),
            Err(err) if err.is_recoverable() => FetchOutcome::Recovered(Recovery::Failed(err)),
            Err(err) => FetchOutcome::Fatal(err),
        }
    }

    /// The rows to render a part with.
    ///
    /// Data rows are extended with `child_outputs`, child values replacing
    /// same-named fields. Without data rows the child outputs alone form the
    /// single row. A fatal outcome yields its error.
    pub fn into_render_rows(self, child_outputs: Row) -> Result<Vec<Row>, DataSourceError> {
        match self {
            FetchOutcome::Rows(mut rows) => {
                merge_child_outputs(&mut rows, &child_outputs);
                Ok(rows)
            }
            FetchOutcome::Unbound | FetchOutcome::Recovered(_) => Ok(vec![child_outputs]),
            FetchOutcome::Fatal(err) => Err(err),
        }
    }
}

/// Overwrite or extend every row with the child outputs.
pub fn merge_child_outputs(rows: &mut [Row], child_outputs: &Row) {
    for row in rows.iter_mut() {
        for (key, value) in child_outputs {
            row.insert(key.clone(), value.clone());
        }
    }
}
