//! Part tree rendering.
//!
//! A page is a forest of [`Part`]s. [`PartRenderer`] walks a tree bottom-up:
//! each part's children render first, their wrapped HTML becomes data for the
//! parent, the parent's data source supplies rows, and the parent's template
//! renders once per row. The concatenated output is wrapped exactly once in an
//! element identifying the part (see [`wrap`]).
//!
//! Data source results are classified by [`FetchOutcome`]. Empty results and
//! recoverable failures fall back to child data only and are logged; fatal
//! failures abort the render with [`RenderError::DataSource`].

mod envelope;
mod error;
mod outcome;
mod part;
mod renderer;

pub use envelope::wrap;
pub use error::RenderError;
pub use outcome::{FetchOutcome, Recovery, merge_child_outputs};
pub use part::Part;
pub use renderer::{DEFAULT_MAX_RENDER_DEPTH, PartRenderer};
