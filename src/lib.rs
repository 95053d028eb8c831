//! Core library for the rowstack command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the integration tests. The modules are
//! structured to keep responsibilities narrow and composable: IO adapters
//! live under [`io`], the cell/row data representations inside [`model`],
//! the merge engine in [`merge`], and the run report plus its persistence
//! under [`report`].

pub mod error;
pub mod io;
pub mod merge;
pub mod model;
pub mod report;

pub use error::{MergeError, Result};
pub use merge::merge_rows;
pub use report::{FailedFile, MergeObserver, MergeSummary, NullObserver, RunReport, persist};
