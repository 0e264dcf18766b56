//! MaintWatch: component removal reliability
//!
//! Turns aircraft component removal logs into MTBF tables per component and
//! per ATA chapter, and projects expected failures over a fleet-hours horizon.
//!
//! ```no_run
//! use maintwatch::core::{loader, Pipeline, PipelineParams};
//!
//! let tables = loader::load_tables(&["removals.csv".into()])?;
//! let output = Pipeline::new().run(&tables, &[], &PipelineParams::default())?;
//! for record in &output.by_component.records {
//!     println!("{} {:.1}", record.label, record.mtbf_fh);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
