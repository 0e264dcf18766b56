//! Entity type definitions
//!
//! MaintWatch works with two source entities:
//!
//! - [`RemovalEvent`] - one physical removal of a component from an aircraft
//! - [`ComponentReference`] - master catalogue entry for a component type

pub mod component;
pub mod removal;

pub use component::ComponentReference;
pub use removal::{
    is_unscheduled_failure, ComponentIdentity, RemovalEvent, RemovalReason, RowRef,
};
