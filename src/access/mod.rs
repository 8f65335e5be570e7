//! Identity and role checks.

mod registry;

pub use registry::AccessRegistry;
