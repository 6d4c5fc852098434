pub mod projection;

pub use projection::{ProjectionRequest, ProjectionService};
