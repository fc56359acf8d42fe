pub mod archive;
pub mod constants;
pub mod env_state;
pub mod identifiers;
pub mod readme;
pub mod reference_tables;
pub mod spatial;
pub mod temporal;
pub mod tidar;
pub mod tidar_errors;
pub mod validation;

pub use crate::constants::{FlybyId, FlybySegments, ObservationNumber, SegmentId};
pub use crate::temporal::MissionTime;
pub use crate::tidar::Tidar;
pub use crate::tidar_errors::TidarError;
