#![deny(unsafe_code)]

pub mod defaults;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod loaders;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod tables;

pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::paths::{STANDARDS_ENV_VAR, standards_root, standards_root_from_env};
pub use crate::registry::{StandardsRegistry, TableRole, VerifySummary};
pub use crate::tables::{
    MAX_PROJECTION_YEARS, Projection, RegressionPolicy, SalaryTables, SalaryTablesBuilder,
    SkillsPolicy,
};
