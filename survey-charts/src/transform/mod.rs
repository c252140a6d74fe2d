//! Transformation module.
//!
//! - Key: group key construction and job title sanitization
//! - Grouper: records to salary-sorted groups
//! - Pipeline: the full read → group → chart → snapshot run

pub mod grouper;
pub mod key;
pub mod pipeline;

pub use grouper::{group, group_and_sort, sort_groups};
pub use key::{sanitize_job_title, KeyBuilder};
pub use pipeline::*;
