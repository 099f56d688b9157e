pub mod job;

pub use job::{EmploymentType, JobRecord, RawJobRecord, WorkMode};
