pub mod gallery;
pub mod like;
pub mod schema;
pub mod submission;

pub use crate::domain::model::{FormFields, RequestContext, Setup, SetupSubmission, SetupsResult};
pub use crate::domain::ports::{ConfigProvider, SetupRouter, SubmissionStore};
pub use crate::utils::error::Result;
