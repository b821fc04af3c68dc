mod issue;
mod issue_photo;

pub use issue::{Issue, IssueStatus, IssueType};
pub use issue_photo::IssuePhoto;
