mod issue_service;
mod photo_store;

pub use issue_service::{IssueService, NearbyQuery, TransitionRequest};
pub use photo_store::{PhotoStore, PhotoUpload, StoredPhoto, UploadPolicy};
