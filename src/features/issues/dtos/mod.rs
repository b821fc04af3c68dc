mod issue_dto;

pub use issue_dto::{
    CreateIssueDto, CreateIssueForm, IssueFilterQuery, IssueListDto, IssueMapDto, IssuePhotoDto,
    IssueResponseDto, MapQuery, UpdateIssueStatusForm,
};
