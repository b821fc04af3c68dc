mod locality_dto;

pub use locality_dto::{
    LocalityDirectoryDto, LocalityDirectoryListDto, LocalityDirectoryQuery, RepresentativeInfoDto,
};
