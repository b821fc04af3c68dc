mod admin_dtos;

pub use admin_dtos::{
    AdminLocalityDto, AdminLocalityListDto, AdminLocalityQuery, AdminUserDto, AdminUserListDto,
    AdminUserQuery, CreateLocalityDto, CreateStaffDto, UpdateLocalityDto, UpdateUserDto,
};
