pub mod admin;
pub mod auth;
pub mod issues;
pub mod localities;
pub mod users;
