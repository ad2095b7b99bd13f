pub mod auth;
pub mod context;
pub mod dashboard;
pub mod item;
pub mod project;
pub mod review;
