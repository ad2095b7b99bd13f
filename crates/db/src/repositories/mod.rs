//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD and query
//! methods that accept `&PgPool` as the first argument. Every query is
//! scoped by `user_id`; a row owned by someone else is indistinguishable
//! from a missing row.

pub mod context_repo;
pub mod dashboard_repo;
pub mod item_repo;
pub mod project_repo;
pub mod review_repo;
pub mod user_repo;

pub use context_repo::ContextRepo;
pub use dashboard_repo::DashboardRepo;
pub use item_repo::ItemRepo;
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
