pub mod product_repo;
pub mod user_repo;

pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
