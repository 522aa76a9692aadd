//! Repository layer persisting the recipe domain model to SQLite

pub mod recipe_store;
pub mod sqlite_repo;

pub use recipe_store::SqliteRecipeStore;
pub use sqlite_repo::SqliteRepo;
