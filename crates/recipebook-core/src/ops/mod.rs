pub mod recipe_ops;
pub mod store;

pub use recipe_ops::{
    create_recipe, delete_recipe, get_recipe, load_owned_recipe, parse_recipe_id, update_recipe,
    UpdateOutcome,
};
pub use store::Store;
