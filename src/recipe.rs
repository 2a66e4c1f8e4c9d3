mod build;
mod error;
mod io;
mod spec;


pub use build::{ArchiveProfile, build_recipe};
pub use error::{RecipeError, Result};
pub use io::{load_recipe, save_recipe};
pub use spec::{
    CollectionPair, CompositeRecipe, JoinPolicy, JoinSpec, MissingProbability, RecipeStep,
};
