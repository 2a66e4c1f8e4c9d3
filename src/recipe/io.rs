use std::path::Path;

use crate::document::{read_document, write_document};

use super::{CompositeRecipe, RecipeError, Result};

pub fn load_recipe(path: impl AsRef<Path>) -> Result<CompositeRecipe> {
    let recipe: CompositeRecipe = read_document::<_, RecipeError>(path.as_ref())?;
    recipe.validate()?;
    Ok(recipe)
}

pub fn save_recipe(path: impl AsRef<Path>, recipe: &CompositeRecipe) -> Result<()> {
    recipe.validate()?;
    write_document::<_, RecipeError>(path.as_ref(), recipe)
}
