use std::collections::BTreeMap;

use serde::Serialize;
use trivia_models::{Category, CategoryId};
use utoipa::ToSchema;

/// Categories keyed by id, e.g. `{"1": "Science", "2": "Art"}`.
pub type CategoryMap = BTreeMap<CategoryId, String>;

pub fn to_category_map(categories: Vec<Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|category| (category.id, category.kind))
        .collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    #[schema(value_type = Object, example = json!({"1": "Science", "2": "Art"}))]
    pub categories: CategoryMap,
}
