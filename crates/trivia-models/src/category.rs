use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    /// Display label, e.g. "Science"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_type_field() {
        let category = Category {
            id: CategoryId(1),
            kind: "Science".to_string(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "Science");
        assert!(json.get("kind").is_none());
    }
}
