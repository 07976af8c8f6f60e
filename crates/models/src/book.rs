use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted book record. Ids are assigned by the store on insert; a valid
/// record always carries a non-empty title and author and a non-zero price.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let m = Model {
            id: 7,
            title: "Winnie-the-Pooh".into(),
            author: "A. A. Milne".into(),
            price: 19.25,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({
            "id": 7,
            "title": "Winnie-the-Pooh",
            "author": "A. A. Milne",
            "price": 19.25,
        }));
    }

    #[test]
    fn json_roundtrip() {
        let raw = r#"{"id":1,"title":"Dune","author":"Herbert","price":12.0}"#;
        let m: Model = serde_json::from_str(raw).unwrap();
        assert_eq!(m.title, "Dune");
        assert_eq!(m.price, 12.0);
    }
}
