use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ServiceError;
use models::book;

/// Sort field resolved from the request's `sortBy` parameter.
/// Fixed set of columns; unrecognized input falls back to title, so callers
/// can never inject an arbitrary field name into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Price,
}

impl SortKey {
    /// Case-insensitive match against title/author/price; anything else
    /// (including absent) resolves to title.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("author") => SortKey::Author,
            Some("price") => SortKey::Price,
            _ => SortKey::Title,
        }
    }

    fn column(self) -> book::Column {
        match self {
            SortKey::Title => book::Column::Title,
            SortKey::Author => book::Column::Author,
            SortKey::Price => book::Column::Price,
        }
    }
}

/// Incoming book payload for create and update. An empty string or a zero
/// price means "value absent"; the id is accepted but never honored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInput {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
}

/// List all books ordered ascending by the resolved sort field.
pub async fn list_books(
    db: &DatabaseConnection,
    sort: SortKey,
) -> Result<Vec<book::Model>, ServiceError> {
    book::Entity::find()
        .order_by_asc(sort.column())
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get one book by id.
pub async fn get_book(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<book::Model>, ServiceError> {
    book::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Create a book. Validation runs in full and collects every failure; on
/// success the store assigns the id regardless of what the client sent.
pub async fn create_book(
    db: &DatabaseConnection,
    input: &BookInput,
) -> Result<book::Model, ServiceError> {
    let mut errors = Vec::new();
    if input.title.is_empty() {
        errors.push("Title is required".to_string());
    }
    if input.author.is_empty() {
        errors.push("Author is required".to_string());
    }
    if input.price == 0.0 {
        errors.push("Price is required".to_string());
    }
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    // Client-supplied ids are discarded before insert.
    let am = book::ActiveModel {
        id: NotSet,
        title: Set(input.title.clone()),
        author: Set(input.author.clone()),
        price: Set(input.price),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = created.id, title = %created.title, "created book");
    Ok(created)
}

/// Update a book by id. Only non-empty/non-zero patch fields overwrite the
/// stored record; both validation checks run before either failure is raised.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    patch: &BookInput,
) -> Result<book::Model, ServiceError> {
    let existing = book::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let mut errors = Vec::new();
    if patch.title.is_empty() && patch.author.is_empty() && patch.price == 0.0 {
        errors.push("Please specify the values to be updated".to_string());
    }
    if existing.is_none() {
        errors.push(format!("Invalid book id specified for update ({id})"));
    }

    match existing {
        Some(current) if errors.is_empty() => {
            let mut am: book::ActiveModel = current.into();
            if !patch.title.is_empty() {
                am.title = Set(patch.title.clone());
            }
            if !patch.author.is_empty() {
                am.author = Set(patch.author.clone());
            }
            if patch.price != 0.0 {
                am.price = Set(patch.price);
            }
            let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            info!(id = updated.id, "updated book");
            Ok(updated)
        }
        _ => Err(ServiceError::Validation(errors)),
    }
}

/// Delete a book by key without a prior fetch. Returns whether a row went away.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = book::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected > 0 {
        info!(id, "deleted book");
    }
    Ok(res.rows_affected > 0)
}

/// One-time seed: insert the three starter records only when the store is empty.
pub async fn seed_default_books(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let count = book::Entity::find()
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }
    let rows = [
        ("Winnie-the-Pooh", "A. A. Milne", 19.25),
        ("Pride and Prejudice", "Jane Austen", 5.49),
        ("Romeo and Juliet", "William Shakespeare", 6.95),
    ]
    .map(|(title, author, price)| book::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        author: Set(author.to_string()),
        price: Set(price),
    });
    book::Entity::insert_many(rows)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!("seeded default books");
    Ok(())
}
