use crate::{
    error::AppResult,
    models::{category, Category, CategoryModel},
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<CategoryModel>> {
        let categories = Category::find()
            .order_by_asc(category::Column::Slug)
            .all(&self.db)
            .await?;
        Ok(categories)
    }
}
