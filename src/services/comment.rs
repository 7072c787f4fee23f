use crate::{
    error::{AppError, AppResult},
    models::{comment, Comment, CommentModel, Review, User},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

pub struct CommentService {
    db: DatabaseConnection,
}

impl CommentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All comments attached to a review. The review itself is checked
    /// first so an absent review and a review without comments stay
    /// distinguishable.
    pub async fn list_by_review(&self, review_id: i32) -> AppResult<Vec<CommentModel>> {
        self.ensure_review_exists(review_id).await?;

        let comments = Comment::find()
            .filter(comment::Column::ReviewId.eq(review_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(comments)
    }

    pub async fn create(
        &self,
        review_id: i32,
        author: &str,
        body: &str,
    ) -> AppResult<CommentModel> {
        self.ensure_review_exists(review_id).await?;

        User::find_by_id(author)
            .one(&self.db)
            .await?
            .ok_or(AppError::ValueNotFound)?;

        let now = chrono::Utc::now().naive_utc();

        let new_comment = comment::ActiveModel {
            body: sea_orm::ActiveValue::Set(body.to_string()),
            votes: sea_orm::ActiveValue::Set(0),
            author: sea_orm::ActiveValue::Set(author.to_string()),
            review_id: sea_orm::ActiveValue::Set(review_id),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let comment = new_comment.insert(&self.db).await?;
        Ok(comment)
    }

    /// Remove a comment. Deleting an id that is already gone is not an
    /// error; the caller sees the same outcome either way.
    pub async fn delete(&self, comment_id: i32) -> AppResult<()> {
        Comment::delete_by_id(comment_id).exec(&self.db).await?;
        Ok(())
    }

    async fn ensure_review_exists(&self, review_id: i32) -> AppResult<()> {
        Review::find_by_id(review_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::ValueNotFound)?;
        Ok(())
    }
}
