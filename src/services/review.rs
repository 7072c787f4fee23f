use crate::{
    error::{AppError, AppResult},
    models::{Category, Review},
};
use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, Statement};
use serde::Serialize;

/// Client-visible review columns accepted for `sort_by`, plus the derived
/// comment count. Sort columns are spliced into the query text, so only
/// these fixed tokens may ever resolve to SQL; everything else stays a
/// bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    ReviewId,
    Title,
    Designer,
    Owner,
    ReviewImgUrl,
    ReviewBody,
    Category,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortBy {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            None => Ok(Self::CreatedAt),
            Some("review_id") => Ok(Self::ReviewId),
            Some("title") => Ok(Self::Title),
            Some("designer") => Ok(Self::Designer),
            Some("owner") => Ok(Self::Owner),
            Some("review_img_url") => Ok(Self::ReviewImgUrl),
            Some("review_body") => Ok(Self::ReviewBody),
            Some("category") => Ok(Self::Category),
            Some("created_at") => Ok(Self::CreatedAt),
            Some("votes") => Ok(Self::Votes),
            Some("comment_count") => Ok(Self::CommentCount),
            Some(_) => Err(AppError::InvalidSortBy),
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::ReviewId => "r.review_id",
            Self::Title => "r.title",
            Self::Designer => "r.designer",
            Self::Owner => "r.owner",
            Self::ReviewImgUrl => "r.review_img_url",
            Self::ReviewBody => "r.review_body",
            Self::Category => "r.category",
            Self::CreatedAt => "r.created_at",
            Self::Votes => "r.votes",
            Self::CommentCount => "comment_count",
        }
    }
}

/// Sort direction, exact-match only ("asc"/"desc", case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            None => Ok(Self::Desc),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(_) => Err(AppError::InvalidOrder),
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A review row augmented with its comment count.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct ReviewRecord {
    pub review_id: i32,
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_img_url: String,
    pub review_body: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub comment_count: i64,
}

const REVIEW_PROJECTION: &str = "r.review_id, r.title, r.designer, r.owner, r.review_img_url, \
     r.review_body, r.category, r.created_at, r.votes, \
     COUNT(c.comment_id) AS comment_count";

fn list_sql(filter_by_category: bool, sort_by: SortBy, order: SortOrder) -> String {
    let filter = if filter_by_category {
        "WHERE r.category = $1 "
    } else {
        ""
    };

    format!(
        "SELECT {REVIEW_PROJECTION} \
         FROM reviews r \
         LEFT JOIN comments c ON c.review_id = r.review_id \
         {filter}\
         GROUP BY r.review_id \
         ORDER BY {} {}",
        sort_by.as_sql(),
        order.as_sql()
    )
}

fn checked_new_votes(current: i32, delta: i64) -> Option<i32> {
    let next = i64::from(current).checked_add(delta)?;
    if next < 0 {
        return None;
    }
    i32::try_from(next).ok()
}

pub struct ReviewService {
    db: DatabaseConnection,
}

impl ReviewService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List reviews with comment counts, optionally filtered to one
    /// category. sort_by/order are resolved against the whitelist before
    /// anything touches the database.
    pub async fn list(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
        category: Option<&str>,
    ) -> AppResult<Vec<ReviewRecord>> {
        let sort_by = SortBy::parse(sort_by)?;
        let order = SortOrder::parse(order)?;

        // A category with no reviews returns an empty list; a category
        // that does not exist at all is a 404. Row count alone cannot
        // tell the two apart, hence the probe.
        if let Some(slug) = category {
            Category::find_by_id(slug)
                .one(&self.db)
                .await?
                .ok_or(AppError::ValueNotFound)?;
        }

        let sql = list_sql(category.is_some(), sort_by, order);
        let values: Vec<sea_orm::Value> = match category {
            Some(slug) => vec![slug.into()],
            None => vec![],
        };

        let reviews = ReviewRecord::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            &sql,
            values,
        ))
        .all(&self.db)
        .await?;

        Ok(reviews)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ReviewRecord> {
        let sql = format!(
            "SELECT {REVIEW_PROJECTION} \
             FROM reviews r \
             LEFT JOIN comments c ON c.review_id = r.review_id \
             WHERE r.review_id = $1 \
             GROUP BY r.review_id"
        );

        ReviewRecord::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            &sql,
            [id.into()],
        ))
        .one(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Apply a signed vote delta to a review. `None` means the mutation
    /// body was empty: the review is returned untouched.
    ///
    /// The floor is enforced by the UPDATE's own predicate, so two
    /// concurrent deltas cannot race the count below zero; the prior read
    /// only decides which error the caller sees.
    pub async fn change_votes(&self, id: i32, inc_votes: Option<i64>) -> AppResult<ReviewRecord> {
        let Some(delta) = inc_votes else {
            return self.get_by_id(id).await;
        };

        let current = Review::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        if checked_new_votes(current.votes, delta).is_none() {
            return Err(AppError::InvalidVoteChange);
        }

        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                "UPDATE reviews SET votes = votes + $1 \
                 WHERE review_id = $2 AND votes + $1 >= 0",
                [delta.into(), id.into()],
            ))
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidVoteChange);
        }

        self.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_defaults_to_created_at() {
        assert_eq!(SortBy::parse(None).unwrap(), SortBy::CreatedAt);
    }

    #[test]
    fn sort_by_accepts_every_whitelisted_column() {
        for column in [
            "review_id",
            "title",
            "designer",
            "owner",
            "review_img_url",
            "review_body",
            "category",
            "created_at",
            "votes",
            "comment_count",
        ] {
            assert!(SortBy::parse(Some(column)).is_ok(), "rejected {column}");
        }
    }

    #[test]
    fn sort_by_rejects_unknown_column() {
        assert!(matches!(
            SortBy::parse(Some("not_a_column")),
            Err(AppError::InvalidSortBy)
        ));
        assert!(matches!(
            SortBy::parse(Some("votes; DROP TABLE reviews")),
            Err(AppError::InvalidSortBy)
        ));
    }

    #[test]
    fn order_defaults_to_desc() {
        assert_eq!(SortOrder::parse(None).unwrap(), SortOrder::Desc);
    }

    #[test]
    fn order_is_case_sensitive() {
        assert!(SortOrder::parse(Some("asc")).is_ok());
        assert!(matches!(
            SortOrder::parse(Some("ASC")),
            Err(AppError::InvalidOrder)
        ));
        assert!(matches!(
            SortOrder::parse(Some("order")),
            Err(AppError::InvalidOrder)
        ));
    }

    #[test]
    fn list_sql_binds_category_filter() {
        let sql = list_sql(true, SortBy::CreatedAt, SortOrder::Desc);
        assert!(sql.contains("WHERE r.category = $1"));
        assert!(sql.ends_with("ORDER BY r.created_at DESC"));
    }

    #[test]
    fn list_sql_without_filter_has_no_where() {
        let sql = list_sql(false, SortBy::Votes, SortOrder::Asc);
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY r.votes ASC"));
    }

    #[test]
    fn list_sql_orders_by_derived_count_alias() {
        let sql = list_sql(false, SortBy::CommentCount, SortOrder::Desc);
        assert!(sql.ends_with("ORDER BY comment_count DESC"));
    }

    #[test]
    fn vote_floor_rejects_negative_result() {
        assert_eq!(checked_new_votes(5, -10), None);
        assert_eq!(checked_new_votes(0, -1), None);
    }

    #[test]
    fn vote_floor_allows_zero() {
        assert_eq!(checked_new_votes(5, -5), Some(0));
    }

    #[test]
    fn vote_delta_applies() {
        assert_eq!(checked_new_votes(5, -1), Some(4));
        assert_eq!(checked_new_votes(5, 1), Some(6));
    }

    #[test]
    fn vote_overflow_is_invalid() {
        assert_eq!(checked_new_votes(i32::MAX, 1), None);
        assert_eq!(checked_new_votes(5, i64::MAX), None);
        assert_eq!(checked_new_votes(5, i64::MIN), None);
    }
}
