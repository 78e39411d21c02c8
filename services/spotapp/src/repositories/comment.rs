//! Comment data access

use sqlx::PgConnection;
use tracing::{debug, info};

use super::{RepositoryError, RepositoryResult};
use crate::models::comment::{Comment, NewComment};

const ENTITY: &str = "Comment";

/// Get a comment by ID
pub async fn find_by_id(conn: &mut PgConnection, comment_id: i32) -> RepositoryResult<Comment> {
    debug!("Finding comment by ID: {}", comment_id);

    sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, body, owner_id, spot_id, created_at
        FROM comments
        WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(conn)
    .await?
    .ok_or(RepositoryError::NotFound {
        entity: ENTITY,
        id: comment_id,
    })
}

/// Get all comments
pub async fn list_all(conn: &mut PgConnection) -> RepositoryResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, body, owner_id, spot_id, created_at
        FROM comments
        ORDER BY comment_id
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(comments)
}

/// Create a comment owned by `owner_id`
pub async fn create(
    conn: &mut PgConnection,
    new_comment: &NewComment,
    owner_id: i32,
) -> RepositoryResult<Comment> {
    info!("Creating comment for user {}", owner_id);

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (body, owner_id, spot_id)
        VALUES ($1, $2, $3)
        RETURNING comment_id, body, owner_id, spot_id, created_at
        "#,
    )
    .bind(&new_comment.body)
    .bind(owner_id)
    .bind(new_comment.spot_id)
    .fetch_one(conn)
    .await?;

    Ok(comment)
}
