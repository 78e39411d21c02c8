//! User data access

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{RepositoryError, RepositoryResult};
use crate::models::user::{NewUser, UpdateUser, User};

const ENTITY: &str = "User";

/// Get a user by ID
pub async fn find_by_id(conn: &mut PgConnection, user_id: i32) -> RepositoryResult<User> {
    debug!("Finding user by ID: {}", user_id);

    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, nickname, first_name, last_name, user_pic, email, hashed_password,
               premium_account_type, disabled, friends, added_spots, favourite_spots, created_at
        FROM users
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(conn)
    .await?
    .ok_or(RepositoryError::NotFound {
        entity: ENTITY,
        id: user_id,
    })
}

/// Find a user by email, the identity carried in tokens
pub async fn find_by_email(conn: &mut PgConnection, email: &str) -> RepositoryResult<Option<User>> {
    debug!("Finding user by email: {}", email);

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, nickname, first_name, last_name, user_pic, email, hashed_password,
               premium_account_type, disabled, friends, added_spots, favourite_spots, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Find a user by nickname or email, as typed into the login form
pub async fn find_by_nickname_or_email(
    conn: &mut PgConnection,
    login: &str,
) -> RepositoryResult<Option<User>> {
    debug!("Finding user by nickname or email: {}", login);

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, nickname, first_name, last_name, user_pic, email, hashed_password,
               premium_account_type, disabled, friends, added_spots, favourite_spots, created_at
        FROM users
        WHERE nickname = $1 OR email = $1
        "#,
    )
    .bind(login)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Get all users
pub async fn list_all(conn: &mut PgConnection) -> RepositoryResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, nickname, first_name, last_name, user_pic, email, hashed_password,
               premium_account_type, disabled, friends, added_spots, favourite_spots, created_at
        FROM users
        ORDER BY user_id
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(users)
}

/// Create a new user; `hashed_password` must already be hashed
pub async fn create(
    conn: &mut PgConnection,
    new_user: &NewUser,
    hashed_password: &str,
) -> RepositoryResult<User> {
    info!("Creating new user: {}", new_user.nickname);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (nickname, first_name, last_name, user_pic, email, hashed_password,
                           premium_account_type, friends, added_spots, favourite_spots)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING user_id, nickname, first_name, last_name, user_pic, email, hashed_password,
                  premium_account_type, disabled, friends, added_spots, favourite_spots, created_at
        "#,
    )
    .bind(&new_user.nickname)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.user_pic)
    .bind(&new_user.email)
    .bind(hashed_password)
    .bind(new_user.premium_account_type)
    .bind(&new_user.friends)
    .bind(&new_user.added_spots)
    .bind(&new_user.favourite_spots)
    .fetch_one(conn)
    .await?;

    Ok(user)
}

/// Apply the present fields of `changes`
///
/// `hashed_password` replaces `changes.password`, which is never stored as is.
/// An empty change set only checks that the user exists.
pub async fn update(
    conn: &mut PgConnection,
    user_id: i32,
    changes: &UpdateUser,
    hashed_password: Option<String>,
) -> RepositoryResult<()> {
    if changes.is_empty() {
        return ensure_exists(conn, user_id).await;
    }

    info!("Updating user {}", user_id);

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET ");
    let mut set = builder.separated(", ");
    if let Some(nickname) = &changes.nickname {
        set.push("nickname = ").push_bind_unseparated(nickname.clone());
    }
    if let Some(first_name) = &changes.first_name {
        set.push("first_name = ").push_bind_unseparated(first_name.clone());
    }
    if let Some(last_name) = &changes.last_name {
        set.push("last_name = ").push_bind_unseparated(last_name.clone());
    }
    if let Some(user_pic) = &changes.user_pic {
        set.push("user_pic = ").push_bind_unseparated(user_pic.clone());
    }
    if let Some(email) = &changes.email {
        set.push("email = ").push_bind_unseparated(email.clone());
    }
    if let Some(hashed_password) = hashed_password {
        set.push("hashed_password = ").push_bind_unseparated(hashed_password);
    }
    if let Some(premium) = changes.premium_account_type {
        set.push("premium_account_type = ").push_bind_unseparated(premium);
    }
    if let Some(friends) = &changes.friends {
        set.push("friends = ").push_bind_unseparated(friends.clone());
    }
    if let Some(added_spots) = &changes.added_spots {
        set.push("added_spots = ").push_bind_unseparated(added_spots.clone());
    }
    if let Some(favourite_spots) = &changes.favourite_spots {
        set.push("favourite_spots = ").push_bind_unseparated(favourite_spots.clone());
    }
    builder.push(" WHERE user_id = ").push_bind(user_id);

    let result = builder.build().execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: ENTITY,
            id: user_id,
        });
    }

    Ok(())
}

/// Delete a user by ID
pub async fn delete(conn: &mut PgConnection, user_id: i32) -> RepositoryResult<()> {
    info!("Deleting user {}", user_id);

    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: ENTITY,
            id: user_id,
        });
    }

    Ok(())
}

async fn ensure_exists(conn: &mut PgConnection, user_id: i32) -> RepositoryResult<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(conn)
        .await?;

    if !exists {
        return Err(RepositoryError::NotFound {
            entity: ENTITY,
            id: user_id,
        });
    }

    Ok(())
}
