//! Spot data access

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{RepositoryError, RepositoryResult};
use crate::models::spot::{NewSpot, Spot, SpotFilter, UpdateSpot};

const ENTITY: &str = "Spot";

const SPOT_COLUMNS: &str = "spot_id, spot_name, spot_pic, spot_photos, spot_country, spot_city, \
     spot_street, spot_street_number, spot_full_address, spot_description, spot_rating, \
     comment, owner_id, created_at";

/// Get a spot by ID
pub async fn find_by_id(conn: &mut PgConnection, spot_id: i32) -> RepositoryResult<Spot> {
    debug!("Finding spot by ID: {}", spot_id);

    let sql = format!("SELECT {} FROM spots WHERE spot_id = $1", SPOT_COLUMNS);
    sqlx::query_as::<_, Spot>(&sql)
        .bind(spot_id)
        .fetch_optional(conn)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity: ENTITY,
            id: spot_id,
        })
}

/// Get all spots
pub async fn list_all(conn: &mut PgConnection) -> RepositoryResult<Vec<Spot>> {
    list_filtered(conn, &SpotFilter::default()).await
}

/// Get the spots matching every present filter field
pub async fn list_filtered(
    conn: &mut PgConnection,
    filter: &SpotFilter,
) -> RepositoryResult<Vec<Spot>> {
    debug!("Listing spots with filter: {:?}", filter);

    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM spots WHERE TRUE",
        SPOT_COLUMNS
    ));
    if let Some(country) = &filter.spot_country {
        builder.push(" AND spot_country = ").push_bind(country.clone());
    }
    if let Some(city) = &filter.spot_city {
        builder.push(" AND spot_city = ").push_bind(city.clone());
    }
    if let Some(street) = &filter.spot_street {
        builder.push(" AND spot_street = ").push_bind(street.clone());
    }
    if let Some(owner_id) = filter.owner_id {
        builder.push(" AND owner_id = ").push_bind(owner_id);
    }
    builder.push(" ORDER BY spot_id");

    let spots = builder.build_query_as::<Spot>().fetch_all(conn).await?;
    Ok(spots)
}

/// Create a spot owned by `owner_id`
pub async fn create(
    conn: &mut PgConnection,
    new_spot: &NewSpot,
    owner_id: i32,
) -> RepositoryResult<Spot> {
    info!("Creating spot '{}' for user {}", new_spot.spot_name, owner_id);

    let sql = format!(
        r#"
        INSERT INTO spots (spot_name, spot_pic, spot_photos, spot_country, spot_city, spot_street,
                           spot_street_number, spot_full_address, spot_description, spot_rating,
                           comment, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {}
        "#,
        SPOT_COLUMNS
    );

    let spot = sqlx::query_as::<_, Spot>(&sql)
        .bind(&new_spot.spot_name)
        .bind(&new_spot.spot_pic)
        .bind(&new_spot.spot_photos)
        .bind(&new_spot.spot_country)
        .bind(&new_spot.spot_city)
        .bind(&new_spot.spot_street)
        .bind(&new_spot.spot_street_number)
        .bind(new_spot.full_address())
        .bind(&new_spot.spot_description)
        .bind(new_spot.spot_rating)
        .bind(&new_spot.comment)
        .bind(owner_id)
        .fetch_one(conn)
        .await?;

    Ok(spot)
}

/// Apply the present fields of `changes`
///
/// An empty change set only checks that the spot exists.
pub async fn update(
    conn: &mut PgConnection,
    spot_id: i32,
    changes: &UpdateSpot,
) -> RepositoryResult<()> {
    if changes.is_empty() {
        find_by_id(conn, spot_id).await?;
        return Ok(());
    }

    info!("Updating spot {}", spot_id);

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE spots SET ");
    let mut set = builder.separated(", ");
    if let Some(name) = &changes.spot_name {
        set.push("spot_name = ").push_bind_unseparated(name.clone());
    }
    if let Some(pic) = &changes.spot_pic {
        set.push("spot_pic = ").push_bind_unseparated(pic.clone());
    }
    if let Some(photos) = &changes.spot_photos {
        set.push("spot_photos = ").push_bind_unseparated(photos.clone());
    }
    if let Some(country) = &changes.spot_country {
        set.push("spot_country = ").push_bind_unseparated(country.clone());
    }
    if let Some(city) = &changes.spot_city {
        set.push("spot_city = ").push_bind_unseparated(city.clone());
    }
    if let Some(street) = &changes.spot_street {
        set.push("spot_street = ").push_bind_unseparated(street.clone());
    }
    if let Some(number) = &changes.spot_street_number {
        set.push("spot_street_number = ").push_bind_unseparated(number.clone());
    }
    if let Some(description) = &changes.spot_description {
        set.push("spot_description = ").push_bind_unseparated(description.clone());
    }
    if let Some(rating) = changes.spot_rating {
        set.push("spot_rating = ").push_bind_unseparated(rating);
    }
    if let Some(comment) = &changes.comment {
        set.push("comment = ").push_bind_unseparated(comment.clone());
    }
    builder.push(" WHERE spot_id = ").push_bind(spot_id);

    let result = builder.build().execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: ENTITY,
            id: spot_id,
        });
    }

    Ok(())
}

/// Delete a spot by ID
pub async fn delete(conn: &mut PgConnection, spot_id: i32) -> RepositoryResult<()> {
    info!("Deleting spot {}", spot_id);

    let result = sqlx::query("DELETE FROM spots WHERE spot_id = $1")
        .bind(spot_id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: ENTITY,
            id: spot_id,
        });
    }

    Ok(())
}
