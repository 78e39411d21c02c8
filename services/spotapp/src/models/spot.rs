//! Spot models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::extract::{Validate, parse_id};

/// Spot row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Spot {
    pub spot_id: i32,
    pub spot_name: String,
    pub spot_pic: Option<String>,
    pub spot_photos: Vec<String>,
    pub spot_country: Option<String>,
    pub spot_city: Option<String>,
    pub spot_street: Option<String>,
    pub spot_street_number: Option<String>,
    pub spot_full_address: Option<String>,
    pub spot_description: Option<String>,
    pub spot_rating: Option<f64>,
    pub comment: Option<String>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Spot creation payload
///
/// The owner is always the authenticated caller, never the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSpot {
    pub spot_name: String,
    pub spot_pic: Option<String>,
    #[serde(default)]
    pub spot_photos: Vec<String>,
    pub spot_country: Option<String>,
    pub spot_city: Option<String>,
    pub spot_street: Option<String>,
    pub spot_street_number: Option<String>,
    pub spot_description: Option<String>,
    pub spot_rating: Option<f64>,
    pub comment: Option<String>,
}

impl NewSpot {
    /// Address line built from the non-empty components,
    /// e.g. "Ukraine, Kharkiv, Sumskaiia 25"
    pub fn full_address(&self) -> Option<String> {
        let street = [&self.spot_street, &self.spot_street_number]
            .into_iter()
            .filter_map(|part| non_empty(part))
            .collect::<Vec<_>>()
            .join(" ");

        let parts: Vec<&str> = [
            non_empty(&self.spot_country),
            non_empty(&self.spot_city),
            Some(street.as_str()).filter(|s| !s.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Validate for NewSpot {
    fn validate(&self) -> Result<(), String> {
        if self.spot_name.trim().is_empty() {
            return Err("Spot name is required".to_string());
        }
        check_spot_fields(SpotFields {
            spot_name: Some(&self.spot_name),
            spot_pic: self.spot_pic.as_deref(),
            spot_country: self.spot_country.as_deref(),
            spot_city: self.spot_city.as_deref(),
            spot_street: self.spot_street.as_deref(),
            spot_street_number: self.spot_street_number.as_deref(),
            spot_rating: self.spot_rating,
        })
    }
}

/// Partial update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateSpot {
    pub spot_name: Option<String>,
    pub spot_pic: Option<String>,
    pub spot_photos: Option<Vec<String>>,
    pub spot_country: Option<String>,
    pub spot_city: Option<String>,
    pub spot_street: Option<String>,
    pub spot_street_number: Option<String>,
    pub spot_description: Option<String>,
    pub spot_rating: Option<f64>,
    pub comment: Option<String>,
}

impl UpdateSpot {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.spot_name.is_none()
            && self.spot_pic.is_none()
            && self.spot_photos.is_none()
            && self.spot_country.is_none()
            && self.spot_city.is_none()
            && self.spot_street.is_none()
            && self.spot_street_number.is_none()
            && self.spot_description.is_none()
            && self.spot_rating.is_none()
            && self.comment.is_none()
    }
}

impl Validate for UpdateSpot {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.spot_name {
            if name.trim().is_empty() {
                return Err("Spot name must not be empty".to_string());
            }
        }
        check_spot_fields(SpotFields {
            spot_name: self.spot_name.as_deref(),
            spot_pic: self.spot_pic.as_deref(),
            spot_country: self.spot_country.as_deref(),
            spot_city: self.spot_city.as_deref(),
            spot_street: self.spot_street.as_deref(),
            spot_street_number: self.spot_street_number.as_deref(),
            spot_rating: self.spot_rating,
        })
    }
}

struct SpotFields<'a> {
    spot_name: Option<&'a str>,
    spot_pic: Option<&'a str>,
    spot_country: Option<&'a str>,
    spot_city: Option<&'a str>,
    spot_street: Option<&'a str>,
    spot_street_number: Option<&'a str>,
    spot_rating: Option<f64>,
}

fn check_spot_fields(fields: SpotFields<'_>) -> Result<(), String> {
    check_length("spot_name", fields.spot_name, 30)?;
    check_length("spot_pic", fields.spot_pic, 255)?;
    check_length("spot_country", fields.spot_country, 20)?;
    check_length("spot_city", fields.spot_city, 20)?;
    check_length("spot_street", fields.spot_street, 30)?;
    check_length("spot_street_number", fields.spot_street_number, 10)?;

    if let Some(rating) = fields.spot_rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err("spot_rating must be between 0 and 5".to_string());
        }
    }

    Ok(())
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => Err(format!(
            "{} must be at most {} characters long",
            field, max
        )),
        _ => Ok(()),
    }
}

/// Raw query string of the filtered spot listing
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SpotFilterParams {
    pub spot_country: Option<String>,
    pub spot_city: Option<String>,
    pub spot_street: Option<String>,
    pub owner_id: Option<String>,
}

/// Equality filters combined with AND; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotFilter {
    pub spot_country: Option<String>,
    pub spot_city: Option<String>,
    pub spot_street: Option<String>,
    pub owner_id: Option<i32>,
}

impl TryFrom<SpotFilterParams> for SpotFilter {
    type Error = String;

    fn try_from(params: SpotFilterParams) -> Result<Self, Self::Error> {
        let owner_id = match params.owner_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_id("owner_id", raw)?),
        };

        Ok(Self {
            spot_country: params.spot_country.filter(|s| !s.is_empty()),
            spot_city: params.spot_city.filter(|s| !s.is_empty()),
            spot_street: params.spot_street.filter(|s| !s.is_empty()),
            owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_spot() -> NewSpot {
        serde_json::from_value(serde_json::json!({
            "spot_name": "Theatr",
            "spot_country": "Ukraine",
            "spot_city": "Kharkiv",
            "spot_street": "Sumskaiia",
            "spot_street_number": "25",
            "spot_rating": 4
        }))
        .unwrap()
    }

    #[test]
    fn test_full_address_from_components() {
        assert_eq!(
            new_spot().full_address().as_deref(),
            Some("Ukraine, Kharkiv, Sumskaiia 25")
        );
    }

    #[test]
    fn test_full_address_skips_missing_parts() {
        let mut spot = new_spot();
        spot.spot_city = None;
        spot.spot_street_number = Some(String::new());
        assert_eq!(spot.full_address().as_deref(), Some("Ukraine, Sumskaiia"));

        let bare = NewSpot {
            spot_country: None,
            spot_city: None,
            spot_street: None,
            spot_street_number: None,
            ..new_spot()
        };
        assert_eq!(bare.full_address(), None);
    }

    #[test]
    fn test_spot_validation() {
        assert!(new_spot().validate().is_ok());

        let mut spot = new_spot();
        spot.spot_rating = Some(7.5);
        assert!(spot.validate().is_err());

        let mut spot = new_spot();
        spot.spot_country = Some("x".repeat(21));
        assert_eq!(
            spot.validate().unwrap_err(),
            "spot_country must be at most 20 characters long"
        );
    }

    #[test]
    fn test_filter_drops_empty_values() {
        let params = SpotFilterParams {
            spot_country: Some(String::new()),
            spot_city: Some("Kharkiv".to_string()),
            spot_street: None,
            owner_id: Some(String::new()),
        };

        let filter = SpotFilter::try_from(params).unwrap();
        assert_eq!(
            filter,
            SpotFilter {
                spot_city: Some("Kharkiv".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_filter_rejects_bad_owner_id() {
        for raw in ["abc", "0", "-3", "2147483648"] {
            let params = SpotFilterParams {
                owner_id: Some(raw.to_string()),
                ..Default::default()
            };
            assert!(SpotFilter::try_from(params).is_err(), "accepted {raw}");
        }
    }
}
