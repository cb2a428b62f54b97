use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, DomainResult, Entity, EntityId, FieldValue, Timestamps};

use crate::validate::{id_value, non_empty, read_only};

/// Highest rating an agent can carry.
pub const MAX_RATING: f64 = 5.0;

/// Input for [`Agent::new`] and the fixture format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgent {
    pub id: EntityId,
    pub name: String,
    pub rating: f64,
    #[serde(alias = "city")]
    pub location: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Active listing count.
    #[serde(default)]
    pub listings: u32,
    #[serde(default)]
    pub favorite: bool,
}

/// A real-estate agent shown on the discovery page.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: EntityId,
    name: String,
    rating: f64,
    location: String,
    verified: bool,
    specialties: Vec<String>,
    listings: u32,
    favorite: bool,
    timestamps: Timestamps,
}

fn rating(field: &str, value: f64) -> DomainResult<f64> {
    if !(0.0..=MAX_RATING).contains(&value) {
        return Err(DomainError::validation(format!(
            "{field} must be between 0 and {MAX_RATING}"
        )));
    }
    Ok(value)
}

impl Agent {
    pub fn new(draft: NewAgent, at: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id: draft.id,
            name: non_empty("name", draft.name)?,
            rating: rating("rating", draft.rating)?,
            location: non_empty("location", draft.location)?,
            verified: draft.verified,
            specialties: draft.specialties,
            listings: draft.listings,
            favorite: draft.favorite,
            timestamps: Timestamps::at(at),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn listings(&self) -> u32 {
        self.listings
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }
}

impl Entity for Agent {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "rating",
        "location",
        "verified",
        "specialties",
        "listings",
        "favorite",
        "created_at",
        "modified_at",
    ];

    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("city", "location"),
        ("specialty", "specialties"),
        ("stars", "rating"),
        ("favorited", "favorite"),
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => id_value(self.id),
            "name" => self.name.clone().into(),
            "rating" => self.rating.into(),
            "location" => self.location.clone().into(),
            "verified" => self.verified.into(),
            "specialties" => self.specialties.clone().into(),
            "listings" => self.listings.into(),
            "favorite" => self.favorite.into(),
            "created_at" => self.timestamps.created_at.into(),
            "modified_at" => self.timestamps.modified_at.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "name" => self.name = non_empty(name, value.expect_text(name)?)?,
            "rating" => self.rating = rating(name, value.expect_float(name)?)?,
            "location" => self.location = non_empty(name, value.expect_text(name)?)?,
            "verified" => self.verified = value.expect_bool(name)?,
            "specialties" => self.specialties = value.expect_list(name)?,
            "listings" => self.listings = value.expect_count(name)?,
            "favorite" => self.favorite = value.expect_bool(name)?,
            "id" | "created_at" | "modified_at" => return Err(read_only(name)),
            other => return Err(DomainError::unknown_field(other)),
        }
        Ok(())
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewAgent {
        NewAgent {
            id: EntityId::new(1),
            name: "Sarah Chen".to_string(),
            rating: 4.9,
            location: "Austin, TX".to_string(),
            verified: true,
            specialties: vec!["Luxury".to_string(), "Investment".to_string()],
            listings: 24,
            favorite: false,
        }
    }

    #[test]
    fn rating_must_be_within_bounds() {
        let mut d = draft();
        d.rating = 5.1;
        assert!(Agent::new(d, Utc::now()).is_err());

        let mut agent = Agent::new(draft(), Utc::now()).unwrap();
        assert!(agent.set_field("rating", FieldValue::Float(-0.5)).is_err());
        agent.set_field("rating", FieldValue::Int(5)).unwrap();
        assert_eq!(agent.rating(), 5.0);
    }

    #[test]
    fn specialty_alias_reads_the_list() {
        let agent = Agent::new(draft(), Utc::now()).unwrap();
        let field = Agent::canonical("specialty").unwrap();
        assert_eq!(
            agent.field(field).unwrap().as_list().map(<[String]>::len),
            Some(2)
        );
    }
}
