use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, DomainResult, Entity, EntityId, FieldValue, Timestamps};

use crate::validate::{id_value, non_empty, non_negative, non_negative_int, optional_id, read_only};

/// Whether a listing is for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Rent => "rent",
        }
    }
}

impl FromStr for ListingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" | "buy" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(DomainError::validation(format!("unknown listing type: {other}"))),
        }
    }
}

/// Input for [`Property::new`]. Also the fixture format; older spellings
/// (`beds`, `baths`, `size`, `sqft`) are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub id: EntityId,
    pub title: String,
    /// Whole currency units.
    pub price: i64,
    pub location: String,
    #[serde(alias = "beds")]
    pub bedrooms: u32,
    #[serde(alias = "baths")]
    pub bathrooms: f64,
    /// Square feet.
    #[serde(alias = "size", alias = "sqft")]
    pub area: u32,
    pub listing_type: ListingType,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub agent_id: Option<EntityId>,
    #[serde(default)]
    pub favorite: bool,
}

/// A listed property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    id: EntityId,
    title: String,
    price: i64,
    location: String,
    bedrooms: u32,
    bathrooms: f64,
    area: u32,
    listing_type: ListingType,
    property_type: String,
    features: Vec<String>,
    agent_id: Option<EntityId>,
    favorite: bool,
    timestamps: Timestamps,
}

impl Property {
    pub fn new(draft: NewProperty, at: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id: draft.id,
            title: non_empty("title", draft.title)?,
            price: non_negative_int("price", draft.price)?,
            location: non_empty("location", draft.location)?,
            bedrooms: draft.bedrooms,
            bathrooms: non_negative("bathrooms", draft.bathrooms)?,
            area: draft.area,
            listing_type: draft.listing_type,
            property_type: draft.property_type,
            features: draft.features,
            agent_id: draft.agent_id,
            favorite: draft.favorite,
            timestamps: Timestamps::at(at),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> f64 {
        self.bathrooms
    }

    pub fn area(&self) -> u32 {
        self.area
    }

    pub fn listing_type(&self) -> ListingType {
        self.listing_type
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn agent_id(&self) -> Option<EntityId> {
        self.agent_id
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    /// Price per square foot, when the area is known.
    pub fn price_per_area(&self) -> Option<f64> {
        (self.area > 0).then(|| self.price as f64 / f64::from(self.area))
    }
}

impl Entity for Property {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "price",
        "location",
        "bedrooms",
        "bathrooms",
        "area",
        "listing_type",
        "property_type",
        "features",
        "agent_id",
        "favorite",
        "created_at",
        "modified_at",
    ];

    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("beds", "bedrooms"),
        ("baths", "bathrooms"),
        ("size", "area"),
        ("sqft", "area"),
        ("city", "location"),
        ("type", "listing_type"),
        ("name", "title"),
        ("favorited", "favorite"),
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => id_value(self.id),
            "title" => self.title.clone().into(),
            "price" => self.price.into(),
            "location" => self.location.clone().into(),
            "bedrooms" => self.bedrooms.into(),
            "bathrooms" => self.bathrooms.into(),
            "area" => self.area.into(),
            "listing_type" => self.listing_type.as_str().into(),
            "property_type" => self.property_type.clone().into(),
            "features" => self.features.clone().into(),
            "agent_id" => self.agent_id.map(id_value).into(),
            "favorite" => self.favorite.into(),
            "created_at" => self.timestamps.created_at.into(),
            "modified_at" => self.timestamps.modified_at.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "title" => self.title = non_empty(name, value.expect_text(name)?)?,
            "price" => self.price = non_negative_int(name, value.expect_int(name)?)?,
            "location" => self.location = non_empty(name, value.expect_text(name)?)?,
            "bedrooms" => self.bedrooms = value.expect_count(name)?,
            "bathrooms" => self.bathrooms = non_negative(name, value.expect_float(name)?)?,
            "area" => self.area = value.expect_count(name)?,
            "listing_type" => self.listing_type = value.expect_text(name)?.parse()?,
            "property_type" => self.property_type = value.expect_text(name)?,
            "features" => self.features = value.expect_list(name)?,
            "agent_id" => self.agent_id = optional_id(name, value)?,
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
