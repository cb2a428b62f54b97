//! Small record type for engine tests.

use chrono::{TimeZone, Utc};
use estatehub_core::{DomainError, DomainResult, Entity, EntityId, FieldValue, Timestamps};

#[derive(Debug, Clone, PartialEq)]
pub struct Home {
    pub id: EntityId,
    pub title: String,
    pub price: i64,
    pub city: String,
    pub ts: Timestamps,
}

impl Entity for Home {
    const FIELDS: &'static [&'static str] = &["id", "title", "price", "city"];
    const ALIASES: &'static [(&'static str, &'static str)] = &[("cost", "price")];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get() as i64)),
            "title" => Some(self.title.clone().into()),
            "price" => Some(self.price.into()),
            "city" => Some(self.city.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "title" => self.title = value.expect_text(name)?,
            "price" => self.price = value.expect_int(name)?,
            "city" => self.city = value.expect_text(name)?,
            "id" => return Err(DomainError::validation("id is immutable")),
            other => return Err(DomainError::unknown_field(other)),
        }
        Ok(())
    }

    fn timestamps(&self) -> &Timestamps {
        &self.ts
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.ts
    }
}

pub fn home(id: u64, price: i64, city: &str) -> Home {
    Home {
        id: EntityId::new(id),
        title: format!("Home {id}"),
        price,
        city: city.to_string(),
        ts: Timestamps::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    }
}

/// Five homes: three in Austin (one spelled lowercase), one Boston, one Denver.
pub fn homes() -> Vec<Home> {
    vec![
        home(1, 150, "Austin"),
        home(2, 200, "Boston"),
        home(3, 120, "north austin"),
        home(4, 300, "Austin"),
        home(5, 250, "Denver"),
    ]
}
