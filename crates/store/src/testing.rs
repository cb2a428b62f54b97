//! Minimal record type for store tests.

use std::rc::Rc;

use chrono::{TimeZone, Utc};
use estatehub_core::{
    Clock, DomainError, DomainResult, Entity, EntityId, FieldValue, ManualClock, Timestamps,
};

use crate::EntityStore;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: EntityId,
    pub price: i64,
    pub name: String,
    pub starred: bool,
    pub ts: Timestamps,
}

impl Entity for Row {
    const FIELDS: &'static [&'static str] = &["id", "price", "name", "starred"];
    const ALIASES: &'static [(&'static str, &'static str)] = &[("cost", "price")];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get() as i64)),
            "price" => Some(self.price.into()),
            "name" => Some(self.name.clone().into()),
            "starred" => Some(self.starred.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "price" => self.price = value.expect_int(name)?,
            "name" => self.name = value.expect_text(name)?,
            "starred" => self.starred = value.expect_bool(name)?,
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

pub fn row(id: u64, price: i64, name: &str) -> Row {
    Row {
        id: EntityId::new(id),
        price,
        name: name.to_string(),
        starred: false,
        ts: Timestamps::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    }
}

pub fn clock() -> Rc<dyn Clock> {
    Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
}

pub fn store_of(rows: Vec<Row>) -> EntityStore<Row> {
    EntityStore::seeded(rows, clock()).unwrap()
}

pub fn clocked_store(rows: Vec<Row>) -> (Rc<ManualClock>, EntityStore<Row>) {
    let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let store = EntityStore::seeded(rows, clock.clone()).unwrap();
    (clock, store)
}
