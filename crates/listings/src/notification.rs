use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, DomainResult, Entity, EntityId, FieldValue, Timestamps};

use crate::validate::{id_value, non_empty, read_only};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PriceDrop,
    NewListing,
    Message,
    Viewing,
    System,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::PriceDrop => "price_drop",
            NotificationKind::NewListing => "new_listing",
            NotificationKind::Message => "message",
            NotificationKind::Viewing => "viewing",
            NotificationKind::System => "system",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "price_drop" => Ok(NotificationKind::PriceDrop),
            "new_listing" => Ok(NotificationKind::NewListing),
            "message" => Ok(NotificationKind::Message),
            "viewing" => Ok(NotificationKind::Viewing),
            "system" => Ok(NotificationKind::System),
            other => Err(DomainError::validation(format!("unknown notification kind: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub id: EntityId,
    #[serde(alias = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(alias = "timestamp")]
    pub at: DateTime<Utc>,
}

/// An inbox entry. `read` only changes by explicit mark-read/unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: EntityId,
    kind: NotificationKind,
    title: String,
    message: String,
    read: bool,
    at: DateTime<Utc>,
    timestamps: Timestamps,
}

impl Notification {
    /// `created_at` is the notification's own time.
    pub fn new(draft: NewNotification) -> DomainResult<Self> {
        Ok(Self {
            id: draft.id,
            kind: draft.kind,
            title: non_empty("title", draft.title)?,
            message: draft.message,
            read: draft.read,
            at: draft.at,
            timestamps: Timestamps::at(draft.at),
        })
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

impl Entity for Notification {
    const FIELDS: &'static [&'static str] = &["id", "kind", "title", "message", "read", "at"];

    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("type", "kind"),
        ("timestamp", "at"),
        ("date", "at"),
        ("body", "message"),
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => id_value(self.id),
            "kind" => self.kind.as_str().into(),
            "title" => self.title.clone().into(),
            "message" => self.message.clone().into(),
            "read" => self.read.into(),
            "at" => self.at.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        match name {
            "read" => self.read = value.expect_bool(name)?,
            "title" => self.title = non_empty(name, value.expect_text(name)?)?,
            "message" => self.message = value.expect_text(name)?,
            "kind" => self.kind = value.expect_text(name)?.parse()?,
            "id" | "at" => return Err(read_only(name)),
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

    #[test]
    fn deserializes_legacy_type_and_timestamp_keys() {
        let json = r#"{
            "id": 3, "type": "price-drop", "title": "Price reduced",
            "timestamp": "2024-03-01T09:30:00Z"
        }"#;
        // `price-drop` is not a serde spelling; only snake_case is.
        assert!(serde_json::from_str::<NewNotification>(json).is_err());

        let json = json.replace("price-drop", "price_drop");
        let n = Notification::new(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(n.kind(), NotificationKind::PriceDrop);
        assert!(!n.is_read());
        assert_eq!(n.timestamps().created_at, n.at());
    }

    #[test]
    fn field_aliases_resolve_to_canonical_names() {
        assert_eq!(Notification::canonical("type"), Some("kind"));
        assert_eq!(Notification::canonical("timestamp"), Some("at"));
        assert_eq!(Notification::canonical("date"), Some("at"));
        assert_eq!(Notification::canonical("body"), Some("message"));
    }

    #[test]
    fn kind_parses_dashes_when_set_as_field() {
        let mut n = Notification::new(NewNotification {
            id: EntityId::new(1),
            kind: NotificationKind::System,
            title: "Welcome".to_string(),
            message: String::new(),
            read: false,
            at: Utc::now(),
        })
        .unwrap();

        n.set_field("kind", "new-listing".into()).unwrap();
        assert_eq!(n.kind(), NotificationKind::NewListing);
        assert!(n.set_field("at", Utc::now().into()).is_err());
    }
}
