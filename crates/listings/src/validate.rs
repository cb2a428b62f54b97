use estatehub_core::{DomainError, DomainResult, EntityId, FieldValue};

pub(crate) fn non_empty(field: &str, value: String) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

pub(crate) fn non_negative_int(field: &str, value: i64) -> DomainResult<i64> {
    if value < 0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!("{field} must be a non-negative number")));
    }
    Ok(value)
}

pub(crate) fn read_only(field: &str) -> DomainError {
    DomainError::validation(format!("{field} is read-only"))
}

pub(crate) fn id_value(id: EntityId) -> FieldValue {
    FieldValue::Int(i64::try_from(id.get()).unwrap_or(i64::MAX))
}

/// `Int` → id, `Null` → none.
pub(crate) fn optional_id(field: &str, value: FieldValue) -> DomainResult<Option<EntityId>> {
    match value {
        FieldValue::Null => Ok(None),
        other => {
            let raw = non_negative_int(field, other.expect_int(field)?)?;
            Ok(Some(EntityId::new(raw as u64)))
        }
    }
}
