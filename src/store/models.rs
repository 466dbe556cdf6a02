//! Database models for saved slots.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::store::schema;

/// A stored slot row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::slots)]
pub struct Slot {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable slot, replacing any row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::slots)]
pub struct NewSlot {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
