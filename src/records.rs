//! Record types shown by the list views.
//!
//! Records are owned by the store; the views only borrow them. Every field besides the
//! identifier, name and creation time is optional free text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which list a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lab,
    Medication,
}

impl RecordKind {
    /// Message shown when the panel has no records at all
    pub fn empty_message(self) -> &'static str {
        match self {
            RecordKind::Lab => "لا توجد مختبرات مسجلة",
            RecordKind::Medication => "لا توجد أدوية مسجلة",
        }
    }

    /// Panel title
    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Lab => "المختبرات",
            RecordKind::Medication => "الأدوية",
        }
    }
}

/// Common surface the filter, paginator and dispatcher work against.
pub trait Record {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Fields the search filter looks at. The name is always included; optional
    /// fields only when present.
    fn searchable_fields(&self) -> Vec<&str>;

    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Lab {
    const KIND: RecordKind = RecordKind::Lab;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.contact.as_deref());
        fields.extend(self.address.as_deref());
        fields
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Medication {
    const KIND: RecordKind = RecordKind::Medication;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.instructions.as_deref());
        fields
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A lab order. Only consulted to guard lab deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub lab_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Format a creation timestamp for table cells
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y/%m/%d").to_string()
}
