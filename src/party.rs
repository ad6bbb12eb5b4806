//! Party domain types
//!
//! A Party is one planned event: a shareable code, fixed table/seat
//! capacity, the host's event details, the interest list offered to
//! joining guests, the guest roster, and (once generated) the seating
//! plan recovered from model output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interests offered when the model cannot suggest any
pub const DEFAULT_INTERESTS: [&str; 6] = ["Music", "Food", "Travel", "Tech", "Movies", "Art"];

/// Host-provided event details. Optional on a party: the minimal flow
/// creates parties with capacities only, the richer flow adds these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Vibe tags ("rooftop", "casual", ...)
    #[serde(default)]
    pub vibes: Vec<String>,
}

/// One planned event, identified by a short code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Shareable code, immutable once assigned
    pub code: String,

    /// Number of tables, fixed at creation
    pub table_count: u32,

    /// Seats per table, fixed at creation
    pub seats_per_table: u32,

    /// Host-provided event details, if any
    #[serde(default)]
    pub event: Option<EventDetails>,

    /// Interest list offered to joining guests; never empty
    pub suggested_interests: Vec<String>,

    /// Guest roster, append-only while joining is open
    #[serde(default)]
    pub guests: Vec<Guest>,

    /// Seating plan from the last successful run, overwritten on re-run
    #[serde(default)]
    pub seating: Option<SeatingPlan>,

    /// When the party was created
    pub created_at: DateTime<Utc>,
}

impl Party {
    /// Create a party with the given code, capacities, and interest list
    pub fn new(
        code: impl Into<String>,
        table_count: u32,
        seats_per_table: u32,
        event: Option<EventDetails>,
        suggested_interests: Vec<String>,
    ) -> Self {
        let code = code.into();
        debug!(%code, table_count, seats_per_table, "Party::new: called");
        Self {
            code,
            table_count,
            seats_per_table,
            event,
            suggested_interests,
            guests: Vec::new(),
            seating: None,
            created_at: Utc::now(),
        }
    }

    /// Total seat capacity across all tables
    pub fn capacity(&self) -> u32 {
        self.table_count * self.seats_per_table
    }
}

/// One person who joined a party. Immutable after creation; there is no
/// edit or remove operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub age: u32,
    pub interests: Vec<String>,
}

impl Guest {
    /// Validate a join submission. Name must be non-empty, age 1-120,
    /// at least one interest. Interests are free text: they are offered
    /// from the party's suggested list but not restricted to it.
    pub fn new(name: impl Into<String>, age: u32, interests: Vec<String>) -> Result<Self, String> {
        let name = name.into();
        debug!(%name, age, interest_count = interests.len(), "Guest::new: called");
        if name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !(1..=120).contains(&age) {
            return Err(format!("age must be between 1 and 120, got {}", age));
        }
        if interests.is_empty() {
            return Err("select at least one interest".to_string());
        }
        Ok(Self { name, age, interests })
    }
}

/// The table-by-table assignment produced by the model and parsed
/// locally. Derived data, not authoritative: guests here are loose
/// records because the model may paraphrase names or drop fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatingPlan {
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// One table in a seating plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table number; positional index when the model omitted it
    #[serde(rename = "table_number")]
    pub number: u32,

    /// Assigned guests. May exceed seats_per_table if the model
    /// violated capacity; callers must tolerate overflow.
    #[serde(default)]
    pub guests: Vec<SeatedGuest>,
}

/// A guest record as the model reported it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatedGuest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl SeatingPlan {
    /// Build a plan from an extracted JSON value.
    ///
    /// Tolerant by design: missing `tables` yields an empty plan, a
    /// missing `table_number` defaults to the 1-based positional index,
    /// and malformed guest entries default their fields rather than
    /// failing the whole plan.
    pub fn from_value(value: &serde_json::Value) -> Self {
        debug!("SeatingPlan::from_value: called");
        let tables = value
            .get("tables")
            .and_then(|t| t.as_array())
            .map(|tables| {
                tables
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let number = t
                            .get("table_number")
                            .and_then(|n| n.as_u64())
                            .map(|n| n as u32)
                            .unwrap_or(i as u32 + 1);
                        let guests = t
                            .get("guests")
                            .and_then(|g| g.as_array())
                            .map(|guests| {
                                guests
                                    .iter()
                                    .map(|g| {
                                        serde_json::from_value(g.clone()).unwrap_or_default()
                                    })
                                    .collect()
                            })
                            .unwrap_or_default();
                        Table { number, guests }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { tables }
    }

    /// Total guests seated across all tables
    pub fn seated_count(&self) -> usize {
        self.tables.iter().map(|t| t.guests.len()).sum()
    }
}
