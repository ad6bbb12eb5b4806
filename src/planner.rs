//! Planner - session controller for host and guest actions
//!
//! Routes the three user actions onto the store and the gateway:
//! party creation (host page), guest join (join page), and the seating
//! run (results page). Holds which page the session is on; transitions
//! are explicit and unguarded, any page is reachable from any page.
//!
//! Failure policy:
//! - Interest suggestion never fails party creation: any gateway or
//!   extraction failure falls back to [`DEFAULT_INTERESTS`].
//! - The seating path is terminal per request: the error is returned to
//!   the caller and the stored seating result is left untouched.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codegen;
use crate::extract::{self, ExtractError};
use crate::gateway::{GatewayError, ModelGateway};
use crate::party::{DEFAULT_INTERESTS, EventDetails, Guest, Party, SeatingPlan};
use crate::prompt;
use crate::store::{PartyStore, StoreError};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Host,
    Join,
    Results,
}

/// Errors surfaced to the user by planner operations
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid party code: {0}")]
    InvalidCode(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("model gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("could not recover a seating plan: {0}")]
    Extract(#[from] ExtractError),

    #[error("snapshot failed: {0}")]
    Snapshot(std::io::Error),
}

impl From<StoreError> for PlannerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCode(code) => PlannerError::InvalidCode(code),
            StoreError::Io(e) => PlannerError::Snapshot(e),
            StoreError::Json(e) => {
                PlannerError::Snapshot(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }
        }
    }
}

/// One user session: current page plus handles to the store and gateway
pub struct Planner {
    store: Arc<PartyStore>,
    gateway: Arc<dyn ModelGateway>,
    page: Page,
}

impl Planner {
    /// Create a planner over a shared store and gateway
    pub fn new(store: Arc<PartyStore>, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            store,
            gateway,
            page: Page::Home,
        }
    }

    /// Current page
    pub fn page(&self) -> Page {
        self.page
    }

    /// Navigate to a page. No guards: any page is reachable from any
    /// other, and only explicit navigation moves the session.
    pub fn goto(&mut self, page: Page) {
        debug!(?page, from = ?self.page, "goto: called");
        self.page = page;
    }

    /// The shared party store
    pub fn store(&self) -> &PartyStore {
        &self.store
    }

    /// Host submission: create a party and return it.
    ///
    /// When event details carry a description, the gateway is asked to
    /// suggest interests; any failure on that path is masked by the
    /// default list so creation itself never fails on the model's
    /// account. A code collision silently overwrites (see store docs).
    pub async fn create_party(
        &self,
        table_count: u32,
        seats_per_table: u32,
        event: Option<EventDetails>,
    ) -> Result<Party, PlannerError> {
        debug!(table_count, seats_per_table, "create_party: called");
        if table_count == 0 || seats_per_table == 0 {
            return Err(PlannerError::Validation(
                "table count and seats per table must be positive".to_string(),
            ));
        }

        let interests = match &event {
            Some(details) if !details.description.trim().is_empty() => {
                self.suggest_interests(details).await
            }
            _ => default_interests(),
        };

        let code = codegen::generate_code_default();
        let party = Party::new(code.clone(), table_count, seats_per_table, event, interests);
        self.store.insert(party.clone());
        info!(%code, "create_party: party created");
        Ok(party)
    }

    /// Ask the gateway for an interest list, falling back to the
    /// default list on any gateway or extraction failure, or when the
    /// extracted value is not a non-empty list of strings.
    async fn suggest_interests(&self, event: &EventDetails) -> Vec<String> {
        let request = prompt::interests_prompt(event);
        let text = match self.gateway.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "suggest_interests: gateway failed, using defaults");
                return default_interests();
            }
        };

        let value = match extract::extract_json(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "suggest_interests: extraction failed, using defaults");
                return default_interests();
            }
        };

        let interests: Vec<String> = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if interests.is_empty() {
            warn!("suggest_interests: model payload was not a string list, using defaults");
            default_interests()
        } else {
            debug!(count = interests.len(), "suggest_interests: model suggestions accepted");
            interests
        }
    }

    /// Join submission: validate and append a guest.
    ///
    /// Rejections (unknown code, empty name, age out of range, no
    /// interests) leave the party untouched.
    pub fn join_party(
        &self,
        code: &str,
        name: &str,
        age: u32,
        interests: Vec<String>,
    ) -> Result<(), PlannerError> {
        debug!(%code, %name, "join_party: called");
        if !self.store.contains(code) {
            return Err(PlannerError::InvalidCode(code.to_string()));
        }
        let guest = Guest::new(name, age, interests).map_err(PlannerError::Validation)?;
        self.store.add_guest(code, guest)?;
        info!(%code, %name, "join_party: guest joined");
        Ok(())
    }

    /// Results action: run seating for a party.
    ///
    /// Rejects before any gateway call when the code is unknown or no
    /// guests have joined. On success the parsed plan is stored
    /// (overwriting a previous run) and returned. On gateway or
    /// extraction failure the stored result is left unchanged.
    pub async fn run_seating(&self, code: &str) -> Result<SeatingPlan, PlannerError> {
        debug!(%code, "run_seating: called");
        let party = self.store.get(code)?;
        if party.guests.is_empty() {
            return Err(PlannerError::Validation(
                "no guests have joined yet; share the party code first".to_string(),
            ));
        }

        let request = prompt::seating_prompt(party.table_count, party.seats_per_table, &party.guests);
        let text = self.gateway.generate(&request).await?;
        let value = extract::extract_json(&text)?;

        let plan = SeatingPlan::from_value(&value);
        self.store.set_seating(code, plan.clone())?;
        info!(%code, tables = plan.tables.len(), seated = plan.seated_count(), "run_seating: plan stored");
        Ok(plan)
    }
}

fn default_interests() -> Vec<String> {
    DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
}
