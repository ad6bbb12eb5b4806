//! SitWithMe - party planner with model-generated seating
//!
//! Hosts create an event with table/seat capacity, guests join with
//! name/age/interests, and the seating arrangement is delegated to an
//! external generative model that replies in (approximately) JSON.
//! There is no local seating algorithm and none is attempted: the
//! engineered core is the lenient recovery of a structured plan from
//! free-form model text, and the in-memory party state around it.
//!
//! # Modules
//!
//! - [`codegen`] - short shareable party codes
//! - [`extract`] - lenient JSON extraction from model output
//! - [`party`] - Party, Guest, and SeatingPlan domain types
//! - [`store`] - in-memory party map with optional JSON snapshots
//! - [`prompt`] - pure prompt builders
//! - [`gateway`] - the external model boundary (trait + Gemini client)
//! - [`planner`] - session controller wiring pages to store and gateway
//! - [`config`] - configuration types and loading

pub mod cli;
pub mod codegen;
pub mod config;
pub mod extract;
pub mod gateway;
pub mod party;
pub mod planner;
pub mod prompt;
pub mod store;

// Re-export commonly used types
pub use config::{Config, GatewayConfig, StorageConfig};
pub use extract::{ExtractError, extract_json};
pub use gateway::{GatewayError, GeminiClient, ModelGateway};
pub use party::{DEFAULT_INTERESTS, EventDetails, Guest, Party, SeatedGuest, SeatingPlan, Table};
pub use planner::{Page, Planner, PlannerError};
pub use store::{PartyStore, StoreError};
