// src/lib.rs
// BatchPatch - Distribution-ready patch generator for batch media releases
//
// Architecture:
// - Domain-centric: parsed releases and resolved pairs are immutable value objects
// - Explicit: configuration is built once and passed into services, no global state
// - Deterministic: same directory listings -> same pairs, same patch names

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Value Objects
// ============================================================================

pub use domain::{
    validate_release,
    // Release
    ParsedRelease,
    // Pairing
    ReleaseGroup,
    ResolvedPair,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration and Services
// ============================================================================

pub use config::{DiffVerbosity, PatchConfig};
pub use services::{PairingService, PatchNameTemplate, ReleaseParser};
