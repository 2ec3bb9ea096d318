// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod naming_service;
pub mod pairing_service;
pub mod parser_service;
pub mod script_service;
pub mod shell_safety;


// Re-export all services and their types
pub use naming_service::{neutralize, PatchNameTemplate, DEFAULT_PATCH_NAME_TEMPLATE};

pub use pairing_service::PairingService;

pub use parser_service::ReleaseParser;

pub use script_service::{render_windows_script, write_windows_script, SCRIPT_FILE_NAME};

pub use shell_safety::is_cmd_safe;
