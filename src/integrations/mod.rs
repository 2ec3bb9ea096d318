// src/integrations/mod.rs
//
// External Integrations Module

pub mod xdelta;

pub use xdelta::client::XdeltaClient;
