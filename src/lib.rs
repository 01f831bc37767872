//! Launch records dashboard core.
//!
//! A fixed table of launches is loaded once ([`data::loader`]); a site
//! dropdown and a payload range ([`state`]) drive two chart specs
//! ([`views`]) through the dependency graph in [`binding`].

pub mod binding;
pub mod config;
pub mod data;
pub mod state;
pub mod views;
