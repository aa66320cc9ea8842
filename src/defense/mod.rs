//! Threat detection and countermeasure selection.
//!
//! Everything in this module is pure and stateless per call: the catalogs
//! are built once and only read afterwards, so the whole pipeline is safe
//! to call concurrently.

pub mod catalog;
pub mod detector;
pub mod strategy;
pub mod emergency;

pub use catalog::{
    StrategyCatalog, ThreatPatternCatalog, STRATEGY_CONSCIOUS_ANALYSIS,
    STRATEGY_PATTERN_INTERRUPT, STRATEGY_REALITY_ANCHOR, STRATEGY_SHIELD_PROTOCOL,
};
