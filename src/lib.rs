//! Mindguard -- Manipulation Threat Scoring and Adversary Simulation
//!
//! A deterministic, explainable rule-and-threshold engine that scores
//! utterances for manipulative-language patterns, selects countermeasure
//! strategies, and drives a fixed emergency-response sequence. A companion
//! simulation subsystem models a synthetic interlocutor whose susceptibility
//! state evolves under repeated technique exposure and whose resistance
//! adapts after recurring effective attempts.

pub mod types;
pub mod defense;
pub mod simulation;
pub mod engine;
