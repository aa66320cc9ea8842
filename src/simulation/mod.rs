//! Adaptive adversary simulation.
//!
//! A simulated interlocutor is created from a fixed preset table, mutated
//! exclusively through the simulator's respond path, and hardened over
//! time by the adaptive learning tracker. Per-agent state is owned by the
//! engine, which serializes access agent by agent.

pub mod profile;
pub mod simulator;
pub mod learning;
