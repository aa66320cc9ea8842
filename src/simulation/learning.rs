//! Adaptive Learning Tracker
//!
//! The feedback loop that turns repeated effective technique exposure
//! into increased future resistance. Every fifth recorded interaction
//! triggers an adaptation pass: techniques whose mean effectiveness
//! exceeds the threshold raise the agent's resistance and join its
//! resistance-pattern set, so the simulator applies the learned-pattern
//! bonus from then on.
//!
//! Callers must invoke this inside the same exclusion scope as the state
//! update it accompanies; adaptation is never visible half-applied.

use tracing::info;

use crate::types::{AgentProfile, LearningProfile};

/// Every Nth interaction triggers an adaptation pass.
pub const ADAPTATION_INTERVAL: u64 = 5;

/// Mean effectiveness a technique must exceed to be adapted against.
pub const ADAPTATION_THRESHOLD: f64 = 70.0;

/// Resistance gained per adapted technique, per pass.
pub const RESISTANCE_STEP: f64 = 5.0;

/// Adaptation never pushes resistance past this ceiling.
pub const RESISTANCE_CAP: f64 = 95.0;

/// Record one interaction in the agent's learning ledger.
///
/// Increments the total count and the per-technique (count, cumulative
/// effectiveness) pair. On every `ADAPTATION_INTERVAL`th interaction the
/// agent adapts, provided adaptive learning was enabled at creation.
pub fn record_interaction(
    learning: &mut LearningProfile,
    profile: &mut AgentProfile,
    technique: &str,
    effectiveness: f64,
) {
    learning.total_interactions += 1;
    let stats = learning
        .technique_stats
        .entry(technique.to_string())
        .or_default();
    stats.count += 1;
    stats.total_effectiveness += effectiveness;

    if profile.adaptive_learning && learning.total_interactions % ADAPTATION_INTERVAL == 0 {
        adapt(learning, profile);
    }
}

/// One adaptation pass: bump the adaptation level, then harden the agent
/// against every technique that has proven effective on average.
fn adapt(learning: &mut LearningProfile, profile: &mut AgentProfile) {
    learning.adaptation_level += 1;

    for (technique, stats) in &learning.technique_stats {
        if stats.mean_effectiveness() > ADAPTATION_THRESHOLD {
            profile.state.resistance =
                (profile.state.resistance + RESISTANCE_STEP).min(RESISTANCE_CAP);
            if !profile.resistance_patterns.contains(technique) {
                profile.resistance_patterns.push(technique.clone());
            }
            info!(
                "agent {} adapted to {} (mean effectiveness {:.1}, resistance now {:.0})",
                profile.id,
                technique,
                stats.mean_effectiveness(),
                profile.state.resistance
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::profile::build_profile;
    use crate::types::{AgentArchetype, Difficulty};

    fn agent(adaptive: bool) -> (AgentProfile, LearningProfile) {
        let profile = build_profile(AgentArchetype::Susceptible, Difficulty::Easy, adaptive);
        let learning = LearningProfile::new(&profile.id);
        (profile, learning)
    }

    #[test]
    fn test_ledger_accumulates() {
        let (mut profile, mut learning) = agent(true);
        record_interaction(&mut learning, &mut profile, "covert_hypnosis", 60.0);
        record_interaction(&mut learning, &mut profile, "covert_hypnosis", 40.0);
        assert_eq!(learning.total_interactions, 2);
        let stats = &learning.technique_stats["covert_hypnosis"];
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_effectiveness, 100.0);
        assert_eq!(learning.adaptation_level, 0);
    }

    #[test]
    fn test_fifth_effective_interaction_adapts() {
        let (mut profile, mut learning) = agent(true);
        let initial_resistance = profile.state.resistance;
        for _ in 0..5 {
            record_interaction(&mut learning, &mut profile, "rapid_induction", 90.0);
        }
        assert_eq!(learning.adaptation_level, 1);
        assert_eq!(profile.state.resistance, initial_resistance + RESISTANCE_STEP);
        assert!(profile
            .resistance_patterns
            .contains(&"rapid_induction".to_string()));
    }

    #[test]
    fn test_ineffective_technique_not_adapted() {
        let (mut profile, mut learning) = agent(true);
        let initial_resistance = profile.state.resistance;
        for _ in 0..5 {
            record_interaction(&mut learning, &mut profile, "confusion_technique", 30.0);
        }
        assert_eq!(learning.adaptation_level, 1);
        assert_eq!(profile.state.resistance, initial_resistance);
        assert!(profile.resistance_patterns.is_empty());
    }

    #[test]
    fn test_adaptation_gated_by_flag() {
        let (mut profile, mut learning) = agent(false);
        for _ in 0..10 {
            record_interaction(&mut learning, &mut profile, "rapid_induction", 90.0);
        }
        assert_eq!(learning.adaptation_level, 0);
        assert!(profile.resistance_patterns.is_empty());
        assert_eq!(learning.total_interactions, 10);
    }

    #[test]
    fn test_resistance_capped() {
        let (mut profile, mut learning) = agent(true);
        profile.state.resistance = 93.0;
        for _ in 0..5 {
            record_interaction(&mut learning, &mut profile, "embedded_commands", 95.0);
        }
        assert_eq!(profile.state.resistance, RESISTANCE_CAP);
    }

    #[test]
    fn test_pattern_recorded_once() {
        let (mut profile, mut learning) = agent(true);
        for _ in 0..10 {
            record_interaction(&mut learning, &mut profile, "nlp_manipulation", 85.0);
        }
        assert_eq!(learning.adaptation_level, 2);
        let occurrences = profile
            .resistance_patterns
            .iter()
            .filter(|p| *p == "nlp_manipulation")
            .count();
        assert_eq!(occurrences, 1);
    }
}
