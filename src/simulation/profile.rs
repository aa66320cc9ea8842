//! Agent Profile Factory
//!
//! Builds simulated interlocutors from a small closed table of presets
//! keyed by (archetype, difficulty). Unknown combinations fall back to
//! the susceptible/easy preset; that default is deliberate policy, not
//! an error path.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::types::{AgentArchetype, AgentProfile, AgentState, Difficulty};

struct Preset {
    archetype: AgentArchetype,
    personality: &'static str,
    skill_level: u8,
    adaptability: u8,
    specialties: &'static [&'static str],
    weaknesses: &'static [&'static str],
    resistance: f64,
    suggestibility: f64,
    awareness: f64,
}

const SUSCEPTIBLE_EASY: Preset = Preset {
    archetype: AgentArchetype::Susceptible,
    personality: "Open, trusting, eager to please",
    skill_level: 2,
    adaptability: 3,
    specialties: &[],
    weaknesses: &["embedded_commands", "rapid_induction"],
    resistance: 20.0,
    suggestibility: 80.0,
    awareness: 40.0,
};

const SUSCEPTIBLE_MEDIUM: Preset = Preset {
    archetype: AgentArchetype::Susceptible,
    personality: "Friendly but occasionally questioning",
    skill_level: 4,
    adaptability: 5,
    specialties: &[],
    weaknesses: &["embedded_commands"],
    resistance: 35.0,
    suggestibility: 65.0,
    awareness: 55.0,
};

const RESISTANT_HARD: Preset = Preset {
    archetype: AgentArchetype::Resistant,
    personality: "Skeptical, analytical, slow to trust",
    skill_level: 7,
    adaptability: 7,
    specialties: &["resist_embedded_commands", "resist_confusion_technique"],
    weaknesses: &[],
    resistance: 70.0,
    suggestibility: 35.0,
    awareness: 75.0,
};

const ADVERSARIAL_EXPERT: Preset = Preset {
    archetype: AgentArchetype::Adversarial,
    personality: "Hostile, counter-manipulative, probing for weakness",
    skill_level: 9,
    adaptability: 9,
    specialties: &[
        "resist_embedded_commands",
        "resist_covert_hypnosis",
        "counter_manipulation",
    ],
    weaknesses: &[],
    resistance: 85.0,
    suggestibility: 20.0,
    awareness: 90.0,
};

/// Build a fresh agent profile from the preset table.
///
/// Known presets: susceptible/easy, susceptible/medium, resistant/hard,
/// adversarial/expert. Any other combination falls back to
/// susceptible/easy, preset values included.
pub fn build_profile(
    archetype: AgentArchetype,
    difficulty: Difficulty,
    adaptive_learning: bool,
) -> AgentProfile {
    let preset = match (archetype, difficulty) {
        (AgentArchetype::Susceptible, Difficulty::Easy) => &SUSCEPTIBLE_EASY,
        (AgentArchetype::Susceptible, Difficulty::Medium) => &SUSCEPTIBLE_MEDIUM,
        (AgentArchetype::Resistant, Difficulty::Hard) => &RESISTANT_HARD,
        (AgentArchetype::Adversarial, Difficulty::Expert) => &ADVERSARIAL_EXPERT,
        _ => {
            debug!(
                "no preset for {:?}/{:?}, falling back to susceptible/easy",
                archetype, difficulty
            );
            &SUSCEPTIBLE_EASY
        }
    };

    AgentProfile {
        id: Uuid::new_v4().to_string(),
        archetype: preset.archetype,
        personality: preset.personality.to_string(),
        skill_level: preset.skill_level,
        adaptability: preset.adaptability,
        specialties: preset.specialties.iter().map(|s| s.to_string()).collect(),
        weaknesses: preset.weaknesses.iter().map(|s| s.to_string()).collect(),
        resistance_patterns: Vec::new(),
        adaptive_learning,
        state: AgentState {
            trance_depth: 0.0,
            resistance: preset.resistance,
            suggestibility: preset.suggestibility,
            awareness: preset.awareness,
            emotional_state: "neutral".to_string(),
            history: Vec::new(),
        },
        created_at: Utc::now().to_rfc3339(),
    }
}
