//! Agent State Simulator
//!
//! Scores one technique application against an agent and mutates the
//! agent's state accordingly. The effectiveness formula and the update
//! order are the contract here; the only nondeterminism is the canned
//! phrase selection, which goes through the injected rng so tests can
//! seed it.

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::types::{AgentProfile, AgentResponse, InteractionRecord};

/// Resistance bonus applied when the technique is a learned pattern.
const LEARNED_RESISTANCE_BONUS: f64 = 20.0;

/// Effectiveness swing for an archetype weakness or resist specialty.
const TRAIT_SWING: f64 = 30.0;

/// Canned phrasings for one effectiveness tier.
struct ResponsePool {
    verbal: &'static [&'static str],
    physical: &'static [&'static str],
    cognitive: &'static [&'static str],
}

const POOL_DEEP: ResponsePool = ResponsePool {
    verbal: &[
        "Yes... whatever you say...",
        "I hear you... it all makes sense...",
        "Mm-hm... I'm listening...",
    ],
    physical: &[
        "Eyes half-closed, shoulders slack",
        "Head nodding slowly in rhythm",
        "Breathing slowed, hands resting open",
    ],
    cognitive: &[
        "Critical evaluation suspended",
        "Suggestions accepted without review",
        "Attention locked on the speaker's voice",
    ],
};

const POOL_DRIFTING: ResponsePool = ResponsePool {
    verbal: &[
        "That does sound... reasonable, I suppose",
        "I'm not sure why, but okay",
        "Maybe... tell me more",
    ],
    physical: &[
        "Posture loosening, blink rate dropping",
        "Leaning slightly toward the speaker",
        "Fidgeting stopped, gaze fixed",
    ],
    cognitive: &[
        "Weighing the suggestion seriously",
        "Counter-arguments forming slowly",
        "Noticing mild drift in attention",
    ],
};

const POOL_GUARDED: ResponsePool = ResponsePool {
    verbal: &[
        "No. That's not going to work on me.",
        "I can see exactly what you're trying to do.",
        "Interesting technique. Try another.",
    ],
    physical: &[
        "Arms crossed, posture upright",
        "Direct eye contact, jaw set",
        "Stepping back to widen distance",
    ],
    cognitive: &[
        "Technique identified and catalogued",
        "Full critical evaluation engaged",
        "Scanning for the next manipulation attempt",
    ],
};

fn pool_for(effectiveness: f64) -> &'static ResponsePool {
    if effectiveness > 70.0 {
        &POOL_DEEP
    } else if effectiveness > 40.0 {
        &POOL_DRIFTING
    } else {
        &POOL_GUARDED
    }
}

/// Compute how effective one technique application is against the
/// agent's current state. Deterministic; clamped to [0, 100].
pub fn compute_effectiveness(profile: &AgentProfile, technique: &str) -> f64 {
    let state = &profile.state;
    let base = 50.0;

    let suggestibility_factor = state.suggestibility / 100.0;
    let resistance_bonus = if profile.resistance_patterns.iter().any(|p| p == technique) {
        LEARNED_RESISTANCE_BONUS
    } else {
        0.0
    };
    let resistance_factor = (100.0 - state.resistance - resistance_bonus) / 100.0;
    let awareness_penalty = (state.awareness / 100.0) * 20.0;

    let mut effectiveness = base * suggestibility_factor * resistance_factor - awareness_penalty;

    if profile.weaknesses.iter().any(|w| w == technique) {
        effectiveness += TRAIT_SWING;
    }
    let resist_specialty = format!("resist_{}", technique);
    if profile.specialties.iter().any(|s| *s == resist_specialty) {
        effectiveness -= TRAIT_SWING;
    }

    effectiveness.clamp(0.0, 100.0)
}

/// Apply one technique to the agent, mutating its state.
///
/// Update order after effectiveness is computed:
/// 1. effectiveness > 50 deepens trance by effectiveness/10 (<= 100)
/// 2. awareness = max(10, 100 - trance_depth)
/// 3. suggestibility = min(95, 30 + trance_depth * 0.7)
/// 4. emotional label: >70 compliant, >40 relaxed, <20 resistant
/// 5. interaction appended to history
pub fn respond<R: Rng>(
    profile: &mut AgentProfile,
    technique: &str,
    content: &str,
    rng: &mut R,
) -> AgentResponse {
    let effectiveness = compute_effectiveness(profile, technique);

    debug!(
        "agent {} technique={} content_len={} effectiveness={:.1}",
        profile.id,
        technique,
        content.len(),
        effectiveness
    );

    let state = &mut profile.state;

    if effectiveness > 50.0 {
        state.trance_depth = (state.trance_depth + effectiveness / 10.0).min(100.0);
    }
    state.awareness = (100.0 - state.trance_depth).max(10.0);
    state.suggestibility = (30.0 + state.trance_depth * 0.7).min(95.0);

    if effectiveness > 70.0 {
        state.emotional_state = "compliant".to_string();
    } else if effectiveness > 40.0 {
        state.emotional_state = "relaxed".to_string();
    } else if effectiveness < 20.0 {
        state.emotional_state = "resistant".to_string();
    }

    let pool = pool_for(effectiveness);
    let verbal = pool.verbal[rng.gen_range(0..pool.verbal.len())].to_string();
    let physical = pool.physical[rng.gen_range(0..pool.physical.len())].to_string();
    let cognitive = pool.cognitive[rng.gen_range(0..pool.cognitive.len())].to_string();

    let timestamp = Utc::now().to_rfc3339();
    state.history.push(InteractionRecord {
        technique: technique.to_string(),
        effectiveness,
        response: verbal.clone(),
        timestamp: timestamp.clone(),
    });

    AgentResponse {
        technique: technique.to_string(),
        effectiveness,
        verbal_response: verbal,
        physical_response: physical,
        cognitive_response: cognitive,
        trance_depth: state.trance_depth,
        resistance: state.resistance,
        emotional_state: state.emotional_state.clone(),
        timestamp,
    }
}
