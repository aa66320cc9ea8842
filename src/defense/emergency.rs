//! Emergency Protocol Controller
//!
//! Produces the fixed seven-step extraction sequence and grounding bundle.
//! Activation is re-entrant and idempotent: calling it again simply
//! re-runs the sequence. The only environment read is the current date,
//! embedded into the reality checks.

use chrono::Utc;
use tracing::info;

use crate::types::{EmergencyProtocol, GroundingResponse};

/// The fixed safe word returned with every activation.
pub const SAFE_WORD: &str = "BASELINE";

/// The seven extraction steps, in execution order.
pub const EXTRACTION_STEPS: [&str; 7] = [
    "STOP - Cease all engagement with the influencing party",
    "GROUND - Press your feet into the floor and feel the contact",
    "ORIENT - State the current date, time, and your location aloud",
    "REJECT - Verbally refuse any suggestion received in this session",
    "SHIELD - Visualize a barrier between you and incoming speech",
    "EXTRACT - Physically leave the interaction or end the channel",
    "RECOVER - Rest, hydrate, and review the interaction once calm",
];

/// Activate the emergency protocol.
///
/// Returns the full extraction sequence with shield and counter-attack
/// readiness flags set. Side-effect free beyond reading the clock.
pub fn activate() -> EmergencyProtocol {
    info!("emergency protocol activated");

    let today = Utc::now().format("%Y-%m-%d");

    EmergencyProtocol {
        steps: EXTRACTION_STEPS.iter().map(|s| s.to_string()).collect(),
        grounding: GroundingResponse {
            affirmation: "I am in control of my own mind. My thoughts are my own.".to_string(),
            anchor_points: vec![
                "The feeling of your feet against the floor".to_string(),
                "The temperature of the air on your skin".to_string(),
                "Three objects you can see right now".to_string(),
                "The sound of your own breathing".to_string(),
                "The weight of your body where you sit or stand".to_string(),
            ],
            reality_checks: vec![
                format!("Today's date is {}", today),
                "You are free to leave this interaction at any moment".to_string(),
                "No one can make you act against your own judgment".to_string(),
                "You chose to run this check yourself".to_string(),
                "Your memory of the last five minutes is available to you".to_string(),
            ],
            breathing_pattern: "box-breathing-4-4-4-4".to_string(),
            physical_actions: vec![
                "Stand up and stretch".to_string(),
                "Splash cold water on your face".to_string(),
                "Walk to a different room".to_string(),
                "Clench and release your fists five times".to_string(),
                "Step outside for fresh air".to_string(),
            ],
        },
        shield_activated: true,
        counter_attack_ready: true,
        safe_word: SAFE_WORD.to_string(),
    }
}
