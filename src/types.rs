//! Mindguard - Type Definitions
//!
//! All shared types for the threat-scoring and adversary-simulation engine.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────

/// Errors the engine can surface to its host.
///
/// The taxonomy is narrow on purpose: the scoring pipeline is total over
/// its inputs, and unrecognized mode/archetype/difficulty values fall back
/// to documented defaults instead of failing. Only operations that
/// reference a previously created agent can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("agent not found: {0}")]
    AgentNotFound(String),
}

// ─── Threat Detection ────────────────────────────────────────────

/// Ordinal threat severity. Ordering is load-bearing: classification
/// takes the maximum detection score and maps it onto this scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThreatLevel::None => "none",
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// The fixed set of manipulative-language attack categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttackCategory {
    EmbeddedCommands,
    ConfusionTechnique,
    RapidInduction,
    CovertHypnosis,
    NlpManipulation,
}

impl AttackCategory {
    /// Stable string key, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackCategory::EmbeddedCommands => "embedded_commands",
            AttackCategory::ConfusionTechnique => "confusion_technique",
            AttackCategory::RapidInduction => "rapid_induction",
            AttackCategory::CovertHypnosis => "covert_hypnosis",
            AttackCategory::NlpManipulation => "nlp_manipulation",
        }
    }
}

impl fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attack category scored against one input.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedThreat {
    pub category: AttackCategory,
    pub description: String,
    /// Sum of keyword and indicator contributions.
    pub score: u32,
    /// Normalized to [0, 1]: `min(score / 100, 1)`.
    pub confidence: f64,
}

/// How the caller wants the strategy selector to lean.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefenseMode {
    Aggressive,
    Passive,
    Auto,
}

impl DefenseMode {
    /// Lenient parse; unrecognized values fall back to `Auto`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "aggressive" => DefenseMode::Aggressive,
            "passive" => DefenseMode::Passive,
            _ => DefenseMode::Auto,
        }
    }
}

/// A named countermeasure template from the strategy catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseStrategy {
    pub name: String,
    pub description: String,
    /// Ordered execution actions; merged into the counter-measure list.
    pub actions: Vec<String>,
    /// Informational rating, 0-100.
    pub effectiveness: u8,
}

/// Full result of one threat analysis call. Stateless; created fresh
/// per call and never persisted by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseAnalysis {
    pub threat_detected: bool,
    pub threat_level: ThreatLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_attack: Option<AttackCategory>,
    /// Descriptions of every matched attack pattern, highest score first.
    pub attack_patterns: Vec<String>,
    pub strategy: String,
    pub counter_measures: Vec<String>,
    pub recommendations: Vec<String>,
    /// Rounded mean of per-detection confidence, 0-100.
    pub confidence: u8,
}

// ─── Emergency Protocol ──────────────────────────────────────────

/// Grounding bundle included in every emergency activation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingResponse {
    pub affirmation: String,
    pub anchor_points: Vec<String>,
    pub reality_checks: Vec<String>,
    pub breathing_pattern: String,
    pub physical_actions: Vec<String>,
}

/// The fixed extraction sequence produced by emergency activation.
/// Re-entrant: activating again simply re-runs the sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyProtocol {
    /// Seven imperative steps, in execution order.
    pub steps: Vec<String>,
    pub grounding: GroundingResponse,
    pub shield_activated: bool,
    pub counter_attack_ready: bool,
    pub safe_word: String,
}

// ─── Agent Simulation ────────────────────────────────────────────

/// Archetype of a simulated interlocutor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgentArchetype {
    Susceptible,
    Resistant,
    Adversarial,
}

impl AgentArchetype {
    /// Lenient parse; unrecognized values fall back to `Susceptible`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "resistant" => AgentArchetype::Resistant,
            "adversarial" => AgentArchetype::Adversarial,
            _ => AgentArchetype::Susceptible,
        }
    }
}

/// Preset difficulty tier for agent creation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Lenient parse; unrecognized values fall back to `Easy`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            "expert" => Difficulty::Expert,
            _ => Difficulty::Easy,
        }
    }
}

/// One past technique exposure, appended to the agent's history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub technique: String,
    pub effectiveness: f64,
    pub response: String,
    pub timestamp: String,
}

/// Mutable simulation state owned by exactly one `AgentProfile`.
///
/// Invariant: the four numeric fields stay clamped to [0, 100] after
/// every update. Mutated only by the simulator's respond path.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub trance_depth: f64,
    pub resistance: f64,
    pub suggestibility: f64,
    pub awareness: f64,
    pub emotional_state: String,
    /// Append-only, ordered oldest first.
    pub history: Vec<InteractionRecord>,
}

/// Identity and static traits of a simulated interlocutor.
///
/// Specialty and weakness sets are fixed at creation. The resistance
/// pattern set starts empty and grows only through adaptation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub id: String,
    pub archetype: AgentArchetype,
    pub personality: String,
    /// 1-10.
    pub skill_level: u8,
    /// 1-10.
    pub adaptability: u8,
    pub specialties: Vec<String>,
    /// Technique ids this archetype is especially vulnerable to.
    pub weaknesses: Vec<String>,
    /// Technique ids the agent has learned to resist.
    pub resistance_patterns: Vec<String>,
    pub adaptive_learning: bool,
    pub state: AgentState,
    pub created_at: String,
}

/// Result of applying one technique to an agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub technique: String,
    pub effectiveness: f64,
    pub verbal_response: String,
    pub physical_response: String,
    pub cognitive_response: String,
    pub trance_depth: f64,
    pub resistance: f64,
    pub emotional_state: String,
    pub timestamp: String,
}

// ─── Adaptive Learning ───────────────────────────────────────────

/// Running totals for one technique within a learning ledger.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueStats {
    pub count: u64,
    pub total_effectiveness: f64,
}

impl TechniqueStats {
    pub fn mean_effectiveness(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_effectiveness / self.count as f64
        }
    }
}

/// Per-agent learning ledger, keyed by agent id at the engine level.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub agent_id: String,
    pub total_interactions: u64,
    pub technique_stats: HashMap<String, TechniqueStats>,
    /// Monotonically increasing; bumped on every adaptation cycle.
    pub adaptation_level: u32,
}

impl LearningProfile {
    pub fn new(agent_id: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            total_interactions: 0,
            technique_stats: HashMap::new(),
            adaptation_level: 0,
        }
    }
}
