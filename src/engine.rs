//! Defense Engine
//!
//! The host-facing facade. The detection pipeline and the emergency
//! controller are stateless per call and safe to invoke concurrently;
//! the agent subsystem holds per-agent mutable state behind one mutex
//! per agent, so the respond -> record -> maybe-adapt sequence is always
//! observed as a single atomic unit while distinct agents proceed in
//! parallel. Persistence of agents across processes is the host's job.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::defense::{detector, emergency, strategy};
use crate::defense::{StrategyCatalog, ThreatPatternCatalog};
use crate::simulation::{learning, profile, simulator};
use crate::types::{
    AgentArchetype, AgentProfile, AgentResponse, DefenseAnalysis, DefenseMode, Difficulty,
    EmergencyProtocol, EngineError, LearningProfile,
};

/// Everything owned by one agent id: the profile, its learning ledger,
/// and the rng driving canned-phrase selection. Guarded by one mutex so
/// updates and adaptation land atomically.
struct AgentSession {
    profile: AgentProfile,
    learning: LearningProfile,
    rng: StdRng,
}

/// The engine facade exposed to the host application.
pub struct DefenseEngine {
    patterns: ThreatPatternCatalog,
    strategies: StrategyCatalog,
    agents: RwLock<HashMap<String, Arc<Mutex<AgentSession>>>>,
}

impl DefenseEngine {
    pub fn new() -> Self {
        DefenseEngine {
            patterns: ThreatPatternCatalog::new(),
            strategies: StrategyCatalog::new(),
            agents: RwLock::new(HashMap::new()),
        }
    }

    // ─── Threat Analysis ─────────────────────────────────────────

    /// Analyze one utterance and assemble the full defense picture.
    ///
    /// Pure with respect to engine state; empty or whitespace-only
    /// input is a normal "no threat" result, not an error.
    pub fn analyze_threat(&self, input: &str, mode: DefenseMode) -> DefenseAnalysis {
        let detections = detector::detect(&self.patterns, input);
        let threat_level = detector::classify(&detections);
        let chosen = strategy::select_strategy(&self.strategies, threat_level, mode);

        let threat_detected = !detections.is_empty();
        let counter_measures = if threat_detected {
            strategy::generate_counter_measures(&detections, chosen)
        } else {
            Vec::new()
        };
        let recommendations = strategy::recommend(threat_level, &detections);
        let confidence = detector::aggregate_confidence(&detections);

        debug!(
            "analysis: level={} strategy={} detections={} confidence={}",
            threat_level,
            chosen.name,
            detections.len(),
            confidence
        );

        DefenseAnalysis {
            threat_detected,
            threat_level,
            primary_attack: detections.first().map(|d| d.category),
            attack_patterns: detections.iter().map(|d| d.description.clone()).collect(),
            strategy: chosen.name.clone(),
            counter_measures,
            recommendations,
            confidence,
        }
    }

    /// Run the fixed emergency extraction sequence.
    pub fn activate_emergency_protocol(&self) -> EmergencyProtocol {
        emergency::activate()
    }

    /// The strategy catalog, for hosts that render strategy details.
    pub fn strategy_catalog(&self) -> &StrategyCatalog {
        &self.strategies
    }

    // ─── Agent Simulation ────────────────────────────────────────

    /// Create a simulated agent from the preset table and register it.
    /// Returns a snapshot of the freshly created profile.
    pub fn create_agent(
        &self,
        archetype: AgentArchetype,
        difficulty: Difficulty,
        adaptive_learning: bool,
    ) -> AgentProfile {
        self.register(archetype, difficulty, adaptive_learning, StdRng::from_entropy())
    }

    /// Like [`create_agent`](Self::create_agent) but with a seeded rng,
    /// so phrase selection is reproducible in tests and replays.
    pub fn create_agent_seeded(
        &self,
        archetype: AgentArchetype,
        difficulty: Difficulty,
        adaptive_learning: bool,
        seed: u64,
    ) -> AgentProfile {
        self.register(
            archetype,
            difficulty,
            adaptive_learning,
            StdRng::seed_from_u64(seed),
        )
    }

    fn register(
        &self,
        archetype: AgentArchetype,
        difficulty: Difficulty,
        adaptive_learning: bool,
        rng: StdRng,
    ) -> AgentProfile {
        let profile = profile::build_profile(archetype, difficulty, adaptive_learning);
        let snapshot = profile.clone();
        let session = AgentSession {
            learning: LearningProfile::new(&profile.id),
            profile,
            rng,
        };

        let mut agents = self
            .agents
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        agents.insert(snapshot.id.clone(), Arc::new(Mutex::new(session)));

        info!(
            "created agent {} ({:?}/{:?}, adaptive={})",
            snapshot.id, archetype, difficulty, adaptive_learning
        );
        snapshot
    }

    /// Apply one technique to an agent, mutating its state and feeding
    /// the learning ledger in the same critical section.
    pub fn respond_to_technique(
        &self,
        agent_id: &str,
        technique: &str,
        content: &str,
    ) -> Result<AgentResponse, EngineError> {
        let session = self.session(agent_id)?;
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        let AgentSession {
            profile,
            learning,
            rng,
        } = &mut *guard;

        let response = simulator::respond(profile, technique, content, rng);
        learning::record_interaction(learning, profile, technique, response.effectiveness);
        Ok(response)
    }

    /// Record an interaction directly in an agent's learning ledger.
    ///
    /// The respond path calls this internally; it is exposed for replay
    /// and testing, where effectiveness values come from the outside.
    pub fn record_learning(
        &self,
        agent_id: &str,
        technique: &str,
        effectiveness: f64,
    ) -> Result<(), EngineError> {
        let session = self.session(agent_id)?;
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        let AgentSession {
            profile, learning, ..
        } = &mut *guard;

        learning::record_interaction(learning, profile, technique, effectiveness.clamp(0.0, 100.0));
        Ok(())
    }

    /// Snapshot of an agent's current profile and state.
    pub fn get_agent(&self, agent_id: &str) -> Result<AgentProfile, EngineError> {
        let session = self.session(agent_id)?;
        let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.profile.clone())
    }

    /// Snapshot of an agent's learning ledger.
    pub fn get_learning_profile(&self, agent_id: &str) -> Result<LearningProfile, EngineError> {
        let session = self.session(agent_id)?;
        let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.learning.clone())
    }

    /// Fetch the shared handle for one agent, failing explicitly on an
    /// unknown id instead of creating or ignoring it.
    fn session(&self, agent_id: &str) -> Result<Arc<Mutex<AgentSession>>, EngineError> {
        let agents = self.agents.read().unwrap_or_else(PoisonError::into_inner);
        agents
            .get(agent_id)
            .cloned()
            .ok_or_else(|| EngineError::AgentNotFound(agent_id.to_string()))
    }
}

impl Default for DefenseEngine {
    fn default() -> Self {
        Self::new()
    }
}
