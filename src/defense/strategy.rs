//! Strategy Selection, Countermeasures, and Recommendations
//!
//! Picks a defense strategy from threat level and requested mode, merges
//! its actions with per-category countermeasures, and produces advisory
//! recommendations. All pure lookups over the fixed catalogs.

use std::collections::HashSet;

use tracing::debug;

use crate::defense::catalog::{counter_measures_for, StrategyCatalog};
use crate::types::{DefenseMode, DefenseStrategy, DetectedThreat, ThreatLevel};

/// Select a defense strategy for the given threat level and mode.
///
/// Resolution order, first match wins:
/// 1. aggressive mode OR critical level -> pattern_interrupt
/// 2. passive mode OR low level -> shield_protocol
/// 3. auto table: high -> conscious_analysis, medium -> reality_anchor,
///    low/none -> shield_protocol, anything else -> reality_anchor
///
/// Rule 1 runs before rule 2, so a critical threat yields
/// pattern_interrupt even in passive mode, and the auto table needs no
/// critical entry. That precedence is deliberate, not incidental.
pub fn select_strategy<'a>(
    catalog: &'a StrategyCatalog,
    level: ThreatLevel,
    mode: DefenseMode,
) -> &'a DefenseStrategy {
    let strategy = if mode == DefenseMode::Aggressive || level == ThreatLevel::Critical {
        &catalog.pattern_interrupt
    } else if mode == DefenseMode::Passive || level == ThreatLevel::Low {
        &catalog.shield_protocol
    } else {
        match level {
            ThreatLevel::High => &catalog.conscious_analysis,
            ThreatLevel::Medium => &catalog.reality_anchor,
            ThreatLevel::Low | ThreatLevel::None => &catalog.shield_protocol,
            // Critical never reaches the auto table (absorbed by rule 1);
            // kept as the documented default for an unmapped level.
            _ => &catalog.reality_anchor,
        }
    };

    debug!(
        "selected strategy {} for level={} mode={:?}",
        strategy.name, level, mode
    );
    strategy
}

/// Merge the strategy's execution actions with the fixed countermeasure
/// list of every detected category, deduplicated in first-seen order.
pub fn generate_counter_measures(
    detections: &[DetectedThreat],
    strategy: &DefenseStrategy,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut measures: Vec<String> = Vec::new();

    for action in &strategy.actions {
        if seen.insert(action.clone()) {
            measures.push(action.clone());
        }
    }

    for detection in detections {
        for measure in counter_measures_for(detection.category) {
            let measure = measure.to_string();
            if seen.insert(measure.clone()) {
                measures.push(measure);
            }
        }
    }

    measures
}

/// Threshold-driven advisory list. Critical and high levels each add
/// three directives of matching urgency; any non-empty detection list
/// adds three general follow-ups. No detections at all means no advice.
pub fn recommend(level: ThreatLevel, detections: &[DetectedThreat]) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    if level == ThreatLevel::Critical {
        recommendations.push("Disengage from this interaction immediately".to_string());
        recommendations.push("Activate the emergency protocol now".to_string());
        recommendations.push("Do not act on anything agreed to in this session".to_string());
    }

    if level == ThreatLevel::High {
        recommendations.push("Treat every further statement as untrusted".to_string());
        recommendations.push("Slow the conversation down and verify each claim".to_string());
        recommendations.push("Prepare to exit the interaction on short notice".to_string());
    }

    if !detections.is_empty() {
        recommendations.push("Review the detected patterns once the session ends".to_string());
        recommendations.push("Note the context in which each technique appeared".to_string());
        recommendations.push("Re-run the analysis on any follow-up messages".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defense::catalog::{
        STRATEGY_CONSCIOUS_ANALYSIS, STRATEGY_PATTERN_INTERRUPT, STRATEGY_REALITY_ANCHOR,
        STRATEGY_SHIELD_PROTOCOL,
    };
    use crate::types::AttackCategory;

    fn catalog() -> StrategyCatalog {
        StrategyCatalog::new()
    }

    fn threat(category: AttackCategory) -> DetectedThreat {
        DetectedThreat {
            category,
            description: String::new(),
            score: 50,
            confidence: 0.5,
        }
    }

    #[test]
    fn test_critical_overrides_passive_mode() {
        let catalog = catalog();
        let strategy = select_strategy(&catalog, ThreatLevel::Critical, DefenseMode::Passive);
        assert_eq!(strategy.name, STRATEGY_PATTERN_INTERRUPT);
    }

    #[test]
    fn test_aggressive_mode_overrides_level() {
        let catalog = catalog();
        for level in [
            ThreatLevel::None,
            ThreatLevel::Low,
            ThreatLevel::Medium,
            ThreatLevel::High,
            ThreatLevel::Critical,
        ] {
            let strategy = select_strategy(&catalog, level, DefenseMode::Aggressive);
            assert_eq!(strategy.name, STRATEGY_PATTERN_INTERRUPT);
        }
    }

    #[test]
    fn test_passive_mode_yields_shield() {
        let catalog = catalog();
        let strategy = select_strategy(&catalog, ThreatLevel::High, DefenseMode::Passive);
        assert_eq!(strategy.name, STRATEGY_SHIELD_PROTOCOL);
    }

    #[test]
    fn test_auto_table() {
        let catalog = catalog();
        let pick = |level| select_strategy(&catalog, level, DefenseMode::Auto).name.clone();
        assert_eq!(pick(ThreatLevel::High), STRATEGY_CONSCIOUS_ANALYSIS);
        assert_eq!(pick(ThreatLevel::Medium), STRATEGY_REALITY_ANCHOR);
        assert_eq!(pick(ThreatLevel::Low), STRATEGY_SHIELD_PROTOCOL);
        assert_eq!(pick(ThreatLevel::None), STRATEGY_SHIELD_PROTOCOL);
    }

    #[test]
    fn test_counter_measures_start_with_strategy_actions() {
        let catalog = catalog();
        let strategy = catalog.get(STRATEGY_REALITY_ANCHOR).unwrap();
        let detections = vec![threat(AttackCategory::EmbeddedCommands)];
        let measures = generate_counter_measures(&detections, strategy);
        assert_eq!(measures[..strategy.actions.len()], strategy.actions[..]);
        assert!(measures.len() > strategy.actions.len());
    }

    #[test]
    fn test_counter_measures_deduplicated() {
        let catalog = catalog();
        let strategy = catalog.get(STRATEGY_SHIELD_PROTOCOL).unwrap();
        let detections = vec![
            threat(AttackCategory::CovertHypnosis),
            threat(AttackCategory::CovertHypnosis),
        ];
        let measures = generate_counter_measures(&detections, strategy);
        let unique: HashSet<&String> = measures.iter().collect();
        assert_eq!(unique.len(), measures.len());
    }

    #[test]
    fn test_recommendations_by_level() {
        let detections = vec![threat(AttackCategory::NlpManipulation)];
        assert_eq!(recommend(ThreatLevel::Critical, &detections).len(), 6);
        assert_eq!(recommend(ThreatLevel::High, &detections).len(), 6);
        assert_eq!(recommend(ThreatLevel::Medium, &detections).len(), 3);
        assert!(recommend(ThreatLevel::None, &[]).is_empty());
    }
}
