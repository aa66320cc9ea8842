//! Threat Pattern and Strategy Catalogs
//!
//! The fixed knowledge base: attack categories with their keyword and
//! indicator heuristics, the defense strategy table, and the per-category
//! countermeasure lists. Populated once at startup and never mutated;
//! unknown lookups simply return `None`.

use crate::types::{AttackCategory, DefenseStrategy};

/// A named attack category with its lexical heuristics.
///
/// Keywords are matched as case-insensitive substrings (+10 each);
/// indicators are regex-style structural tests (+20 each). Both sets are
/// declared in scoring order, which also serves as the deterministic
/// tie-break order for equal-score detections.
pub struct ThreatPattern {
    pub category: AttackCategory,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub indicators: &'static [&'static str],
}

/// All known attack categories, in declaration order.
pub const THREAT_PATTERNS: &[ThreatPattern] = &[
    ThreatPattern {
        category: AttackCategory::EmbeddedCommands,
        description: "Embedded commands: directives hidden inside ordinary conversational language",
        keywords: &[
            "you will",
            "you must",
            "you can feel",
            "relaxed",
            "sleepy",
            "drowsy",
            "heavy",
            "notice how",
            "feel yourself",
            "let go",
        ],
        indicators: &[
            // Trailing-off pause marker used to slip a command past scrutiny
            r"\.\.\.",
            // Command verb bound to an immediacy cue
            r"(?i)\b(feel|relax|sleep|obey|listen)\w*\b[^.!?]*\bnow\b",
            r"(?i)\bnow\b[^.!?]*\b(feel|relax|sleep)\w*\b",
        ],
    },
    ThreatPattern {
        category: AttackCategory::ConfusionTechnique,
        description: "Confusion technique: overload through contradiction and broken logic",
        keywords: &[
            "confused",
            "doesn't make sense",
            "paradox",
            "contradiction",
            "at the same time",
            "opposite",
            "makes you wonder",
            "lost track",
        ],
        indicators: &[
            // Multiple contrast conjunctions in one utterance
            r"(?is)\bbut\b.*\bbut\b",
            r"(?i)\b(while|yet)\b[^.!?]*\b(also|simultaneously)\b",
            // Stacked negations
            r"(?is)\bnot\b.*\bnot\b.*\bnot\b",
        ],
    },
    ThreatPattern {
        category: AttackCategory::RapidInduction,
        description: "Rapid induction: abrupt shock-and-drop compliance demand",
        keywords: &[
            "sleep now",
            "deep sleep",
            "instantly",
            "right now",
            "all at once",
            "sudden",
            "snap",
            "drop",
        ],
        indicators: &[
            // Sudden-action cue word bound to an immediacy cue
            r"(?i)\b(snap|clap|drop)\b[^.!?]*\b(now|instantly)\b",
            r"(?i)\bsleep\s*!",
            r"!{2,}",
        ],
    },
    ThreatPattern {
        category: AttackCategory::CovertHypnosis,
        description: "Covert hypnosis: pacing, truisms, and implied inevitability",
        keywords: &[
            "that means",
            "which means",
            "sooner or later",
            "more and more",
            "as you listen",
            "you might find",
            "a person can",
            "it's natural",
        ],
        indicators: &[
            // Pacing statement leading into a suggestion
            r"(?i)\bas you\b[^.!?]*\byou (can|will|may)\b",
            r"(?i)\bthe more\b.*\bthe more\b",
            r"(?i)\b(everyone|everybody|people) (knows?|finds?|feels?)\b",
        ],
    },
    ThreatPattern {
        category: AttackCategory::NlpManipulation,
        description: "NLP manipulation: anchoring, sensory overload, and presupposition",
        keywords: &[
            "imagine",
            "picture this",
            "visualize",
            "anchor",
            "remember a time",
            "what would it be like",
            "your unconscious",
            "future you",
        ],
        indicators: &[
            r"(?i)\bremember\b[^.!?]*\b(feeling|time|moment)\b",
            // Stacked sensory predicates
            r"(?is)\b(see|hear|feel)\b.*\b(see|hear|feel)\b.*\b(see|hear|feel)\b",
            // Presupposed compliance
            r"(?i)\bwhen you\b[^.!?]*\bthen you\b",
        ],
    },
];

/// Read-only lookup over the fixed threat pattern table.
pub struct ThreatPatternCatalog;

impl ThreatPatternCatalog {
    pub fn new() -> Self {
        ThreatPatternCatalog
    }

    /// All patterns, in declaration order.
    pub fn patterns(&self) -> &'static [ThreatPattern] {
        THREAT_PATTERNS
    }

    /// Lookup by category id. Unknown ids are impossible at the type
    /// level, but the pattern table stays the single source of truth.
    pub fn get(&self, category: AttackCategory) -> Option<&'static ThreatPattern> {
        THREAT_PATTERNS.iter().find(|p| p.category == category)
    }
}

impl Default for ThreatPatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Defense Strategies ──────────────────────────────────────────

pub const STRATEGY_PATTERN_INTERRUPT: &str = "pattern_interrupt";
pub const STRATEGY_SHIELD_PROTOCOL: &str = "shield_protocol";
pub const STRATEGY_CONSCIOUS_ANALYSIS: &str = "conscious_analysis";
pub const STRATEGY_REALITY_ANCHOR: &str = "reality_anchor";

/// Read-only table of the four fixed defense strategies. One field per
/// strategy so selection is total and never falls through a map lookup.
pub struct StrategyCatalog {
    pub pattern_interrupt: DefenseStrategy,
    pub shield_protocol: DefenseStrategy,
    pub conscious_analysis: DefenseStrategy,
    pub reality_anchor: DefenseStrategy,
}

impl StrategyCatalog {
    pub fn new() -> Self {
        StrategyCatalog {
            pattern_interrupt: DefenseStrategy {
                name: STRATEGY_PATTERN_INTERRUPT.to_string(),
                description: "Break the manipulation flow with an abrupt change of frame"
                    .to_string(),
                actions: vec![
                    "Interrupt the speaker mid-pattern with an unrelated question".to_string(),
                    "Change your physical position and break eye contact".to_string(),
                    "State plainly: 'I notice what you are doing. Stop.'".to_string(),
                    "Redirect the conversation to concrete, factual topics".to_string(),
                ],
                effectiveness: 90,
            },
            shield_protocol: DefenseStrategy {
                name: STRATEGY_SHIELD_PROTOCOL.to_string(),
                description: "Passive defensive stance that deflects influence without confrontation"
                    .to_string(),
                actions: vec![
                    "Maintain polite but minimal engagement".to_string(),
                    "Answer questions literally, ignoring embedded suggestions".to_string(),
                    "Keep your own internal commentary running".to_string(),
                    "Defer every request: 'I will decide that later'".to_string(),
                ],
                effectiveness: 70,
            },
            conscious_analysis: DefenseStrategy {
                name: STRATEGY_CONSCIOUS_ANALYSIS.to_string(),
                description: "Deliberate analytic processing of every statement".to_string(),
                actions: vec![
                    "Paraphrase each statement aloud before responding".to_string(),
                    "Name the technique you believe is being used".to_string(),
                    "Ask for clarification of vague or unverifiable claims".to_string(),
                ],
                effectiveness: 80,
            },
            reality_anchor: DefenseStrategy {
                name: STRATEGY_REALITY_ANCHOR.to_string(),
                description: "Grounding in verifiable present-moment facts".to_string(),
                actions: vec![
                    "State today's date, your location, and your purpose".to_string(),
                    "Touch a physical object and describe its texture".to_string(),
                    "Review what you agreed to before this conversation".to_string(),
                ],
                effectiveness: 75,
            },
        }
    }

    /// Lookup by strategy name; unknown names yield `None`.
    pub fn get(&self, name: &str) -> Option<&DefenseStrategy> {
        self.strategies().into_iter().find(|s| s.name == name)
    }

    /// All strategies, in catalog order.
    pub fn strategies(&self) -> [&DefenseStrategy; 4] {
        [
            &self.pattern_interrupt,
            &self.shield_protocol,
            &self.conscious_analysis,
            &self.reality_anchor,
        ]
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Per-Category Countermeasures ────────────────────────────────

/// Fixed countermeasure list for one attack category, appended after
/// the selected strategy's own actions.
pub fn counter_measures_for(category: AttackCategory) -> &'static [&'static str] {
    match category {
        AttackCategory::EmbeddedCommands => &[
            "Repeat each suggestion back in your own words, stripped of tone",
            "Refuse any instruction that arrived inside a description",
            "Ask: 'Was that a statement or a command?'",
        ],
        AttackCategory::ConfusionTechnique => &[
            "Slow the exchange down: one claim at a time",
            "Write down each statement and check it against the last",
            "Decline to respond until the contradiction is resolved",
        ],
        AttackCategory::RapidInduction => &[
            "Do not comply with any demand framed as urgent",
            "Take three slow breaths before reacting to sudden cues",
            "Re-establish distance before continuing the conversation",
        ],
        AttackCategory::CovertHypnosis => &[
            "Question every 'that means' linkage out loud",
            "Reject generalizations about what 'everyone' feels",
            "Track who benefits from each implied conclusion",
        ],
        AttackCategory::NlpManipulation => &[
            "Decline invitations to imagine or visualize on request",
            "Notice and name any touch or gesture paired with emotion",
            "Keep attention on the present instead of recalled feelings",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_patterns() {
        let catalog = ThreatPatternCatalog::new();
        assert_eq!(catalog.patterns().len(), 5);
    }

    #[test]
    fn test_lookup_by_category() {
        let catalog = ThreatPatternCatalog::new();
        let pattern = catalog.get(AttackCategory::RapidInduction).unwrap();
        assert_eq!(pattern.category, AttackCategory::RapidInduction);
        assert!(!pattern.keywords.is_empty());
        assert!(!pattern.indicators.is_empty());
    }

    #[test]
    fn test_strategy_catalog_complete() {
        let catalog = StrategyCatalog::new();
        for name in [
            STRATEGY_PATTERN_INTERRUPT,
            STRATEGY_SHIELD_PROTOCOL,
            STRATEGY_CONSCIOUS_ANALYSIS,
            STRATEGY_REALITY_ANCHOR,
        ] {
            let strategy = catalog.get(name).unwrap();
            assert_eq!(strategy.name, name);
            assert!(!strategy.actions.is_empty());
            assert!(strategy.effectiveness <= 100);
        }
        assert!(catalog.get("no_such_strategy").is_none());
    }

    #[test]
    fn test_every_category_has_counter_measures() {
        for pattern in THREAT_PATTERNS {
            assert!(!counter_measures_for(pattern.category).is_empty());
        }
    }

    #[test]
    fn test_indicator_patterns_compile() {
        for pattern in THREAT_PATTERNS {
            for indicator in pattern.indicators {
                assert!(
                    regex::Regex::new(indicator).is_ok(),
                    "indicator failed to compile: {}",
                    indicator
                );
            }
        }
    }
}
