//! Threat Detector
//!
//! Scores input text against every pattern in the catalog, classifies
//! the result into an ordinal threat level, and aggregates per-detection
//! confidence. Pure functions: same input, same output, no hidden state.

use regex::Regex;
use tracing::debug;

use crate::defense::catalog::ThreatPatternCatalog;
use crate::types::{DetectedThreat, ThreatLevel};

/// Score contribution per matched trigger keyword.
const KEYWORD_WEIGHT: u32 = 10;

/// Score contribution per matched indicator heuristic.
const INDICATOR_WEIGHT: u32 = 20;

/// A category becomes a detection only above this score.
const DETECTION_THRESHOLD: u32 = 30;

/// Score every catalog pattern against the input.
///
/// Keywords count as case-insensitive substrings; indicators are
/// evaluated independently per category. Output is sorted descending
/// by score, with catalog declaration order preserved on ties.
/// Empty or whitespace-only input yields an empty list.
pub fn detect(catalog: &ThreatPatternCatalog, input: &str) -> Vec<DetectedThreat> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let lowered = input.to_lowercase();
    let mut detections: Vec<DetectedThreat> = Vec::new();

    for pattern in catalog.patterns() {
        let mut score = 0u32;

        for keyword in pattern.keywords {
            if lowered.contains(keyword) {
                score += KEYWORD_WEIGHT;
            }
        }

        for indicator in pattern.indicators {
            let matched = Regex::new(indicator)
                .map(|re| re.is_match(input))
                .unwrap_or(false);
            if matched {
                score += INDICATOR_WEIGHT;
            }
        }

        if score > DETECTION_THRESHOLD {
            detections.push(DetectedThreat {
                category: pattern.category,
                description: pattern.description.to_string(),
                score,
                confidence: (score as f64 / 100.0).min(1.0),
            });
        }
    }

    // Stable sort keeps catalog order for equal scores.
    detections.sort_by(|a, b| b.score.cmp(&a.score));

    if !detections.is_empty() {
        debug!(
            "detected {} threat(s), top: {} (score {})",
            detections.len(),
            detections[0].category,
            detections[0].score
        );
    }

    detections
}

/// Map the maximum detection score onto the ordinal threat scale.
/// No detections means no threat.
pub fn classify(detections: &[DetectedThreat]) -> ThreatLevel {
    let max_score = detections.iter().map(|d| d.score).max().unwrap_or(0);
    match max_score {
        s if s > 80 => ThreatLevel::Critical,
        s if s > 60 => ThreatLevel::High,
        s if s > 40 => ThreatLevel::Medium,
        s if s > 20 => ThreatLevel::Low,
        _ => ThreatLevel::None,
    }
}

/// Rounded mean of per-detection confidence, scaled to 0-100.
/// An empty detection list yields 0.
pub fn aggregate_confidence(detections: &[DetectedThreat]) -> u8 {
    if detections.is_empty() {
        return 0;
    }
    let sum: f64 = detections.iter().map(|d| d.confidence).sum();
    let mean = sum / detections.len() as f64;
    (mean * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttackCategory;

    fn catalog() -> ThreatPatternCatalog {
        ThreatPatternCatalog::new()
    }

    #[test]
    fn test_empty_input_yields_no_detections() {
        assert!(detect(&catalog(), "").is_empty());
        assert!(detect(&catalog(), "   \n\t ").is_empty());
    }

    #[test]
    fn test_benign_input_yields_no_detections() {
        let detections = detect(&catalog(), "The quarterly report is due on Friday.");
        assert!(detections.is_empty());
        assert_eq!(classify(&detections), ThreatLevel::None);
    }

    #[test]
    fn test_induction_script_detected_at_least_medium() {
        let input = "You will feel very relaxed now... notice how heavy your eyelids feel";
        let detections = detect(&catalog(), input);
        assert!(!detections.is_empty());
        assert!(classify(&detections) >= ThreatLevel::Medium);
        assert!(detections.iter().any(|d| {
            d.category == AttackCategory::EmbeddedCommands
                || d.category == AttackCategory::NlpManipulation
        }));
    }

    #[test]
    fn test_score_monotonic_in_matches() {
        let base = detect(&catalog(), "you will feel relaxed and sleepy now");
        let more = detect(
            &catalog(),
            "you will feel relaxed and sleepy now... notice how heavy you feel",
        );
        let base_score = base
            .iter()
            .find(|d| d.category == AttackCategory::EmbeddedCommands)
            .map(|d| d.score)
            .unwrap_or(0);
        let more_score = more
            .iter()
            .find(|d| d.category == AttackCategory::EmbeddedCommands)
            .map(|d| d.score)
            .unwrap_or(0);
        assert!(more_score >= base_score);
        assert!(more_score > 0);
    }

    #[test]
    fn test_detections_sorted_descending_by_score() {
        let input = "Sleep now!! Drop instantly, all at once... you will feel relaxed now, \
                     let go, feel yourself drowsy and heavy";
        let detections = detect(&catalog(), input);
        assert!(detections.len() >= 2);
        for pair in detections.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_confidence_capped_at_one() {
        let input = "you will, you must, you can feel relaxed, sleepy, drowsy, heavy, \
                     notice how you feel yourself let go now... sleep now";
        let detections = detect(&catalog(), input);
        for detection in &detections {
            assert!(detection.confidence <= 1.0);
            assert!(detection.confidence > 0.0);
        }
    }

    #[test]
    fn test_classify_thresholds() {
        let threat = |score| DetectedThreat {
            category: AttackCategory::EmbeddedCommands,
            description: String::new(),
            score,
            confidence: 0.5,
        };
        assert_eq!(classify(&[]), ThreatLevel::None);
        assert_eq!(classify(&[threat(20)]), ThreatLevel::None);
        assert_eq!(classify(&[threat(21)]), ThreatLevel::Low);
        assert_eq!(classify(&[threat(41)]), ThreatLevel::Medium);
        assert_eq!(classify(&[threat(61)]), ThreatLevel::High);
        assert_eq!(classify(&[threat(80)]), ThreatLevel::High);
        assert_eq!(classify(&[threat(81)]), ThreatLevel::Critical);
    }

    #[test]
    fn test_aggregate_confidence_empty_is_zero() {
        assert_eq!(aggregate_confidence(&[]), 0);
    }

    #[test]
    fn test_aggregate_confidence_is_rounded_mean() {
        let threat = |confidence| DetectedThreat {
            category: AttackCategory::CovertHypnosis,
            description: String::new(),
            score: 50,
            confidence,
        };
        assert_eq!(aggregate_confidence(&[threat(0.5), threat(0.7)]), 60);
        assert_eq!(aggregate_confidence(&[threat(1.0)]), 100);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let input = "as you listen you will find that the more you resist, the more you relax";
        let first = detect(&catalog(), input);
        let second = detect(&catalog(), input);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.category, b.category);
            assert_eq!(a.score, b.score);
        }
    }
}
