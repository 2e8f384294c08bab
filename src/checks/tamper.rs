//! Tamper-score thresholding
//!
//! Interprets the numeric recompression-difference score produced by the
//! forensics collector. Two thresholds: at or above the lower one the image
//! is flagged suspicious; above the upper one the fusion engine forces a
//! SUSPICIOUS verdict unless the oracle already called tampering.

/// Interpretation of a 0-100 tamper score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TamperAssessment {
    pub score: f32,
    /// Score at or above the suspicious threshold
    pub suspicious: bool,
    /// Score above the forcing threshold
    pub extreme: bool,
}

/// Threshold a tamper score. `None` in means no signal out.
pub fn assess_tamper_score(
    score: Option<f32>,
    suspicious_at: f32,
    force_at: f32,
) -> Option<TamperAssessment> {
    let score = score?;
    let score = score.clamp(0.0, 100.0);
    Some(TamperAssessment {
        score,
        suspicious: score >= suspicious_at,
        extreme: score > force_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(score: f32) -> TamperAssessment {
        assess_tamper_score(Some(score), 40.0, 90.0).unwrap()
    }

    #[test]
    fn test_no_score_no_signal() {
        assert!(assess_tamper_score(None, 40.0, 90.0).is_none());
    }

    #[test]
    fn test_low_score_clean() {
        let a = assess(12.0);
        assert!(!a.suspicious);
        assert!(!a.extreme);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let a = assess(40.0);
        assert!(a.suspicious);
        assert!(!a.extreme);
    }

    #[test]
    fn test_forcing_threshold_is_exclusive() {
        assert!(!assess(90.0).extreme);
        assert!(assess(90.5).extreme);
    }

    #[test]
    fn test_extreme_implies_suspicious() {
        let a = assess(97.0);
        assert!(a.suspicious);
        assert!(a.extreme);
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        assert_eq!(assess(250.0).score, 100.0);
        assert_eq!(assess(-5.0).score, 0.0);
    }
}
