use crate::entities::outcome::OutcomeEvaluation;

/// Minimal clinically important difference per outcome index.
/// Improvement is always `baseline - final`, whichever direction an index
/// scores in, so for higher-is-better indices (LEFS, PSFS) a gain reads as
/// a negative improvement.
pub const MCID_THRESHOLDS: &[(&str, f64)] = &[
    ("NDI", 7.5),
    ("ODI", 10.0),
    ("QUICKDASH", 8.0),
    ("LEFS", 9.0),
    ("DHI", 18.0),
    ("NPRS", 2.0),
    ("PSFS", 2.0),
];

/// Threshold for an index; unknown indices get 0
pub fn mcid_threshold(index_type: &str) -> f64 {
    let key = index_type.trim().to_uppercase();
    MCID_THRESHOLDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(0.0)
}

/// `baseline - final_score`
pub fn calculate_improvement(baseline: f64, final_score: f64) -> f64 {
    baseline - final_score
}

/// Improvement as a percentage of baseline, `None` when baseline is zero
pub fn percent_improvement(baseline: f64, final_score: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some(calculate_improvement(baseline, final_score) / baseline * 100.0)
    }
}

/// Whether the change from baseline to final meets the index's MCID
pub fn has_mcid_achieved(baseline: f64, final_score: f64, index_type: &str) -> bool {
    calculate_improvement(baseline, final_score) >= mcid_threshold(index_type)
}

/// Bundle all of the above for one pair of scores
pub fn evaluate_outcome(baseline: f64, final_score: f64, index_type: &str) -> OutcomeEvaluation {
    OutcomeEvaluation {
        index_type: index_type.to_string(),
        baseline,
        final_score,
        improvement: calculate_improvement(baseline, final_score),
        percent_improvement: percent_improvement(baseline, final_score),
        mcid_threshold: mcid_threshold(index_type),
        mcid_achieved: has_mcid_achieved(baseline, final_score, index_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndi_mcid() {
        assert!(has_mcid_achieved(20.0, 10.0, "NDI"));
        assert!(!has_mcid_achieved(20.0, 15.0, "NDI"));
        // exactly at threshold counts
        assert!(has_mcid_achieved(20.0, 12.5, "NDI"));
    }

    #[test]
    fn test_higher_is_better_index_uses_plain_subtraction() {
        assert_eq!(calculate_improvement(40.0, 55.0), -15.0);
        assert!(!has_mcid_achieved(40.0, 55.0, "LEFS"));
        assert!(has_mcid_achieved(55.0, 40.0, "LEFS"));
    }

    #[test]
    fn test_unknown_index_threshold_is_zero() {
        assert_eq!(mcid_threshold("WOMAC"), 0.0);
        assert!(has_mcid_achieved(30.0, 30.0, "WOMAC"));
        assert!(has_mcid_achieved(30.0, 29.0, ""));
        assert!(!has_mcid_achieved(30.0, 31.0, "WOMAC"));
    }

    #[test]
    fn test_index_lookup_ignores_case() {
        assert_eq!(mcid_threshold("QuickDASH"), 8.0);
        assert_eq!(mcid_threshold(" dhi "), 18.0);
    }

    #[test]
    fn test_evaluate_outcome() {
        let evaluation = evaluate_outcome(40.0, 20.0, "ODI");
        assert_eq!(evaluation.improvement, 20.0);
        assert_eq!(evaluation.percent_improvement, Some(50.0));
        assert_eq!(evaluation.mcid_threshold, 10.0);
        assert!(evaluation.mcid_achieved);

        let zero_baseline = evaluate_outcome(0.0, 0.0, "NPRS");
        assert!(zero_baseline.percent_improvement.is_none());
        assert!(!zero_baseline.mcid_achieved);
    }
}
