use serde::{Deserialize, Serialize};

/// Result of comparing a baseline and a final outcome score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEvaluation {
    /// Outcome index the scores belong to, as given
    pub index_type: String,
    pub baseline: f64,
    pub final_score: f64,
    /// `baseline - final_score`; positive means the patient improved
    pub improvement: f64,
    /// Improvement relative to baseline, `None` when baseline is zero
    pub percent_improvement: Option<f64>,
    /// MCID threshold used, 0 for unknown indices
    pub mcid_threshold: f64,
    pub mcid_achieved: bool,
}
