use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use outcomes_registry_domain::entities::OutcomeEvaluation;

/// Intake answers used to suggest an episode type
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClassifyIntakeRequest {
    /// Referral category picked on the intake form
    pub category: Option<String>,

    /// Patient's own description of the concern
    pub concern: Option<String>,
}

/// Suggested episode type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassifyIntakeResponse {
    /// `NEURO`, `MSK` or `UNKNOWN`
    #[schema(example = "MSK")]
    pub episode_type: String,
}

/// Baseline and final scores on one outcome index
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct McidRequest {
    pub baseline: f64,

    #[serde(rename = "final")]
    pub final_score: f64,

    /// NDI, ODI, QuickDASH, LEFS, DHI, NPRS or PSFS
    #[schema(example = "NDI")]
    pub index_type: String,
}

/// MCID verdict for a pair of scores
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct McidResponse {
    pub index_type: String,
    pub baseline: f64,
    #[serde(rename = "final")]
    pub final_score: f64,
    pub improvement: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_improvement: Option<f64>,
    pub mcid_threshold: f64,
    pub mcid_achieved: bool,
}

impl From<OutcomeEvaluation> for McidResponse {
    fn from(evaluation: OutcomeEvaluation) -> Self {
        Self {
            index_type: evaluation.index_type,
            baseline: evaluation.baseline,
            final_score: evaluation.final_score,
            improvement: evaluation.improvement,
            percent_improvement: evaluation.percent_improvement,
            mcid_threshold: evaluation.mcid_threshold,
            mcid_achieved: evaluation.mcid_achieved,
        }
    }
}
