use crate::entities::episode::EpisodeType;

/// Terms that route an intake to the neurological caseload
pub const NEURO_KEYWORDS: &[&str] = &[
    "neuro",
    "stroke",
    "cva",
    "concussion",
    "tbi",
    "brain injury",
    "parkinson",
    "multiple sclerosis",
    "vestibular",
    "vertigo",
    "dizz",
    "balance",
    "neuropathy",
    "spinal cord injury",
    "guillain",
    "ataxia",
    "tremor",
    "bell's palsy",
];

/// Terms that route an intake to the musculoskeletal caseload
pub const MSK_KEYWORDS: &[&str] = &[
    "msk",
    "musculoskeletal",
    "ortho",
    "back",
    "neck",
    "shoulder",
    "knee",
    "hip",
    "ankle",
    "foot",
    "wrist",
    "elbow",
    "sprain",
    "strain",
    "fracture",
    "tendon",
    "arthritis",
    "sports",
    "post-op",
    "joint",
];

/// Label for one string: neuro terms are checked before MSK terms
fn classify_text(text: &str) -> Option<EpisodeType> {
    let text = text.to_lowercase();

    if NEURO_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(EpisodeType::Neuro)
    } else if MSK_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(EpisodeType::Msk)
    } else {
        None
    }
}

/// Suggest an episode type from the intake category and free-text concern.
///
/// The category is consulted first; the concern only decides when the
/// category matches nothing.
pub fn get_suggested_episode_type(category: Option<&str>, concern: Option<&str>) -> EpisodeType {
    category
        .and_then(classify_text)
        .or_else(|| concern.and_then(classify_text))
        .unwrap_or(EpisodeType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neuro_category_wins_over_msk_concern() {
        let episode = get_suggested_episode_type(Some("Neurological"), Some("right knee pain after a fall"));
        assert_eq!(episode, EpisodeType::Neuro);
    }

    #[test]
    fn test_msk_category() {
        let episode = get_suggested_episode_type(Some("Orthopedic"), None);
        assert_eq!(episode, EpisodeType::Msk);
    }

    #[test]
    fn test_concern_used_when_category_unmatched() {
        let episode = get_suggested_episode_type(Some("General"), Some("Dizziness when rolling over in bed"));
        assert_eq!(episode, EpisodeType::Neuro);

        let episode = get_suggested_episode_type(None, Some("Sore SHOULDER from tennis"));
        assert_eq!(episode, EpisodeType::Msk);
    }

    #[test]
    fn test_neuro_checked_before_msk_in_same_text() {
        let episode = get_suggested_episode_type(None, Some("balance problems and low back pain"));
        assert_eq!(episode, EpisodeType::Neuro);
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(get_suggested_episode_type(None, None), EpisodeType::Unknown);
        assert_eq!(get_suggested_episode_type(Some(""), Some("")), EpisodeType::Unknown);
        assert_eq!(
            get_suggested_episode_type(Some("Wellness"), Some("general fitness goals")),
            EpisodeType::Unknown
        );
    }
}
