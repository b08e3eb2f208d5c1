const MAX_THRESHOLD: f64 = 0.95;
const HIGH_THRESHOLD: f64 = 0.75;
const MEDIUM_THRESHOLD: f64 = 0.40;

/// How close a card sits to its maximum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLabel {
    Low,
    Medium,
    High,
    Max,
}

impl PowerLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerLabel::Low => "baixo",
            PowerLabel::Medium => "médio",
            PowerLabel::High => "alto",
            PowerLabel::Max => "máximo",
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= MAX_THRESHOLD {
            PowerLabel::Max
        } else if ratio >= HIGH_THRESHOLD {
            PowerLabel::High
        } else if ratio >= MEDIUM_THRESHOLD {
            PowerLabel::Medium
        } else {
            PowerLabel::Low
        }
    }
}

/// Labels only cards with a positive level and a positive max level.
pub fn classify_power(level_api: Option<i64>, max_level_api: Option<i64>) -> Option<PowerLabel> {
    let level = level_api.filter(|l| *l > 0)?;
    let max_level = max_level_api.filter(|m| *m > 0)?;
    Some(PowerLabel::from_ratio(level as f64 / max_level as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(PowerLabel::from_ratio(0.95), PowerLabel::Max);
        assert_eq!(PowerLabel::from_ratio(0.75), PowerLabel::High);
        assert_eq!(PowerLabel::from_ratio(0.40), PowerLabel::Medium);
        assert_eq!(PowerLabel::from_ratio(0.39), PowerLabel::Low);
        assert_eq!(PowerLabel::from_ratio(1.2), PowerLabel::Max);
    }

    #[test]
    fn classify_uses_level_ratio() {
        assert_eq!(classify_power(Some(6), Some(6)), Some(PowerLabel::Max));
        assert_eq!(classify_power(Some(11), Some(14)), Some(PowerLabel::High));
        assert_eq!(classify_power(Some(5), Some(9)), Some(PowerLabel::Medium));
        assert_eq!(classify_power(Some(1), Some(14)), Some(PowerLabel::Low));
    }

    #[test]
    fn non_positive_or_missing_inputs_have_no_label() {
        assert_eq!(classify_power(Some(0), Some(14)), None);
        assert_eq!(classify_power(Some(5), Some(0)), None);
        assert_eq!(classify_power(None, Some(14)), None);
        assert_eq!(classify_power(Some(5), None), None);
    }

    #[test]
    fn labels_use_client_wording() {
        assert_eq!(PowerLabel::Low.as_str(), "baixo");
        assert_eq!(PowerLabel::Medium.as_str(), "médio");
        assert_eq!(PowerLabel::Max.as_str(), "máximo");
    }
}
