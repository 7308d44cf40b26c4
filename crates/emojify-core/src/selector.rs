//! Emoji selection.
//!
//! Maps the classifier's smiling and eye-open probabilities to one of the
//! eight emoji categories using fixed thresholds.

use tracing::debug;

use crate::domain::{DetectedFace, EmojiCategory};

/// Thresholds for emoji selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// A face is smiling when its smiling probability is strictly above this.
    pub smiling_threshold: f32,
    /// Eye-open probability threshold for the eye-closed rules.
    pub eye_open_threshold: f32,
}

impl SelectorConfig {
    /// Default smiling threshold.
    pub const DEFAULT_SMILING_THRESHOLD: f32 = 0.15;
    /// Default eye-open threshold.
    pub const DEFAULT_EYE_OPEN_THRESHOLD: f32 = 0.5;
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            smiling_threshold: Self::DEFAULT_SMILING_THRESHOLD,
            eye_open_threshold: Self::DEFAULT_EYE_OPEN_THRESHOLD,
        }
    }
}

/// Rule-based emoji selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiSelector {
    config: SelectorConfig,
}

impl EmojiSelector {
    /// Creates a selector with the given thresholds.
    #[must_use]
    pub const fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Picks the emoji for a detected face.
    #[must_use]
    pub fn select(&self, face: &DetectedFace) -> EmojiCategory {
        self.classify(
            face.smiling_probability,
            face.left_eye_open_probability,
            face.right_eye_open_probability,
        )
    }

    /// Picks the emoji for raw probabilities.
    ///
    /// The right-eye rule compares with `>` where the left-eye rule uses `<`,
    /// so a right eye counts as closed when its open probability is high.
    /// A value exactly at the threshold is never closed on either side.
    #[must_use]
    pub fn classify(
        &self,
        smiling_probability: f32,
        left_eye_open_probability: f32,
        right_eye_open_probability: f32,
    ) -> EmojiCategory {
        debug!(
            smiling_probability,
            left_eye_open_probability, right_eye_open_probability, "Selecting emoji"
        );

        let smiling = smiling_probability > self.config.smiling_threshold;
        let left_closed = left_eye_open_probability < self.config.eye_open_threshold;
        let right_closed = right_eye_open_probability > self.config.eye_open_threshold;

        let category = match (smiling, left_closed, right_closed) {
            (true, false, false) => EmojiCategory::Smile,
            (true, true, true) => EmojiCategory::ClosedEyeSmile,
            (true, false, true) => EmojiCategory::RightWink,
            (true, true, false) => EmojiCategory::LeftWink,
            (false, false, false) => EmojiCategory::Frown,
            (false, true, true) => EmojiCategory::ClosedEyeFrown,
            (false, false, true) => EmojiCategory::RightWinkFrown,
            (false, true, false) => EmojiCategory::LeftWinkFrown,
        };

        debug!(%category, "Selected emoji");
        category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoundingBox;

    fn classify(smiling: f32, left: f32, right: f32) -> EmojiCategory {
        EmojiSelector::default().classify(smiling, left, right)
    }

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert!((config.smiling_threshold - 0.15).abs() < f32::EPSILON);
        assert!((config.eye_open_threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_decision_table() {
        // (smiling, left open, right open): left closed below 0.5, right "closed" above 0.5
        let cases = [
            ((0.9, 0.9, 0.1), EmojiCategory::Smile),
            ((0.9, 0.1, 0.9), EmojiCategory::ClosedEyeSmile),
            ((0.9, 0.9, 0.9), EmojiCategory::RightWink),
            ((0.9, 0.1, 0.1), EmojiCategory::LeftWink),
            ((0.05, 0.9, 0.1), EmojiCategory::Frown),
            ((0.05, 0.1, 0.9), EmojiCategory::ClosedEyeFrown),
            ((0.05, 0.9, 0.9), EmojiCategory::RightWinkFrown),
            ((0.05, 0.1, 0.1), EmojiCategory::LeftWinkFrown),
        ];

        for ((smiling, left, right), expected) in cases {
            assert_eq!(
                classify(smiling, left, right),
                expected,
                "({smiling}, {left}, {right})"
            );
        }
    }

    #[test]
    fn test_smiling_threshold_is_strict() {
        assert_eq!(classify(0.15, 0.9, 0.1), EmojiCategory::Frown);
        assert_eq!(classify(0.150_001, 0.9, 0.1), EmojiCategory::Smile);
    }

    #[test]
    fn test_eye_thresholds_are_strict() {
        // Exactly 0.5 leaves both eyes "open" under either comparator.
        assert_eq!(classify(0.9, 0.5, 0.5), EmojiCategory::Smile);
        assert_eq!(classify(0.0, 0.5, 0.5), EmojiCategory::Frown);
    }

    #[test]
    fn test_right_eye_rule_is_inverted() {
        // A wide-open right eye counts as closed.
        assert_eq!(classify(0.9, 0.9, 1.0), EmojiCategory::RightWink);
        // A fully closed right eye counts as open.
        assert_eq!(classify(0.9, 0.9, 0.0), EmojiCategory::Smile);
    }

    #[test]
    fn test_selection_is_total() {
        let steps: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
        for &s in &steps {
            for &l in &steps {
                for &r in &steps {
                    let category = classify(s, l, r);
                    assert!(EmojiCategory::ALL.contains(&category));
                }
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let selector = EmojiSelector::new(SelectorConfig {
            smiling_threshold: 0.6,
            eye_open_threshold: 0.3,
        });
        assert_eq!(selector.classify(0.5, 0.4, 0.2), EmojiCategory::Frown);
        assert_eq!(selector.classify(0.7, 0.2, 0.4), EmojiCategory::ClosedEyeSmile);
    }

    #[test]
    fn test_select_uses_face_probabilities() {
        let face = DetectedFace {
            bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            smiling_probability: 0.05,
            left_eye_open_probability: 0.1,
            right_eye_open_probability: 0.9,
        };
        assert_eq!(
            EmojiSelector::default().select(&face),
            EmojiCategory::ClosedEyeFrown
        );
    }
}
