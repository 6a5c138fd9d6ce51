//! Randomized encouragement shown around the interview.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::models::AnswerRecord;
use crate::domain::ports::Commentary;

pub const TIPS: [&str; 5] = [
    "Remember to structure your answers clearly.",
    "Take a moment to think before answering.",
    "Good progress! Keep it up.",
    "Be concise and stay confident.",
    "Focus on the key Excel functions asked.",
];

pub const STRENGTH_NOTES: [&str; 5] = [
    "Excellent clarity in answers.",
    "Strong logical structuring.",
    "Good attention to detail.",
    "Confident and concise.",
    "Demonstrates consistent knowledge.",
];

pub const WEAKNESS_NOTES: [&str; 5] = [
    "Needs to improve time management.",
    "Sometimes misses minor details.",
    "Could provide more examples.",
    "Needs more practice with advanced formulas.",
    "Occasionally vague in explanation.",
];

/// Intermittent tips and per-answer notes.
///
/// A tip appears when the answered count is a multiple of a divisor drawn
/// from 2..=4 on every call.
pub struct MotivationalTips {
    rng: Mutex<StdRng>,
}

impl Default for MotivationalTips {
    fn default() -> Self {
        Self::new()
    }
}

impl MotivationalTips {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Commentary for MotivationalTips {
    fn tip(&self, answered: usize) -> Option<String> {
        if answered == 0 {
            return None;
        }
        self.with_rng(|rng| {
            let divisor = rng.gen_range(2..=4);
            if answered % divisor == 0 {
                TIPS.choose(rng).map(|tip| (*tip).to_string())
            } else {
                None
            }
        })
    }

    fn answer_note(&self, _record: &AnswerRecord) -> Option<String> {
        self.with_rng(|rng| {
            let strength = STRENGTH_NOTES.choose(rng)?;
            let weakness = WEAKNESS_NOTES.choose(rng)?;
            Some(format!("Strength - {strength} | Weakness - {weakness}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EvaluationResult;

    #[test]
    fn test_no_tip_before_first_answer() {
        let tips = MotivationalTips::seeded(1);
        assert_eq!(tips.tip(0), None);
    }

    #[test]
    fn test_tips_come_from_the_list() {
        let tips = MotivationalTips::seeded(42);
        let shown: Vec<String> = (1..=200).filter_map(|n| tips.tip(n)).collect();

        assert!(!shown.is_empty());
        assert!(shown.iter().all(|tip| TIPS.contains(&tip.as_str())));
    }

    #[test]
    fn test_prime_counts_above_three_never_get_tips() {
        let tips = MotivationalTips::seeded(3);
        for answered in [5, 7, 11, 13, 17, 19, 23] {
            assert_eq!(tips.tip(answered), None);
        }
    }

    #[test]
    fn test_answer_note_format() {
        let tips = MotivationalTips::seeded(9);
        let record = AnswerRecord::new(1, "Q", "A", EvaluationResult::new(3, "ok"));
        let note = tips.answer_note(&record).unwrap();

        let (strength, weakness) = note
            .strip_prefix("Strength - ")
            .and_then(|rest| rest.split_once(" | Weakness - "))
            .unwrap();
        assert!(STRENGTH_NOTES.contains(&strength));
        assert!(WEAKNESS_NOTES.contains(&weakness));
    }
}
