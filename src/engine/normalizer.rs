//! Odds normalization
//!
//! Converts a bookmaker's two-sided decimal prices into margin-free win
//! probabilities, a predicted side and a confidence percentage.
//!
//! ```text
//! p_side  = 1 / odds            (0 when odds <= 1.0 or not finite)
//! n_side  = p_side / (p_home + p_away)
//! pick    = home if n_home >= n_away else away
//! conf    = round(max(n_home, n_away) * 100)
//! ```

use crate::domain::Side;

/// One bookmaker's two-sided decimal price for a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketQuote {
    pub home_odds: f64,
    pub away_odds: f64,
}

impl MarketQuote {
    pub fn new(home_odds: f64, away_odds: f64) -> Self {
        Self {
            home_odds,
            away_odds,
        }
    }

    pub fn normalize(&self) -> Prediction {
        normalize(self.home_odds, self.away_odds)
    }
}

/// Margin-free probabilities, each in [0, 1], summing to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedProbabilities {
    pub home: f64,
    pub away: f64,
}

impl NormalizedProbabilities {
    pub fn favourite(&self) -> Side {
        // Home takes ties.
        if self.home >= self.away {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn max(&self) -> f64 {
        self.home.max(self.away)
    }
}

/// Output of the normalizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// None when neither side is priced
    pub winner: Option<Side>,
    /// Integer percentage in [50, 100]; None when neither side is priced
    pub confidence: Option<u8>,
    pub probabilities: Option<NormalizedProbabilities>,
}

impl Prediction {
    fn unpriced() -> Self {
        Self {
            winner: None,
            confidence: None,
            probabilities: None,
        }
    }
}

/// Whether a decimal price carries a real payout.
pub fn is_priced(odds: f64) -> bool {
    odds.is_finite() && odds > 1.0
}

/// Raw implied probability of a decimal price, 0 for unpriced values.
pub fn implied_probability(odds: f64) -> f64 {
    if is_priced(odds) {
        1.0 / odds
    } else {
        0.0
    }
}

/// Bookmaker margin (overround) of a two-way market.
///
/// Returns None unless both sides are priced.
pub fn overround(home_odds: f64, away_odds: f64) -> Option<f64> {
    if !is_priced(home_odds) || !is_priced(away_odds) {
        return None;
    }
    Some(implied_probability(home_odds) + implied_probability(away_odds) - 1.0)
}

/// De-vigorize a two-way market and pick a winner.
///
/// Never panics and never divides by zero: when neither side is priced the
/// result carries no winner and no confidence.
pub fn normalize(home_odds: f64, away_odds: f64) -> Prediction {
    let p_home = implied_probability(home_odds);
    let p_away = implied_probability(away_odds);
    let total = p_home + p_away;

    if total <= 0.0 {
        return Prediction::unpriced();
    }

    let probabilities = NormalizedProbabilities {
        home: p_home / total,
        away: p_away / total,
    };
    let confidence = (probabilities.max() * 100.0).round().clamp(50.0, 100.0) as u8;

    Prediction {
        winner: Some(probabilities.favourite()),
        confidence: Some(confidence),
        probabilities: Some(probabilities),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_quote() {
        // 1/1.75 = 57.14%, 1/2.15 = 46.51%, normalized 55.13% / 44.87%
        let pred = normalize(1.75, 2.15);
        let probs = pred.probabilities.unwrap();

        assert!((probs.home - 0.5513).abs() < 1e-3);
        assert!((probs.away - 0.4487).abs() < 1e-3);
        assert_eq!(pred.winner, Some(Side::Home));
        assert_eq!(pred.confidence, Some(55));
    }

    #[test]
    fn test_symmetric_quote_goes_home() {
        let pred = normalize(2.0, 2.0);
        let probs = pred.probabilities.unwrap();

        assert_eq!(probs.home, 0.5);
        assert_eq!(probs.away, 0.5);
        assert_eq!(pred.winner, Some(Side::Home));
        assert_eq!(pred.confidence, Some(50));
    }

    #[test]
    fn test_away_favourite() {
        let pred = normalize(2.20, 1.68);
        assert_eq!(pred.winner, Some(Side::Away));
        assert_eq!(pred.confidence, Some(57));
    }

    #[test]
    fn test_unpriced_quotes_have_no_prediction() {
        for (h, a) in [
            (0.0, 0.0),
            (1.0, 1.0),
            (0.5, 1.0),
            (-3.0, 0.0),
            (f64::NAN, 1.0),
            (f64::INFINITY, 0.0),
        ] {
            let pred = normalize(h, a);
            assert_eq!(pred.winner, None, "odds ({h}, {a})");
            assert_eq!(pred.confidence, None, "odds ({h}, {a})");
            assert!(pred.probabilities.is_none());
        }
    }

    #[test]
    fn test_one_sided_quote_is_certain() {
        let pred = normalize(0.0, 3.5);
        assert_eq!(pred.winner, Some(Side::Away));
        assert_eq!(pred.confidence, Some(100));

        let pred = normalize(1.9, 1.0);
        assert_eq!(pred.winner, Some(Side::Home));
        assert_eq!(pred.confidence, Some(100));
    }

    #[test]
    fn test_priced_quotes_stay_in_bounds() {
        let prices = [1.01, 1.05, 1.25, 1.5, 1.75, 1.91, 2.0, 2.15, 3.4, 7.5, 15.0, 101.0];
        for &h in &prices {
            for &a in &prices {
                let pred = normalize(h, a);
                let conf = pred.confidence.unwrap();
                assert!((50..=100).contains(&conf), "odds ({h}, {a}) gave {conf}");
                assert!(pred.winner.is_some());

                let probs = pred.probabilities.unwrap();
                assert!((probs.home + probs.away - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_normalize_is_pure() {
        let first = normalize(1.65, 2.35);
        let second = normalize(1.65, 2.35);
        assert_eq!(first, second);
        assert_eq!(MarketQuote::new(1.65, 2.35).normalize(), first);
    }

    #[test]
    fn test_overround() {
        let margin = overround(1.91, 1.91).unwrap();
        assert!((margin - 0.0471).abs() < 1e-3);
        assert!(overround(1.91, 0.0).is_none());
    }
}
