use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strokes relative to par. Negative is under par.
pub fn relative_to_par(strokes: u32, par: u8) -> i32 {
    strokes as i32 - par as i32
}

/// Conventional name for a finished hole.
///
/// A one-stroke finish is always a hole in one, whatever the par.
pub fn score_name(strokes: u32, par: u8) -> String {
    if strokes == 1 {
        return "Hole in one".to_string();
    }
    match relative_to_par(strokes, par) {
        i32::MIN..=-3 => "Albatross".to_string(),
        -2 => "Eagle".to_string(),
        -1 => "Birdie".to_string(),
        0 => "Par".to_string(),
        1 => "Bogey".to_string(),
        2 => "Double bogey".to_string(),
        n => format!("+{n}"),
    }
}

/// Fewest strokes ever taken on a hole, if it has been finished at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore(Option<u32>);

impl BestScore {
    pub const NONE: Self = Self(None);

    pub fn new(strokes: u32) -> Self {
        Self(Some(strokes))
    }

    pub fn get(&self) -> Option<u32> {
        self.0
    }

    /// Record a finished hole. Returns true if it set a new best.
    pub fn record(&mut self, strokes: u32) -> bool {
        match self.0 {
            Some(best) if best <= strokes => false,
            _ => {
                self.0 = Some(strokes);
                true
            },
        }
    }
}

impl fmt::Display for BestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "none"),
        }
    }
}

/// Parse failure for a stored best score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBestScoreError(String);

impl fmt::Display for ParseBestScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a stroke count or \"none\", got {:?}", self.0)
    }
}

impl std::error::Error for ParseBestScoreError {}

impl FromStr for BestScore {
    type Err = ParseBestScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") || s == "-" {
            return Ok(Self::NONE);
        }
        s.parse::<u32>()
            .map(Self::new)
            .map_err(|_| ParseBestScoreError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_scores() {
        assert_eq!(relative_to_par(2, 3), -1);
        assert_eq!(relative_to_par(3, 3), 0);
        assert_eq!(relative_to_par(7, 3), 4);
    }

    #[test]
    fn names_around_par() {
        assert_eq!(score_name(1, 3), "Hole in one");
        assert_eq!(score_name(1, 2), "Hole in one");
        assert_eq!(score_name(2, 4), "Eagle");
        assert_eq!(score_name(2, 3), "Birdie");
        assert_eq!(score_name(3, 3), "Par");
        assert_eq!(score_name(4, 3), "Bogey");
        assert_eq!(score_name(5, 3), "Double bogey");
        assert_eq!(score_name(7, 3), "+4");
    }

    #[test]
    fn deep_under_par_on_long_hole() {
        assert_eq!(score_name(2, 5), "Albatross");
    }

    #[test]
    fn best_score_keeps_minimum() {
        let mut best = BestScore::NONE;
        assert!(best.record(5));
        assert!(best.record(3));
        assert!(!best.record(4));
        assert!(!best.record(3));
        assert_eq!(best.get(), Some(3));
    }

    #[test]
    fn best_score_parses_sentinel_and_numbers() {
        assert_eq!("none".parse::<BestScore>().unwrap(), BestScore::NONE);
        assert_eq!("-".parse::<BestScore>().unwrap(), BestScore::NONE);
        assert_eq!(" 4\n".parse::<BestScore>().unwrap(), BestScore::new(4));
        assert!("four".parse::<BestScore>().is_err());
        assert!("-3".parse::<BestScore>().is_err());
    }

    #[test]
    fn best_score_display_roundtrips() {
        for best in [BestScore::NONE, BestScore::new(2)] {
            assert_eq!(best.to_string().parse::<BestScore>().unwrap(), best);
        }
    }
}
