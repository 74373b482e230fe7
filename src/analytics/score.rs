//! Final score extraction.
//!
//! Scores arrive either as `{home, away}` pairs or `"H-A"` strings, optionally
//! nested under a `fulltime` key next to other periods. Everything is reduced
//! to a plain [`FinalScore`] here; nothing downstream looks at the raw value.

use mongodb::bson::Bson;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinalScore {
    pub home: i64,
    pub away: i64,
}

enum ScoreShape<'a> {
    Pair {
        home: Option<&'a Bson>,
        away: Option<&'a Bson>,
    },
    Dashed(&'a str),
    Unrecognised,
}

impl<'a> ScoreShape<'a> {
    fn classify(value: &'a Bson) -> Self {
        let fulltime = match value {
            Bson::Document(periods) => periods.get("fulltime").unwrap_or(value),
            other => other,
        };

        match fulltime {
            Bson::Document(pair) => ScoreShape::Pair {
                home: pair.get("home"),
                away: pair.get("away"),
            },
            Bson::String(text) => ScoreShape::Dashed(text),
            _ => ScoreShape::Unrecognised,
        }
    }
}

/// Total: malformed or missing scores come back as 0-0.
pub fn extract(value: Option<&Bson>) -> FinalScore {
    match value.map(ScoreShape::classify) {
        Some(ScoreShape::Pair { home, away }) => FinalScore {
            home: coerce_goals(home),
            away: coerce_goals(away),
        },
        Some(ScoreShape::Dashed(text)) => parse_dashed(text).unwrap_or_default(),
        Some(ScoreShape::Unrecognised) | None => FinalScore::default(),
    }
}

fn coerce_goals(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(f)) if f.is_finite() => f.trunc() as i64,
        Some(Bson::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Bson::Boolean(b)) => i64::from(*b),
        _ => 0,
    }
}

fn parse_dashed(text: &str) -> Option<FinalScore> {
    let mut halves = text.split('-');
    let home = halves.next()?.trim().parse().ok()?;
    let away = halves.next()?.trim().parse().ok()?;
    if halves.next().is_some() {
        return None;
    }
    Some(FinalScore { home, away })
}
