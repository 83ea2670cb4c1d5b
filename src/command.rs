use std::str::FromStr;

use crate::models::{LeaderboardError, Result};
use crate::window::Period;

/// One leaderboard category. `All` expands to every concrete family in
/// [`Family::CONCRETE`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    DamageDealt,
    DamageTaken,
    Kills,
    Deaths,
    Snipers,
    Attackers,
    Winners,
    Losers,
    Accuracy,
    Best,
    All,
}

impl Family {
    /// Fixed emission order for an `all` run. Output follows this order
    /// every time, regardless of which computation finishes first.
    pub const CONCRETE: [Family; 10] = [
        Family::Accuracy,
        Family::DamageDealt,
        Family::DamageTaken,
        Family::Kills,
        Family::Deaths,
        Family::Winners,
        Family::Losers,
        Family::Snipers,
        Family::Attackers,
        Family::Best,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Family::DamageDealt => "damage_dealt",
            Family::DamageTaken => "damage_taken",
            Family::Kills => "kills",
            Family::Deaths => "deaths",
            Family::Snipers => "snipers",
            Family::Attackers => "attackers",
            Family::Winners => "winners",
            Family::Losers => "losers",
            Family::Accuracy => "accuracy",
            Family::Best => "best",
            Family::All => "all",
        }
    }
}

impl FromStr for Family {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "damage_dealt" => Ok(Family::DamageDealt),
            "damage_taken" => Ok(Family::DamageTaken),
            "kills" => Ok(Family::Kills),
            "deaths" => Ok(Family::Deaths),
            "snipers" => Ok(Family::Snipers),
            "attackers" => Ok(Family::Attackers),
            "winners" => Ok(Family::Winners),
            "losers" => Ok(Family::Losers),
            "accuracy" => Ok(Family::Accuracy),
            "best" => Ok(Family::Best),
            "all" => Ok(Family::All),
            other => Err(LeaderboardError::InvalidFamily(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRequest {
    pub family: Family,
    pub period: Period,
}

/// Parses a leaderboard command: a family tag plus an optional period tag,
/// with or without a leading `!lb`. Both tags are validated here, before
/// the core is invoked. The period defaults to `day`.
pub fn parse_request(text: &str) -> Result<LeaderboardRequest> {
    let mut tokens = text.split_whitespace().peekable();
    if tokens.peek().is_some_and(|t| t.eq_ignore_ascii_case("!lb")) {
        tokens.next();
    }

    let family = tokens
        .next()
        .ok_or_else(|| LeaderboardError::InvalidFamily(String::new()))?
        .parse::<Family>()?;
    let period = match tokens.next() {
        Some(tag) => tag.parse::<Period>()?,
        None => Period::Day,
    };

    Ok(LeaderboardRequest { family, period })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_family_and_period() {
        let request = parse_request("kills week").unwrap();
        assert_eq!(request.family, Family::Kills);
        assert_eq!(request.period, Period::Week);
    }

    #[test]
    fn period_defaults_to_day() {
        assert_eq!(parse_request("best").unwrap().period, Period::Day);
    }

    #[test]
    fn accepts_a_leading_command_token() {
        let request = parse_request("!lb accuracy month").unwrap();
        assert_eq!(request.family, Family::Accuracy);
        assert_eq!(request.period, Period::Month);
    }

    #[test]
    fn unknown_tags_are_rejected_before_any_work() {
        assert!(matches!(
            parse_request("flagcaps"),
            Err(LeaderboardError::InvalidFamily(_))
        ));
        assert!(matches!(
            parse_request("kills year"),
            Err(LeaderboardError::InvalidPeriod(_))
        ));
        assert!(matches!(
            parse_request("  "),
            Err(LeaderboardError::InvalidFamily(_))
        ));
    }

    #[test]
    fn every_concrete_family_tag_round_trips() {
        for family in Family::CONCRETE {
            assert_eq!(family.tag().parse::<Family>().unwrap(), family);
        }
    }
}
