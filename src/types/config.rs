use crate::error::ScoringError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NET_MAX_OVER_PAR: i32 = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub scoring: Option<ScoringSection>,
    pub leaderboard: Option<LeaderboardSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSection {
    pub net_max_over_par: Option<i32>,
    pub playing_handicap_basis: Option<PlayingHandicapBasis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardSection {
    pub unscored: Option<UnscoredPolicy>,
}

/// Which players a match's playing handicaps are re-based against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayingHandicapBasis {
    /// Lowest course handicap among the players of the match.
    #[default]
    Match,
    /// Lowest course handicap among every player in the group.
    Group,
}

/// Where players without a single posted score go on the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnscoredPolicy {
    #[default]
    Last,
    Exclude,
}

/// Resolved, explicit inputs threaded through every computation of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub net_max_over_par: i32,
    pub playing_handicap_basis: PlayingHandicapBasis,
    pub unscored: UnscoredPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            net_max_over_par: DEFAULT_NET_MAX_OVER_PAR,
            playing_handicap_basis: PlayingHandicapBasis::default(),
            unscored: UnscoredPolicy::default(),
        }
    }
}

impl ScoringConfig {
    pub fn net_max_over_par(&self) -> Option<i32> {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.net_max_over_par)
    }

    pub fn playing_handicap_basis(&self) -> PlayingHandicapBasis {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.playing_handicap_basis)
            .unwrap_or_default()
    }

    pub fn unscored(&self) -> UnscoredPolicy {
        self.leaderboard
            .as_ref()
            .and_then(|leaderboard| leaderboard.unscored)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if let Some(cap) = self.net_max_over_par() {
            if cap < 0 {
                return Err(ScoringError::ConfigParse(format!(
                    "scoring.net_max_over_par must be 0 or greater (found {cap})"
                )));
            }
        }
        Ok(())
    }
}

impl Settings {
    /// Cap precedence: explicit override, then the event's stored setting,
    /// then the config file, then the default of 3.
    pub fn resolve(
        config: Option<&ScoringConfig>,
        event_cap: Option<i32>,
        override_cap: Option<i32>,
    ) -> Self {
        let config_cap = config.and_then(ScoringConfig::net_max_over_par);
        Self {
            net_max_over_par: override_cap
                .or(event_cap)
                .or(config_cap)
                .unwrap_or(DEFAULT_NET_MAX_OVER_PAR),
            playing_handicap_basis: config
                .map(ScoringConfig::playing_handicap_basis)
                .unwrap_or_default(),
            unscored: config.map(ScoringConfig::unscored).unwrap_or_default(),
        }
    }

    pub fn with_net_max_over_par(mut self, net_max_over_par: i32) -> Self {
        self.net_max_over_par = net_max_over_par;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let cfg: ScoringConfig = toml::from_str("").expect("empty config should parse");
        assert!(cfg.net_max_over_par().is_none());
        assert_eq!(cfg.playing_handicap_basis(), PlayingHandicapBasis::Match);
        assert_eq!(cfg.unscored(), UnscoredPolicy::Last);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[scoring]
net_max_over_par = 2
playing_handicap_basis = "group"

[leaderboard]
unscored = "exclude"
"#;
        let cfg: ScoringConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.net_max_over_par(), Some(2));
        assert_eq!(cfg.playing_handicap_basis(), PlayingHandicapBasis::Group);
        assert_eq!(cfg.unscored(), UnscoredPolicy::Exclude);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_basis_fails_to_parse() {
        let toml_str = r#"
[scoring]
playing_handicap_basis = "field"
"#;
        assert!(toml::from_str::<ScoringConfig>(toml_str).is_err());
    }

    #[test]
    fn negative_cap_is_rejected() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[scoring]
net_max_over_par = -1
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("negative cap should fail");
        assert!(err.to_string().contains("net_max_over_par"));
    }

    #[test]
    fn settings_default_cap_is_three() {
        assert_eq!(Settings::resolve(None, None, None).net_max_over_par, 3);
    }

    #[test]
    fn settings_cap_precedence() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[scoring]
net_max_over_par = 4
"#,
        )
        .expect("config should parse");
        assert_eq!(Settings::resolve(Some(&cfg), None, None).net_max_over_par, 4);
        assert_eq!(
            Settings::resolve(Some(&cfg), Some(5), None).net_max_over_par,
            5
        );
        assert_eq!(
            Settings::resolve(Some(&cfg), Some(5), Some(1)).net_max_over_par,
            1
        );
    }
}
