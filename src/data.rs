use serde::Deserialize;

use crate::error::PageError;

const GALLERY_JSON: &str = include_str!("../assets/data/gallery.json");
const STANDINGS_JSON: &str = include_str!("../assets/data/standings.json");

pub const FORM_LENGTH: usize = 5;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct GalleryCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub video_id: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn letter(self) -> &'static str {
        match self {
            FormResult::Win => "W",
            FormResult::Draw => "D",
            FormResult::Loss => "L",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            FormResult::Win => "form-win",
            FormResult::Draw => "form-draw",
            FormResult::Loss => "form-loss",
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Champions,
    Europa,
    Conference,
    #[default]
    None,
}

impl Zone {
    /// Accent colour of the row's left edge.
    pub fn accent(self) -> &'static str {
        match self {
            Zone::Champions => "#22c55e",
            Zone::Europa => "#3b82f6",
            Zone::Conference => "#eab308",
            Zone::None => "transparent",
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            Zone::Champions => Some("Champions League"),
            Zone::Europa => Some("Europa League"),
            Zone::Conference => Some("Conference League"),
            Zone::None => None,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StandingsRow {
    pub pos: u32,
    pub club: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    pub form: [FormResult; FORM_LENGTH],
    #[serde(default)]
    pub zone: Zone,
}

impl StandingsRow {
    pub fn derived_goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    pub fn signed_goal_difference(&self) -> String {
        if self.goal_difference > 0 {
            format!("+{}", self.goal_difference)
        } else {
            self.goal_difference.to_string()
        }
    }
}

fn parse_gallery(raw: &str) -> Result<Vec<GalleryCard>, PageError> {
    Ok(serde_json::from_str(raw)?)
}

fn parse_standings(raw: &str) -> Result<Vec<StandingsRow>, PageError> {
    Ok(serde_json::from_str(raw)?)
}

/// Gallery cards in display order. Empty if the embedded file is malformed.
pub fn gallery_cards() -> Vec<GalleryCard> {
    parse_gallery(GALLERY_JSON).unwrap_or_else(|e| {
        log::error!("Failed to decode gallery cards: {}", e);
        Vec::new()
    })
}

pub fn standings() -> Vec<StandingsRow> {
    parse_standings(STANDINGS_JSON).unwrap_or_else(|e| {
        log::error!("Failed to decode standings: {}", e);
        Vec::new()
    })
}

/// Rows whose stored goal difference disagrees with goals for minus against.
pub fn standings_inconsistencies(rows: &[StandingsRow]) -> Vec<&StandingsRow> {
    rows.iter()
        .filter(|row| row.goal_difference != row.derived_goal_difference())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_gallery_decodes_in_display_order() {
        let cards = parse_gallery(GALLERY_JSON).unwrap();
        assert_eq!(cards.len(), 5);
        let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(cards[0].video_id, "sAhOZLCMR7w");
    }

    #[test]
    fn embedded_standings_have_consistent_goal_difference() {
        let rows = parse_standings(STANDINGS_JSON).unwrap();
        assert_eq!(rows.len(), 7);
        assert!(standings_inconsistencies(&rows).is_empty());
    }

    #[test]
    fn embedded_standings_add_up() {
        for row in parse_standings(STANDINGS_JSON).unwrap() {
            assert_eq!(row.won + row.drawn + row.lost, row.played, "{}", row.club);
            assert_eq!(row.won * 3 + row.drawn, row.points, "{}", row.club);
        }
    }

    #[test]
    fn club_names_keep_their_diacritics() {
        let rows = parse_standings(STANDINGS_JSON).unwrap();
        assert_eq!(rows[2].club, "Atlético Madrid");
    }

    #[test]
    fn mismatched_goal_difference_is_flagged() {
        let raw = r#"[{ "pos": 1, "club": "Test FC", "played": 1, "won": 1, "drawn": 0, "lost": 0,
            "goals_for": 3, "goals_against": 1, "goal_difference": 5, "points": 3,
            "form": ["W", "D", "L", "W", "W"] }]"#;
        let rows = parse_standings(raw).unwrap();
        let flagged = standings_inconsistencies(&rows);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].derived_goal_difference(), 2);
        assert_eq!(rows[0].zone, Zone::None);
    }

    #[test]
    fn form_must_have_five_results() {
        let raw = r#"[{ "pos": 1, "club": "Short", "played": 0, "won": 0, "drawn": 0, "lost": 0,
            "goals_for": 0, "goals_against": 0, "goal_difference": 0, "points": 0,
            "form": ["W", "W"], "zone": "europa" }]"#;
        assert!(matches!(parse_standings(raw), Err(PageError::Data(_))));
    }

    #[test]
    fn goal_difference_carries_sign() {
        let mut row = parse_standings(STANDINGS_JSON).unwrap().remove(0);
        assert_eq!(row.signed_goal_difference(), "+63");
        row.goal_difference = 0;
        assert_eq!(row.signed_goal_difference(), "0");
        row.goal_difference = -4;
        assert_eq!(row.signed_goal_difference(), "-4");
    }
}
