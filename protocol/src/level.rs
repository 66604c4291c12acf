use moyun_core::{
    Coord, DifficultyTier, GameKind, GridFillPayload, ItemId, ItemRole, MatrixDifferencePayload,
    PairItem, PairMatchingPayload, PresetMatrix, PuzzlePayload, SessionOptions, Theme,
    resolve_difficulty,
};
use serde::{Deserialize, Serialize};

use crate::*;

/// Game for a server `gameId`.
pub fn game_from_id(id: &str) -> Result<GameKind> {
    GameKind::from_wire_id(id).ok_or_else(|| ProtocolError::UnknownGame(id.to_owned()))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRequest {
    pub game_id: GameKind,
    pub difficulty: DifficultyTier,
    pub level: u32,
    pub openid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<Theme>,
    #[serde(default)]
    pub reset_progress: bool,
}

impl LevelRequest {
    /// Request for `level`, with the difficulty derived from the level bands.
    pub fn new(game_id: GameKind, level: u32, openid: impl Into<String>) -> Self {
        Self {
            game_id,
            difficulty: resolve_difficulty(level),
            level,
            openid: openid.into(),
            theme_id: None,
            reset_progress: false,
        }
    }

    /// Query string pairs as the server expects them.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("gameId", self.game_id.wire_id().to_owned()),
            ("difficulty", self.difficulty.to_string()),
            ("level", self.level.to_string()),
            ("openid", self.openid.clone()),
        ];
        if let Some(theme) = self.theme_id {
            query.push(("themeId", theme.id().to_owned()));
        }
        query.push((
            "resetProgress",
            if self.reset_progress { "1" } else { "0" }.to_owned(),
        ));
        query
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResponse {
    #[serde(default)]
    pub level_data: serde_json::Value,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub theme_id: Option<String>,
}

#[derive(Deserialize)]
struct WireCell {
    row: Coord,
    col: Coord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharDiffData {
    base: Option<String>,
    diff: Option<String>,
    matrix: Option<Vec<Vec<String>>>,
    diff_at: Option<WireCell>,
    diff_row: Option<Coord>,
    diff_col: Option<Coord>,
}

#[derive(Deserialize)]
struct WireItem {
    id: ItemId,
    text: String,
    #[serde(rename = "type")]
    role: ItemRole,
}

#[derive(Deserialize)]
struct PoetryData {
    items: Option<Vec<WireItem>>,
    pairs: Option<Vec<(ItemId, ItemId)>>,
}

impl LevelResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tier the server actually picked, if it reported one.
    pub fn tier(&self) -> Result<Option<DifficultyTier>> {
        self.difficulty
            .as_deref()
            .map(|name| {
                name.parse()
                    .map_err(|_| ProtocolError::UnknownDifficulty(name.to_owned()))
            })
            .transpose()
    }

    /// Server time limit; zero means none was configured.
    pub fn time_limit(&self) -> Option<u32> {
        self.time_limit.filter(|&secs| secs > 0)
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme_id.as_deref().and_then(Theme::from_id)
    }

    /// Session overrides carried by this response.
    pub fn session_options(&self, seed: Option<u64>) -> Result<SessionOptions> {
        Ok(SessionOptions {
            tier: self.tier()?,
            time_limit: self.time_limit(),
            seed,
            ..Default::default()
        })
    }

    /// Converts the level data into a typed payload; absent fields are errors.
    pub fn payload(&self, kind: GameKind) -> Result<PuzzlePayload> {
        let missing = |field: &'static str| ProtocolError::MissingField { game: kind, field };
        let level_data = || {
            if self.level_data.is_null() {
                Err(missing("levelData"))
            } else {
                Ok(self.level_data.clone())
            }
        };
        let payload = match kind {
            GameKind::GridFill => {
                if self.answer.is_empty() {
                    return Err(missing("answer"));
                }
                GridFillPayload {
                    target_word: self.answer.clone(),
                }
                .into()
            }
            GameKind::MatrixDifference => {
                let data: CharDiffData = serde_json::from_value(level_data()?)?;
                let base_glyph = data.base.ok_or_else(|| missing("base"))?;
                let variant_glyph = data.diff.ok_or_else(|| missing("diff"))?;
                let answer = match (data.diff_at, data.diff_row, data.diff_col) {
                    (Some(cell), _, _) => Some((cell.row, cell.col)),
                    (None, Some(row), Some(col)) => Some((row, col)),
                    _ => None,
                };
                let preset = match (data.matrix, answer) {
                    (Some(cells), Some(answer)) => Some(PresetMatrix { cells, answer }),
                    (Some(_), None) => {
                        log::warn!("Ignoring preset matrix without a diff position");
                        None
                    }
                    (None, _) => None,
                };
                MatrixDifferencePayload {
                    base_glyph,
                    variant_glyph,
                    preset,
                }
                .into()
            }
            GameKind::PairMatching => {
                let data: PoetryData = serde_json::from_value(level_data()?)?;
                let items = data.items.ok_or_else(|| missing("items"))?;
                let correct_pairs = data.pairs.ok_or_else(|| missing("pairs"))?;
                PairMatchingPayload {
                    items: items
                        .into_iter()
                        .map(|item| PairItem {
                            id: item.id,
                            text: item.text,
                            role: item.role,
                        })
                        .collect(),
                    correct_pairs,
                }
                .into()
            }
        };
        Ok(payload)
    }
}

/// Where level data comes from; implemented by hosts over their transport.
pub trait LevelSource {
    fn fetch_level(&mut self, request: &LevelRequest) -> Result<LevelResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fill_uses_answer() {
        let response =
            LevelResponse::from_json(r#"{"levelData": {}, "answer": "国泰民安", "difficulty": "easy", "timeLimit": 20}"#)
                .unwrap();

        assert_eq!(
            response.payload(GameKind::GridFill).unwrap(),
            PuzzlePayload::GridFill(GridFillPayload {
                target_word: "国泰民安".into()
            })
        );
        assert_eq!(response.tier().unwrap(), Some(DifficultyTier::Easy));
        assert_eq!(response.time_limit(), Some(20));
    }

    #[test]
    fn empty_answer_is_not_substituted() {
        let response = LevelResponse::from_json(r#"{"levelData": {}, "answer": ""}"#).unwrap();

        assert!(matches!(
            response.payload(GameKind::GridFill),
            Err(ProtocolError::MissingField { field: "answer", .. })
        ));
    }

    #[test]
    fn char_diff_reads_base_and_diff() {
        let response =
            LevelResponse::from_json(r#"{"levelData": {"base": "己", "diff": "已"}, "answer": ""}"#)
                .unwrap();

        let PuzzlePayload::MatrixDifference(payload) =
            response.payload(GameKind::MatrixDifference).unwrap()
        else {
            panic!("wrong payload kind");
        };
        assert_eq!(payload.base_glyph, "己");
        assert_eq!(payload.variant_glyph, "已");
        assert_eq!(payload.preset, None);
    }

    #[test]
    fn char_diff_accepts_preset_matrix() {
        let response = LevelResponse::from_json(
            r#"{"levelData": {"base": "日", "diff": "曰", "matrix": [["日", "曰"]], "diffRow": 0, "diffCol": 1}}"#,
        )
        .unwrap();

        let PuzzlePayload::MatrixDifference(payload) =
            response.payload(GameKind::MatrixDifference).unwrap()
        else {
            panic!("wrong payload kind");
        };
        assert_eq!(payload.preset.unwrap().answer, (0, 1));
    }

    #[test]
    fn char_diff_requires_diff_glyph() {
        let response =
            LevelResponse::from_json(r#"{"levelData": {"base": "己"}}"#).unwrap();

        assert!(matches!(
            response.payload(GameKind::MatrixDifference),
            Err(ProtocolError::MissingField { field: "diff", .. })
        ));
    }

    #[test]
    fn absent_level_data_is_a_missing_field() {
        let response = LevelResponse::from_json(r#"{"answer": ""}"#).unwrap();

        for kind in [GameKind::MatrixDifference, GameKind::PairMatching] {
            assert!(matches!(
                response.payload(kind),
                Err(ProtocolError::MissingField { field: "levelData", .. })
            ));
        }
    }

    #[test]
    fn poetry_items_and_pairs() {
        let response = LevelResponse::from_json(
            r#"{"levelData": {"items": [{"id": 1, "text": "床前明月光", "type": "upper"}, {"id": 2, "text": "疑是地上霜", "type": "lower"}], "pairs": [[1, 2]]}}"#,
        )
        .unwrap();

        let PuzzlePayload::PairMatching(payload) = response.payload(GameKind::PairMatching).unwrap()
        else {
            panic!("wrong payload kind");
        };
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[1].role, ItemRole::Lower);
        assert_eq!(payload.correct_pairs, vec![(1, 2)]);
    }

    #[test]
    fn unknown_difficulty_is_reported() {
        let response = LevelResponse::from_json(r#"{"difficulty": "insane"}"#).unwrap();

        assert!(matches!(
            response.tier(),
            Err(ProtocolError::UnknownDifficulty(name)) if name == "insane"
        ));
        assert!(response.session_options(None).is_err());

        let response = LevelResponse::from_json(r#"{"difficulty": "hard"}"#).unwrap();
        let options = response.session_options(None).unwrap();
        assert_eq!(options.seed, None);
        assert_eq!(response.session_options(Some(5)).unwrap().seed, Some(5));
    }

    #[test]
    fn game_ids_are_wire_ids_only() {
        assert_eq!(game_from_id("charDiff").unwrap(), GameKind::MatrixDifference);
        assert!(matches!(
            game_from_id("matrix-difference"),
            Err(ProtocolError::UnknownGame(id)) if id == "matrix-difference"
        ));
    }

    #[test]
    fn zero_time_limit_means_table_default() {
        let response = LevelResponse::from_json(r#"{"timeLimit": 0}"#).unwrap();

        assert_eq!(response.time_limit(), None);
    }

    #[test]
    fn request_query_matches_server() {
        let mut request = LevelRequest::new(GameKind::PairMatching, 8, "guest");
        request.reset_progress = true;

        let query = request.query();

        assert_eq!(query[0], ("gameId", "poetryConnect".to_owned()));
        assert_eq!(query[1], ("difficulty", "hard".to_owned()));
        assert_eq!(query.last().unwrap(), &("resetProgress", "1".to_owned()));
        assert_eq!(
            serde_json::to_value(&request).unwrap()["gameId"],
            "poetryConnect"
        );
    }
}
