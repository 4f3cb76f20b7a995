//! Saved-game document.
//!
//! Plain serde types mirroring the JSON layout, plus the conversions to and
//! from the domain types. Conversions from the document validate every
//! value; nothing falls back to a default.

use super::error::PersistenceError;
use crate::domain::chess::square_index;
use crate::domain::{
    Answer, ChessMove, MainAnnouncement, MoveSet, Question, QuestionKind, Scoresheet, SpecialCase,
    SpecialCaseKind,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::Color;

pub const FORMAT_VERSION: &str = "1.2.0";
pub const GAME_TYPE: &str = "BerkeleyGame";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameDocument {
    pub version: String,
    pub game_type: String,
    pub game_state: GameStateDoc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameStateDoc {
    pub any_rule: bool,
    pub board_fen: String,
    pub must_use_pawns: bool,
    pub game_over: bool,
    pub white_scoresheet: ScoresheetDoc,
    pub black_scoresheet: ScoresheetDoc,
    /// Written only when the game does not use the default limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversible_move_limit: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorName {
    White,
    Black,
}

impl From<Color> for ColorName {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ColorName::White,
            Color::Black => ColorName::Black,
        }
    }
}

impl From<ColorName> for Color {
    fn from(name: ColorName) -> Self {
        match name {
            ColorName::White => Color::White,
            ColorName::Black => Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Common,
    AskAny,
}

impl From<QuestionKind> for QuestionType {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Common => QuestionType::Common,
            QuestionKind::AskAny => QuestionType::AskAny,
        }
    }
}

impl From<QuestionType> for QuestionKind {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Common => QuestionKind::Common,
            QuestionType::AskAny => QuestionKind::AskAny,
        }
    }
}

// `deserialize_with = "Option::deserialize"` keeps a key required even
// though its value may be null

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionDoc {
    pub question_type: QuestionType,
    #[serde(deserialize_with = "Option::deserialize")]
    #[schemars(with = "Option<String>")]
    pub chess_move: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerDoc {
    pub main_announcement: MainAnnouncement,
    #[serde(deserialize_with = "Option::deserialize")]
    #[schemars(with = "Option<i64>")]
    pub capture_at_square: Option<i64>,
    pub special_announcement: SpecialCaseKind,
    #[serde(deserialize_with = "Option::deserialize")]
    #[schemars(with = "Option<SpecialCaseKind>")]
    pub check_1: Option<SpecialCaseKind>,
    #[serde(deserialize_with = "Option::deserialize")]
    #[schemars(with = "Option<SpecialCaseKind>")]
    pub check_2: Option<SpecialCaseKind>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoresheetDoc {
    pub color: ColorName,
    pub moves_own: Vec<Vec<(QuestionDoc, AnswerDoc)>>,
    pub moves_opponent: Vec<Vec<(QuestionType, AnswerDoc)>>,
    pub last_move_number: usize,
}

impl From<Question> for QuestionDoc {
    fn from(question: Question) -> Self {
        QuestionDoc {
            question_type: question.kind().into(),
            chess_move: question.chess_move().map(|m| m.to_string()),
        }
    }
}

impl TryFrom<&QuestionDoc> for Question {
    type Error = PersistenceError;

    fn try_from(doc: &QuestionDoc) -> Result<Self, Self::Error> {
        match (doc.question_type, doc.chess_move.as_deref()) {
            (QuestionType::Common, Some(uci)) => {
                let m: ChessMove = uci.parse().map_err(|err| {
                    PersistenceError::malformed(format!("Invalid UCI move string `{uci}`: {err}"))
                })?;
                Ok(Question::Common(m))
            }
            (QuestionType::AskAny, None) => Ok(Question::AskAny),
            (QuestionType::Common, None) => Err(PersistenceError::malformed("COMMON question without a move")),
            (QuestionType::AskAny, Some(uci)) => Err(PersistenceError::malformed(format!(
                "ASK_ANY question carries a move `{uci}`"
            ))),
        }
    }
}

impl From<Answer> for AnswerDoc {
    fn from(answer: Answer) -> Self {
        let special = answer.special();
        let (check_1, check_2) = match special {
            SpecialCase::DoubleCheck(first, second) => (Some(first.special_kind()), Some(second.special_kind())),
            _ => (None, None),
        };
        AnswerDoc {
            main_announcement: answer.main(),
            capture_at_square: answer.capture_square().map(|sq| i64::from(square_index(sq))),
            special_announcement: special.kind(),
            check_1,
            check_2,
        }
    }
}

impl TryFrom<&AnswerDoc> for Answer {
    type Error = PersistenceError;

    fn try_from(doc: &AnswerDoc) -> Result<Self, Self::Error> {
        Answer::from_parts(
            doc.main_announcement,
            doc.capture_at_square,
            doc.special_announcement,
            doc.check_1,
            doc.check_2,
        )
        .map_err(|err| PersistenceError::malformed(format!("Invalid answer: {err}")))
    }
}

impl From<&Scoresheet> for ScoresheetDoc {
    fn from(sheet: &Scoresheet) -> Self {
        ScoresheetDoc {
            color: sheet.color().into(),
            moves_own: sheet
                .moves_own()
                .iter()
                .map(|set| set.iter().map(|&(q, a)| (q.into(), a.into())).collect())
                .collect(),
            moves_opponent: sheet
                .moves_opponent()
                .iter()
                .map(|set| set.iter().map(|&(k, a)| (k.into(), a.into())).collect())
                .collect(),
            last_move_number: sheet.last_move_number(),
        }
    }
}

impl ScoresheetDoc {
    /// Rebuild the scoresheet, requiring it to belong to `expected`
    pub fn to_scoresheet(&self, expected: Color) -> Result<Scoresheet, PersistenceError> {
        let color = Color::from(self.color);
        if color != expected {
            return Err(PersistenceError::malformed(format!(
                "{} scoresheet is marked {}",
                ColorName::from(expected).as_str(),
                self.color.as_str()
            )));
        }

        let moves_own = self
            .moves_own
            .iter()
            .map(|set| {
                set.iter()
                    .map(|(q, a)| Ok((Question::try_from(q)?, Answer::try_from(a)?)))
                    .collect::<Result<MoveSet<Question>, PersistenceError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let moves_opponent = self
            .moves_opponent
            .iter()
            .map(|set| {
                set.iter()
                    .map(|(k, a)| Ok((QuestionKind::from(*k), Answer::try_from(a)?)))
                    .collect::<Result<MoveSet<QuestionKind>, PersistenceError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scoresheet::from_parts(color, moves_own, moves_opponent, self.last_move_number))
    }
}

impl ColorName {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::White => "WHITE",
            ColorName::Black => "BLACK",
        }
    }
}
