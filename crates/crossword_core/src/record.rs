//! Wire records exchanged with the puzzle store.
//!
//! These mirror the JSON documents kept in the `puzzles` and `scores`
//! collections. They are untrusted until [`Board::from_definition`]
//! validates them.
//!
//! [`Board::from_definition`]: crate::Board::from_definition

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{CellIndex, ClueId, Dimensions, Direction};

/// A stored puzzle with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    constructors: Vec<String>,
    #[serde(default)]
    editor: Option<String>,
    publication_date: String,
    body: Vec<BoardDefinition>,
}

impl PuzzleRecord {
    /// The board that gets played (the first body entry).
    pub fn primary_board(&self) -> Option<&BoardDefinition> {
        self.body.first()
    }

    /// Drops every body entry after the first.
    pub fn into_primary(mut self) -> Self {
        self.body.truncate(1);
        self
    }

    /// Metadata needed after the board is loaded.
    pub fn info(&self) -> PuzzleInfo {
        PuzzleInfo {
            id: self.id.clone(),
            constructors: self.constructors.clone(),
            editor: self.editor.clone(),
            publication_date: self.publication_date.clone(),
        }
    }
}

/// Puzzle ids arrive as either JSON numbers or strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Puzzle metadata carried through a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PuzzleInfo {
    id: String,
    constructors: Vec<String>,
    editor: Option<String>,
    publication_date: String,
}

/// Raw grid geometry, clues and answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct BoardDefinition {
    cells: Vec<CellDefinition>,
    clues: Vec<ClueDefinition>,
    #[serde(default)]
    clue_lists: Vec<ClueListDefinition>,
    dimensions: Dimensions,
}

/// Raw cell. Only `type == 1` marks a fillable cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct CellDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    clues: Vec<ClueId>,
}

impl CellDefinition {
    /// Type code of a fillable cell.
    pub const FILLABLE: u8 = 1;

    /// Returns true if this cell takes a letter.
    pub fn is_fillable(&self) -> bool {
        self.kind == Some(Self::FILLABLE)
    }
}

/// Raw clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct ClueDefinition {
    cells: Vec<CellIndex>,
    direction: Direction,
    label: String,
    #[serde(default)]
    text: Vec<TextSegment>,
}

/// Raw clue list grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct ClueListDefinition {
    name: String,
    clues: Vec<ClueId>,
}

/// One piece of clue text. `formatted` holds markup and is never rendered raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct TextSegment {
    plain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
}

/// Completion record upserted into the `scores` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct ScoreRecord {
    /// Puzzle id.
    id: String,
    /// Solve duration in milliseconds.
    duration: u64,
    /// Completion time in milliseconds since the Unix epoch.
    timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_becomes_string() {
        let record: PuzzleRecord = serde_json::from_value(json!({
            "id": 20231,
            "constructors": ["Ada"],
            "publicationDate": "2023-01-01",
            "body": []
        }))
        .expect("Parse failed");
        assert_eq!(record.id(), "20231");
        assert_eq!(record.editor(), &None);
    }

    #[test]
    fn test_block_cells_parse_from_empty_objects() {
        let cell: CellDefinition = serde_json::from_value(json!({})).expect("Parse failed");
        assert!(!cell.is_fillable());
        assert!(cell.clues().is_empty());
    }

    #[test]
    fn test_into_primary_keeps_first_body() {
        let board = BoardDefinition::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Dimensions { width: 1, height: 1 },
        );
        let record = PuzzleRecord::new(
            "1".to_string(),
            Vec::new(),
            None,
            "2023-01-01".to_string(),
            vec![board.clone(), board],
        );
        assert_eq!(record.into_primary().body().len(), 1);
    }
}
