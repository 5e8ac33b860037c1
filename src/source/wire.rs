//! JSON-lines wire format of the correction stream.
//!
//! One package per line:
//!
//! ```json
//! {"PackageName":"fmt","Identifiers":["Printf"],"Documentation":[{"Content":"Helo",
//!  "Position":{"Filename":"a.go","Offset":3,"Line":1,"Column":4},
//!  "Misspellings":[{"Word":"Helo","Offset":0,"Suggestions":["Hello"],
//!  "Action":{"Type":0,"Replacement":""}}]}]}
//! ```
//!
//! Lists may be `null`. Action types: 0 undefined, 1 ignore, 2 replace.

use crate::model::{Action, IngestionError, Misspelling, Package, Position, Text};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

const ACTION_UNDEFINED: u8 = 0;
const ACTION_IGNORE: u8 = 1;
const ACTION_REPLACE: u8 = 2;

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawPackage {
    #[serde(rename = "PackageName", default)]
    pub name: String,
    #[serde(default)]
    pub identifiers: Option<Vec<String>>,
    #[serde(default)]
    pub documentation: Option<Vec<RawText>>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawText {
    pub content: String,
    pub position: RawPosition,
    #[serde(default)]
    pub misspellings: Option<Vec<RawMisspelling>>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawPosition {
    pub filename: PathBuf,
    pub offset: usize,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawMisspelling {
    pub word: String,
    pub offset: usize,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub action: RawAction,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawAction {
    #[serde(rename = "Type")]
    pub kind: u8,
    #[serde(default)]
    pub replacement: String,
}

impl RawAction {
    fn into_action(self) -> Result<Action, String> {
        match self.kind {
            ACTION_UNDEFINED => Ok(Action::Undefined),
            ACTION_IGNORE => Ok(Action::Ignore),
            ACTION_REPLACE => Ok(Action::Replace {
                replacement: self.replacement,
            }),
            other => Err(format!("unknown action type {}", other)),
        }
    }
}

impl From<&Action> for RawAction {
    fn from(action: &Action) -> Self {
        match action {
            Action::Undefined => RawAction::default(),
            Action::Ignore => RawAction {
                kind: ACTION_IGNORE,
                replacement: String::new(),
            },
            Action::Replace { replacement } => RawAction {
                kind: ACTION_REPLACE,
                replacement: replacement.clone(),
            },
        }
    }
}

/// Decode one stream line into a [`Package`].
///
/// `line_no` is the 1-based line number used in error messages.
///
/// # Errors
///
/// [`IngestionError::InvalidJson`] for malformed records or unknown action
/// types; [`IngestionError::OffsetOutOfBounds`] for a misspelling that does
/// not fit inside its text.
pub fn parse_package(line: &str, line_no: usize) -> Result<Package, IngestionError> {
    let raw: RawPackage =
        serde_json::from_str(line).map_err(|e| IngestionError::InvalidJson {
            line: line_no,
            message: e.to_string(),
        })?;
    convert_package(raw, line_no)
}

fn convert_package(raw: RawPackage, line_no: usize) -> Result<Package, IngestionError> {
    let mut package = Package {
        name: raw.name,
        identifiers: raw.identifiers.unwrap_or_default(),
        ..Package::default()
    };

    for raw_text in raw.documentation.unwrap_or_default() {
        let text = Arc::new(Text::new(
            raw_text.content,
            Position {
                filename: raw_text.position.filename,
                offset: raw_text.position.offset,
                line: raw_text.position.line,
                column: raw_text.position.column,
            },
        ));

        for raw_m in raw_text.misspellings.unwrap_or_default() {
            let action = raw_m
                .action
                .into_action()
                .map_err(|message| IngestionError::InvalidJson {
                    line: line_no,
                    message,
                })?;
            let misspelling = Misspelling {
                word: raw_m.word,
                offset: raw_m.offset,
                suggestions: raw_m.suggestions.unwrap_or_default(),
                action,
                text: Arc::clone(&text),
            };
            if !misspelling.is_within_text() {
                return Err(IngestionError::OffsetOutOfBounds {
                    filename: text.position.filename.clone(),
                    offset: misspelling.offset,
                    word: misspelling.word,
                    content_len: text.content.len(),
                });
            }
            package.misspellings.push(misspelling);
        }

        package.documentation.push(text);
    }

    Ok(package)
}

/// Encode a package as one stream line (no trailing newline).
///
/// Misspellings are grouped under the text they point to, matched by
/// pointer identity.
pub fn encode_package(package: &Package) -> serde_json::Result<String> {
    let documentation = package
        .documentation
        .iter()
        .map(|text| RawText {
            content: text.content.clone(),
            position: RawPosition {
                filename: text.position.filename.clone(),
                offset: text.position.offset,
                line: text.position.line,
                column: text.position.column,
            },
            misspellings: Some(
                package
                    .misspellings
                    .iter()
                    .filter(|m| Arc::ptr_eq(&m.text, text))
                    .map(|m| RawMisspelling {
                        word: m.word.clone(),
                        offset: m.offset,
                        suggestions: Some(m.suggestions.clone()),
                        action: RawAction::from(&m.action),
                    })
                    .collect(),
            ),
        })
        .collect();

    serde_json::to_string(&RawPackage {
        name: package.name.clone(),
        identifiers: Some(package.identifiers.clone()),
        documentation: Some(documentation),
    })
}
