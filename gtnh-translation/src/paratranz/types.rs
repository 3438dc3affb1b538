//! Records exchanged with the ParaTranz service.

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    filetypes::{FiletypeKind, Language},
};

const RECORD_SUFFIX: &str = ".json";

/// One translatable string in ParaTranz's JSON file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParatranzItem {
    pub key: String,
    pub original: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub stage: i32,
}

/// A file as stored on ParaTranz: `<relpath>.json` holding a string array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParatranzFile {
    pub name: String,
    pub items: Vec<ParatranzItem>,
}

impl ParatranzFile {
    /// Relpath of the source-language file this record was made from.
    pub fn relpath(&self) -> Result<&str, Error> {
        self.name.strip_suffix(RECORD_SUFFIX).ok_or_else(|| {
            Error::InvalidRecord(format!("`{}` does not end with `{}`", self.name, RECORD_SUFFIX))
        })
    }

    /// Record name for a relpath.
    pub fn name_for(relpath: &str) -> String {
        format!("{}{}", relpath, RECORD_SUFFIX)
    }

    /// Serializes the items the way ParaTranz expects an uploaded file.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(&self.items).map_err(Error::Parse)
    }

    /// Parses a ParaTranz string array.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, Error> {
        Ok(ParatranzFile {
            name: name.into(),
            items: serde_json::from_str(json)?,
        })
    }
}

/// A file listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: u64,
    pub name: String,
    /// Last modification time as reported by the service; empty if unknown.
    #[serde(rename = "modifiedAt", default)]
    pub modified_at: String,
}

/// A translated file ready to be written into the local tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub kind: FiletypeKind,
    pub relpath: String,
    pub content: String,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relpath_strips_suffix() {
        let file = ParatranzFile {
            name: "resources/foo/lang/en_US.lang.json".to_string(),
            items: vec![],
        };
        assert_eq!(file.relpath().unwrap(), "resources/foo/lang/en_US.lang");
    }

    #[test]
    fn test_relpath_requires_suffix() {
        let file = ParatranzFile {
            name: "GregTech_US.lang".to_string(),
            items: vec![],
        };
        assert!(matches!(file.relpath(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_items_parse_from_service_json() {
        let json = r#"[
            {"id": 1, "key": "lang|a", "original": "A", "translation": "エー", "context": null, "stage": 1},
            {"key": "lang|b", "original": "B"}
        ]"#;
        let file = ParatranzFile::from_json("x.lang.json", json).unwrap();
        assert_eq!(file.items.len(), 2);
        assert_eq!(file.items[0].translation, "エー");
        assert_eq!(file.items[0].context, None);
        assert_eq!(file.items[1].translation, "");
        assert_eq!(file.items[1].stage, 0);
    }

    #[test]
    fn test_to_json_is_item_array() {
        let file = ParatranzFile {
            name: "x.lang.json".to_string(),
            items: vec![ParatranzItem {
                key: "lang|a".to_string(),
                original: "A=B".to_string(),
                translation: String::new(),
                context: Some("a=A=B".to_string()),
                stage: 0,
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["key"], "lang|a");
        assert_eq!(value[0]["original"], "A=B");
        assert_eq!(value[0]["context"], "a=A=B");
    }

    #[test]
    fn test_remote_file_reads_modified_at() {
        let remote: RemoteFile = serde_json::from_str(
            r#"{"id": 7, "name": "GregTech_US.lang.json", "modifiedAt": "2024-01-01T00:00:00Z", "total": 10}"#,
        )
        .unwrap();
        assert_eq!(remote.id, 7);
        assert_eq!(remote.modified_at, "2024-01-01T00:00:00Z");
    }
}
