//! Outline output: `{"title", "outline": [{"level", "text", "page"}]}`.

use serde::{Deserialize, Serialize};

use super::json::{to_json, JsonFormat};
use crate::error::Result;
use crate::model::{HeadingLevel, Outline};

/// One heading in the outline output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// The outline output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineJson {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl From<&Outline> for OutlineJson {
    fn from(outline: &Outline) -> Self {
        Self {
            title: outline.title.clone(),
            outline: outline
                .headings
                .iter()
                .map(|h| OutlineEntry {
                    level: h.level,
                    text: h.text.clone(),
                    page: h.page,
                })
                .collect(),
        }
    }
}

/// Render an outline as JSON.
pub fn outline_to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    to_json(&OutlineJson::from(outline), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingCandidate;

    #[test]
    fn test_outline_shape() {
        let outline = Outline::new(
            "Field Guide",
            vec![
                HeadingCandidate::new("1. Birds", 1, HeadingLevel::H1, 9, 120.0),
                HeadingCandidate::new("1.1 Owls", 2, HeadingLevel::H2, 7, 80.0),
            ],
        );
        let json = outline_to_json(&outline, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Field Guide","outline":[{"level":"H1","text":"1. Birds","page":1},{"level":"H2","text":"1.1 Owls","page":2}]}"#
        );
    }

    #[test]
    fn test_empty_outline_keeps_empty_title() {
        let value: serde_json::Value =
            serde_json::from_str(&outline_to_json(&Outline::empty(), JsonFormat::Pretty).unwrap())
                .unwrap();
        assert_eq!(value["title"], "");
        assert_eq!(value["outline"], serde_json::json!([]));
    }
}
