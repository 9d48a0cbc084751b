//! Layout provider backed by a serialized layout dump.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{check_page, LayoutProvider, PageLayout};
use crate::error::{Error, Result};

/// Document-level metadata reported by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Creator application
    #[serde(default)]
    pub creator: Option<String>,

    /// Producer application
    #[serde(default)]
    pub producer: Option<String>,
}

/// A whole document's layout, loaded from JSON or built in memory.
///
/// The JSON shape is `{"metadata": {...}, "pages": [{"number", "width",
/// "height", "blocks": [{"bbox", "lines": [{"bbox", "spans": [{"text",
/// "font", "size", "bbox"}]}]}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Identifier (file name when loaded from disk)
    #[serde(default)]
    pub name: String,

    /// Engine-reported metadata
    #[serde(default)]
    pub metadata: LayoutMetadata,

    /// Pages in order; required, so other JSON documents are rejected
    pub pages: Vec<PageLayout>,
}

impl LayoutDocument {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Append a page, renumbering it to follow the existing pages.
    pub fn add_page(&mut self, mut page: PageLayout) {
        page.number = self.pages.len() as u32 + 1;
        self.pages.push(page);
    }

    /// Builder-style variant of [`add_page`](Self::add_page).
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.add_page(page);
        self
    }

    /// Load from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut doc = Self::from_bytes(&data).map_err(|e| match e {
            Error::Json(err) => Error::layout(&name, 0, err.to_string()),
            other => other,
        })?;
        if doc.name.is_empty() {
            doc.name = name;
        }
        Ok(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut doc: LayoutDocument = serde_json::from_slice(data)?;
        doc.renumber();
        Ok(doc)
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Serialize back to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Dumps may omit page numbers; position in the list is authoritative.
    fn renumber(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.number = i as u32 + 1;
        }
    }
}

impl LayoutProvider for LayoutDocument {
    fn document_id(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<Cow<'_, PageLayout>> {
        check_page(number, self.page_count())?;
        let page = &self.pages[(number - 1) as usize];
        match page.error {
            Some(ref message) => Err(Error::layout(&self.name, number, message.clone())),
            None => Ok(Cow::Borrowed(page)),
        }
    }

    fn metadata_title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }
}
