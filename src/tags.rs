use crate::document::ExternalDocs;
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named grouping of API operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            external_docs: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }
}

/// Keeps the first definition of every tag name and rejects conflicting redefinitions
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    by_name: HashMap<String, usize>,
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tag` on first use and return its name.
    ///
    /// Registering an equal tag again is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::TagConflict`] if a different tag with the same name was registered before.
    pub fn get_or_register(&mut self, tag: &Tag) -> Result<String> {
        match self.by_name.get(&tag.name) {
            Some(&index) if self.tags[index] == *tag => Ok(tag.name.clone()),
            Some(_) => Err(Error::TagConflict {
                name: tag.name.clone(),
            }),
            None => {
                debug!("Registering tag {}", tag.name);
                self.by_name.insert(tag.name.clone(), self.tags.len());
                self.tags.push(tag.clone());
                Ok(tag.name.clone())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.by_name.get(name).map(|&index| &self.tags[index])
    }

    /// Registered tags in first-use order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
