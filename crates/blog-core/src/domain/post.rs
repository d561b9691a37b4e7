use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post. Both names are always stored together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name, `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The client-editable part of a post.
///
/// Used both for creation and for full replacement: `id` and `created` are
/// never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub author: Author,
}

impl PostFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author,
        }
    }

    /// Check that every required field carries a non-blank value.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("title", &self.title),
            ("content", &self.content),
            ("author.firstName", &self.author.first_name),
            ("author.lastName", &self.author.last_name),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(DomainError::Validation(format!(
                "`{field}` must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

/// BlogPost entity - the sole record kept by the store.
///
/// `created` carries microsecond precision so it survives a round trip
/// through any supported database unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a fresh id and creation timestamp.
    pub fn create(fields: PostFields) -> Result<Self, DomainError> {
        fields.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            author: fields.author,
            created: Utc::now().trunc_subsecs(6),
        })
    }

    /// Overwrite the editable fields. `id` and `created` are kept.
    pub fn replace(&mut self, fields: PostFields) -> Result<(), DomainError> {
        fields.validate()?;

        self.title = fields.title;
        self.content = fields.content;
        self.author = fields.author;
        Ok(())
    }

    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
        }
    }
}
