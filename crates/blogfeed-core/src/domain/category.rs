use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FieldErrors;

/// Category entity - groups posts by topic.
///
/// An `id` of `0` marks a category that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// Create a new, unsaved category.
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: 0,
            name,
            description,
        }
    }

    /// Overwrite every editable field from `input`.
    pub fn apply(&mut self, input: CategoryInput) {
        self.name = input.name;
        self.description = input.description;
    }
}

/// Caller-supplied fields for creating or editing a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(max = 150, message = "Category Name cannot exceed 150 characters!!"))]
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Run the field rules, including presence checks the derive cannot express.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate());
        if self.name.trim().is_empty() {
            errors.push("name", "Category Name is Required!!");
        }
        errors.into_result()
    }

    /// Trim the name and collapse a blank description to `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}
