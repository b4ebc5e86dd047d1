//! Column mappings: alternate data columns for the same targets
//! (present-day versus climate-projected habitat, for example).

use serde::{Deserialize, Serialize};

/// Scenario selector published by a project.
///
/// `name` is the heading of the selector; projects without one have a
/// single data set and never send a mapping with a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub name: Option<String>,
    pub files: Vec<String>,
}

impl ColumnMapping {
    pub fn new(name: Option<String>, files: Vec<String>) -> Self {
        Self { name, files }
    }

    /// True when users get to choose a mapping.
    pub fn has_selector(&self) -> bool {
        self.name.is_some()
    }

    /// The selector name with its first letter capitalized.
    pub fn heading(&self) -> Option<String> {
        self.name.as_deref().map(capitalize)
    }

    /// Choices offered to the user, file extensions dropped.
    pub fn choices(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| match f.rsplit_once('.') {
                Some((stem, _)) => stem.to_string(),
                None => f.clone(),
            })
            .collect()
    }

    pub fn accepts(&self, choice: &str) -> bool {
        self.has_selector() && self.choices().iter().any(|c| c == choice)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
