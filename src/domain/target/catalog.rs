//! Restoration targets and the grid layout they are presented in.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{deserialize_flag, DomainError, ErrorCode, TargetId};

/// A restoration objective the optimizer can score barriers against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(rename(deserialize = "abbrev"), alias = "ID")]
    pub id: TargetId,

    #[serde(rename(deserialize = "short"))]
    pub short_label: String,

    #[serde(rename(deserialize = "long"))]
    pub long_label: String,

    /// Y-axis caption for this target's ROI curve.
    #[serde(rename(deserialize = "label"))]
    pub axis_label: String,

    #[serde(rename(deserialize = "infra"), default, deserialize_with = "infra_flag")]
    pub is_infrastructure: bool,
}

fn infra_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_flag(deserializer)?.unwrap_or(false))
}

/// All targets of a project plus the rows they are laid out in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetCatalog {
    targets: Vec<Target>,
    layout: Vec<Vec<TargetId>>,
}

impl TargetCatalog {
    /// Builds a catalog whose layout is one target per row.
    pub fn new(targets: Vec<Target>) -> Self {
        let layout = targets.iter().map(|t| vec![t.id.clone()]).collect();
        Self { targets, layout }
    }

    /// Parses the target CSV and the layout text served with it.
    ///
    /// The layout has one line per grid row, ids separated by whitespace.
    /// Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// `MalformedCatalog` if the CSV cannot be read or the layout names a
    /// target the CSV does not define.
    pub fn from_csv(csv_text: &str, layout_text: &str) -> Result<Self, DomainError> {
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let targets = reader
            .deserialize()
            .collect::<Result<Vec<Target>, _>>()
            .map_err(|e| malformed(e.to_string()))?;

        let mut layout = Vec::new();
        for line in layout_text.lines() {
            let row: Vec<TargetId> = line.split_whitespace().map(TargetId::from).collect();
            if row.is_empty() {
                continue;
            }
            if let Some(unknown) = row.iter().find(|id| !targets.iter().any(|t| &t.id == *id)) {
                return Err(malformed(format!("layout names unknown target {}", unknown))
                    .with_detail("target", unknown.as_str()));
            }
            layout.push(row);
        }

        Ok(Self { targets, layout })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn layout(&self) -> &[Vec<TargetId>] {
        &self.layout
    }

    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| &t.id == id)
    }

    /// Looks up a target that must exist.
    pub fn require(&self, id: &TargetId) -> Result<&Target, DomainError> {
        self.get(id).ok_or_else(|| {
            DomainError::new(ErrorCode::TargetNotFound, format!("unknown target: {}", id))
                .with_detail("target", id.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn malformed(reason: String) -> DomainError {
    DomainError::new(
        ErrorCode::MalformedCatalog,
        format!("target catalog: {}", reason),
    )
    .with_detail("catalog", "targets")
}
