//! Barrier records and the project's barrier catalog.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{deserialize_flag, BarrierId, DomainError, ErrorCode};

/// Columns every barrier catalog must carry.
const REQUIRED_COLUMNS: [&str; 3] = ["ID", "region", "cost"];

/// A single tide gate as described by the project's barrier file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barrier {
    #[serde(rename(deserialize = "ID"))]
    pub id: BarrierId,

    pub region: String,

    pub cost: f64,

    #[serde(rename(deserialize = "DSID"), default)]
    pub downstream_id: Option<String>,

    #[serde(rename(deserialize = "type"), default)]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub primary: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub dominant: Option<bool>,

    #[serde(rename(deserialize = "X"), default)]
    pub x: Option<f64>,

    #[serde(rename(deserialize = "Y"), default)]
    pub y: Option<f64>,
}

/// Optional descriptive columns shown in the barrier detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierAttribute {
    Region,
    Cost,
    DownstreamId,
    Type,
    Primary,
    Dominant,
    X,
    Y,
}

impl BarrierAttribute {
    /// Display order of the static columns.
    pub const ALL: [BarrierAttribute; 8] = [
        BarrierAttribute::Region,
        BarrierAttribute::Cost,
        BarrierAttribute::DownstreamId,
        BarrierAttribute::Type,
        BarrierAttribute::Primary,
        BarrierAttribute::Dominant,
        BarrierAttribute::X,
        BarrierAttribute::Y,
    ];

    /// Header of the column in the barrier file.
    pub fn source_column(&self) -> &'static str {
        match self {
            BarrierAttribute::Region => "region",
            BarrierAttribute::Cost => "cost",
            BarrierAttribute::DownstreamId => "DSID",
            BarrierAttribute::Type => "type",
            BarrierAttribute::Primary => "primary",
            BarrierAttribute::Dominant => "dominant",
            BarrierAttribute::X => "X",
            BarrierAttribute::Y => "Y",
        }
    }

    /// Column heading in the detail table.
    pub fn label(&self) -> &'static str {
        match self {
            BarrierAttribute::Region => "Region",
            BarrierAttribute::Cost => "Cost",
            BarrierAttribute::DownstreamId => "DSID",
            BarrierAttribute::Type => "Type",
            BarrierAttribute::Primary => "Primary",
            BarrierAttribute::Dominant => "Dominant",
            BarrierAttribute::X => "X",
            BarrierAttribute::Y => "Y",
        }
    }
}

/// All barriers of a project, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarrierCatalog {
    barriers: Vec<Barrier>,
    attributes: Vec<BarrierAttribute>,
}

impl BarrierCatalog {
    /// Builds a catalog directly from records. Every attribute is treated
    /// as present.
    pub fn new(barriers: Vec<Barrier>) -> Self {
        Self {
            barriers,
            attributes: BarrierAttribute::ALL.to_vec(),
        }
    }

    /// Parses the CSV text served for a project.
    ///
    /// # Errors
    ///
    /// `MalformedCatalog` if a required column is missing or a row cannot be
    /// read.
    pub fn from_csv(text: &str) -> Result<Self, DomainError> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| malformed(e.to_string()))?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(malformed(format!("missing column '{}'", column))
                    .with_detail("column", column));
            }
        }

        let attributes = BarrierAttribute::ALL
            .into_iter()
            .filter(|a| headers.iter().any(|h| h == a.source_column()))
            .collect();

        let barriers = reader
            .deserialize()
            .collect::<Result<Vec<Barrier>, _>>()
            .map_err(|e| malformed(e.to_string()))?;

        Ok(Self {
            barriers,
            attributes,
        })
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    /// Static attributes present in the source file, in display order.
    pub fn attributes(&self) -> &[BarrierAttribute] {
        &self.attributes
    }

    pub fn get(&self, id: &BarrierId) -> Option<&Barrier> {
        self.barriers.iter().find(|b| &b.id == id)
    }

    /// Barriers located in any of the given regions, in catalog order.
    pub fn in_regions<'a, S: AsRef<str>>(
        &'a self,
        regions: &'a [S],
    ) -> impl Iterator<Item = &'a Barrier> + 'a {
        self.barriers
            .iter()
            .filter(move |b| regions.iter().any(|r| r.as_ref() == b.region))
    }

    pub fn len(&self) -> usize {
        self.barriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty()
    }
}

fn malformed(reason: String) -> DomainError {
    DomainError::new(
        ErrorCode::MalformedCatalog,
        format!("barrier catalog: {}", reason),
    )
    .with_detail("catalog", "barriers")
}
