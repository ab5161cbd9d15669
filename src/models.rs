use serde::{Deserialize, Serialize};

/// A tenant whose license findings are monitored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// Identifier of a finding or project as returned by the API.
///
/// The upstream service is not consistent about id types, so both JSON
/// strings and numbers are accepted and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for FindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingId::Text(s) => write!(f, "{}", s),
            FindingId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: FindingId,
    pub name: String,
}

/// One license issue reported for an organization, projected to the fields
/// the reports use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseFinding {
    pub id: FindingId,
    pub severity: String,
    pub instructions: String,
    pub dependencies: Vec<String>,
    pub projects: Vec<Project>,
}

impl LicenseFinding {
    /// Dependencies flattened into a single cell value.
    pub fn dependencies_cell(&self) -> String {
        self.dependencies.join("; ")
    }
}
