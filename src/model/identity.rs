use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::FatalError;
use crate::model::IdentMap;

/// Optional id→display-name table loaded from a JSON object or a two-column
/// CSV. Loading is a fail-fast boundary: an unreadable file, an unknown
/// extension, a malformed row or an empty result aborts the whole run.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    names: IdentMap<String>,
}

// Create
impl IdentityResolver {
    /// Resolver without a table: every id resolves to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_file(path: &str) -> Result<Self, FatalError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let text = fs::read_to_string(path)
            .map_err(|err| FatalError::InvalidIdentityMap(format!("{path}: {err}")))?;
        let names = match ext.as_deref() {
            Some("json") => Self::parse_json(&text)?,
            Some("csv") => Self::parse_csv(&text)?,
            _ => {
                return Err(FatalError::InvalidIdentityMap(format!(
                    "{path}: expected a .json or .csv file"
                )))
            }
        };
        if names.is_empty() {
            return Err(FatalError::InvalidIdentityMap(format!(
                "{path}: no id to name entries"
            )));
        }
        Ok(Self { names })
    }
}

// Parser
impl IdentityResolver {
    fn parse_json(text: &str) -> Result<IdentMap<String>, FatalError> {
        let entries: IndexMap<String, String> = serde_json::from_str(text)
            .map_err(|err| FatalError::InvalidIdentityMap(err.to_string()))?;
        Ok(entries.into_iter().collect())
    }

    fn parse_csv(text: &str) -> Result<IdentMap<String>, FatalError> {
        let mut names = IdentMap::new();
        // First line is the `id,name` header.
        for line in text.lines().skip(1) {
            let fields = line.split(',').collect::<Vec<_>>();
            let [id, name] = fields.as_slice() else {
                return Err(FatalError::InvalidIdentityMap(format!(
                    "expected 'id,name', got '{line}'"
                )));
            };
            names.insert(id.trim(), name.trim().to_string());
        }
        Ok(names)
    }
}

// Lookup
impl IdentityResolver {
    /// Case-insensitive: returns the mapped display name if present, the raw
    /// id unchanged otherwise.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }
}
