//! Content registry: immutable id → record lookup
//!
//! The built-in collections are YAML documents embedded in the binary and
//! parsed once at startup.

use indexmap::IndexMap;
use thiserror::Error;

use super::record::{ContentRecord, Profile};

const BLOG_DATA: &str = include_str!("data/blog.yml");
const PROJECTS_DATA: &str = include_str!("data/projects.yml");
const PROFILE_DATA: &str = include_str!("data/profile.yml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate content id: {0}")]
    DuplicateId(String),

    #[error("Malformed {name} data: {source}")]
    Malformed {
        name: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Records keyed by id, in declaration order
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    records: IndexMap<String, ContentRecord>,
}

impl ContentRegistry {
    /// Build a registry, rejecting duplicate ids
    pub fn from_records(records: Vec<ContentRecord>) -> Result<Self, RegistryError> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            if map.contains_key(&record.id) {
                return Err(RegistryError::DuplicateId(record.id));
            }
            map.insert(record.id.clone(), record);
        }
        Ok(Self { records: map })
    }

    /// Parse a YAML sequence of records
    pub fn from_yaml(name: &'static str, yaml: &str) -> Result<Self, RegistryError> {
        let records: Vec<ContentRecord> = serde_yaml::from_str(yaml)
            .map_err(|source| RegistryError::Malformed { name, source })?;
        Self::from_records(records)
    }

    pub fn lookup(&self, id: &str) -> Option<&ContentRecord> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.values()
    }

    pub fn featured(&self) -> impl Iterator<Item = &ContentRecord> {
        self.iter().filter(|r| r.featured)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records that have a detail page
    pub fn with_detail(&self) -> impl Iterator<Item = &ContentRecord> {
        self.iter().filter(|r| r.has_body())
    }

    /// A record with a detail page, by id
    pub fn detail(&self, id: &str) -> Option<&ContentRecord> {
        self.lookup(id).filter(|r| r.has_body())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All static content of the site
#[derive(Debug, Clone)]
pub struct Content {
    pub blog: ContentRegistry,
    pub projects: ContentRegistry,
    pub profile: Profile,
}

impl Content {
    /// Load the collections compiled into the binary
    pub fn builtin() -> Result<Self, RegistryError> {
        let blog = ContentRegistry::from_yaml("blog", BLOG_DATA)?;
        let projects = ContentRegistry::from_yaml("projects", PROJECTS_DATA)?;
        let profile = serde_yaml::from_str(PROFILE_DATA).map_err(|source| {
            RegistryError::Malformed {
                name: "profile",
                source,
            }
        })?;

        tracing::debug!(
            "Loaded {} articles and {} projects",
            blog.len(),
            projects.len()
        );

        Ok(Self {
            blog,
            projects,
            profile,
        })
    }
}
