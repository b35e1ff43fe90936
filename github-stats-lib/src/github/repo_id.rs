use super::CollectError;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use std::sync::Arc;

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentifier {
    owner: Arc<str>,
    name: Arc<str>,
}

impl RepositoryIdentifier {
    /// Split an `owner/name` string into its two parts.
    ///
    /// The string must contain exactly one `/` and both sides must be non-empty.
    pub fn parse(s: &str) -> Result<Self, CollectError> {
        let mut parts = s.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: Arc::from(owner),
                name: Arc::from(name),
            }),
            _ => Err(CollectError::InvalidIdentifier(s.to_string())),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepositoryIdentifier {
    type Err = CollectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
