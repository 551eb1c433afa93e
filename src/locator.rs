#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Top-level domains of the public state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Viewport,
    Board,
}

impl Scope {
    /// Every domain, in tree order. Validation walks all of these.
    pub const ALL: [Scope; 2] = [Scope::Viewport, Scope::Board];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewport => "viewport",
            Self::Board => "board",
        }
    }

    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "viewport" => Some(Self::Viewport),
            "board" => Some(Self::Board),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from parsing a locator path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("locator path is empty")]
    Empty,
    #[error("unknown state domain: {0}")]
    UnknownDomain(String),
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),
    #[error("locator path has trailing segments: {0}")]
    TrailingSegments(String),
}

/// Address of one branch of the state tree: a whole domain, or a
/// single entity inside it.
///
/// The textual form is `<domain>` or `<domain>/<uuid>`; a leading
/// slash is tolerated. Anything else fails to parse, so an invalid
/// address can never reach the update pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    Domain(Scope),
    Entity(Scope, Uuid),
}

impl Locator {
    pub const VIEWPORT: Locator = Locator::Domain(Scope::Viewport);
    pub const BOARD: Locator = Locator::Domain(Scope::Board);

    /// Address of one memo on the board.
    #[must_use]
    pub fn memo(id: Uuid) -> Self {
        Self::Entity(Scope::Board, id)
    }

    /// Parse a locator path.
    pub fn parse(path: &str) -> Result<Self, LocatorError> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let mut segments = trimmed.split('/');
        let domain = segments.next().unwrap_or_default();
        if domain.is_empty() {
            return Err(LocatorError::Empty);
        }
        let scope =
            Scope::parse(domain).ok_or_else(|| LocatorError::UnknownDomain(domain.to_owned()))?;
        match segments.next() {
            None => Ok(Self::Domain(scope)),
            Some(entity) => {
                if segments.next().is_some() {
                    return Err(LocatorError::TrailingSegments(path.to_owned()));
                }
                if entity.is_empty() {
                    // A bare trailing slash still addresses the domain.
                    return Ok(Self::Domain(scope));
                }
                let id = Uuid::parse_str(entity)
                    .map_err(|_| LocatorError::InvalidEntityId(entity.to_owned()))?;
                Ok(Self::Entity(scope, id))
            }
        }
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            Self::Domain(scope) | Self::Entity(scope, _) => *scope,
        }
    }

    #[must_use]
    pub fn entity(&self) -> Option<Uuid> {
        match self {
            Self::Domain(_) => None,
            Self::Entity(_, id) => Some(*id),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(scope) => write!(f, "{scope}"),
            Self::Entity(scope, id) => write!(f, "{scope}/{id}"),
        }
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
