//! Access-control entries attached to a credential request.
//!
//! A permission grants a set of operations to one actor. Actors are
//! rendered with the identity-provider prefix the service expects
//! (`mtls-app:`, `uaa-user:`, `uaa-client:`).

use crate::error::{Result, ValidationError};

/// The party a permission is granted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    /// An application identified by its instance certificate.
    App(String),
    /// A UAA user id.
    User(String),
    /// A UAA client id.
    Client(String),
}

impl Actor {
    const APP: &'static str = "mtls-app";
    const USER: &'static str = "uaa-user";
    const CLIENT: &'static str = "uaa-client";

    fn prefix(&self) -> &'static str {
        match self {
            Self::App(_) => Self::APP,
            Self::User(_) => Self::USER,
            Self::Client(_) => Self::CLIENT,
        }
    }

    /// The identifier without its prefix.
    pub fn id(&self) -> &str {
        match self {
            Self::App(id) | Self::User(id) | Self::Client(id) => id,
        }
    }

    /// Parse `<prefix>:<id>`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPermission` for an unknown prefix or
    /// an empty id.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ValidationError::InvalidPermission {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (prefix, id) = input
            .split_once(':')
            .ok_or_else(|| invalid("expected <type>:<id>"))?;
        if id.is_empty() {
            return Err(invalid("actor id is empty").into());
        }

        let actor = match prefix {
            Self::APP => Self::App(id.to_string()),
            Self::USER => Self::User(id.to_string()),
            Self::CLIENT => Self::Client(id.to_string()),
            _ => return Err(invalid("unknown actor type").into()),
        };
        Ok(actor)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix(), self.id())
    }
}

/// An operation an actor may perform on a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
    Delete,
    ReadAcl,
    WriteAcl,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::ReadAcl => "read_acl",
            Self::WriteAcl => "write_acl",
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "read_acl" => Ok(Self::ReadAcl),
            "write_acl" => Ok(Self::WriteAcl),
            other => Err(ValidationError::InvalidPermission {
                input: other.to_string(),
                reason: "unknown operation".to_string(),
            }
            .into()),
        }
    }
}

/// An actor plus the operations granted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    actor: Actor,
    operations: Vec<Operation>,
}

impl Permission {
    /// Grant nothing yet to `actor`.
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            operations: Vec::new(),
        }
    }

    /// Add an operation. Duplicates are ignored; order is kept.
    pub fn allow(mut self, operation: Operation) -> Self {
        if !self.operations.contains(&operation) {
            self.operations.push(operation);
        }
        self
    }

    /// Add several operations.
    pub fn allow_all(self, operations: impl IntoIterator<Item = Operation>) -> Self {
        operations.into_iter().fold(self, Permission::allow)
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl std::str::FromStr for Permission {
    type Err = crate::error::Error;

    /// Parse `<actor>=<op>[,<op>...]`, e.g. `mtls-app:1234=read,write`.
    fn from_str(s: &str) -> Result<Self> {
        let (actor, ops) = s
            .split_once('=')
            .ok_or_else(|| ValidationError::InvalidPermission {
                input: s.to_string(),
                reason: "expected <actor>=<operations>".to_string(),
            })?;

        let operations = ops
            .split(',')
            .map(str::trim)
            .filter(|op| !op.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Operation>>>()?;
        if operations.is_empty() {
            return Err(ValidationError::InvalidPermission {
                input: s.to_string(),
                reason: "no operations given".to_string(),
            }
            .into());
        }

        Ok(Permission::new(Actor::parse(actor)?).allow_all(operations))
    }
}
