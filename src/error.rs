use std::fmt;

use specs::Entity;

// Possible errors that might happen while managing a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The node was built with a parent handle whose entity is no longer alive.
    DeadParent(Entity),
    /// The entity was already deleted, or belongs to a previous generation.
    DeadEntity(Entity),
    /// The entity is alive but carries no node.
    NotANode(Entity),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DeadParent(e) => write!(f, "parent entity {:?} is not alive", e),
            Error::DeadEntity(e) => write!(f, "entity {:?} is not alive", e),
            Error::NotANode(e) => write!(f, "entity {:?} is not a scene node", e),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
