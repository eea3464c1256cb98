use core::fmt;

use super::entity::Category;
use crate::renderer::RenderError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// A named entity was looked up but never created
    NotFound { category: Category, name: String },
    /// An entity with this name already exists in the category
    DuplicateName { category: Category, name: String },
    /// The presenter could not provide a renderable
    Render(RenderError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { category, name } => {
                write!(f, "no entity named {name:?} in {category}")
            }
            Self::DuplicateName { category, name } => {
                write!(f, "entity {name:?} already exists in {category}")
            }
            Self::Render(err) => write!(f, "render backend failure: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for SimError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}
