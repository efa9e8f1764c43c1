use crate::rows::reducer::ReducerError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Remove the record with `id`, which the caller saw at `index`.
    Remove { id: String, index: usize },
    Undo,
}

impl Intent {
    pub fn remove(id: impl Into<String>, index: usize) -> Self {
        Self::Remove {
            id: id.into(),
            index,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Remove { .. } => "remove",
            Self::Undo => "undo",
        }
    }
}

/// An intent as it arrives from outside the process, tag still unchecked.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggedIntent {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Option<String>,
    pub index: Option<usize>,
}

impl TryFrom<TaggedIntent> for Intent {
    type Error = ReducerError;

    fn try_from(raw: TaggedIntent) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "remove" => {
                let id = raw.id.ok_or_else(|| ReducerError::MissingField {
                    tag: raw.kind.clone(),
                    field: "id",
                })?;
                let index = raw.index.ok_or(ReducerError::MissingField {
                    tag: raw.kind.clone(),
                    field: "index",
                })?;
                Ok(Intent::Remove { id, index })
            }
            "undo" => Ok(Intent::Undo),
            _ => Err(ReducerError::UnknownIntent { tag: raw.kind.clone() }),
        }
    }
}
