use serde::Deserialize;

use crate::util::strip_control_chars;

/// Top-level taxonomy node shown in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Child node of a [`Category`], selectable to open its study materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    /// Id of the category this list was fetched for. Not part of the wire
    /// payload.
    pub parent_id: String,
}

impl Subcategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.into(),
        }
    }
}

/// `{ "_id": ..., "name": ... }` as sent by both endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct TaxonomyNode {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl TaxonomyNode {
    fn clean_name(&self) -> String {
        strip_control_chars(&self.name).into_owned()
    }

    pub fn into_category(self) -> Category {
        Category {
            name: self.clean_name(),
            id: self.id,
        }
    }

    pub fn into_subcategory(self, parent_id: &str) -> Subcategory {
        Subcategory {
            name: self.clean_name(),
            id: self.id,
            parent_id: parent_id.to_owned(),
        }
    }
}

/// First element of the `/api/categories/parents` array.
#[derive(Debug, Deserialize)]
pub(super) struct ParentsEnvelope {
    #[serde(default)]
    pub parents: Option<Vec<TaxonomyNode>>,
}

/// First element of the `/api/categories/subcategories/{id}` array.
#[derive(Debug, Deserialize)]
pub(super) struct SubcategoriesEnvelope {
    #[serde(default)]
    pub subcategories: Option<Vec<TaxonomyNode>>,
}
