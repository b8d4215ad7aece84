//! Project and label types

use serde::{Deserialize, Serialize};

/// Identifier of a project.
pub type ProjectId = i64;

/// Identifier of a label.
pub type LabelId = i64;

/// Default colour assigned to new labels by the backend.
pub const DEFAULT_LABEL_COLOR: &str = "#18a058";

/// An annotation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Display name
    pub name: String,

    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// When the project was created
    #[serde(with = "super::timestamp")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreate {
    /// Display name
    pub name: String,

    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectCreate {
    /// Create a payload with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A label (object class) belonging to one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier
    pub id: LabelId,

    /// Owning project
    pub project_id: ProjectId,

    /// Label name (e.g. `chair`)
    pub name: String,

    /// Hex colour used when rendering the label
    pub color: String,

    /// When the label was created
    #[serde(with = "super::timestamp")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Payload for creating a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCreate {
    /// Label name
    pub name: String,

    /// Hex colour, `#18a058` unless set
    pub color: String,
}

impl LabelCreate {
    /// Create a payload with the default colour.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_LABEL_COLOR.to_string(),
        }
    }

    /// Set the colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Acknowledgement returned when a label is deleted.
///
/// The backend may answer with `{"msg": "..."}` or with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// Human-readable message, if the backend sent one
    #[serde(default)]
    pub msg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_create_omits_missing_description() {
        let json = serde_json::to_value(ProjectCreate::new("Lobby scans")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Lobby scans"}));

        let json =
            serde_json::to_value(ProjectCreate::new("Lobby").description("ground floor")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Lobby", "description": "ground floor"})
        );
    }

    #[test]
    fn test_label_create_default_color() {
        let label = LabelCreate::new("chair");
        assert_eq!(label.color, "#18a058");
        assert_eq!(LabelCreate::new("desk").color("#ff0000").color, "#ff0000");
    }

    #[test]
    fn test_label_deserialization() {
        let label: Label = serde_json::from_value(serde_json::json!({
            "id": 11,
            "project_id": 7,
            "name": "cat",
            "color": "#18a058",
            "created_at": "2025-03-01T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(label.id, 11);
        assert_eq!(label.project_id, 7);
        assert_eq!(label.name, "cat");
    }

    #[test]
    fn test_project_accepts_null_description() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Atrium",
            "description": null,
            "created_at": "2025-03-01T08:30:00+08:00"
        }))
        .unwrap();

        assert_eq!(project.description, None);
    }
}
