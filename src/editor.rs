//! Editor Draft
//!
//! The unpersisted record behind the project form. `editing` decides whether
//! a submit creates (`None`) or replaces (`Some(id)`).

use crate::error::FlowError;
use crate::models::{Project, ProjectFields, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Composing,
    Editing(ProjectId),
}

/// What a validated draft turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(ProjectFields),
    Update(ProjectId, ProjectFields),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    fields: ProjectFields,
    editing: Option<ProjectId>,
}

impl Draft {
    pub fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ProjectFields {
        &mut self.fields
    }

    pub fn editing(&self) -> Option<ProjectId> {
        self.editing
    }

    pub fn mode(&self) -> EditorMode {
        match self.editing {
            Some(id) => EditorMode::Editing(id),
            None => EditorMode::Composing,
        }
    }

    /// Copy every field of `project`; update replaces the whole record, so a
    /// partial copy would blank the fields left out
    pub fn select(&mut self, project: &Project) {
        self.fields = project.fields.clone();
        self.editing = Some(project.id);
    }

    /// Back to an empty "compose new" draft
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submission(&self) -> Result<Submission, FlowError> {
        if self.fields.trimmed_name().is_empty() {
            return Err(FlowError::MissingName);
        }
        Ok(match self.editing {
            Some(id) => Submission::Update(id, self.fields.clone()),
            None => Submission::Create(self.fields.clone()),
        })
    }

    pub fn heading(&self) -> &'static str {
        match self.mode() {
            EditorMode::Composing => "Create Project",
            EditorMode::Editing(_) => "Update Project",
        }
    }
}
