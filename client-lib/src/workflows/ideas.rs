//! Ownership CRUD over the viewer's own ideas.
//!
//! All writes are gated on the resolved viewer owning the idea. Deletion
//! is a two-step destructive-action guard: `request_delete` marks the
//! idea, `confirm_delete` issues the request. A per-idea busy marker
//! rejects overlapping edit/delete submissions from the same view.

use std::collections::HashSet;

use crate::api_methods::ApiMethods;
use crate::error::{ApiError, Result};
use crate::session::Viewer;

use ideaboard_protocol::model::idea::{Draft, Idea, IdeaUpdate};

pub const MSG_SIGN_IN_TO_PUBLISH: &str = "you must be signed in to publish an idea";

pub struct MyIdeasView {
    viewer: Viewer,
    ideas: Vec<Idea>,
    busy: HashSet<String>,
    pending_delete: Option<String>,
}

impl MyIdeasView {
    /// Resolve the viewer and fetch their ideas. An anonymous viewer gets
    /// an empty view with every control disabled rather than an error.
    pub async fn load(api: &ApiMethods) -> Result<MyIdeasView> {
        let viewer = api.resolve_identity().await;
        let ideas = match viewer.id() {
            Some(user_id) => api.user_ideas(user_id).await?,
            None => vec![],
        };

        Ok(MyIdeasView {
            viewer,
            ideas,
            busy: HashSet::new(),
            pending_delete: None,
        })
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn is_owner(&self, idea: &Idea) -> bool {
        self.viewer.id() == Some(idea.created_by.as_str())
    }

    pub fn is_busy(&self, idea_id: &str) -> bool {
        self.busy.contains(idea_id) || self.pending_delete.as_deref() == Some(idea_id)
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub async fn create(&mut self, api: &ApiMethods, draft: &Draft) -> Result<Idea> {
        if self.viewer.is_anonymous() {
            return Err(ApiError::Unauthorized(MSG_SIGN_IN_TO_PUBLISH.to_string()));
        }

        let idea = api.create_idea(draft).await?;
        self.ideas.push(idea.clone());
        Ok(idea)
    }

    /// Edit one of the viewer's ideas. Returns `Ok(false)` without a
    /// request when the idea is busy or mid-delete-confirmation.
    pub async fn update(
        &mut self,
        api: &ApiMethods,
        idea_id: &str,
        update: &IdeaUpdate,
    ) -> Result<bool> {
        if self.is_busy(idea_id) {
            return Ok(false);
        }
        if !self.ideas.iter().any(|idea| idea.id == idea_id) {
            return Err(ApiError::Unauthorized(
                "only the owner can edit an idea".to_string(),
            ));
        }

        self.busy.insert(idea_id.to_string());
        let result = api.update_idea(idea_id, update).await;
        self.busy.remove(idea_id);

        let updated = result?;
        if let Some(slot) = self.ideas.iter_mut().find(|idea| idea.id == idea_id) {
            *slot = updated;
        }
        Ok(true)
    }

    /// First half of the destructive-action guard. Marks the idea for
    /// deletion; nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, idea_id: &str) -> bool {
        if self.busy.contains(idea_id) || !self.ideas.iter().any(|idea| idea.id == idea_id) {
            return false;
        }
        self.pending_delete = Some(idea_id.to_string());
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second half of the guard: issue the delete for the marked idea.
    /// Returns `Ok(false)` when no deletion is pending.
    pub async fn confirm_delete(&mut self, api: &ApiMethods) -> Result<bool> {
        let idea_id = match self.pending_delete.take() {
            Some(id) => id,
            None => return Ok(false),
        };

        self.busy.insert(idea_id.clone());
        let result = api.delete_idea(&idea_id).await;
        self.busy.remove(&idea_id);

        result?;
        self.ideas.retain(|idea| idea.id != idea_id);
        Ok(true)
    }
}
