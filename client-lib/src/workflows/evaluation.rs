//! Evaluation workflow for an idea detail view.
//!
//! One workflow value per view load. Identity and the idea are fetched
//! concurrently; evaluation rows and the like count only once the idea id
//! is known. A single submission is permitted per load; attempting again
//! requires a fresh workflow (the backend upserts, so the lock is a UX
//! nicety rather than a correctness mechanism).

use crate::api_methods::ApiMethods;
use crate::error::Result;
use crate::session::Viewer;

use ideaboard_protocol::model::evaluation::{Evaluation, Row, Submission, Summary};
use ideaboard_protocol::model::idea::Idea;

pub const MSG_SIGN_IN_TO_RATE: &str = "you must be signed in to rate or comment on an idea";
pub const MSG_CANNOT_RATE_OWN: &str = "cannot rate own idea";
pub const MSG_SAVED: &str = "your evaluation has been saved";

/// Lifecycle of the rating controls. `Ready` with an owning viewer never
/// admits `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Submitting,
    Submitted,
}

pub struct EvaluationWorkflow {
    idea: Idea,
    viewer: Viewer,
    rows: Vec<Row>,
    summary: Summary,
    like_count: u64,
    phase: Phase,
    disabled: bool,
    message: Option<String>,
    saved: Option<Evaluation>,
}

impl EvaluationWorkflow {
    /// Fetch everything the view needs. The idea and the viewer identity
    /// have no dependency and run concurrently; the aggregate fetches wait
    /// for the idea id. Aggregate failures degrade to empty/zero rather
    /// than failing the whole view, matching the page's behavior of keeping
    /// the idea visible.
    pub async fn load(api: &ApiMethods, idea_id: &str) -> Result<EvaluationWorkflow> {
        let (idea, viewer) = ::tokio::join!(api.get_idea(idea_id), api.resolve_identity());
        let idea = idea?;

        let (rows, like_count) =
            ::tokio::join!(api.idea_evaluations(&idea.id), api.likes_count(&idea.id));

        let rows = rows.unwrap_or_else(|error| {
            ::log::warn!("failed to load evaluations for {}: {}", idea.id, error);
            vec![]
        });
        let like_count = like_count.map(|count| count.like_count).unwrap_or_else(|error| {
            ::log::warn!("failed to load like count for {}: {}", idea.id, error);
            0
        });

        let summary = Summary::from_rows(&rows);

        Ok(EvaluationWorkflow {
            idea,
            viewer,
            rows,
            summary,
            like_count,
            phase: Phase::Ready,
            disabled: false,
            message: None,
            saved: None,
        })
    }

    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Guidance or confirmation text for the view's banner, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn saved(&self) -> Option<&Evaluation> {
        self.saved.as_ref()
    }

    pub fn is_owner(&self) -> bool {
        self.viewer.id() == Some(self.idea.created_by.as_str())
    }

    /// Whether the submit control should render enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Ready
            && !self.disabled
            && !self.viewer.is_anonymous()
            && !self.is_owner()
    }

    /// Submit the viewer's evaluation.
    ///
    /// Returns `Ok(true)` when a submission went out and was recorded.
    /// Local rejections (anonymous viewer, idea owner, already submitted)
    /// return `Ok(false)` with guidance in [`Self::message`] and never
    /// contact the backend. Request failures restore `Ready` so the user
    /// can re-trigger.
    pub async fn submit(
        &mut self,
        api: &ApiMethods,
        score: Option<u8>,
        liked: bool,
        comment: Option<String>,
    ) -> Result<bool> {
        if self.disabled || self.phase != Phase::Ready {
            return Ok(false);
        }
        if self.viewer.is_anonymous() {
            self.message = Some(MSG_SIGN_IN_TO_RATE.to_string());
            return Ok(false);
        }
        if self.is_owner() {
            self.message = Some(MSG_CANNOT_RATE_OWN.to_string());
            return Ok(false);
        }

        let user_id = match self.viewer.id() {
            Some(id) => id.to_string(),
            None => return Ok(false),
        };

        let submission = Submission {
            idea_id: self.idea.id.clone(),
            user_id,
            score,
            comment: comment.filter(|text| !text.trim().is_empty()),
            liked,
        };

        self.phase = Phase::Submitting;
        self.message = None;

        match api.submit_evaluation(&submission).await {
            Ok(saved) => {
                self.saved = Some(saved);
                self.phase = Phase::Submitted;
                self.disabled = true;
                self.message = Some(MSG_SAVED.to_string());
                self.refresh(api).await;
                Ok(true)
            }
            Err(error) => {
                self.phase = Phase::Ready;
                Err(error)
            }
        }
    }

    /// Re-fetch the authoritative rows and aggregate after a submission.
    /// A refresh failure keeps the stale view rather than discarding the
    /// successful submission.
    async fn refresh(&mut self, api: &ApiMethods) {
        match api.idea_evaluations(&self.idea.id).await {
            Ok(rows) => {
                self.summary = Summary::from_rows(&rows);
                self.rows = rows;
            }
            Err(error) => {
                ::log::warn!("failed to refresh evaluations for {}: {}", self.idea.id, error);
            }
        }
    }

    /// Independent like-count refresh, issued whenever the idea identity
    /// changes.
    pub async fn refresh_like_count(&mut self, api: &ApiMethods) -> Result<()> {
        let count = api.likes_count(&self.idea.id).await?;
        self.like_count = count.like_count;
        Ok(())
    }
}
