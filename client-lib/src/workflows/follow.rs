//! Follow relationship view for a user profile.
//!
//! The toggle applies an optimistic update: the local followers list is
//! mutated before the request goes out so the control flips immediately.
//! A snapshot of the previous list is kept and restored if the request
//! fails, reconciling the view with authoritative state.

use crate::api_methods::ApiMethods;
use crate::error::Result;
use crate::session::Viewer;

pub const MSG_SIGN_IN_TO_FOLLOW: &str = "you must be signed in to follow users";

pub struct FollowView {
    profile_username: String,
    viewer: Viewer,
    followers: Vec<String>,
    following: Vec<String>,
    busy: bool,
    message: Option<String>,
}

impl FollowView {
    /// Fetch the profile's follower graph and resolve the viewer, all
    /// concurrently. A missing profile propagates as an error; identity
    /// failure degrades to anonymous.
    pub async fn load(api: &ApiMethods, profile_username: &str) -> Result<FollowView> {
        let (followers, following, viewer) = ::tokio::join!(
            api.followers(profile_username),
            api.following(profile_username),
            api.resolve_identity(),
        );

        Ok(FollowView {
            profile_username: profile_username.to_string(),
            viewer,
            followers: followers?,
            following: following?,
            busy: false,
            message: None,
        })
    }

    pub fn profile_username(&self) -> &str {
        &self.profile_username
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn followers(&self) -> &[String] {
        &self.followers
    }

    pub fn following(&self) -> &[String] {
        &self.following
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn is_self(&self) -> bool {
        self.viewer.username() == Some(self.profile_username.as_str())
    }

    /// Membership test on the followers list. Always false for an
    /// anonymous viewer.
    pub fn is_following(&self) -> bool {
        match self.viewer.username() {
            Some(username) => self.followers.iter().any(|follower| follower == username),
            None => false,
        }
    }

    /// Whether a follow/unfollow control renders at all. No self-follow UI
    /// is shown on one's own profile.
    pub fn shows_follow_control(&self) -> bool {
        !self.is_self()
    }

    /// Flip the follow state. Returns `Ok(true)` when a request went out
    /// and succeeded. An anonymous viewer gets a blocking prompt and no
    /// request; toggling one's own profile is a no-op. On request failure
    /// the optimistic mutation is rolled back and the error propagates to
    /// the caller's banner.
    pub async fn toggle(&mut self, api: &ApiMethods) -> Result<bool> {
        if self.busy {
            return Ok(false);
        }
        if self.viewer.is_anonymous() {
            self.message = Some(MSG_SIGN_IN_TO_FOLLOW.to_string());
            return Ok(false);
        }
        if self.is_self() {
            return Ok(false);
        }

        let viewer_username = match self.viewer.username() {
            Some(username) => username.to_string(),
            None => return Ok(false),
        };

        let was_following = self.is_following();
        let snapshot = self.followers.clone();

        if was_following {
            self.followers.retain(|follower| follower != &viewer_username);
        } else {
            self.followers.push(viewer_username);
        }

        self.busy = true;
        self.message = None;
        let result = if was_following {
            api.unfollow(&self.profile_username).await
        } else {
            api.follow(&self.profile_username).await
        };
        self.busy = false;

        match result {
            Ok(_) => Ok(true),
            Err(error) => {
                self.followers = snapshot;
                Err(error)
            }
        }
    }
}
