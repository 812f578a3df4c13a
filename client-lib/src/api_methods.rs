use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::{Session, Viewer};

use ideaboard_protocol::model::auth::{Acknowledgement, RegisterResponse, Token};
use ideaboard_protocol::model::evaluation::{
    Evaluation, LikeCount, LikedUsernames, Row, Submission, Summary,
};
use ideaboard_protocol::model::idea::{Draft, Filter, Idea, IdeaUpdate};
use ideaboard_protocol::model::user::{
    Info, PopularCreatorIdea, Profile, ProfileUpdate, PublicProfile, Registration,
};
use ideaboard_protocol::model::{evaluation, user};

/// Shape of the backend's structured error body. Decoded defensively:
/// anything that is not `{"detail": "<string>"}` falls back to the
/// per-operation message.
#[derive(::serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    detail: Option<::serde_json::Value>,
}

/// Typed client over the community backend.
///
/// One method per endpoint. Every request except login carries
/// `Authorization: Bearer <token>` when the shared [`Session`] holds one.
/// No retries; a failure is terminal for that user action.
pub struct ApiMethods {
    base_url: String,
    client: Client,
    session: Arc<Session>,
}

impl ApiMethods {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<ApiMethods> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|error| ApiError::Network(error.to_string()))?;

        Ok(ApiMethods {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn check_response(op: &str, fallback: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorDetail>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| detail.as_str().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());

        ::log::warn!("{} failed with status {}: {}", op, status, message);

        Err(ApiError::Request {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }

    /// The backend answers 404 for empty collections; the client treats
    /// that as an empty list rather than an error.
    fn empty_on_not_found<T>(result: Result<Vec<T>>) -> Result<Vec<T>> {
        match result {
            Err(ApiError::Request { status: 404, .. }) => Ok(vec![]),
            other => other,
        }
    }

    // ==================== Auth ====================

    pub async fn register(&self, registration: &Registration) -> Result<RegisterResponse> {
        user::validate_registration(registration)
            .map_err(|error| ApiError::Validation(error.to_string()))?;

        let response = self
            .request_builder(Method::POST, "/auth/register")
            .json(registration)
            .send()
            .await?;

        let response =
            Self::check_response("register", "error registering account", response).await?;
        Self::decode(response).await
    }

    /// OAuth2-style password grant; the form's username field carries the
    /// email address. The returned token is stored on the shared session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token> {
        let form = [
            ("username", email),
            ("password", password),
            ("grant_type", "password"),
        ];

        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .form(&form)
            .send()
            .await?;

        let response = Self::check_response("login", "error signing in", response).await?;
        let token: Token = Self::decode(response).await?;
        self.session.set_token(&token.access_token);
        Ok(token)
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    // ==================== Users ====================

    pub async fn get_all_users(&self) -> Result<Vec<PublicProfile>> {
        let response = self.request_builder(Method::GET, "/users/").send().await?;
        let response =
            Self::check_response("getAllUsers", "error loading users", response).await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    pub async fn get_me(&self) -> Result<Profile> {
        let response = self.request_builder(Method::GET, "/users/me").send().await?;
        let response = Self::check_response("getMe", "error loading profile", response).await?;
        Self::decode(response).await
    }

    /// Resolve the current viewer. Any failure, 401 or network alike,
    /// degrades to `Viewer::Anonymous` so public views stay usable while
    /// logged out.
    pub async fn resolve_identity(&self) -> Viewer {
        match self.get_me().await {
            Ok(profile) => Viewer::User {
                id: profile.id,
                username: profile.username,
            },
            Err(error) => {
                ::log::debug!(
                    "identity resolution failed, treating viewer as anonymous: {}",
                    error
                );
                Viewer::Anonymous
            }
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Profile> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/users/{}", urlencoding::encode(user_id)),
            )
            .send()
            .await?;
        let response = Self::check_response("getUser", "error loading user", response).await?;
        Self::decode(response).await
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<Profile> {
        user::validate_update(update).map_err(|error| ApiError::Validation(error.to_string()))?;

        let response = self
            .request_builder(Method::PATCH, "/users/updateMe")
            .json(update)
            .send()
            .await?;
        let response =
            Self::check_response("updateMe", "error updating profile", response).await?;
        Self::decode(response).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let response = self
            .request_builder(
                Method::DELETE,
                &format!("/users/{}", urlencoding::encode(user_id)),
            )
            .send()
            .await?;
        Self::check_response("deleteUser", "error deleting user", response).await?;
        Ok(())
    }

    pub async fn follow(&self, username: &str) -> Result<Acknowledgement> {
        let response = self
            .request_builder(
                Method::POST,
                &format!("/users/follow/{}", urlencoding::encode(username)),
            )
            .send()
            .await?;
        let response = Self::check_response("follow", "error following user", response).await?;
        Self::decode(response).await
    }

    pub async fn unfollow(&self, username: &str) -> Result<Acknowledgement> {
        let response = self
            .request_builder(
                Method::POST,
                &format!("/users/unfollow/{}", urlencoding::encode(username)),
            )
            .send()
            .await?;
        let response =
            Self::check_response("unfollow", "error unfollowing user", response).await?;
        Self::decode(response).await
    }

    pub async fn followers(&self, username: &str) -> Result<Vec<String>> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/users/followers/{}", urlencoding::encode(username)),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getFollowers", "error loading followers", response).await?;
        Self::decode(response).await
    }

    pub async fn following(&self, username: &str) -> Result<Vec<String>> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/users/following/{}", urlencoding::encode(username)),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getFollowing", "error loading followed users", response).await?;
        Self::decode(response).await
    }

    pub async fn user_info(&self, username: &str) -> Result<Info> {
        let response = self
            .request_builder(
                Method::GET,
                &format!(
                    "/users/user-info/by-username/{}",
                    urlencoding::encode(username)
                ),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getUserInfo", "error loading user info", response).await?;
        Self::decode(response).await
    }

    pub async fn ideas_by_popular_creators(&self) -> Result<Vec<PopularCreatorIdea>> {
        let response = self
            .request_builder(Method::GET, "/users/ideas/by-popular-creators")
            .send()
            .await?;
        let response = Self::check_response(
            "getIdeasByPopularCreators",
            "error loading popular creators",
            response,
        )
        .await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    // ==================== Ideas ====================

    pub async fn get_all_ideas(&self) -> Result<Vec<Idea>> {
        let response = self.request_builder(Method::GET, "/ideas/").send().await?;
        let response =
            Self::check_response("getAllIdeas", "error loading ideas", response).await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    pub async fn create_idea(&self, draft: &Draft) -> Result<Idea> {
        let response = self
            .request_builder(Method::POST, "/ideas/")
            .json(draft)
            .send()
            .await?;
        let response =
            Self::check_response("createIdea", "error creating idea", response).await?;
        Self::decode(response).await
    }

    pub async fn get_idea(&self, idea_id: &str) -> Result<Idea> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/ideas/{}", urlencoding::encode(idea_id)),
            )
            .send()
            .await?;
        let response = Self::check_response("getIdea", "error loading idea", response).await?;
        Self::decode(response).await
    }

    pub async fn update_idea(&self, idea_id: &str, update: &IdeaUpdate) -> Result<Idea> {
        if update.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_string()));
        }

        let response = self
            .request_builder(
                Method::PATCH,
                &format!("/ideas/{}", urlencoding::encode(idea_id)),
            )
            .json(update)
            .send()
            .await?;
        let response =
            Self::check_response("updateIdea", "error updating idea", response).await?;
        Self::decode(response).await
    }

    pub async fn delete_idea(&self, idea_id: &str) -> Result<()> {
        let response = self
            .request_builder(
                Method::DELETE,
                &format!("/ideas/{}", urlencoding::encode(idea_id)),
            )
            .send()
            .await?;
        Self::check_response("deleteIdea", "error deleting idea", response).await?;
        Ok(())
    }

    pub async fn user_ideas(&self, user_id: &str) -> Result<Vec<Idea>> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/ideas/userideas/{}/", urlencoding::encode(user_id)),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getUserIdeas", "error loading user's ideas", response).await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    pub async fn filter_ideas(&self, filter: &Filter) -> Result<Vec<Idea>> {
        let response = self
            .request_builder(Method::GET, "/ideas/filter-ideje/")
            .query(&filter.to_query_pairs())
            .send()
            .await?;
        let response =
            Self::check_response("filterIdeas", "error filtering ideas", response).await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    // ==================== Evaluations ====================

    /// Submit a rating/like/comment. The backend upserts on the
    /// (idea_id, user_id) pair, so repeating a submission replaces the
    /// previous one rather than duplicating it.
    pub async fn submit_evaluation(&self, submission: &Submission) -> Result<Evaluation> {
        if let Some(score) = submission.score {
            evaluation::validate_score(score)
                .map_err(|error| ApiError::Validation(error.to_string()))?;
        }

        let response = self
            .request_builder(Method::POST, "/evaluations/")
            .json(submission)
            .send()
            .await?;
        let response =
            Self::check_response("submitEvaluation", "error evaluating idea", response).await?;
        Self::decode(response).await
    }

    pub async fn get_all_evaluations(&self) -> Result<Vec<Evaluation>> {
        let response = self
            .request_builder(Method::GET, "/evaluations/getall/")
            .send()
            .await?;
        let response =
            Self::check_response("getAllEvaluations", "error loading evaluations", response)
                .await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    /// All evaluation rows for an idea. An idea with no evaluations yields
    /// an empty list, not an error.
    pub async fn idea_evaluations(&self, idea_id: &str) -> Result<Vec<Row>> {
        let response = self
            .request_builder(
                Method::GET,
                &format!(
                    "/evaluations/vratisveocene/{}",
                    urlencoding::encode(idea_id)
                ),
            )
            .send()
            .await?;
        let response = Self::check_response(
            "getIdeaEvaluations",
            "error loading idea evaluations",
            response,
        )
        .await?;
        Self::empty_on_not_found(Self::decode(response).await)
    }

    /// Summary statistics for an idea as a capability of its own, decoupled
    /// from the row listing. The average comes from the backend's embedded
    /// aggregate field and is never recomputed client-side.
    pub async fn evaluation_summary(&self, idea_id: &str) -> Result<Summary> {
        let rows = self.idea_evaluations(idea_id).await?;
        Ok(Summary::from_rows(&rows))
    }

    pub async fn like(&self, user_id: &str, idea_id: &str) -> Result<()> {
        let response = self
            .request_builder(Method::POST, "/evaluations/like")
            .query(&[("user_id", user_id), ("idea_id", idea_id)])
            .send()
            .await?;
        Self::check_response("likeIdea", "error liking idea", response).await?;
        Ok(())
    }

    pub async fn likes_count(&self, idea_id: &str) -> Result<LikeCount> {
        let response = self
            .request_builder(
                Method::GET,
                &format!("/evaluations/likes/count/{}", urlencoding::encode(idea_id)),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getLikesCount", "error loading like count", response).await?;
        Self::decode(response).await
    }

    pub async fn liked_usernames(&self, idea_id: &str) -> Result<LikedUsernames> {
        let response = self
            .request_builder(
                Method::GET,
                &format!(
                    "/evaluations/likes/usernames/{}",
                    urlencoding::encode(idea_id)
                ),
            )
            .send()
            .await?;
        let response =
            Self::check_response("getLikedUsernames", "error loading likes", response).await?;
        Self::decode(response).await
    }
}
