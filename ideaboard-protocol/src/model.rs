#![allow(dead_code)]

pub mod timestamp {
    //! The backend emits timestamps either as RFC 3339 or as a bare ISO
    //! string without an offset (Mongo round-trips both). Decode defensively,
    //! always serialize RFC 3339.

    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

pub mod user {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        #[default]
        User,
        Admin,
    }

    /// Payload for `POST /auth/register`.
    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    pub struct Registration {
        pub username: String,
        pub email: String,
        pub password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        #[serde(default)]
        pub skills: Vec<String>,
    }

    /// A full user record as returned by `/users/me` and `/users/{id}`.
    ///
    /// `followers` and `following` carry usernames; membership is
    /// meaningful, order is not.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Profile {
        #[serde(rename = "_id")]
        pub id: String,
        pub username: String,
        pub email: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub skills: Vec<String>,
        #[serde(default)]
        pub role: Role,
        #[serde(default)]
        pub followers: Vec<String>,
        #[serde(default)]
        pub following: Vec<String>,
    }

    /// Public listing entry from `GET /users/` (no id, no follower graph).
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct PublicProfile {
        pub username: String,
        pub email: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub skills: Vec<String>,
    }

    /// Partial update for `PATCH /users/updateMe`. Absent fields are left
    /// untouched by the backend, so `None` must not serialize.
    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    pub struct ProfileUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub username: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub password: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub skills: Option<Vec<String>>,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct IdeaRef {
        pub id: String,
        pub title: String,
    }

    /// Profile page payload from `GET /users/user-info/by-username/{username}`.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Info {
        pub username: String,
        pub email: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub ideas: Vec<IdeaRef>,
        #[serde(default)]
        pub followers: Vec<String>,
        #[serde(default)]
        pub following: Vec<String>,
    }

    /// Row of the popular-creators feed, ordered by follower count.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct PopularCreatorIdea {
        pub id: String,
        pub title: String,
        pub creator: String,
        pub followers_count: u64,
    }

    pub const USERNAME_MIN: usize = 3;
    pub const USERNAME_MAX: usize = 30;
    pub const PASSWORD_MIN: usize = 6;

    /// Field rules mirrored from the backend's registration schema, checked
    /// client-side so violations never reach the wire.
    pub fn validate_registration(registration: &Registration) -> ::anyhow::Result<()> {
        let username_len = registration.username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
            ::anyhow::bail!(
                "username must be between {} and {} characters",
                USERNAME_MIN,
                USERNAME_MAX
            );
        }
        if !registration.email.contains('@') {
            ::anyhow::bail!("email address is not valid");
        }
        if registration.password.chars().count() < PASSWORD_MIN {
            ::anyhow::bail!("password must be at least {} characters", PASSWORD_MIN);
        }
        Ok(())
    }

    pub fn validate_update(update: &ProfileUpdate) -> ::anyhow::Result<()> {
        if let Some(username) = &update.username {
            let len = username.chars().count();
            if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
                ::anyhow::bail!(
                    "username must be between {} and {} characters",
                    USERNAME_MIN,
                    USERNAME_MAX
                );
            }
        }
        if let Some(password) = &update.password {
            if password.chars().count() < PASSWORD_MIN {
                ::anyhow::bail!("password must be at least {} characters", PASSWORD_MIN);
            }
        }
        Ok(())
    }
}

pub mod idea {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    /// Payload for `POST /ideas/`. The backend stamps `created_at` and
    /// `created_by` itself.
    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    pub struct Draft {
        pub title: String,
        pub description: String,
        pub market: String,
        pub target_audience: String,
    }

    /// A stored idea. Exactly one owner (`created_by`); only the owner may
    /// edit or delete it.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Idea {
        #[serde(rename = "_id")]
        pub id: String,
        pub title: String,
        pub description: String,
        pub market: String,
        pub target_audience: String,
        #[serde(with = "crate::model::timestamp")]
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        #[serde(default)]
        pub author_username: Option<String>,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    pub struct IdeaUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub market: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub target_audience: Option<String>,
    }

    impl IdeaUpdate {
        pub fn is_empty(&self) -> bool {
            self.title.is_none()
                && self.description.is_none()
                && self.market.is_none()
                && self.target_audience.is_none()
        }
    }

    /// Query filters for `GET /ideas/filter-ideje/`.
    #[derive(Debug, Clone, Default)]
    pub struct Filter {
        pub min_created_at: Option<DateTime<Utc>>,
        pub max_created_at: Option<DateTime<Utc>>,
        pub min_likes: Option<u64>,
        pub min_score: Option<f64>,
        pub min_followers: Option<u64>,
    }

    impl Filter {
        pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
            let mut pairs = Vec::new();
            if let Some(min) = &self.min_created_at {
                pairs.push(("min_created_at", min.to_rfc3339()));
            }
            if let Some(max) = &self.max_created_at {
                pairs.push(("max_created_at", max.to_rfc3339()));
            }
            if let Some(likes) = self.min_likes {
                pairs.push(("min_likes", likes.to_string()));
            }
            if let Some(score) = self.min_score {
                pairs.push(("min_score", score.to_string()));
            }
            if let Some(followers) = self.min_followers {
                pairs.push(("min_followers", followers.to_string()));
            }
            pairs
        }
    }
}

pub mod evaluation {
    use serde::{Deserialize, Serialize};

    pub const SCORE_MIN: u8 = 1;
    pub const SCORE_MAX: u8 = 5;

    /// Payload for `POST /evaluations/`. The backend upserts on the
    /// (idea_id, user_id) pair, so resubmitting replaces rather than
    /// duplicates.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Submission {
        pub idea_id: String,
        pub user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub score: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub comment: Option<String>,
        pub liked: bool,
    }

    /// A stored evaluation record.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Evaluation {
        #[serde(rename = "_id")]
        pub id: String,
        pub idea_id: String,
        pub user_id: String,
        #[serde(default)]
        pub score: Option<u8>,
        #[serde(default)]
        pub comment: Option<String>,
        #[serde(default)]
        pub liked: bool,
    }

    /// One entry of `GET /evaluations/vratisveocene/{idea_id}`. The backend
    /// keys these in Serbian and repeats the authoritative average for the
    /// whole idea on every row.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Row {
        #[serde(rename = "Korisnik")]
        pub username: String,
        #[serde(rename = "Naziv ideje")]
        pub idea_title: String,
        #[serde(rename = "Ocena", default)]
        pub score: Option<i64>,
        #[serde(rename = "Komentar", default)]
        pub comment: String,
        #[serde(rename = "Ukupna ocena")]
        pub average: f64,
    }

    /// Summary statistics for an idea, decoupled from the row listing.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Summary {
        pub average: f64,
        pub count: usize,
    }

    impl Summary {
        /// The embedded aggregate is authoritative and may cover scores with
        /// no accompanying comment (or vice versa), so it is read off the
        /// rows rather than recomputed. An empty list means average 0.
        pub fn from_rows(rows: &[Row]) -> Summary {
            Summary {
                average: rows.first().map(|row| row.average).unwrap_or(0.0),
                count: rows.len(),
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct LikeCount {
        pub idea_id: String,
        pub like_count: u64,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct LikedUsernames {
        pub idea_id: String,
        pub liked_usernames: Vec<String>,
    }

    pub fn validate_score(score: u8) -> ::anyhow::Result<()> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            ::anyhow::bail!("score must be between {} and {}", SCORE_MIN, SCORE_MAX);
        }
        Ok(())
    }
}

pub mod auth {
    use serde::{Deserialize, Serialize};

    /// Bearer token from `POST /auth/login`.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Token {
        pub access_token: String,
        pub token_type: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct RegisterResponse {
        pub msg: String,
        pub user_id: String,
    }

    /// Generic `{"msg": ...}` acknowledgement (follow/unfollow).
    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Acknowledgement {
        pub msg: String,
    }
}
