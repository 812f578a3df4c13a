use chrono::{TimeZone, Utc};

pub fn make_test_registration(username: &str) -> crate::model::user::Registration {
    crate::model::user::Registration {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "lozinka123".to_string(),
        title: None,
        description: None,
        location: None,
        skills: vec![],
    }
}

pub fn make_test_profile(id: &str, username: &str) -> crate::model::user::Profile {
    crate::model::user::Profile {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        title: None,
        description: None,
        location: None,
        skills: vec![],
        role: crate::model::user::Role::User,
        followers: vec![],
        following: vec![],
    }
}

pub fn make_test_idea(id: &str, created_by: &str) -> crate::model::idea::Idea {
    crate::model::idea::Idea {
        id: id.to_string(),
        title: "Pametna korpa".to_string(),
        description: "Korpa koja sama naručuje namirnice".to_string(),
        market: "Maloprodaja".to_string(),
        target_audience: "Domaćinstva".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
        created_by: created_by.to_string(),
        author_username: None,
    }
}

pub fn make_test_row(
    username: &str,
    score: Option<i64>,
    average: f64,
) -> crate::model::evaluation::Row {
    crate::model::evaluation::Row {
        username: username.to_string(),
        idea_title: "Pametna korpa".to_string(),
        score,
        comment: String::new(),
        average,
    }
}

pub fn make_test_evaluation(
    idea_id: &str,
    user_id: &str,
    score: Option<u8>,
) -> crate::model::evaluation::Evaluation {
    crate::model::evaluation::Evaluation {
        id: format!("eval-{}-{}", idea_id, user_id),
        idea_id: idea_id.to_string(),
        user_id: user_id.to_string(),
        score,
        comment: None,
        liked: false,
    }
}
