use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::validation::{self, Check, ValidationFailure};

/// Lowest accepted score
pub const SCORE_MIN: i64 = 0;
/// Highest accepted score
pub const SCORE_MAX: i64 = 100;

/// A player score document as stored in the `Demo` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub score: i64,
    pub player_name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub last_update: DateTime<Utc>,
}

impl Demo {
    /// Build a fresh document; both timestamps share the same instant
    pub fn new(input: NewDemo, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            score: input.score,
            player_name: input.player_name,
            inserted_at: now,
            last_update: now,
        }
    }
}

/// Current time truncated to the store's millisecond precision, so values
/// read back compare equal to the ones written.
pub fn timestamp_now() -> DateTime<Utc> {
    mongodb::bson::DateTime::now().to_chrono()
}

/// `last_update` after a mutation: the current time, but always at least one
/// millisecond past the previous value.
pub fn next_update(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + chrono::Duration::milliseconds(1))
}

/// Validated input for a new document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDemo {
    pub score: i64,
    pub player_name: String,
}

/// Wire form of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoView {
    pub id: String,
    pub score: i64,
    pub player_name: String,
    pub inserted_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

impl From<Demo> for DemoView {
    fn from(demo: Demo) -> Self {
        Self {
            id: demo.id.to_hex(),
            score: demo.score,
            player_name: demo.player_name,
            inserted_at: demo.inserted_at,
            last_update: demo.last_update,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedId {
    pub id: String,
}

/// POST /v1/demo body
#[derive(Debug, Default, Deserialize)]
pub struct DemoCreateRequest {
    pub score: Option<i64>,
    pub player_name: Option<String>,
}

impl DemoCreateRequest {
    fn checks() -> [Check<Self>; 3] {
        [
            Check {
                field: "score",
                message: "score is required",
                predicate: |r| r.score.is_some(),
            },
            Check {
                field: "score",
                message: "score must be between 0 and 100",
                predicate: |r| validation::in_range(r.score, SCORE_MIN, SCORE_MAX),
            },
            Check {
                field: "player_name",
                message: "player_name is required",
                predicate: |r| validation::not_blank(r.player_name.as_deref()),
            },
        ]
    }

    pub fn validate(self) -> Result<NewDemo, ValidationFailure> {
        validation::run(&self, &Self::checks())?;
        let (Some(score), Some(player_name)) = (self.score, self.player_name) else {
            unreachable!("required checks passed with a missing field");
        };
        Ok(NewDemo { score, player_name })
    }
}

/// PUT /v1/demo/:id body; only the score is mutable
#[derive(Debug, Default, Deserialize)]
pub struct DemoUpdateRequest {
    pub score: Option<i64>,
}

impl DemoUpdateRequest {
    fn checks() -> [Check<Self>; 2] {
        [
            Check {
                field: "score",
                message: "score is required",
                predicate: |r| r.score.is_some(),
            },
            Check {
                field: "score",
                message: "score must be between 0 and 100",
                predicate: |r| validation::in_range(r.score, SCORE_MIN, SCORE_MAX),
            },
        ]
    }

    /// Returns the new score
    pub fn validate(self) -> Result<i64, ValidationFailure> {
        validation::run(&self, &Self::checks())?;
        let Some(score) = self.score else {
            unreachable!("required check passed without a score");
        };
        Ok(score)
    }
}
