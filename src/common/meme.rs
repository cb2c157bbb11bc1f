use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A finished generation as returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct MemeRecord {
    pub id: Uuid,
    pub text: String,
    pub image_url: String,
    pub visual_concept: String,
    pub template: String,
    pub created_at: DateTime<Utc>,
}
