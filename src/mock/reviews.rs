use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::{ApiError, MockState};
use crate::api::reviews::ReviewList;
use crate::models::{Review, Reviewer, User};

pub async fn list_for_house(
    State(state): State<Arc<MockState>>,
    Path(house_id): Path<String>,
) -> Json<ReviewList> {
    let list = state
        .reviews
        .read()
        .iter()
        .filter(|r| r.house_id == house_id)
        .cloned()
        .collect();
    Json(ReviewList { list })
}

/// Accepts the multipart submission: `rating`, `content`, and repeated
/// `images` parts. Uploaded files are not stored; each image becomes a
/// pseudo-URL carrying its original file name.
pub async fn create(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(house_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Review>, ApiError> {
    if !state.houses.read().iter().any(|h| h.id == house_id) {
        return Err(ApiError::not_found("House not found"));
    }

    let mut rating: Option<u8> = None;
    let mut content: Option<String> = None;
    let mut images: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("rating") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable rating: {e}")))?;
                rating = text.trim().parse::<u8>().ok();
            }
            Some("content") => {
                content = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Unreadable content: {e}")))?,
                );
            }
            Some("images") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("upload-{}", images.len() + 1));
                // Drain the bytes so the stream stays consistent.
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable image: {e}")))?;
                images.push(format!("upload://{name}"));
            }
            _ => {}
        }
    }

    let rating = rating
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| ApiError::validation("Rating must be between 1 and 5"))?;
    let content = content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Review content is required"))?;

    let review = Review {
        id: Uuid::new_v4().to_string(),
        user_id: user.id,
        house_id,
        rating,
        content,
        images: if images.is_empty() {
            None
        } else {
            Some(images)
        },
        created_at: Utc::now(),
        user: Reviewer {
            username: user.username,
            avatar: user.avatar.unwrap_or_default(),
        },
    };
    state.reviews.write().push(review.clone());
    Ok(Json(review))
}
