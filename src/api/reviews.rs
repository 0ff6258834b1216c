use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateReviewForm, Review};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewList {
    pub list: Vec<Review>,
}

impl ApiClient {
    pub async fn house_reviews(&self, house_id: &str) -> Result<ReviewList> {
        self.get(&format!("/houses/{house_id}/reviews")).await
    }

    /// Submit a review as multipart form data: `rating`, `content`, and one
    /// `images` part per attachment.
    pub async fn create_review(&self, house_id: &str, form: &CreateReviewForm) -> Result<Review> {
        let mut multipart = Form::new()
            .text("rating", form.rating.to_string())
            .text("content", form.content.clone());
        for image in &form.images {
            multipart = multipart.part(
                "images",
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }
        self.post_multipart(&format!("/houses/{house_id}/reviews"), multipart)
            .await
    }
}
