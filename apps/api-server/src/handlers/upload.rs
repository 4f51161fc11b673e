//! Multipart post form parsing.

use std::collections::HashMap;

use actix_multipart::Multipart;
use blogfeed_core::domain::{ImageUpload, PostInput};
use blogfeed_core::error::FieldErrors;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use futures::StreamExt;

use crate::middleware::error::{AppError, AppResult};

const FEATURE_IMAGE: &str = "featureImage";

/// A submitted create/edit post form.
pub struct PostForm {
    pub input: PostInput,
    /// `None` when no file was chosen.
    pub image: Option<ImageUpload>,
}

/// Buffer the multipart body, failing with 413 once it exceeds `max_bytes`.
pub async fn read_post_form(mut payload: Multipart, max_bytes: usize) -> AppResult<PostForm> {
    let mut text: HashMap<String, String> = HashMap::new();
    let mut image = None;
    let mut total_bytes: usize = 0;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes =
                chunk.map_err(|e| AppError::BadRequest(format!("Upload read error: {}", e)))?;
            total_bytes += bytes.len();
            if total_bytes > max_bytes {
                tracing::warn!(limit = max_bytes, "Rejected oversized upload");
                return Err(AppError::PayloadTooLarge(format!(
                    "Upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            data.extend_from_slice(&bytes);
        }

        if name == FEATURE_IMAGE {
            // Browsers send an empty, unnamed part when no file was picked.
            image = file_name
                .filter(|n| !n.is_empty())
                .map(|n| ImageUpload::new(n, data));
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| AppError::BadRequest(format!("Field {} is not valid UTF-8", name)))?;
            text.insert(name, value);
        }
    }

    Ok(PostForm {
        input: post_input(&text)?,
        image,
    })
}

fn post_input(text: &HashMap<String, String>) -> AppResult<PostInput> {
    let field = |key: &str| text.get(key).cloned().unwrap_or_default();

    let published_date = match text.get("publishedDate").map(|s| s.trim()) {
        None | Some("") => None,
        Some(raw) => Some(parse_published_date(raw).ok_or_else(|| {
            AppError::Validation(FieldErrors::single(
                "publishedDate",
                "Published Date is not a valid date",
            ))
        })?),
    };

    Ok(PostInput {
        title: field("title"),
        content: field("content"),
        author: field("author"),
        published_date,
        // Missing or non-numeric reads as "no category selected".
        category_id: text
            .get("categoryId")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0),
    })
}

/// RFC 3339, or the `datetime-local` / `date` input formats taken as UTC.
fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
