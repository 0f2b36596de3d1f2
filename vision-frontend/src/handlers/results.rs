use crate::models::{ImageSource, ResultModel};
use crate::AppState;
use askama::Template;
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
};
use base64::{engine::general_purpose, Engine as _};
use service_core::error::AppError;
use thiserror::Error;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "imageToProcess";

/// Upper bound on the whole multipart body.
pub const MAX_UPLOAD_BYTES: usize = 32 << 20;

const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Request is not a multipart form: {0}")]
    Malformed(#[from] MultipartRejection),

    #[error("Failed to read multipart body: {0}")]
    Read(#[from] MultipartError),

    #[error("Form field `imageToProcess` is missing")]
    MissingField,
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::internal(err, "Could not read file upload")
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub result: ResultModel,
}

struct Upload {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// Find the image field and read it fully; other fields are skipped, as is
/// an image field sent without a filename (a plain form value, not a file).
async fn read_upload(mut multipart: Multipart) -> Result<Upload, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();
        let data = field.bytes().await?;

        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }

    Err(UploadError::MissingField)
}

/// `GET /results` has nothing to show on its own.
pub async fn results_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

/// `POST /results`: label the uploaded image and render the results page.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ResultsTemplate, AppError> {
    let upload = read_upload(multipart.map_err(UploadError::from)?).await?;

    tracing::info!(
        file_name = %upload.file_name,
        content_type = %upload.content_type,
        size = upload.data.len(),
        "Image upload received"
    );

    let image_content = general_purpose::STANDARD.encode(&upload.data);

    let channel = state
        .vision_client
        .authenticate(&state.settings.service_account())
        .await?;
    let response = state
        .vision_client
        .annotate(
            &channel,
            &state.settings.model,
            ImageSource::Content(image_content.clone()),
        )
        .await?;

    let result = ResultModel::from_response(response, image_content, upload.content_type)?;

    tracing::info!(
        labels = result.label_annotations.len(),
        custom_labels = result.custom_label_annotations.len(),
        "Image annotated"
    );

    Ok(ResultsTemplate { result })
}
