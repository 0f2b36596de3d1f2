use super::annotation::{AnnotateFileResponse, CustomLabelAnnotation, LabelAnnotation};
use crate::services::VisionError;

/// What the results page shows for one upload.
#[derive(Debug, Clone, Default)]
pub struct ResultModel {
    pub label_annotations: Vec<LabelAnnotation>,
    pub custom_label_annotations: Vec<CustomLabelAnnotation>,
    /// Uploaded image, base64-encoded, for re-display.
    pub image_content: String,
    /// MIME type used in the `data:` URI.
    pub content_type: String,
}

impl ResultModel {
    /// Build from the first entry of an annotate response.
    ///
    /// An empty `responses` list renders as an empty result; a per-image
    /// error status on the first entry is an error.
    pub fn from_response(
        response: AnnotateFileResponse,
        image_content: String,
        content_type: String,
    ) -> Result<Self, VisionError> {
        let Some(first) = response.responses.into_iter().next() else {
            tracing::warn!("Annotate response contained no entries; rendering empty result");
            return Ok(Self {
                image_content,
                content_type,
                ..Default::default()
            });
        };

        if let Some(status) = first.error {
            return Err(VisionError::Annotation {
                code: status.code,
                message: status.message,
            });
        }

        Ok(Self {
            label_annotations: first.label_annotations,
            custom_label_annotations: first.custom_label_annotations,
            image_content,
            content_type,
        })
    }
}
