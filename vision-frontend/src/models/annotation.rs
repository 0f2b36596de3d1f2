//! Wire types for the `images:annotate` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the annotation service should read the image from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Inline image bytes, base64-encoded.
    Content(String),
    /// A `gs://bucket/object` URI.
    GcsUri(String),
}

#[derive(Debug, Serialize)]
pub struct AnnotateFileRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageRequest {
    pub image: Image,
    pub features: Vec<Feature>,
    pub custom_label_detection_models: String,
}

#[derive(Debug, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ImageUri>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUri {
    pub gcs_image_uri: String,
}

impl From<ImageSource> for Image {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::Content(content) => Image {
                content: Some(content),
                source: None,
            },
            ImageSource::GcsUri(gcs_image_uri) => Image {
                content: None,
                source: Some(ImageUri { gcs_image_uri }),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    CustomLabelDetection,
    LabelDetection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub max_results: u32,
}

impl AnnotateFileRequest {
    /// One image, custom-label detection against `model` plus generic label
    /// detection, both capped at `max_results`.
    pub fn labels(model: &str, source: ImageSource, max_results: u32) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: source.into(),
                features: vec![
                    Feature {
                        kind: FeatureType::CustomLabelDetection,
                        max_results,
                    },
                    Feature {
                        kind: FeatureType::LabelDetection,
                        max_results,
                    },
                ],
                custom_label_detection_models: model.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotateFileResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub label_annotations: Vec<LabelAnnotation>,
    #[serde(default, rename = "customlabelAnnotations", alias = "customLabelAnnotations")]
    pub custom_label_annotations: Vec<CustomLabelAnnotation>,
    /// Set by the service when this particular image could not be annotated.
    #[serde(default)]
    pub error: Option<AnnotationStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabelAnnotation {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub topicality: f32,
}

impl fmt::Display for LabelAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label [{}] - [{:.6}]", self.description, self.score)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomLabelAnnotation {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score: f32,
}

impl fmt::Display for CustomLabelAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label [{}] - [{:.6}]", self.label, self.score)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
