pub mod annotation;
pub mod results;

pub use annotation::{
    AnnotateFileRequest, AnnotateFileResponse, CustomLabelAnnotation, ImageSource, LabelAnnotation,
};
pub use results::ResultModel;
