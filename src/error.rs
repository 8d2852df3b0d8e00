use crate::landmark::LandmarkKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected at least {expected} landmarks, got {got}")]
    ShortPose { expected: usize, got: usize },

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("landmark {0:?} has a NaN coordinate")]
    NanLandmark(LandmarkKind, #[source] Box<Error>),

    #[error("failed to open frame input: {1:?}")]
    OpenInput(#[source] std::io::Error, std::path::PathBuf),

    #[error("failed to read frame at line {1}")]
    ReadFrame(#[source] std::io::Error, usize),

    #[error("failed to parse frame at line {1}")]
    ParseFrame(#[source] serde_json::Error, usize),

    #[error("invalid frame timestamp {0} at line {1}")]
    InvalidTimestamp(f64, usize),

    #[error("failed to serialize event")]
    SerializeEvent(#[source] serde_json::Error),

    #[error("failed to write event")]
    WriteEvent(#[source] std::io::Error),
}
