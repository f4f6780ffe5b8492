use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid configuration: {detail}")]
    InvalidConfiguration { detail: String },

    #[error("empty index range: lo={lo}, hi={hi}")]
    EmptyRange { lo: f64, hi: f64 },

    #[error("unsupported interval key: {key:?}")]
    UnsupportedInterval { key: String },

    #[error("local timezone discovery unavailable: {detail}")]
    UnsupportedPlatform { detail: String },
}
