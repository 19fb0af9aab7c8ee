pub mod models;
pub mod error;
pub mod types;

pub use error::{Error, PredictError};
pub use models::Classifier;
pub use types::{RawLabel, Record, Submission, TEXT_COLUMN, TITLE_COLUMN};

pub type Result<T> = std::result::Result<T, Error>;
