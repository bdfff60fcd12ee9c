use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json document error: {0}")]
    Document(#[from] serde_json::Error),
    #[error("error in communication with TP-Link cloud: error_code: {code}, msg: {msg}")]
    Cloud { code: i64, msg: String },
}
