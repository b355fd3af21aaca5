/// Amazon Forecast 服务调用错误
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("resource already exists: {0}")]
    ResourceAlreadyExists(String),
    #[error("resource in use: {0}")]
    ResourceInUse(String),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
    #[error("invalid next token: {0}")]
    InvalidNextToken(String),
    #[error("service error {code}: {message}")]
    Api { code: String, message: String },
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// 根据 `__type`（如 `com.amazonaws.forecast#ResourceNotFoundException`）构造错误
    pub fn from_error_type(error_type: &str, message: String) -> Self {
        let code = error_type.rsplit('#').next().unwrap_or(error_type);
        let code = code.split(':').next().unwrap_or(code);
        match code {
            "ResourceAlreadyExistsException" => ServiceError::ResourceAlreadyExists(message),
            "ResourceInUseException" => ServiceError::ResourceInUse(message),
            "ResourceNotFoundException" => ServiceError::ResourceNotFound(message),
            "InvalidInputException" => ServiceError::InvalidInput(message),
            "LimitExceededException" => ServiceError::LimitExceeded(message),
            "InvalidNextTokenException" => ServiceError::InvalidNextToken(message),
            other => ServiceError::Api {
                code: other.to_string(),
                message,
            },
        }
    }
}
