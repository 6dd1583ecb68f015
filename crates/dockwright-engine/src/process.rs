#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("{program} not found on PATH")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} {args:?} failed: {status}")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: String,
    },

    #[error("{program} output was not valid UTF-8")]
    InvalidUtf8 {
        program: String,
        source: std::string::FromUtf8Error,
    },

    #[error("failed to write to {program} stdin")]
    StdinWrite {
        program: String,
        source: std::io::Error,
    },
}
