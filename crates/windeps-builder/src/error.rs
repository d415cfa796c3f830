use std::fmt;

/// Run-fatal error: a human-readable message, no variant taxonomy. Every
/// failure terminates the run, so the message is the whole contract.
///
/// Call sites that can add context (a path, a URL, a command) build the
/// message with `Error::msg`; plain I/O failures where the error already says
/// everything convert via `?`.
#[derive(Debug)]
pub struct Error {
    msg: String,
}

impl Error {
    pub fn msg<M: Into<String>>(msg: M) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::msg(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
