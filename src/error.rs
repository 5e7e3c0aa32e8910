pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter sigil not followed by any name character
    EmptyParameterName,
    MissingColumn,
    InvalidIdentifier,
    DuplicateColumn,
    MissingArgument,
    UnexpectedArgument,
    Io,
    Json,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyParameterName => "empty parameter name",
            ErrorKind::MissingColumn => "missing column",
            ErrorKind::InvalidIdentifier => "invalid identifier",
            ErrorKind::DuplicateColumn => "duplicate column",
            ErrorKind::MissingArgument => "missing argument",
            ErrorKind::UnexpectedArgument => "unexpected argument",
            ErrorKind::Io => "I/O",
            ErrorKind::Json => "JSON",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Error {
        Error {
            kind,
            msg: msg.into(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Error ({}), {}", self.kind.as_str(), self.msg)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error {
            kind: ErrorKind::Io,
            msg: format!("I/O error, {}", err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        let msg = format!("JSON formatting error {}", err);
        Error {
            kind: ErrorKind::Json,
            msg,
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
        let msg = format!("JSON deserialization error {}", err);
        Error {
            kind: ErrorKind::Json,
            msg,
        }
    }
}

pub trait ErrorContext<T> {
    fn context<F>(self, context_add: F) -> Result<T>
    where
        F: FnOnce() -> String;
    fn context_str(self, context_add: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<F>(self, context_add: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| append_context(err.into(), &context_add()))
    }
    fn context_str(self, context_add: &str) -> Result<T> {
        self.map_err(|err| append_context(err.into(), context_add))
    }
}

fn append_context(err: Error, context_add: &str) -> Error {
    let mut msg = err.msg;
    msg.push_str(", ");
    msg.push_str(context_add);
    Error {
        kind: err.kind,
        msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind_and_appends_message() {
        let res: std::result::Result<(), Error> =
            Err(Error::new(ErrorKind::MissingColumn, "Column x not found"));
        let err = res.context_str("while building users").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingColumn);
        assert_eq!(err.msg, "Column x not found, while building users");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        let res: std::result::Result<(), std::io::Error> = Err(io);
        let err = res.context(|| "reading tables.json".to_string()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.msg.ends_with(", reading tables.json"));
    }
}
