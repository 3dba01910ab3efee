use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("date `{0}` does not match DD/MM/YYYY")]
    DateFormat(String),
    #[error("failed to decode statement, reason: `{0}`")]
    Decode(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
