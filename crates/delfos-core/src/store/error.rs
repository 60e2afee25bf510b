use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a record for {user_email} session {session_id} already exists")]
    AlreadyExists {
        user_email: String,
        session_id: String,
    },

    #[error("no record for {user_email} session {session_id}")]
    NotFound {
        user_email: String,
        session_id: String,
    },

    #[error("{0:?} cannot be part of a session key")]
    InvalidKey(String),

    #[error("session record {0} is malformed")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
