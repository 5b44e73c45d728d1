use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn capacity_exhausted(capacity: usize) -> Error {
        Error(ErrorKind::CapacityExhausted { capacity }.into())
    }

    /// Returns `true` if this error signals a full fixed-capacity container.
    pub fn is_capacity_exhausted(&self) -> bool {
        matches!(self.kind(), ErrorKind::CapacityExhausted { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("no space left: all {capacity} slots are in use")]
    CapacityExhausted { capacity: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_roundtrip() {
        let err = Error::invalid_arg("block_width", "must be a power of two");
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert_eq!(
            err.to_string(),
            "invalid argument block_width: must be a power of two"
        );
        assert!(!err.is_capacity_exhausted());

        let err = Error::capacity_exhausted(512);
        assert!(err.is_capacity_exhausted());
        match err.into_kind() {
            ErrorKind::CapacityExhausted { capacity } => assert_eq!(capacity, 512),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_verify_arg_macro() {
        fn check(width: u32) -> crate::Result<()> {
            crate::verify_arg!(width, width.is_power_of_two());
            Ok(())
        }

        assert!(check(64).is_ok());
        let err = check(48).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "width");
                assert!(message.contains("is_power_of_two"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
