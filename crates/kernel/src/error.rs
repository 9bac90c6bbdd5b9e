use startrack_integrate::IntegrateError;

/// Errors raised by world-object configuration and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldObjectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("integration failed: {0}")]
    Integration(IntegrateError),
}

impl From<IntegrateError> for WorldObjectError {
    fn from(err: IntegrateError) -> Self {
        match err {
            IntegrateError::UnsupportedMethod(_) => Self::NotSupported(err.to_string()),
            IntegrateError::InvalidTolerance { .. } | IntegrateError::InvalidTime(_) => {
                Self::InvalidArgument(err.to_string())
            }
            _ => Self::Integration(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_their_kinds() {
        assert!(matches!(
            WorldObjectError::from(IntegrateError::UnsupportedMethod("rk2".into())),
            WorldObjectError::NotSupported(_)
        ));
        assert!(matches!(
            WorldObjectError::from(IntegrateError::InvalidTolerance {
                name: "atol",
                value: 0.0
            }),
            WorldObjectError::InvalidArgument(_)
        ));
    }

    #[test]
    fn solver_failures_propagate_as_integration_errors() {
        let err = WorldObjectError::from(IntegrateError::NonFinite(0.5));
        assert_eq!(err, WorldObjectError::Integration(IntegrateError::NonFinite(0.5)));
        assert!(err.to_string().contains("non-finite"));
    }
}
