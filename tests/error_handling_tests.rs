//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable codes
//! - Error conversions into the umbrella type work
//! - Error matching allows hosts to handle specific cases

use rowsift::prelude::*;

mod code_tests {
    use super::*;

    #[test]
    fn test_edit_error_codes() {
        assert_eq!(EditError::NotOpen.error_code(), "SESSION_NOT_OPEN");
        assert_eq!(
            EditError::UnknownColumn { column: "x".into() }.error_code(),
            "UNKNOWN_FILTER_COLUMN"
        );
    }

    #[test]
    fn test_preference_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PreferenceError = io.into();
        assert_eq!(err.error_code(), "PREFERENCE_IO_ERROR");
        assert!(err.to_string().contains("denied"));
    }
}

mod conversion_tests {
    use super::*;

    fn edit_through_umbrella(session: &mut FilterSession) -> Result<(), TableError> {
        session.mutate("missing", FilterEdit::CheckAll(true))?;
        Ok(())
    }

    #[test]
    fn test_question_mark_converts_edit_errors() {
        let mut session = FilterSession::new(FilterModel::new());
        session.open();

        match edit_through_umbrella(&mut session) {
            Err(TableError::Edit(EditError::UnknownColumn { column })) => {
                assert_eq!(column, "missing");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_umbrella_display_is_transparent() {
        let err = TableError::from(EditError::NotOpen);
        assert_eq!(err.to_string(), "filter session is not open");
    }
}
