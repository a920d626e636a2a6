//! Status codes the formatter can emit and the method-type defaults.

use super::MethodType;

/// Protocol prefix of every emitted status line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Status pair used whenever the resolved status is missing or unknown.
pub const INTERNAL_SERVER_ERROR: &str = "500 Internal Server Error";

/// Status used when the method type is unset or unrecognized.
pub const NOT_IMPLEMENTED: u16 = 501;

/// Message paired with [`NOT_IMPLEMENTED`].
pub const NOT_IMPLEMENTED_MESSAGE: &str = "Method type not implemented";

static STATUS_CODES: [(u16, &str); 7] = [
    (200, "200 Ok"),
    (201, "201 Created"),
    (303, "303 See Other"),
    (401, "401 Unauthorized"),
    (403, "403 Forbidden"),
    (404, "404 Not Found"),
    (405, "405 Method Not Allowed"),
];

/// Process-wide, read-only table of known status codes.
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::StatusCodeTable;
///
/// assert_eq!(StatusCodeTable::lookup(201), Some("201 Created"));
/// assert!(StatusCodeTable::lookup(500).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatusCodeTable;

impl StatusCodeTable {
    /// Returns the formatted `"<code> <reason>"` string for a known code.
    pub fn lookup(code: u16) -> Option<&'static str> {
        STATUS_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, text)| *text)
    }

    /// Returns `true` when `code` is in the table.
    pub fn contains(code: u16) -> bool {
        Self::lookup(code).is_some()
    }

    /// Iterates over every known code and its formatted string.
    pub fn iter() -> impl Iterator<Item = (u16, &'static str)> {
        STATUS_CODES.iter().copied()
    }
}

/// Default status and message for a method type and outcome.
///
/// Successful `add` is `201`; every other recognized type answers `200`,
/// with a failure message when the action did not succeed. Anything else is
/// `501`.
pub fn derive_status(method_type: Option<&MethodType>, success: bool) -> (u16, Option<&'static str>) {
    match method_type {
        Some(MethodType::Unrecognized(_)) | None => {
            (NOT_IMPLEMENTED, Some(NOT_IMPLEMENTED_MESSAGE))
        }
        Some(MethodType::Add) if success => (201, None),
        Some(_) if success => (200, None),
        Some(known) => (200, known.failure_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_seven_codes() {
        assert_eq!(StatusCodeTable::iter().count(), 7);
        assert_eq!(StatusCodeTable::lookup(200), Some("200 Ok"));
        assert_eq!(StatusCodeTable::lookup(405), Some("405 Method Not Allowed"));
        assert!(!StatusCodeTable::contains(500));
        assert!(!StatusCodeTable::contains(501));
        assert!(!StatusCodeTable::contains(0));
    }

    #[test]
    fn derive_status_matches_table() {
        use MethodType::*;

        let cases = [
            (Add, true, 201, None),
            (Add, false, 200, Some("Failed to add new object")),
            (Edit, true, 200, None),
            (Edit, false, 200, Some("Failed to edit object")),
            (Delete, true, 200, None),
            (Delete, false, 200, Some("Failed to delete object")),
            (View, true, 200, None),
            (View, false, 200, Some("Failed to retrieve object")),
            (Index, true, 200, None),
            (Index, false, 200, Some("Failed to retrieve objects")),
        ];
        for (method_type, success, status, message) in cases {
            assert_eq!(
                derive_status(Some(&method_type), success),
                (status, message),
                "{method_type} success={success}"
            );
        }
    }

    #[test]
    fn unset_or_unknown_method_type_is_not_implemented() {
        for success in [true, false] {
            assert_eq!(
                derive_status(None, success),
                (501, Some("Method type not implemented"))
            );
            assert_eq!(
                derive_status(Some(&MethodType::parse("publish")), success),
                (501, Some("Method type not implemented"))
            );
        }
    }
}
