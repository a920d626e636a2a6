use std::fmt;

/// Semantic class of a controller action, independent of the HTTP verb.
///
/// Parsing is case-insensitive; names outside the five known types are kept
/// as [`MethodType::Unrecognized`] so they still count as "set" while
/// deriving the `501` default.
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::MethodType;
///
/// assert_eq!(MethodType::parse("Add"), MethodType::Add);
/// assert!(MethodType::parse("edit").is_mutating());
/// assert!(MethodType::parse("INDEX").is_read());
/// assert_eq!(MethodType::parse("publish").as_str(), "publish");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodType {
    /// Creates a resource
    Add,
    /// Modifies a resource
    Edit,
    /// Removes a resource
    Delete,
    /// Reads one resource
    View,
    /// Lists resources
    Index,
    /// Any other name a controller declared
    Unrecognized(String),
}

impl MethodType {
    /// Parses a method type name, ignoring case.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "add" => MethodType::Add,
            "edit" => MethodType::Edit,
            "delete" => MethodType::Delete,
            "view" => MethodType::View,
            "index" => MethodType::Index,
            _ => MethodType::Unrecognized(name.to_string()),
        }
    }

    /// Infers a method type from an action name.
    ///
    /// Only exact (lower-case) action names add/edit/delete/view/index are
    /// recognized; any other action yields `None`.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "add" => Some(MethodType::Add),
            "edit" => Some(MethodType::Edit),
            "delete" => Some(MethodType::Delete),
            "view" => Some(MethodType::View),
            "index" => Some(MethodType::Index),
            _ => None,
        }
    }

    /// `true` for add, edit and delete.
    pub fn is_mutating(&self) -> bool {
        matches!(self, MethodType::Add | MethodType::Edit | MethodType::Delete)
    }

    /// `true` for view and index.
    pub fn is_read(&self) -> bool {
        matches!(self, MethodType::View | MethodType::Index)
    }

    /// The canonical name.
    pub fn as_str(&self) -> &str {
        match self {
            MethodType::Add => "add",
            MethodType::Edit => "edit",
            MethodType::Delete => "delete",
            MethodType::View => "view",
            MethodType::Index => "index",
            MethodType::Unrecognized(name) => name,
        }
    }

    /// Message reported when an action of this type did not succeed.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            MethodType::Add => Some("Failed to add new object"),
            MethodType::Edit => Some("Failed to edit object"),
            MethodType::Delete => Some("Failed to delete object"),
            MethodType::View => Some("Failed to retrieve object"),
            MethodType::Index => Some("Failed to retrieve objects"),
            MethodType::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MethodType {
    fn from(name: &str) -> Self {
        MethodType::parse(name)
    }
}
