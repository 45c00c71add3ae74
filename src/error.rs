/// Error types for Sort Tabs
use thiserror::Error;

/// Failures of the pure sort planner
#[derive(Debug, Error)]
pub enum SortError {
    #[error("invalid url pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failures of a `sorttabs` invocation, from parsing to moving tabs
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Sort(#[from] SortError),

    #[error("unknown command `{0}`, expected `sorttabs`")]
    UnknownCommand(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("`{0}` is not a boolean")]
    InvalidBoolean(String),

    #[error("could not split command line: {0}")]
    Tokenize(#[from] shell_words::ParseError),

    #[error("command registry rejected `{name}`: {message}")]
    Registry { name: String, message: String },

    /// The host failed to move a tab; the rest of the plan was abandoned
    #[error("moving tab {tab_id} to {index} failed: {message}")]
    Host {
        tab_id: i32,
        index: usize,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = SortError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };

        assert!(err.to_string().starts_with("invalid url pattern `(`"));
    }

    #[test]
    fn test_sort_error_is_transparent_in_command_error() {
        let source = regex::Regex::new("[").unwrap_err();
        let sort_err = SortError::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        let message = sort_err.to_string();

        let err: CommandError = sort_err.into();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_host_error_message() {
        let err = CommandError::Host {
            tab_id: 4,
            index: 1,
            message: "No tab with id: 4".to_string(),
        };
        assert_eq!(err.to_string(), "moving tab 4 to 1 failed: No tab with id: 4");
    }
}
