/// The `sorttabs` command: metadata for the host registry and invocation parsing

use serde::Serialize;

use crate::error::CommandError;
use crate::tab_data::{SortRequest, MATCH_ALL_FILTER};

pub const SORTTABS: &str = "sorttabs";

/// Status reported back to the host once all moves went through
pub const COMPLETION_MESSAGE: &str = "Sorting complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamDefault {
    String(&'static str),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub default_value: ParamDefault,
    pub description: &'static str,
    pub manual: &'static str,
}

/// Command description handed to a host's command registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub return_type: ParamType,
}

pub const SORTTABS_COMMAND: CommandSpec = CommandSpec {
    name: SORTTABS,
    description: "Sorts the visible tabs based on their url.",
    params: &[
        ParamSpec {
            name: "urlPart",
            param_type: ParamType::String,
            default_value: ParamDefault::String(MATCH_ALL_FILTER),
            description: "Only sorts tabs matching the regular expression.",
            manual: "Only the tabs with their url matching the regular expression \
                     will be sorted and other tabs will be left untouched, at \
                     their previous positions.",
        },
        ParamSpec {
            name: "reverse",
            param_type: ParamType::Boolean,
            default_value: ParamDefault::Boolean(false),
            description: "True to reverse the sorting direction.",
            manual: "True to reverse the sorting direction.",
        },
    ],
    return_type: ParamType::String,
};

/// Parse `sorttabs [urlPart] [--reverse[=bool]]` into a request
///
/// Quoting follows shell rules, so `sorttabs " "` passes the match-all
/// filter explicitly and `sorttabs 'docs\.rs/(log|regex)'` keeps the
/// pattern intact. A backslash only escapes whitespace and quotes; any other
/// backslash is part of the word, so `sorttabs docs\.rs` is the regex
/// `docs\.rs`.
pub fn parse_invocation(line: &str) -> Result<SortRequest, CommandError> {
    let words = shell_words::split(&keep_regex_escapes(line))?;
    let mut words = words.into_iter();

    match words.next() {
        Some(name) if name == SORTTABS => {}
        Some(name) => return Err(CommandError::UnknownCommand(name)),
        None => return Err(CommandError::UnknownCommand(String::new())),
    }

    let mut url_part: Option<String> = None;
    let mut reverse = false;

    while let Some(word) = words.next() {
        if word == "--reverse" {
            reverse = match words.as_slice().first().map(String::as_str) {
                Some("true") | Some("false") => parse_bool(&words.next().unwrap_or_default())?,
                _ => true,
            };
        } else if let Some(value) = word.strip_prefix("--reverse=") {
            reverse = parse_bool(value)?;
        } else if word.starts_with("--") || url_part.is_some() {
            return Err(CommandError::UnexpectedArgument(word));
        } else {
            url_part = Some(word);
        }
    }

    Ok(SortRequest::new(
        url_part.unwrap_or_else(|| MATCH_ALL_FILTER.to_string()),
        reverse,
    ))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Double every backslash that shell-words would otherwise drop
///
/// Outside quotes a backslash survives unless it precedes whitespace or a
/// quote. Inside double quotes it survives unless it precedes `"`. Inside
/// single quotes shell-words already keeps it.
fn keep_regex_escapes(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None, '\'') => quote = Quote::Single,
            (Quote::None, '"') => quote = Quote::Double,
            (Quote::None, '\\') => {
                if let Some(&next) = chars.peek().filter(|n| n.is_whitespace() || **n == '\'' || **n == '"') {
                    escaped.push(c);
                    escaped.push(next);
                    chars.next();
                    continue;
                }
                escaped.push('\\');
            }
            (Quote::Double, '\\') => {
                if chars.peek() == Some(&'"') {
                    escaped.push_str("\\\"");
                    chars.next();
                    continue;
                }
                escaped.push('\\');
            }
            _ => {}
        }
        escaped.push(c);
    }
    escaped
}

fn parse_bool(value: &str) -> Result<bool, CommandError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CommandError::InvalidBoolean(other.to_string())),
    }
}
