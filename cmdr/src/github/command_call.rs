/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! Parse `Service.Method(arg1, "arg, 2")` into a [`CommandCall`].

use std::str::FromStr;

use gh_console::QUALIFIER_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub service: String,
    pub method: String,
    pub args: Vec<String>,
}

#[derive(thiserror::Error, Debug, miette::Diagnostic, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("error: Not Fetch Service or Method")]
    #[diagnostic(
        code(gh_console_cmdr::parse::service_or_method),
        help("Commands look like `Service.Method(arg1, arg2)`, eg: `Users.Get(octocat)`")
    )]
    MissingServiceOrMethod,

    #[error("missing `)` at the end of the argument list")]
    #[diagnostic(code(gh_console_cmdr::parse::unclosed_parenthesis))]
    UnclosedParenthesis,

    #[error("missing closing `\"` in the argument list")]
    #[diagnostic(code(gh_console_cmdr::parse::unterminated_quote))]
    UnterminatedQuote,

    #[error("unexpected text after `)`: {0}")]
    #[diagnostic(code(gh_console_cmdr::parse::trailing_text))]
    TrailingText(String),
}

impl FromStr for CommandCall {
    type Err = CommandParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> { Self::parse(input) }
}

impl CommandCall {
    /// - The service and method are identifiers, separated by the last `.` before `(`.
    /// - Without a `(...)` argument list, the call has no arguments.
    /// - Each argument is trimmed. An argument wrapped in `"` keeps its inner text
    ///   verbatim, where `\"` and `\\` are escapes.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandParseError`] describing the first problem found.
    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let input = input.trim();

        let (head, maybe_arg_list) = match input.find('(') {
            Some(index) => (&input[..index], Some(&input[index + 1..])),
            None => (input, None),
        };

        let (service, method) = head
            .trim()
            .rsplit_once(QUALIFIER_SEPARATOR)
            .ok_or(CommandParseError::MissingServiceOrMethod)?;
        let (service, method) = (service.trim(), method.trim());
        if !is_identifier(service) || !is_identifier(method) {
            return Err(CommandParseError::MissingServiceOrMethod);
        }

        let args = match maybe_arg_list {
            Some(arg_list) => parse_arg_list(arg_list)?,
            None => vec![],
        };

        Ok(Self {
            service: service.to_string(),
            method: method.to_string(),
            args,
        })
    }
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `arg_list` is everything after the opening `(`.
fn parse_arg_list(arg_list: &str) -> Result<Vec<String>, CommandParseError> {
    let mut segments: Vec<&str> = vec![];
    let mut segment_start = 0;
    let mut in_quotes = false;
    let mut is_escaped = false;

    for (index, c) in arg_list.char_indices() {
        if in_quotes {
            match (is_escaped, c) {
                (true, _) => is_escaped = false,
                (false, '\\') => is_escaped = true,
                (false, '"') => in_quotes = false,
                (false, _) => {}
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => {
                segments.push(&arg_list[segment_start..index]);
                segment_start = index + 1;
            }
            ')' => {
                let trailing_text = arg_list[index + 1..].trim();
                if !trailing_text.is_empty() {
                    return Err(CommandParseError::TrailingText(trailing_text.to_string()));
                }
                segments.push(&arg_list[segment_start..index]);
                return Ok(segments_to_args(&segments));
            }
            _ => {}
        }
    }

    Err(if in_quotes {
        CommandParseError::UnterminatedQuote
    } else {
        CommandParseError::UnclosedParenthesis
    })
}

fn segments_to_args(segments: &[&str]) -> Vec<String> {
    // `()` has a single, blank segment.
    if let [only] = segments
        && only.trim().is_empty()
    {
        return vec![];
    }
    segments.iter().map(|segment| unquote(segment.trim())).collect()
}

fn unquote(arg: &str) -> String {
    let Some(inner) = arg
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return arg.to_string();
    };

    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(escaped) = chars.next()
        {
            unescaped.push(escaped);
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}
