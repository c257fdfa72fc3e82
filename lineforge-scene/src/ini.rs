//! Reader for the INI dialect scene files are written in
//!
//! ```ini
//! [General]
//! type = "Wireframe"
//! size = 1024
//! eye = (100, 50, 75)
//! ```

use crate::config::{ConfigError, Configuration, Section, Value};
use std::path::Path;

/// Cut a trailing `;` or `#` comment, leaving quoted text alone
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' | '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_tuple(body: &str, line: usize) -> Result<Value, ConfigError> {
    let items: Vec<&str> = body
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if let Ok(ints) = items.iter().map(|s| s.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
        return Ok(Value::IntTuple(ints));
    }
    items
        .iter()
        .map(|s| {
            s.parse::<f64>().map_err(|_| ConfigError::Parse {
                line,
                message: format!("'{}' is not a number", s),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::DoubleTuple)
}

fn parse_value(raw: &str, line: usize) -> Result<Value, ConfigError> {
    if let Some(rest) = raw.strip_prefix('"') {
        let body = rest.strip_suffix('"').ok_or_else(|| ConfigError::Parse {
            line,
            message: "unterminated string".to_string(),
        })?;
        return Ok(Value::Str(body.to_string()));
    }
    if let Some(rest) = raw.strip_prefix('(') {
        let body = rest.strip_suffix(')').ok_or_else(|| ConfigError::Parse {
            line,
            message: "unterminated tuple".to_string(),
        })?;
        return parse_tuple(body, line);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(d) = raw.parse::<f64>() {
        return Ok(Value::Double(d));
    }
    if raw.is_empty() {
        return Err(ConfigError::Parse {
            line,
            message: "missing value".to_string(),
        });
    }
    Ok(Value::Str(raw.to_string()))
}

impl Configuration {
    /// Parse INI text: `[Section]` headers, `key = value` pairs, `;` and `#`
    /// comments, quoted strings, `(a, b, c)` tuples and `TRUE`/`FALSE`.
    /// Unquoted words are kept as strings.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut config = Configuration::new();
        let mut current: Option<Section> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let content = strip_comment(raw_line).trim();
            if content.is_empty() {
                continue;
            }

            if let Some(header) = content.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| ConfigError::Parse {
                    line,
                    message: format!("malformed section header '{}'", content),
                })?;
                if let Some(done) = current.take() {
                    config.insert(done);
                }
                current = Some(Section::new(name.trim()));
                continue;
            }

            let (key, value) = content.split_once('=').ok_or_else(|| ConfigError::Parse {
                line,
                message: format!("expected 'key = value', found '{}'", content),
            })?;
            let section = current.as_mut().ok_or_else(|| ConfigError::Parse {
                line,
                message: "key outside of any section".to_string(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line,
                    message: "empty key".to_string(),
                });
            }
            section
                .values
                .insert(key.to_string(), parse_value(value.trim(), line)?);
        }

        if let Some(done) = current {
            config.insert(done);
        }
        Ok(config)
    }

    /// Read and parse an INI file
    pub fn from_ini_file<P: AsRef<Path>>(path: P) -> lineforge_core::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_ini_str(&text)?)
    }
}
