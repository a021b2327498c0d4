//! `theme` plugin: resolves `theme('path')` calls and `@screen` directives
//! against the `[theme]` table of the configuration.

use toml::Value;

use crate::error::{BuildError, BuildResult};

use super::{Plugin, ProcessOptions};

const NAME: &str = "theme";
const CALL: &str = "theme(";
const SCREEN: &str = "@screen";

pub struct ThemePlugin {
    theme: toml::Table,
}

impl ThemePlugin {
    pub fn new(theme: toml::Table) -> Self {
        Self { theme }
    }

    /// Look up a dotted path (`colors.gray.300`) and render it as a CSS value
    pub fn lookup(&self, path: &str) -> BuildResult<String> {
        let value = self.resolve(path)?;
        render_value(value).ok_or_else(|| {
            BuildError::plugin(NAME, format!("theme path '{}' is not a scalar value", path))
        })
    }

    fn resolve(&self, path: &str) -> BuildResult<&Value> {
        let mut segments = path.split('.');
        let missing = || BuildError::plugin(NAME, format!("unknown theme path '{}'", path));

        let first = segments.next().filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let mut current = self.theme.get(first).ok_or_else(missing)?;
        for segment in segments {
            current = current
                .as_table()
                .and_then(|t| t.get(segment))
                .ok_or_else(missing)?;
        }
        Ok(current)
    }

    fn screen_query(&self, name: &str) -> BuildResult<String> {
        let unknown = || BuildError::plugin(NAME, format!("unknown screen '{}'", name));
        let screen = self
            .theme
            .get("screens")
            .and_then(Value::as_table)
            .and_then(|t| t.get(name))
            .ok_or_else(unknown)?;

        match screen {
            Value::String(min) => Ok(format!("(min-width: {})", min)),
            Value::Table(t) => {
                if let Some(raw) = t.get("raw").and_then(Value::as_str) {
                    return Ok(raw.to_string());
                }
                let min = t.get("min").and_then(Value::as_str);
                let max = t.get("max").and_then(Value::as_str);
                match (min, max) {
                    (Some(min), Some(max)) => {
                        Ok(format!("(min-width: {}) and (max-width: {})", min, max))
                    }
                    (Some(min), None) => Ok(format!("(min-width: {})", min)),
                    (None, Some(max)) => Ok(format!("(max-width: {})", max)),
                    (None, None) => Err(unknown()),
                }
            }
            _ => Err(unknown()),
        }
    }

    fn resolve_calls(&self, css: &str) -> BuildResult<String> {
        let mut out = String::with_capacity(css.len());
        let mut rest = css;

        while let Some(start) = find_token(rest, CALL) {
            out.push_str(&rest[..start]);
            let args = &rest[start + CALL.len()..];
            let close = args
                .find(')')
                .ok_or_else(|| BuildError::plugin(NAME, "unterminated theme() call"))?;
            out.push_str(&self.lookup(unquote(args[..close].trim()))?);
            rest = &args[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn expand_screens(&self, css: &str) -> BuildResult<String> {
        let mut out = String::with_capacity(css.len());
        let mut rest = css;

        while let Some(start) = find_token(rest, SCREEN) {
            let after = &rest[start + SCREEN.len()..];
            let trimmed = after.trim_start();
            // `@screens` or `@screen{` are not the directive
            if trimmed.len() == after.len() {
                out.push_str(&rest[..start + SCREEN.len()]);
                rest = after;
                continue;
            }
            let name_len = trimmed
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(trimmed.len());
            if name_len == 0 {
                return Err(BuildError::plugin(NAME, "@screen requires a screen name"));
            }

            out.push_str(&rest[..start]);
            out.push_str("@media ");
            out.push_str(&self.screen_query(&trimmed[..name_len])?);
            rest = &trimmed[name_len..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

impl Plugin for ThemePlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn transform(&self, css: String, _options: &ProcessOptions) -> BuildResult<String> {
        let css = self.expand_screens(&css)?;
        self.resolve_calls(&css)
    }
}

/// Find `token` outside `/* */` comments, where it is not the tail of a
/// longer identifier
fn find_token(haystack: &str, token: &str) -> Option<usize> {
    let mut offset = 0;
    loop {
        let rest = &haystack[offset..];
        let pos = rest.find(token)?;

        if let Some(comment) = rest[..pos].find("/*") {
            let close = rest[comment + 2..].find("*/")?;
            offset += comment + 2 + close + 2;
            continue;
        }

        let idx = offset + pos;
        let preceded_by_ident = haystack[..idx]
            .chars()
            .next_back()
            .map(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            .unwrap_or(false);
        if !preceded_by_ident {
            return Some(idx);
        }
        offset = idx + token.len();
    }
}

fn unquote(arg: &str) -> &str {
    let bytes = arg.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Array(items) => {
            let rendered: Option<Vec<String>> = items.iter().map(render_value).collect();
            rendered.map(|parts| parts.join(", "))
        }
        Value::Datetime(_) | Value::Table(_) => None,
    }
}
