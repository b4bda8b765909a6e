//! Reading flat coordinate lists.
//!
//! Accepts either a JSON array of numbers or plain numbers separated by
//! whitespace and/or commas. `#` starts a comment that runs to end of line.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin, anything else is a path.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read coordinates from stdin")?;
                Ok(text)
            }
            InputSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read coordinates from {:?}", path)),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decode a coordinate list. Length and finiteness are checked later by
/// `Mesh::from_flat`.
pub fn parse_coordinates(text: &str) -> Result<Vec<f64>> {
    if text.trim_start().starts_with('[') {
        let coords: Vec<f64> =
            serde_json::from_str(text).context("Expected a JSON array of numbers")?;
        return Ok(coords);
    }

    let mut coords = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            match token.parse::<f64>() {
                Ok(value) => coords.push(value),
                Err(_) => bail!("Invalid number {:?} on line {}", token, line_no + 1),
            }
        }
    }
    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let coords = parse_coordinates("[0, 0.5, -1e-3]").unwrap();
        assert_eq!(coords, vec![0.0, 0.5, -1e-3]);
    }

    #[test]
    fn test_plain_numbers_with_comments() {
        let text = "# one triangle\n0 0 0, 1 0 0\n0 1 0  # apex\n";
        let coords = parse_coordinates(text).unwrap();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[3], 1.0);
    }

    #[test]
    fn test_bad_token_reports_line() {
        let err = parse_coordinates("1 2 3\n4 five 6").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_non_finite_tokens_pass_through() {
        // Rejected by the mesh constructor, not here.
        let coords = parse_coordinates("NaN inf 1").unwrap();
        assert!(coords[0].is_nan());
        assert!(coords[1].is_infinite());
    }

    #[test]
    fn test_source_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(PathBuf::from("-"))),
            InputSource::Stdin
        );
        assert_eq!(
            InputSource::from_arg(Some(PathBuf::from("mesh.txt"))),
            InputSource::File(PathBuf::from("mesh.txt"))
        );
    }
}
