//! Line-oriented scan of a Go file's leading import section.
//!
//! Only the part of the file up to the first top-level declaration is
//! inspected; this is enough to tell whether a package is already imported
//! without a Go parser.

/// Import paths declared in the leading import section of `source`.
pub fn imported_paths(source: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut in_block = false;
    let mut in_comment = false;

    for raw in source.lines() {
        let line = raw.trim();

        if in_comment {
            if line.contains("*/") {
                in_comment = false;
            }
            continue;
        }
        if line.starts_with("/*") {
            in_comment = !line.contains("*/");
            continue;
        }

        let line = strip_line_comment(line).trim();

        if in_block {
            match line.find(')') {
                Some(end) => {
                    paths.extend(line[..end].split(';').filter_map(spec_path));
                    in_block = false;
                }
                None => paths.extend(line.split(';').filter_map(spec_path)),
            }
            continue;
        }

        if line.is_empty() || line.starts_with("package ") {
            continue;
        }

        let Some(rest) = strip_keyword(line, "import") else {
            // First declaration after the imports.
            break;
        };

        match rest.strip_prefix('(') {
            Some(body) => match body.find(')') {
                Some(end) => paths.extend(body[..end].split(';').filter_map(spec_path)),
                None => {
                    paths.extend(body.split(';').filter_map(spec_path));
                    in_block = true;
                }
            },
            None => paths.extend(spec_path(rest)),
        }
    }

    paths
}

/// Whether `source` already imports the package at `path`.
pub fn has_import(source: &str, path: &str) -> bool {
    imported_paths(source).iter().any(|p| p == path)
}

/// Insert `path` right after the first `import (`.
///
/// Works on raw bytes so files that are not valid UTF-8 keep their content.
/// Returns `None` when the file has no parenthesized import block.
pub fn insert_import(source: &[u8], path: &str) -> Option<Vec<u8>> {
    const BLOCK_OPEN: &[u8] = b"import (";
    let at = source
        .windows(BLOCK_OPEN.len())
        .position(|window| window == BLOCK_OPEN)?
        + BLOCK_OPEN.len();

    let mut out = Vec::with_capacity(source.len() + path.len() + 4);
    out.extend_from_slice(&source[..at]);
    out.extend_from_slice(format!("\n\t\"{path}\"").as_bytes());
    out.extend_from_slice(&source[at..]);
    Some(out)
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Path of one import spec: `"fmt"`, `f "fmt"`, `_ "fmt"` or a raw string.
fn spec_path(spec: &str) -> Option<String> {
    let start = spec.find(['"', '`'])?;
    let quote = spec[start..].chars().next()?;
    let body = &spec[start + 1..];
    let end = body.find(quote)?;
    Some(body[..end].to_string())
}
