//! Turning HTML files into plain text for extraction.
//!
//! Decoding order: byte-order mark, then a `<meta charset>` / `http-equiv`
//! declaration near the top of the file, then UTF-8 if the bytes are valid,
//! and finally ISO-8859-2 (Latin-2), which accepts any byte sequence.
//!
//! Text is taken from every text node outside `script`, `style` and
//! `noscript`, joined with spaces, with whitespace runs collapsed.

use crate::error::DocumentError;
use encoding_rs::{Encoding, ISO_8859_2, UTF_8};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};

/// Elements whose text never reaches the extractor.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// How far into the file a charset declaration is looked for.
const SNIFF_LEN: usize = 2048;

/// Decode raw HTML bytes and strip markup.
pub fn html_to_text(raw: &[u8]) -> String {
    let html = decode(raw);
    let document = Html::parse_document(&html);

    let mut text = String::with_capacity(html.len() / 2);
    for node in document.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .any(|a| a.value().as_element().is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name())));
        if !hidden {
            text.push_str(chunk);
            text.push(' ');
        }
    }

    regex!(r"\s+").replace_all(&text, " ").trim().to_string()
}

/// Read one HTML file and return its text.
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    let raw = fs::read(path).map_err(|source| DocumentError::Read { path: path.to_path_buf(), source })?;
    Ok(html_to_text(&raw))
}

/// `root` itself if it is an HTML file, otherwise every HTML file below it,
/// sorted by path.
pub fn find_documents(root: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    if !root.exists() {
        return Err(DocumentError::NotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(if is_html(root) { vec![root.to_path_buf()] } else { Vec::new() });
    }

    let mut found = Vec::new();
    walk(root, &mut found)?;
    found.sort();
    tracing::debug!(root = %root.display(), documents = found.len(), "collected documents");
    Ok(found)
}

/// Symlinked directories are not descended into; symlinked files are kept.
fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), DocumentError> {
    let read_err = |source| DocumentError::Read { path: dir.to_path_buf(), source };
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;
        let path = entry.path();

        if file_type.is_dir() {
            walk(&path, found)?;
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "not following symlinked directory");
        } else if is_html(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("htm") || ext.eq_ignore_ascii_case("html"))
}

fn decode(raw: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(raw) {
        let (text, _) = encoding.decode_without_bom_handling(&raw[bom_len..]);
        return text.into_owned();
    }

    if let Some(encoding) = declared_encoding(raw) {
        let (text, had_errors) = encoding.decode_without_bom_handling(raw);
        if !had_errors {
            return text.into_owned();
        }
        tracing::debug!(charset = encoding.name(), "declared charset does not fit, sniffing");
    }

    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => ISO_8859_2.decode_without_bom_handling(raw).0.into_owned(),
    }
}

/// The charset named by a `<meta>` tag in the first few kilobytes.
fn declared_encoding(raw: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&raw[..raw.len().min(SNIFF_LEN)]);
    let caps = regex!(r#"<meta[^>]+charset\s*=\s*["']?([a-z0-9_:.\-]+)"#).captures(&head)?;
    let encoding = Encoding::for_label(caps.get(1)?.as_str().as_bytes())?;
    // A UTF-16 label in an ASCII-compatible file is a lie.
    Some(if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE { UTF_8 } else { encoding })
}
