use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

/// Split tool output into lines across platform line endings.
///
/// `skip_warnings` drops leading lines starting with `WARN` — the CLC prints
/// Java warnings ahead of its real output. `filter_empty_lines` drops blank
/// lines entirely; callers that use blank lines as section separators leave it
/// off.
pub fn split_into_lines(text: &str, skip_warnings: bool, filter_empty_lines: bool) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();

    if skip_warnings {
        let real_output = lines
            .iter()
            .position(|line| !line.starts_with("WARN"))
            .unwrap_or(lines.len());
        lines.drain(..real_output);
    }

    if filter_empty_lines {
        lines.retain(|line| !line.trim().is_empty());
    }

    lines
}

/// A line is a folder header (not a file entry) when it ends with `:`,
/// e.g. `folder1:` or `folder1/folder2:`. This is the only marker the tool
/// gives between "new current folder" and "file in the current folder".
pub fn is_file_path(line: &str) -> bool {
    !line.is_empty() && line.ends_with(':')
}

/// Reconstruct a full path from a folder header and a bare filename.
///
/// The tool reports a folder once and then lists bare filenames underneath
/// it. A trailing `:` on the folder is stripped; a relative folder is rooted
/// at `path_root` when one is supplied.
pub fn get_file_path(current_folder: &str, file_name: &str, path_root: Option<&Path>) -> PathBuf {
    let folder = current_folder.strip_suffix(':').unwrap_or(current_folder);
    let folder = Path::new(folder);

    match path_root {
        Some(root) if folder.is_relative() => root.join(folder).join(file_name),
        _ => folder.join(file_name),
    }
}

/// Substring test against stderr, used for benign-failure patterns.
/// Substring rather than equality: the tool appends item names to its
/// messages.
pub fn has_error(result: &ExecutionResult, pattern: &str) -> bool {
    result.stderr.contains(pattern)
}

/// Classify an execution result as success or fatal failure.
///
/// Exit code 0 with effectively-empty stderr is success; anything else is a
/// `CommandFailed` carrying the command name, the exact exit code, and both
/// raw streams verbatim. With `use_first_error_line` the error message is the
/// first non-empty output line (stderr, then stdout); otherwise a fixed
/// failure message. Benign patterns are the caller's concern and must be
/// checked before calling this.
pub fn process_errors(
    command: &str,
    result: &ExecutionResult,
    use_first_error_line: bool,
) -> TfvcResult<()> {
    if result.exit_code == 0 && result.stderr.trim().is_empty() {
        return Ok(());
    }

    let message = if use_first_error_line {
        first_output_line(result)
            .unwrap_or(TfvcError::EXEC_FAILED)
            .to_string()
    } else {
        TfvcError::EXEC_FAILED.to_string()
    };

    Err(TfvcError::CommandFailed {
        command: command.to_string(),
        exit_code: result.exit_code,
        stdout: result.stdout.clone(),
        stderr: result.stderr.clone(),
        message,
    })
}

fn first_output_line(result: &ExecutionResult) -> Option<&str> {
    split_into_lines(&result.stderr, true, true)
        .first()
        .copied()
        .or_else(|| split_into_lines(&result.stdout, true, true).first().copied())
}

/// Cut a stream down to the XML document it contains.
///
/// The tool sometimes emits banner text on the same stream as the document;
/// everything before the first `<?xml` and after the final `>` is discarded.
/// Input without a declaration comes back unchanged.
pub fn trim_to_xml(text: &str) -> &str {
    if let Some(start) = text.find("<?xml") {
        if let Some(end) = text.rfind('>') {
            if end > start {
                return &text[start..=end];
            }
        }
    }
    text
}

/// An owned XML element with normalized tag and attribute names.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_node(node: roxmltree::Node) -> Self {
        let attributes = node
            .attributes()
            .map(|attr| (normalize_name(attr.name()), attr.value().to_string()))
            .collect();
        let children = node
            .children()
            .filter(|child| child.is_element())
            .map(XmlElement::from_node)
            .collect();

        Self {
            name: normalize_name(node.tag_name().name()),
            attributes,
            children,
        }
    }

    /// First child element with the given (normalized) name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given (normalized) name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Parse an XML document into a tree whose tag and attribute names have
/// hyphens stripped and are lower-cased, so downstream code can address
/// fields format-insensitively.
pub fn parse_xml(xml: &str) -> TfvcResult<XmlElement> {
    let document = roxmltree::Document::parse(xml)?;
    Ok(XmlElement::from_node(document.root_element()))
}

fn normalize_name(name: &str) -> String {
    name.replace('-', "").to_lowercase()
}
