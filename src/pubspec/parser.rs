//! pubspec.yaml reader built on tree-sitter-yaml.
//!
//! Only the top-level `name`, `dependencies` and `dev_dependencies` keys are read. Each
//! dependency keeps the byte span of its constraint so the editor can rewrite it in place.

use crate::error::{AdvisorError, Result};
use std::iter::Peekable;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::Chars;
use tracing::{debug, warn};

/// Constraint value declared for a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredConstraint {
    /// Any string scalar, quoted or plain (`^8.0.0`, `">=7.0.0 <9.0.0"`, `any`).
    Text(String),
    /// No value, `~` or `null`.
    Null,
    /// Numbers, booleans, and nested sources such as `path:`, `git:` or `sdk:`.
    Opaque,
}

impl DeclaredConstraint {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DeclaredConstraint::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: String,
    pub constraint: DeclaredConstraint,
    /// Byte range of the constraint text, excluding quotes. Only set for `Text`.
    pub span: Option<Range<usize>>,
}

/// Top-level pubspec key a dependency is declared under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DependencySection {
    #[default]
    Dependencies,
    DevDependencies,
}

impl DependencySection {
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "dev_dependencies",
        }
    }
}

/// Ordered name -> constraint mapping for one pubspec section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    section: DependencySection,
    entries: Vec<DependencyEntry>,
}

impl DependencySet {
    pub fn new(section: DependencySection, entries: Vec<DependencyEntry>) -> Self {
        Self { section, entries }
    }

    pub fn empty(section: DependencySection) -> Self {
        Self::new(section, Vec::new())
    }

    pub fn section(&self) -> DependencySection {
        self.section
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&DeclaredConstraint> {
        self.find(name).map(|entry| &entry.constraint)
    }

    pub fn find(&self, name: &str) -> Option<&DependencyEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pubspec {
    pub name: Option<String>,
    pub dependencies: DependencySet,
    pub dev_dependencies: DependencySet,
}

impl Pubspec {
    pub fn section(&self, section: DependencySection) -> &DependencySet {
        match section {
            DependencySection::Dependencies => &self.dependencies,
            DependencySection::DevDependencies => &self.dev_dependencies,
        }
    }
}

impl Default for Pubspec {
    fn default() -> Self {
        Self {
            name: None,
            dependencies: DependencySet::empty(DependencySection::Dependencies),
            dev_dependencies: DependencySet::empty(DependencySection::DevDependencies),
        }
    }
}

/// Supplies the project's manifest.
pub trait ManifestReader: Send + Sync {
    fn read_manifest(&self) -> Result<Pubspec>;
}

/// pubspec.yaml on disk, re-read on every call.
pub struct PubspecFile {
    path: PathBuf,
}

impl PubspecFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ManifestReader for PubspecFile {
    fn read_manifest(&self) -> Result<Pubspec> {
        PubspecParser::load(&self.path)
    }
}

pub struct PubspecParser;

impl PubspecParser {
    /// Read and parse the pubspec at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Pubspec> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::ManifestParsing(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Pubspec> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            AdvisorError::ManifestParsing(format!("Failed to load YAML grammar: {}", e))
        })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| AdvisorError::ManifestParsing("Failed to parse YAML".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("pubspec.yaml contains syntax errors; reading what can be recovered");
        }

        let mut pubspec = Pubspec::default();
        let Some(top) = find_first(root, "block_mapping") else {
            debug!("pubspec.yaml has no top-level mapping");
            return Ok(pubspec);
        };

        let document = Document::new(root, content);
        let mut cursor = top.walk();
        for pair in top.children(&mut cursor) {
            if pair.kind() != "block_mapping_pair" {
                continue;
            }
            let Some(key) = pair.child_by_field_name("key") else {
                continue;
            };
            let value = pair.child_by_field_name("value");

            match node_text(key, content).as_str() {
                "name" => {
                    pubspec.name = document.classify(value).0.as_text().map(String::from);
                }
                "dependencies" => {
                    pubspec.dependencies =
                        document.read_section(value, DependencySection::Dependencies);
                }
                "dev_dependencies" => {
                    pubspec.dev_dependencies =
                        document.read_section(value, DependencySection::DevDependencies);
                }
                _ => {}
            }
        }

        debug!(
            dependencies = pubspec.dependencies.len(),
            dev_dependencies = pubspec.dev_dependencies.len(),
            "pubspec.yaml parsed"
        );
        Ok(pubspec)
    }
}

type Classified = (DeclaredConstraint, Option<Range<usize>>);

/// Parsed YAML source plus its anchors, in document order.
struct Document<'t> {
    content: &'t str,
    anchors: Vec<(String, tree_sitter::Node<'t>)>,
}

impl<'t> Document<'t> {
    fn new(root: tree_sitter::Node<'t>, content: &'t str) -> Self {
        let mut anchors = Vec::new();
        collect_anchors(root, content, &mut anchors);
        Self { content, anchors }
    }

    /// Collect the entries of a `dependencies:` style value, block or flow form.
    fn read_section(
        &self,
        value: Option<tree_sitter::Node<'t>>,
        section: DependencySection,
    ) -> DependencySet {
        let Some(value) = value else {
            return DependencySet::empty(section);
        };

        let mapping = match find_first(value, "block_mapping") {
            Some(mapping) => Some(mapping),
            None => find_first(value, "flow_mapping"),
        };
        let Some(mapping) = mapping else {
            return DependencySet::empty(section);
        };

        let mut entries = Vec::new();
        let mut cursor = mapping.walk();
        for pair in mapping.children(&mut cursor) {
            if pair.kind() != "block_mapping_pair" && pair.kind() != "flow_pair" {
                continue;
            }
            let Some(key) = pair.child_by_field_name("key") else {
                continue;
            };
            let (constraint, span) = self.classify(pair.child_by_field_name("value"));
            entries.push(DependencyEntry {
                name: node_text(key, self.content),
                constraint,
                span,
            });
        }

        DependencySet::new(section, entries)
    }

    /// Decide what kind of value a dependency declares.
    fn classify(&self, value: Option<tree_sitter::Node<'t>>) -> Classified {
        match value {
            Some(value) => self.classify_node(value, true),
            None => (DeclaredConstraint::Null, None),
        }
    }

    fn classify_node(&self, node: tree_sitter::Node<'t>, follow_alias: bool) -> Classified {
        if !matches!(node.kind(), "flow_node" | "block_node") {
            return (DeclaredConstraint::Opaque, None);
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();
        let string_tag = children.iter().any(|child| {
            child.kind() == "tag" && is_string_tag(&self.content[child.byte_range()])
        });

        let Some(scalar) = children
            .iter()
            .copied()
            .find(|child| !matches!(child.kind(), "tag" | "anchor"))
        else {
            return if string_tag {
                (DeclaredConstraint::Text(String::new()), None)
            } else {
                (DeclaredConstraint::Null, None)
            };
        };

        match scalar.kind() {
            "alias" if follow_alias => self.classify_alias(scalar),
            "plain_scalar" => self.classify_plain(scalar, string_tag),
            "double_quote_scalar" | "single_quote_scalar" => {
                let range = scalar.byte_range();
                if range.len() < 2 {
                    return (DeclaredConstraint::Opaque, None);
                }
                let inner = range.start + 1..range.end - 1;
                let style = if scalar.kind() == "double_quote_scalar" {
                    FlowStyle::DoubleQuoted
                } else {
                    FlowStyle::SingleQuoted
                };
                let text = flow_scalar_value(&self.content[inner.clone()], style);
                (DeclaredConstraint::Text(text), Some(inner))
            }
            "block_scalar" => {
                let range = scalar.byte_range();
                let raw = &self.content[range.clone()];
                let span = range.start..range.start + raw.trim_end().len();
                (DeclaredConstraint::Text(block_scalar_value(raw)), Some(span))
            }
            _ => (DeclaredConstraint::Opaque, None),
        }
    }

    /// An alias takes the value of the closest preceding anchor with the same name. The span
    /// covers the alias itself so a rewrite replaces only this occurrence.
    fn classify_alias(&self, alias: tree_sitter::Node<'t>) -> Classified {
        let name = self.content[alias.byte_range()].trim().trim_start_matches('*');
        let target = self
            .anchors
            .iter()
            .rev()
            .find(|(anchor, node)| anchor == name && node.start_byte() < alias.start_byte());

        let Some((_, target)) = target else {
            debug!("Undefined alias *{}", name);
            return (DeclaredConstraint::Opaque, None);
        };

        match self.classify_node(*target, false) {
            (DeclaredConstraint::Text(text), _) => {
                (DeclaredConstraint::Text(text), Some(alias.byte_range()))
            }
            (other, _) => (other, None),
        }
    }

    fn classify_plain(&self, scalar: tree_sitter::Node<'t>, string_tag: bool) -> Classified {
        let range = scalar.byte_range();
        let text = || flow_scalar_value(&self.content[range.clone()], FlowStyle::Plain);
        if string_tag {
            return (DeclaredConstraint::Text(text()), Some(range.clone()));
        }

        let mut cursor = scalar.walk();
        let kind = scalar
            .named_children(&mut cursor)
            .next()
            .map(|inner| inner.kind());
        match kind {
            Some("string_scalar") => (DeclaredConstraint::Text(text()), Some(range.clone())),
            Some("null_scalar") => (DeclaredConstraint::Null, None),
            _ => (DeclaredConstraint::Opaque, None),
        }
    }
}

fn collect_anchors<'t>(
    node: tree_sitter::Node<'t>,
    content: &str,
    anchors: &mut Vec<(String, tree_sitter::Node<'t>)>,
) {
    if node.kind() == "anchor" {
        if let Some(target) = node.parent() {
            let name = content[node.byte_range()].trim().trim_start_matches('&');
            anchors.push((name.to_string(), target));
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_anchors(child, content, anchors);
    }
}

fn is_string_tag(tag: &str) -> bool {
    matches!(tag.trim(), "!!str" | "!<tag:yaml.org,2002:str>")
}

fn find_first<'a>(node: tree_sitter::Node<'a>, kind: &str) -> Option<tree_sitter::Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_first(child, kind) {
            return Some(found);
        }
    }
    None
}

fn node_text(node: tree_sitter::Node, content: &str) -> String {
    content[node.byte_range()]
        .trim()
        .trim_start_matches('"')
        .trim_end_matches('"')
        .trim_start_matches('\'')
        .trim_end_matches('\'')
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
}

/// Value of a flow scalar body (quotes already removed): escapes decoded and line breaks
/// folded.
fn flow_scalar_value(raw: &str, style: FlowStyle) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if style == FlowStyle::DoubleQuoted => match chars.next() {
                Some('\n') | Some('\r') => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    while matches!(chars.peek(), Some(' ') | Some('\t')) {
                        chars.next();
                    }
                }
                Some(escape) => decode_escape(escape, &mut chars, &mut out),
                None => out.push('\\'),
            },
            '\'' if style == FlowStyle::SingleQuoted && chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\n' | '\r' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fold_line_break(&mut out, &mut chars);
            }
            _ => out.push(c),
        }
    }

    if style == FlowStyle::Plain {
        out.trim().to_string()
    } else {
        out
    }
}

fn decode_escape(escape: char, chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let simple = match escape {
        '0' => Some('\0'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        't' | '\t' => Some('\t'),
        'n' => Some('\n'),
        'v' => Some('\x0b'),
        'f' => Some('\x0c'),
        'r' => Some('\r'),
        'e' => Some('\x1b'),
        ' ' => Some(' '),
        '"' => Some('"'),
        '/' => Some('/'),
        '\\' => Some('\\'),
        'N' => Some('\u{85}'),
        '_' => Some('\u{a0}'),
        'L' => Some('\u{2028}'),
        'P' => Some('\u{2029}'),
        _ => None,
    };
    if let Some(decoded) = simple {
        out.push(decoded);
        return;
    }

    let digits = match escape {
        'x' => 2,
        'u' => 4,
        'U' => 8,
        _ => {
            out.push('\\');
            out.push(escape);
            return;
        }
    };
    let hex: String = chars.by_ref().take(digits).collect();
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(decoded) if hex.len() == digits => out.push(decoded),
        _ => {
            out.push('\\');
            out.push(escape);
            out.push_str(&hex);
        }
    }
}

/// A single line break folds into a space, each further empty line into a newline.
fn fold_line_break(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let kept = out.trim_end_matches([' ', '\t']).len();
    out.truncate(kept);

    let mut breaks = 1;
    loop {
        while matches!(chars.peek(), Some(' ') | Some('\t')) {
            chars.next();
        }
        match chars.peek() {
            Some('\n') => {
                chars.next();
                breaks += 1;
            }
            Some('\r') => {
                chars.next();
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                breaks += 1;
            }
            _ => break,
        }
    }

    if breaks == 1 {
        out.push(' ');
    } else {
        out.extend(std::iter::repeat_n('\n', breaks - 1));
    }
}

/// Content of a `|` or `>` block scalar, including its header, with chomping applied.
fn block_scalar_value(raw: &str) -> String {
    let (header, body) = raw.split_once('\n').unwrap_or((raw, ""));
    let header = header.split('#').next().unwrap_or_default().trim();
    let folded = header.starts_with('>');
    let chomping = if header.contains('-') {
        Chomping::Strip
    } else if header.contains('+') {
        Chomping::Keep
    } else {
        Chomping::Clip
    };

    let lines: Vec<&str> = body.lines().collect();
    let indent = lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .unwrap_or(0);
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").trim_end_matches('\r'))
        .collect();

    let content_end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);
    let trailing_breaks = lines.len() - content_end;

    let mut out = String::new();
    let mut pending = 0;
    let mut seen_text = false;
    for line in &lines[..content_end] {
        if line.is_empty() {
            pending += 1;
            continue;
        }
        if seen_text {
            let more_indented = line.starts_with([' ', '\t']);
            if folded && pending == 0 && !more_indented {
                out.push(' ');
            } else {
                let breaks = if folded && !more_indented { pending } else { pending + 1 };
                out.extend(std::iter::repeat_n('\n', breaks));
            }
        } else {
            out.extend(std::iter::repeat_n('\n', pending));
        }
        pending = 0;
        out.push_str(line);
        seen_text = true;
    }

    match chomping {
        Chomping::Strip => {}
        Chomping::Clip if seen_text => out.push('\n'),
        Chomping::Clip => {}
        Chomping::Keep => out.extend(std::iter::repeat_n('\n', trailing_breaks + 1)),
    }
    out
}

enum Chomping {
    Strip,
    Clip,
    Keep,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBSPEC: &str = r#"name: counter
description: A counter app.

environment:
  sdk: ">=3.0.0 <4.0.0"

dependencies:
  flutter:
    sdk: flutter
  bloc: ^7.2.0
  flutter_bloc: "^8.0.0"
  equatable: '>=1.0.0 <3.0.0'
  hydrated_bloc: any
  replay_bloc:
  meta: ~
  build_number: 3

dev_dependencies:
  bloc_test: ^8.0.0
"#;

    #[test]
    fn parses_top_level_sections() {
        let pubspec = PubspecParser::parse(PUBSPEC).unwrap();
        assert_eq!(pubspec.name.as_deref(), Some("counter"));
        assert_eq!(pubspec.dependencies.len(), 8);
        assert_eq!(pubspec.dev_dependencies.len(), 1);
        assert!(!pubspec.dependencies.contains("sdk"));
        assert!(!pubspec.dependencies.contains("bloc_test"));
    }

    #[test]
    fn classifies_declared_values() {
        let deps = PubspecParser::parse(PUBSPEC).unwrap().dependencies;
        assert_eq!(deps.get("bloc"), Some(&DeclaredConstraint::Text("^7.2.0".into())));
        assert_eq!(
            deps.get("flutter_bloc"),
            Some(&DeclaredConstraint::Text("^8.0.0".into()))
        );
        assert_eq!(
            deps.get("equatable"),
            Some(&DeclaredConstraint::Text(">=1.0.0 <3.0.0".into()))
        );
        assert_eq!(
            deps.get("hydrated_bloc"),
            Some(&DeclaredConstraint::Text("any".into()))
        );
        assert_eq!(deps.get("replay_bloc"), Some(&DeclaredConstraint::Null));
        assert_eq!(deps.get("meta"), Some(&DeclaredConstraint::Null));
        assert_eq!(deps.get("build_number"), Some(&DeclaredConstraint::Opaque));
        assert_eq!(deps.get("flutter"), Some(&DeclaredConstraint::Opaque));
        assert_eq!(deps.get("missing"), None);
    }

    #[test]
    fn spans_exclude_quotes() {
        let deps = PubspecParser::parse(PUBSPEC).unwrap().dependencies;
        let quoted = deps.find("flutter_bloc").unwrap();
        let span = quoted.span.clone().unwrap();
        assert_eq!(&PUBSPEC[span], "^8.0.0");

        let plain = deps.find("bloc").unwrap();
        let span = plain.span.clone().unwrap();
        assert_eq!(&PUBSPEC[span], "^7.2.0");
    }

    #[test]
    fn missing_sections_are_empty() {
        let pubspec = PubspecParser::parse("name: empty\n").unwrap();
        assert!(pubspec.dependencies.is_empty());
        assert!(pubspec.dev_dependencies.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PubspecParser::load(dir.path().join("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, AdvisorError::ManifestParsing(_)));
    }

    fn dependency(yaml: &str, name: &str) -> Option<DeclaredConstraint> {
        PubspecParser::parse(yaml)
            .unwrap()
            .dependencies
            .get(name)
            .cloned()
    }

    fn text(value: &str) -> Option<DeclaredConstraint> {
        Some(DeclaredConstraint::Text(value.to_string()))
    }

    #[test]
    fn sections_remember_their_key() {
        let pubspec = PubspecParser::parse(PUBSPEC).unwrap();
        assert_eq!(
            pubspec.dependencies.section(),
            DependencySection::Dependencies
        );
        assert_eq!(
            pubspec.dev_dependencies.section(),
            DependencySection::DevDependencies
        );
        assert_eq!(
            pubspec.section(DependencySection::DevDependencies).get("bloc_test"),
            text("^8.0.0").as_ref()
        );
    }

    #[test]
    fn reads_flow_mapping_section() {
        let yaml = "dependencies: {bloc: ^7.2.0, flutter_bloc: \"^8.0.0\", meta: null}\n";
        assert_eq!(dependency(yaml, "bloc"), text("^7.2.0"));
        assert_eq!(dependency(yaml, "flutter_bloc"), text("^8.0.0"));
        assert_eq!(dependency(yaml, "meta"), Some(DeclaredConstraint::Null));
    }

    #[test]
    fn resolves_alias_to_anchored_constraint() {
        let yaml = "version: &bloc_version ^7.2.0\ndependencies:\n  bloc: *bloc_version\n";
        let pubspec = PubspecParser::parse(yaml).unwrap();
        let entry = pubspec.dependencies.find("bloc").unwrap();

        assert_eq!(entry.constraint, DeclaredConstraint::Text("^7.2.0".into()));
        assert_eq!(&yaml[entry.span.clone().unwrap()], "*bloc_version");
    }

    #[test]
    fn undefined_alias_is_opaque() {
        let yaml = "dependencies:\n  bloc: *missing\n";
        assert_eq!(dependency(yaml, "bloc"), Some(DeclaredConstraint::Opaque));
    }

    #[test]
    fn string_tag_keeps_scalar_as_text() {
        assert_eq!(dependency("dependencies:\n  bloc: !!str 8\n", "bloc"), text("8"));
        assert_eq!(
            dependency("dependencies:\n  bloc: !!str ^7.2.0\n", "bloc"),
            text("^7.2.0")
        );
    }

    #[test]
    fn block_scalars_are_text() {
        let folded = "dependencies:\n  bloc: >-\n    ^7.2.0\n  meta: ^1.0.0\n";
        assert_eq!(dependency(folded, "bloc"), text("^7.2.0"));
        assert_eq!(dependency(folded, "meta"), text("^1.0.0"));

        let literal = "dependencies:\n  bloc: |\n    >=7.0.0 <9.0.0\n";
        assert_eq!(dependency(literal, "bloc"), text(">=7.0.0 <9.0.0\n"));

        let folded_lines = "dependencies:\n  bloc: >-\n    >=7.0.0\n    <9.0.0\n";
        assert_eq!(dependency(folded_lines, "bloc"), text(">=7.0.0 <9.0.0"));
    }

    #[test]
    fn decodes_double_quoted_escapes() {
        let yaml = "dependencies:\n  bloc: \"\\u005e7.2.0\"\n  meta: \"\\x3e=1.0.0\\t\"\n";
        assert_eq!(dependency(yaml, "bloc"), text("^7.2.0"));
        assert_eq!(dependency(yaml, "meta"), text(">=1.0.0\t"));
    }

    #[test]
    fn single_quotes_unescape_doubled_quote() {
        let yaml = "dependencies:\n  bloc: 'it''s'\n";
        assert_eq!(dependency(yaml, "bloc"), text("it's"));
    }
}
