//! Layer boundary lint for the registry backend.
//!
//! `backend/src` is split into three layers. `domain` holds the record model,
//! ports and service and may reach neither adapter layer nor any HTTP crate.
//! `inbound` holds the actix handlers and must go through domain ports rather
//! than `outbound`. `outbound` holds storage and must stay clear of `inbound`
//! and the HTTP stack. Wiring the layers together is the job of `server`,
//! which is not linted.
//!
//! Run it with `cargo run -p architecture-lint` from the workspace root.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use thiserror::Error;

/// Name the backend library is imported under from its binaries and tests.
const BACKEND_CRATE: &str = "registry_backend";

/// Crates that make up the HTTP and OpenAPI surface.
const HTTP_CRATES: [&str; 6] = [
    "actix_cors",
    "actix_http",
    "actix_service",
    "actix_web",
    "utoipa",
    "utoipa_swagger_ui",
];

/// Outbound HTTP client; only the CLI crate talks to the network this way.
const CLIENT_CRATE: &str = "reqwest";

/// One forbidden reference, reported once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending file, relative to `backend/src`.
    pub file: PathBuf,
    /// Which layer reached for what.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Why a lint run did not pass.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    /// A source directory or file could not be read.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A source could not be parsed or placed in a layer.
    #[error("failed to parse {} while linting architecture: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    /// The sources parsed but break layer rules.
    #[error("architecture boundary violations:\n{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

impl ArchitectureLintError {
    /// Violations carried by the error; empty for I/O and parse failures.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Violations(violations) => violations,
            _ => &[],
        }
    }

    fn parse(file: &Path, message: impl fmt::Display) -> Self {
        Self::Parse {
            file: file.to_path_buf(),
            message: message.to_string(),
        }
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// In-memory source handed to [`lint_sources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Location under `backend/src`; its first component picks the layer.
    pub file: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn named(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir() == name)
    }

    fn containing(file: &Path) -> Option<Self> {
        let first = file.components().next()?;
        Self::named(first.as_os_str().to_str()?)
    }

    const fn may_not_reach(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Domain, Self::Inbound | Self::Outbound)
                | (Self::Inbound, Self::Outbound)
                | (Self::Outbound, Self::Inbound)
        )
    }

    fn may_not_use(self, krate: &str) -> bool {
        let http = HTTP_CRATES.contains(&krate);
        match self {
            Self::Domain => http || krate == CLIENT_CRATE,
            Self::Inbound => krate == CLIENT_CRATE,
            Self::Outbound => http,
        }
    }
}

/// Something a path can point at, reduced to what the rules care about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Target {
    Layer(Layer),
    Crate(String),
}

impl Target {
    /// Resolve the leading segments of a path.
    ///
    /// `crate::`, `self::` and `super::` chains and the backend's own crate
    /// name lead into the backend; any other first segment names a crate or a
    /// bare layer module.
    fn of(segments: &[String]) -> Option<Self> {
        let mut rest = segments.iter().map(String::as_str);
        let head = match rest.next()? {
            "crate" | "self" | "super" => rest.find(|s| !matches!(*s, "self" | "super"))?,
            BACKEND_CRATE => rest.next()?,
            other => {
                return Some(
                    Layer::named(other).map_or_else(|| Self::Crate(other.to_owned()), Self::Layer),
                );
            }
        };
        Layer::named(head).map(Self::Layer)
    }

    fn violation_in(&self, layer: Layer) -> Option<String> {
        let name = layer.dir();
        match self {
            Self::Layer(other) if layer.may_not_reach(*other) => Some(format!(
                "{name} module must not depend on crate::{}",
                other.dir()
            )),
            Self::Crate(krate) if layer.may_not_use(krate) => Some(format!(
                "{name} module must not depend on external crate `{krate}`"
            )),
            _ => None,
        }
    }
}

/// Everything a file refers to through `use` items and qualified paths.
///
/// Single-segment expression paths are locals or prelude names, so only
/// qualified ones count.
#[derive(Default)]
struct References(BTreeSet<Target>);

impl References {
    fn add_use_tree(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.add_use_tree(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.0.extend(Target::of(prefix));
                prefix.pop();
            }
            syn::UseTree::Glob(_) => self.0.extend(Target::of(prefix)),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.add_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for References {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.add_use_tree(&node.tree, &mut Vec::new());
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        if node.segments.len() > 1 {
            let segments: Vec<String> = node
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect();
            self.0.extend(Target::of(&segments));
        }
        syn::visit::visit_path(self, node);
    }
}

/// Read and lint the layer directories of a backend checkout.
///
/// `backend_dir` is the crate directory, the one holding `src/`.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let sources = read_layer_sources(&backend_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::containing(&source.file).ok_or_else(|| {
            ArchitectureLintError::parse(&source.file, "not under a linted layer directory")
        })?;
        let parsed = syn::parse_file(&source.contents)
            .map_err(|err| ArchitectureLintError::parse(&source.file, err))?;

        let mut references = References::default();
        references.visit_file(&parsed);
        violations.extend(references.0.iter().filter_map(|target| {
            target.violation_in(layer).map(|message| Violation {
                file: source.file.clone(),
                message,
            })
        }));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Read every `.rs` file below the layer directories of `src_dir`.
fn read_layer_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut pending: Vec<PathBuf> = Layer::ALL
        .iter()
        .map(|layer| src_dir.join(layer.dir()))
        .filter(|dir| dir.is_dir())
        .collect();
    let mut sources = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let file = path
                    .strip_prefix(src_dir)
                    .map_err(|err| ArchitectureLintError::parse(&path, err))?
                    .to_path_buf();
                let contents = fs::read_to_string(&path)?;
                sources.push(LintSource { file, contents });
            }
        }
    }

    sources.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(sources)
}

#[cfg(test)]
mod tests;
