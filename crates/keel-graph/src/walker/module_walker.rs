//! Memoized walk of relative imports.
//!
//! `walk(file)` returns every package reachable from `file` through file
//! imports. Results are cached per file for the lifetime of the walker, so a
//! file is read at most once per run no matter how many entry points reach it.
//!
//! Import cycles between files are handled by finding strongly connected
//! components while walking: every file of a cycle reaches the same packages,
//! so the component is cached with one shared set once its root finishes.
//! Until then, members are only known to the current walk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use keel_core::errors::GraphError;
use keel_core::types::collections::PackageSet;
use keel_core::FxHashMap;
use moka::sync::Cache;
use tracing::trace;

use super::extract::extract_specifiers;
use super::source_fs::SourceFs;
use crate::resolution::{normalize, ResolutionPolicy, SpecifierKind};

pub struct ModuleWalker {
    fs: Arc<dyn SourceFs>,
    policy: Arc<ResolutionPolicy>,
    cache: Cache<PathBuf, Arc<PackageSet>>,
}

/// Result of reaching a file during a walk.
enum Reached {
    /// The file's package set is final.
    Complete(Arc<PackageSet>),
    /// The file is part of a component still being walked; carries its node id.
    Pending(usize),
}

enum Loaded {
    Known { path: PathBuf, reached: Reached },
    Source { path: PathBuf, source: String },
}

struct Node {
    path: PathBuf,
    low: usize,
    packages: PackageSet,
    result: Option<Arc<PackageSet>>,
}

/// Per-walk bookkeeping. Node ids are discovery order.
#[derive(Default)]
struct WalkState {
    ids: FxHashMap<PathBuf, usize>,
    nodes: Vec<Node>,
    stack: Vec<usize>,
}

impl WalkState {
    fn push(&mut self, path: PathBuf) -> usize {
        let id = self.nodes.len();
        self.ids.insert(path.clone(), id);
        self.nodes.push(Node {
            path,
            low: id,
            packages: PackageSet::new(),
            result: None,
        });
        self.stack.push(id);
        id
    }

    fn reached(&self, id: usize) -> Reached {
        match &self.nodes[id].result {
            Some(set) => Reached::Complete(Arc::clone(set)),
            None => Reached::Pending(id),
        }
    }

    /// Fold what `reached` contributes into node `into`.
    fn absorb(&mut self, into: usize, reached: &Reached) {
        match reached {
            Reached::Complete(set) => {
                self.nodes[into].packages.extend(set.iter().cloned());
            }
            Reached::Pending(other) => {
                let other = *other;
                if other == into {
                    return;
                }
                let low = self.nodes[other].low;
                let carried: Vec<_> = self.nodes[other].packages.iter().cloned().collect();
                let node = &mut self.nodes[into];
                node.low = node.low.min(low);
                node.packages.extend(carried);
            }
        }
    }
}

impl ModuleWalker {
    pub fn new(fs: Arc<dyn SourceFs>, policy: Arc<ResolutionPolicy>) -> Self {
        Self {
            fs,
            policy,
            cache: Cache::builder().name("module-walk").build(),
        }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Packages reachable from `file`.
    pub fn walk(&self, file: &Path) -> Result<Arc<PackageSet>, GraphError> {
        let file = normalize(file);
        if let Some(hit) = self.cache.get(&file) {
            return Ok(hit);
        }
        let mut state = WalkState::default();
        match self.visit(&file, &mut state)? {
            Reached::Complete(set) => Ok(set),
            // The first file has the lowest id, so its component always
            // closes before `visit` returns.
            Reached::Pending(id) => Ok(Arc::new(state.nodes[id].packages.clone())),
        }
    }

    fn visit(&self, requested: &Path, state: &mut WalkState) -> Result<Reached, GraphError> {
        let (path, source) = match self.load(requested, state)? {
            Loaded::Known { path, reached } => {
                self.alias(requested, &path, &reached, state);
                return Ok(reached);
            }
            Loaded::Source { path, source } => (path, source),
        };

        trace!(file = %path.display(), "walking");
        let id = state.push(path.clone());

        for specifier in extract_specifiers(&source, &path)? {
            match self.policy.classify(&specifier) {
                SpecifierKind::File => {
                    let target = self.policy.resolve_file(&path, &specifier);
                    let reached = self.visit(&target, state)?;
                    state.absorb(id, &reached);
                }
                SpecifierKind::Package(package) => {
                    state.nodes[id].packages.insert(package);
                }
                SpecifierKind::Builtin | SpecifierKind::Ignored => {}
            }
        }

        let reached = if state.nodes[id].low == id {
            let set = Arc::new(std::mem::take(&mut state.nodes[id].packages));
            while let Some(member) = state.stack.pop() {
                state.nodes[member].result = Some(Arc::clone(&set));
                self.cache
                    .insert(state.nodes[member].path.clone(), Arc::clone(&set));
                if member == id {
                    break;
                }
            }
            Reached::Complete(set)
        } else {
            Reached::Pending(id)
        };

        self.alias(requested, &path, &reached, state);
        Ok(reached)
    }

    /// Remember that `requested` resolved to `resolved`.
    fn alias(&self, requested: &Path, resolved: &Path, reached: &Reached, state: &mut WalkState) {
        if requested == resolved {
            return;
        }
        match reached {
            Reached::Complete(set) => self.cache.insert(requested.to_path_buf(), Arc::clone(set)),
            Reached::Pending(id) => {
                state.ids.insert(requested.to_path_buf(), *id);
            }
        }
    }

    /// Find the file behind `requested`, applying resolution fallbacks.
    /// Candidates already cached or already in this walk are not read again.
    fn load(&self, requested: &Path, state: &WalkState) -> Result<Loaded, GraphError> {
        let mut pending = vec![requested.to_path_buf()];
        let mut last_failure = None;

        while let Some(candidate) = pending.pop() {
            if let Some(set) = self.cache.get(&candidate) {
                return Ok(Loaded::Known {
                    path: candidate,
                    reached: Reached::Complete(set),
                });
            }
            if let Some(&id) = state.ids.get(&candidate) {
                return Ok(Loaded::Known {
                    path: candidate,
                    reached: state.reached(id),
                });
            }
            match self.fs.read_source(&candidate) {
                Ok(source) => {
                    return Ok(Loaded::Source {
                        path: candidate,
                        source,
                    })
                }
                Err(failure) => {
                    let retries = self.policy.candidates(&candidate, &failure);
                    trace!(
                        file = %candidate.display(),
                        %failure,
                        retries = retries.len(),
                        "read failed"
                    );
                    pending.extend(retries.into_iter().rev());
                    last_failure = Some((candidate, failure));
                }
            }
        }

        let (attempted, message) = match last_failure {
            Some((path, failure)) => (path, failure.to_string()),
            None => (requested.to_path_buf(), "no candidates".to_string()),
        };
        Err(GraphError::UnresolvableEntryPoint {
            path: requested.to_path_buf(),
            attempted,
            message,
        })
    }
}
