use std::fs;
use std::io::Write;
use std::path::Path;

use aho_corasick::{AhoCorasick, MatchKind};
use regex::bytes::Regex;

use super::error::FixError;
use super::imports;
use super::rules::{FileScope, LiteralRule, PatternRule, RuleSet, ScopedRules, SourceRule};

/// One step of the rewrite pipeline.
///
/// Stages receive the output of the previous stage together with the path
/// of the file being rewritten, so they can restrict themselves to certain
/// file types. Content is raw bytes: files are not required to be UTF-8.
pub trait Stage {
    fn name(&self) -> &'static str;

    fn apply(&self, path: &Path, content: Vec<u8>) -> Vec<u8>;
}

/// All literal rules as a single simultaneous pass.
///
/// Matching is leftmost-first: at each position the earliest registered rule
/// wins, and replaced text is never matched again within the pass.
pub struct LiteralStage {
    matcher: AhoCorasick,
    replacements: Vec<String>,
}

impl LiteralStage {
    pub fn new(rules: &[LiteralRule]) -> Result<Self, FixError> {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(rules.iter().map(|r| r.from.as_str()))?;
        let replacements = rules.iter().map(|r| r.to.clone()).collect();
        Ok(Self {
            matcher,
            replacements,
        })
    }
}

impl Stage for LiteralStage {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn apply(&self, _path: &Path, content: Vec<u8>) -> Vec<u8> {
        if self.replacements.is_empty() {
            return content;
        }
        self.matcher.replace_all_bytes(&content, &self.replacements)
    }
}

/// Literal replacements applied one after another, each over the whole text.
pub struct CorrectionStage {
    rules: Vec<SingleLiteral>,
}

impl CorrectionStage {
    pub fn new(rules: &[LiteralRule]) -> Result<Self, FixError> {
        Ok(Self {
            rules: compile_sequence(rules)?,
        })
    }
}

impl Stage for CorrectionStage {
    fn name(&self) -> &'static str {
        "correction"
    }

    fn apply(&self, _path: &Path, content: Vec<u8>) -> Vec<u8> {
        replace_sequentially(content, &self.rules)
    }
}

/// Regex rewrites applied in order, each with replace-all.
pub struct PatternStage {
    rules: Vec<(Regex, String)>,
}

impl PatternStage {
    pub fn new(rules: &[PatternRule]) -> Result<Self, FixError> {
        let rules = rules
            .iter()
            .map(|r| -> Result<(Regex, String), FixError> {
                Ok((Regex::new(&r.pattern)?, r.template.clone()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }
}

impl Stage for PatternStage {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, _path: &Path, content: Vec<u8>) -> Vec<u8> {
        self.rules.iter().fold(content, |content, (re, template)| {
            re.replace_all(&content, template.as_bytes()).into_owned()
        })
    }
}

struct CompiledSourceRule {
    regex: Regex,
    template: String,
    extension: String,
    import: String,
}

/// Regex rewrites that only apply to source files and pull in an import.
pub struct SourceStage {
    rules: Vec<CompiledSourceRule>,
}

impl SourceStage {
    pub fn new(rules: &[SourceRule]) -> Result<Self, FixError> {
        let rules = rules
            .iter()
            .map(|r| -> Result<CompiledSourceRule, FixError> {
                Ok(CompiledSourceRule {
                    regex: Regex::new(&r.rule.pattern)?,
                    template: r.rule.template.clone(),
                    extension: r.extension.clone(),
                    import: r.import.clone(),
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }
}

impl Stage for SourceStage {
    fn name(&self) -> &'static str {
        "source"
    }

    fn apply(&self, path: &Path, mut content: Vec<u8>) -> Vec<u8> {
        for rule in &self.rules {
            let is_source = path
                .extension()
                .map_or(false, |ext| ext == rule.extension.as_str());
            if !is_source || !rule.regex.is_match(&content) {
                continue;
            }

            content = rule
                .regex
                .replace_all(&content, rule.template.as_bytes())
                .into_owned();
            tracing::debug!(path = %path.display(), import = %rule.import, "source rule applied");

            if imports::has_import(&String::from_utf8_lossy(&content), &rule.import) {
                continue;
            }
            match imports::insert_import(&content, &rule.import) {
                Some(updated) => content = updated,
                None => tracing::warn!(
                    path = %path.display(),
                    "no import block found, add \"{}\" manually",
                    rule.import
                ),
            }
        }
        content
    }
}

/// Literal renames that only apply to files matching a [`FileScope`](super::rules::FileScope).
pub struct ScopedStage {
    groups: Vec<(FileScope, Vec<SingleLiteral>)>,
}

impl ScopedStage {
    pub fn new(groups: &[ScopedRules]) -> Result<Self, FixError> {
        let groups = groups
            .iter()
            .map(|group| -> Result<_, FixError> {
                Ok((group.scope.clone(), compile_sequence(&group.rules)?))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { groups })
    }
}

impl Stage for ScopedStage {
    fn name(&self) -> &'static str {
        "scoped"
    }

    fn apply(&self, path: &Path, content: Vec<u8>) -> Vec<u8> {
        self.groups
            .iter()
            .filter(|(scope, _)| scope.matches(path))
            .fold(content, |content, (_, rules)| replace_sequentially(content, rules))
    }
}

/// One literal rule compiled on its own, for rules applied in sequence.
struct SingleLiteral {
    matcher: AhoCorasick,
    to: String,
}

fn compile_sequence(rules: &[LiteralRule]) -> Result<Vec<SingleLiteral>, FixError> {
    rules
        .iter()
        .map(|rule| -> Result<SingleLiteral, FixError> {
            Ok(SingleLiteral {
                matcher: AhoCorasick::new([rule.from.as_str()])?,
                to: rule.to.clone(),
            })
        })
        .collect()
}

fn replace_sequentially(content: Vec<u8>, rules: &[SingleLiteral]) -> Vec<u8> {
    rules.iter().fold(content, |content, rule| {
        if rule.matcher.is_match(&content) {
            rule.matcher.replace_all_bytes(&content, &[rule.to.as_str()])
        } else {
            content
        }
    })
}

/// The full rewrite pipeline.
pub struct Rewriter {
    stages: Vec<Box<dyn Stage>>,
}

impl Rewriter {
    /// Compile `rules` into the stage order literal, correction, pattern,
    /// source, scoped.
    pub fn new(rules: &RuleSet) -> Result<Self, FixError> {
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(LiteralStage::new(&rules.literals)?),
            Box::new(CorrectionStage::new(&rules.corrections)?),
            Box::new(PatternStage::new(&rules.patterns)?),
            Box::new(SourceStage::new(&rules.source_rules)?),
            Box::new(ScopedStage::new(&rules.scoped)?),
        ];
        Ok(Self::from_stages(stages))
    }

    pub fn from_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Shorthand for `Rewriter::new(&RuleSet::upgrade())`.
    pub fn upgrade() -> Result<Self, FixError> {
        Self::new(&RuleSet::upgrade())
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `content`, which was read from `path`.
    pub fn rewrite_bytes(&self, path: &Path, content: &[u8]) -> Vec<u8> {
        self.stages
            .iter()
            .fold(content.to_vec(), |content, stage| stage.apply(path, content))
    }

    /// [`rewrite_bytes`](Self::rewrite_bytes) for text already in memory.
    pub fn rewrite(&self, path: &Path, content: &str) -> String {
        match String::from_utf8(self.rewrite_bytes(path, content.as_bytes())) {
            Ok(fixed) => fixed,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    /// Rewrite `path` in place.
    ///
    /// The file is truncated before the new content is written. If the write
    /// fails the file is left empty and [`FixError::Write`] is returned.
    pub fn fix_file(&self, path: &Path) -> Result<(), FixError> {
        let content = fs::read(path).map_err(|source| FixError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let fixed = self.rewrite_bytes(path, &content);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| FixError::Truncate {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(&fixed)
            .map_err(|source| FixError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
