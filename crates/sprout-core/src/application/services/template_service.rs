//! Template Service - assembles the layered template sources.
//!
//! External directories are scanned once; every file carrying the template
//! extension becomes a template named after its base name. The first
//! external directory has the highest precedence and the built-in source
//! the lowest.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateScanner,
    domain::{LayeredSources, TemplateSource},
    error::SproutResult,
};

/// Extension that marks a file as a template.
pub const TEMPLATE_EXTENSION: &str = "t";

/// Service for template source operations.
pub struct TemplateService {
    scanner: Box<dyn TemplateScanner>,
}

impl TemplateService {
    pub fn new(scanner: Box<dyn TemplateScanner>) -> Self {
        Self { scanner }
    }

    /// Load every template file below `root` as one source.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn load_directory(&self, root: &Path) -> SproutResult<TemplateSource> {
        let mut source = TemplateSource::new(root.display().to_string());

        for path in self.scanner.list_files(root)? {
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let body = self.scanner.read_to_string(&path)?;
            source.insert(name, body)?;
        }

        debug!(templates = source.len(), "template directory loaded");
        Ok(source)
    }

    /// External roots in precedence order, then the built-in source.
    pub fn layered(
        &self,
        builtin: TemplateSource,
        external_roots: &[PathBuf],
    ) -> SproutResult<LayeredSources> {
        let mut layers = LayeredSources::new();
        for root in external_roots {
            layers.push_fallback(self.load_directory(root)?);
        }
        layers.push_fallback(builtin);
        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use crate::error::SproutError;
    use indexmap::IndexMap;

    /// Directory tree held in memory: path -> body.
    struct FakeScanner(IndexMap<PathBuf, String>);

    impl FakeScanner {
        fn new(files: &[(&str, &str)]) -> Self {
            Self(
                files
                    .iter()
                    .map(|(p, b)| (PathBuf::from(p), (*b).to_owned()))
                    .collect(),
            )
        }
    }

    impl TemplateScanner for FakeScanner {
        fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>> {
            let files: Vec<_> = self.0.keys().filter(|p| p.starts_with(root)).cloned().collect();
            if files.is_empty() {
                return Err(ApplicationError::TemplateSourceIo {
                    path: root.into(),
                    reason: "no such directory".into(),
                }
                .into());
            }
            Ok(files)
        }

        fn read_to_string(&self, path: &Path) -> SproutResult<String> {
            Ok(self.0[path].clone())
        }
    }

    fn builtin() -> TemplateSource {
        let mut source = TemplateSource::new("builtin");
        source.insert("go.cmd.t", "builtin cmd").unwrap();
        source.insert("README.t", "builtin readme").unwrap();
        source
    }

    #[test]
    fn only_template_files_are_loaded_by_base_name() {
        let service = TemplateService::new(Box::new(FakeScanner::new(&[
            ("/ext/go/go.cmd.t", "mine"),
            ("/ext/notes.txt", "ignored"),
        ])));

        let source = service.load_directory(Path::new("/ext")).unwrap();
        assert_eq!(source.names().collect::<Vec<_>>(), ["go.cmd.t"]);
        assert_eq!(source.get("go.cmd.t"), Some("mine"));
    }

    #[test]
    fn duplicate_base_names_in_one_root_fail() {
        let service = TemplateService::new(Box::new(FakeScanner::new(&[
            ("/ext/a/x.t", "1"),
            ("/ext/b/x.t", "2"),
        ])));

        let err = service.load_directory(Path::new("/ext")).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::DuplicateTemplate { .. })
        ));
    }

    #[test]
    fn first_external_root_wins_then_builtin() {
        let service = TemplateService::new(Box::new(FakeScanner::new(&[
            ("/high/go.cmd.t", "high"),
            ("/low/go.cmd.t", "low"),
            ("/low/extra.t", "extra"),
        ])));

        let layers = service
            .layered(builtin(), &[PathBuf::from("/high"), PathBuf::from("/low")])
            .unwrap();

        assert_eq!(layers.resolve("go.cmd.t").unwrap().1, "high");
        assert_eq!(layers.resolve("extra.t").unwrap().1, "extra");
        assert_eq!(layers.resolve("README.t").unwrap().1, "builtin readme");
        assert_eq!(layers.sources().len(), 3);
    }

    #[test]
    fn scan_errors_propagate() {
        let service = TemplateService::new(Box::new(FakeScanner::new(&[])));
        assert!(service.layered(builtin(), &[PathBuf::from("/gone")]).is_err());
    }
}
