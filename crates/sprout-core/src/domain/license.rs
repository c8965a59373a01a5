//! License catalogue: which templates wrap a file for a given license.
//!
//! A file's content is its head templates, then the templates configured on
//! the file entry, then its foot templates.

use super::value_objects::{FileKind, License};

const NEWBSD_GO_HEAD: &[&str] = &["license.newbsd.gohead.t"];
const NEWBSD_README_FOOT: &[&str] = &["license.newbsd.readme.t"];
const NEWBSD_TEXT: &[&str] = &["license.newbsd.t"];

impl License {
    /// Templates rendered before the file's own templates.
    pub fn head_templates(&self, kind: FileKind) -> &'static [&'static str] {
        match (self, kind) {
            (Self::NewBsd, FileKind::Go | FileKind::Test) => NEWBSD_GO_HEAD,
            (Self::NewBsd, FileKind::License) => NEWBSD_TEXT,
            _ => &[],
        }
    }

    /// Templates rendered after the file's own templates.
    pub fn foot_templates(&self, kind: FileKind) -> &'static [&'static str] {
        match (self, kind) {
            (Self::NewBsd, FileKind::Readme) => NEWBSD_README_FOOT,
            _ => &[],
        }
    }

    /// Full template sequence for a file of `kind`.
    pub fn wrap<'a>(&self, kind: FileKind, body: &'a [String]) -> Vec<&'a str> {
        self.head_templates(kind)
            .iter()
            .copied()
            .chain(body.iter().map(String::as_str))
            .chain(self.foot_templates(kind).iter().copied())
            .collect()
    }
}
