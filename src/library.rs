//! Library groups and the output layout.
//!
//! Every produced file belongs to exactly one group. The group decides the
//! folder the file is written to and the stencil library it is packaged into:
//!
//! ```text
//! regular/[category/]name.ext
//! circled/[category/]name.svg
//! <collection>/name.svg
//! libraries/<group>.xml
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::record::sanitize_category;
use crate::stencil::{StencilDocument, package};

/// Folder holding the packaged library documents.
pub const LIBRARIES_DIR: &str = "libraries";

const REGULAR_DIR: &str = "regular";
const CIRCLED_DIR: &str = "circled";
/// Folder for a glyph collection without a usable name, and the prefix that
/// moves a collection out of the way of the built-in folders.
const GLYPHS_DIR: &str = "glyphs";

/// Top-level asset kind.
///
/// `Glyphs` holds the collection's folder name; build it with
/// [`GroupKind::glyphs`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    Regular,
    Circled,
    Glyphs(String),
}

impl GroupKind {
    /// Kind for a glyph collection.
    ///
    /// The collection name becomes a single path segment. Names that would
    /// land on `regular`, `circled` or `libraries`, or on a category library
    /// such as `regular-<category>`, are prefixed with `glyphs-`.
    pub fn glyphs(collection: &str) -> Self {
        let dir = sanitize_category(collection);
        if dir.is_empty() {
            return Self::Glyphs(GLYPHS_DIR.into());
        }
        let lower = dir.to_lowercase();
        let clashes = [REGULAR_DIR, CIRCLED_DIR, LIBRARIES_DIR]
            .iter()
            .any(|reserved| lower == *reserved)
            || [REGULAR_DIR, CIRCLED_DIR]
                .iter()
                .any(|reserved| lower.starts_with(&format!("{reserved}-")));
        if clashes {
            Self::Glyphs(format!("{GLYPHS_DIR}-{dir}"))
        } else {
            Self::Glyphs(dir)
        }
    }

    pub fn dir_name(&self) -> String {
        match self {
            Self::Regular => REGULAR_DIR.into(),
            Self::Circled => CIRCLED_DIR.into(),
            Self::Glyphs(dir) => dir.clone(),
        }
    }
}

/// Identifies a group: the kind, optionally split by category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub kind: GroupKind,
    pub category: Option<String>,
}

impl GroupKey {
    pub fn new(kind: GroupKind, category: Option<String>) -> Self {
        Self { kind, category }
    }

    /// Key for a catalog asset; the category only counts when grouping by it.
    pub fn for_asset(kind: GroupKind, category: &str, by_category: bool) -> Self {
        let category = sanitize_category(category);
        let category = (by_category && !category.is_empty()).then_some(category);
        Self::new(kind, category)
    }

    /// Folder of the group's files, relative to the output root.
    pub fn dir(&self) -> PathBuf {
        let mut dir = PathBuf::from(self.kind.dir_name());
        if let Some(category) = &self.category {
            dir.push(category);
        }
        dir
    }

    /// Relative path of one file in this group.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.dir().join(file_name)
    }

    /// Library name: the folder path with `/` replaced by `-`.
    pub fn library_name(&self) -> String {
        match &self.category {
            Some(category) => format!("{}-{}", self.kind.dir_name(), category),
            None => self.kind.dir_name(),
        }
    }

    /// Relative path of the group's library document.
    pub fn library_path(&self) -> PathBuf {
        library_path(&self.library_name())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.library_name())
    }
}

/// `libraries/<name>.xml`
pub fn library_path(name: &str) -> PathBuf {
    Path::new(LIBRARIES_DIR).join(format!("{name}.xml"))
}

// ============================================================================
// LibraryGroup
// ============================================================================

/// A finished file as it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl LibraryFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// A named, ordered set of finished files destined for one library.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LibraryGroup {
    pub name: String,
    pub files: Vec<LibraryFile>,
}

impl LibraryGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: LibraryFile) {
        self.files.push(file);
    }

    /// Builds a group from the regular files directly inside `dir`, sorted
    /// by file name. Sub-directories are ignored.
    pub fn scan(name: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut group = Self::new(name);
        for path in paths {
            let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            group.push(LibraryFile::new(file_name, bytes));
        }
        Ok(group)
    }

    /// Packages the group into its stencil document.
    pub fn package(&self) -> Result<StencilDocument> {
        package(&self.name, &self.files)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_layout() {
        let key = GroupKey::for_asset(GroupKind::Regular, "Integration", false);
        assert_eq!(key.file_path("a.png"), PathBuf::from("regular/a.png"));
        assert_eq!(key.library_name(), "regular");
        assert_eq!(key.library_path(), PathBuf::from("libraries/regular.xml"));
    }

    #[test]
    fn category_layout() {
        let key = GroupKey::for_asset(GroupKind::Circled, "Integration", true);
        assert_eq!(
            key.file_path("a.svg"),
            PathBuf::from("circled/Integration/a.svg")
        );
        assert_eq!(key.to_string(), "circled-Integration");
    }

    #[test]
    fn empty_category_is_not_a_folder() {
        let key = GroupKey::for_asset(GroupKind::Regular, "", true);
        assert_eq!(key.category, None);
    }

    #[test]
    fn glyph_collection_folder() {
        let key = GroupKey::new(GroupKind::glyphs("SAP-icons"), None);
        assert_eq!(key.file_path("add.svg"), PathBuf::from("SAP-icons/add.svg"));
        assert_eq!(key.library_path(), PathBuf::from("libraries/SAP-icons.xml"));
    }

    #[test]
    fn glyph_collection_stays_inside_output() {
        for (collection, dir) in [("..", "--"), ("a/../b", "a-..-b"), ("", "glyphs")] {
            let key = GroupKey::new(GroupKind::glyphs(collection), None);
            assert_eq!(key.dir(), PathBuf::from(dir), "{collection:?}");
        }
    }

    #[test]
    fn glyph_collection_avoids_builtin_names() {
        for (collection, library) in [
            ("regular", "glyphs-regular"),
            ("Circled", "glyphs-Circled"),
            ("libraries", "glyphs-libraries"),
            ("regular-One", "glyphs-regular-One"),
            ("regularish", "regularish"),
        ] {
            let key = GroupKey::new(GroupKind::glyphs(collection), None);
            assert_eq!(key.library_name(), library);
        }
    }

    #[test]
    fn dotted_category_is_one_segment() {
        let key = GroupKey::for_asset(GroupKind::Regular, "..", true);
        assert_eq!(key.file_path("X.svg"), PathBuf::from("regular/--/X.svg"));
    }

    #[test]
    fn scan_sorts_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.svg"), b"b").unwrap();
        fs::write(dir.path().join("a.svg"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let group = LibraryGroup::scan("g", dir.path()).unwrap();
        let names: Vec<_> = group.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["a.svg", "b.svg"]);
        assert_eq!(group.files[0].bytes, b"a");
    }

    #[test]
    fn scan_missing_dir_is_io_error() {
        let err = LibraryGroup::scan("g", Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
