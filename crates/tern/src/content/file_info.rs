use std::path::{Path, PathBuf};

/// The basename of a page that stands for its directory.
pub const INDEX_STEM: &str = "index";

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub parent: PathBuf,
    /// The directories between the content root and the file.
    pub components: Vec<String>,
    pub stem: String,
}

impl FileInfo {
    pub fn new(root_path: impl AsRef<Path>, path: impl AsRef<Path>) -> Self {
        let root_path = root_path.as_ref();
        let path = path.as_ref();
        Self {
            path: path.to_owned(),
            parent: path.parent().unwrap_or(root_path).to_owned(),
            components: Self::components(root_path, path),
            stem: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    fn components(root_path: impl AsRef<Path>, path: impl AsRef<Path>) -> Vec<String> {
        let path = path.as_ref();
        path.strip_prefix(root_path)
            .unwrap_or(path)
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_index(&self) -> bool {
        self.stem == INDEX_STEM
    }

    /// The first directory below the content root, if any.
    pub fn top_level(&self) -> Option<&str> {
        self.components.first().map(String::as_str)
    }

    /// Returns the route this file is served at: rooted, with a trailing
    /// slash, and with an `index` basename folded into its directory.
    pub fn route(&self) -> String {
        let mut segments = self
            .components
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();

        if !self.is_index() {
            segments.push(&self.stem);
        }

        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_info() {
        let file = FileInfo::new("content", "content/index.md");
        assert_eq!(
            file,
            FileInfo {
                path: PathBuf::from("content/index.md"),
                parent: PathBuf::from("content"),
                components: vec![],
                stem: "index".into(),
            }
        );

        let file = FileInfo::new("content", "content/a/b/c/d/index.md");
        assert_eq!(
            file,
            FileInfo {
                path: PathBuf::from("content/a/b/c/d/index.md"),
                parent: PathBuf::from("content/a/b/c/d"),
                components: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                stem: "index".into(),
            }
        );

        let file = FileInfo::new("some/other/path", "some/other/path/blog/hello-world.md");
        assert_eq!(
            file,
            FileInfo {
                path: PathBuf::from("some/other/path/blog/hello-world.md"),
                parent: PathBuf::from("some/other/path/blog"),
                components: vec!["blog".into()],
                stem: "hello-world".into(),
            }
        );
    }

    #[test]
    fn test_route() {
        assert_eq!(FileInfo::new("content", "content/index.md").route(), "/");
        assert_eq!(FileInfo::new("content", "content/about.md").route(), "/about/");
        assert_eq!(
            FileInfo::new("content", "content/blog/index.md").route(),
            "/blog/"
        );
        assert_eq!(
            FileInfo::new("content", "content/blog/2024/hello.md").route(),
            "/blog/2024/hello/"
        );
        assert_eq!(
            FileInfo::new("content", "content/life/trip.vue").route(),
            "/life/trip/"
        );
        assert_eq!(
            FileInfo::new("content", "content/life/index.vue").route(),
            "/life/"
        );
    }

    #[test]
    fn test_top_level() {
        assert_eq!(
            FileInfo::new("content", "content/notes/rust/index.md").top_level(),
            Some("notes")
        );
        assert_eq!(FileInfo::new("content", "content/index.md").top_level(), None);
    }
}
