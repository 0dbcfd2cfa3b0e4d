use derive_new::new;
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: &FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Writes `content` to `dir/name` and returns its `FileSpec`
pub fn write_named_file(dir: &Path, name: &str, content: &str) -> FileSpec {
    let file_spec = FileSpec::new(dir.join(name), content.to_string());
    write_file(&file_spec);
    file_spec
}

/// Generates `lines_count` lines of lorem ipsum text, each newline terminated
pub fn generate_lines(lines_count: usize) -> Vec<String> {
    (0..lines_count)
        .map(|_| format!("{}\n", Words(3..8).fake::<Vec<String>>().join(" ")))
        .collect()
}

pub fn random_file_name() -> String {
    format!("{}.txt", Word().fake::<String>())
}
