use crate::libs::synteny::{format::write_permutations, Permutation};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Optional directory receiving diagnostics of an inference pass.
///
/// Write failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct DebugSink {
    dir: PathBuf,
}

impl DebugSink {
    pub fn new(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `comp{id}-bg.dot` and `comp{id}-weighted.dot`
    pub fn write_component(&self, comp_id: usize, breakpoint_dot: &str, weighted_dot: &str) {
        self.write_file(&format!("comp{}-bg.dot", comp_id), breakpoint_dot.as_bytes());
        self.write_file(&format!("comp{}-weighted.dot", comp_id), weighted_dot.as_bytes());
    }

    /// Permutations in the text format, e.g. the target contigs actually used
    pub fn write_permutations(&self, name: &str, perms: &[Permutation]) {
        let mut buffer: Vec<u8> = Vec::new();
        match write_permutations(perms, &mut buffer) {
            Ok(()) => self.write_file(name, &buffer),
            Err(e) => log::warn!("Can't render {}: {}", name, e),
        }
    }

    fn write_file(&self, name: &str, content: &[u8]) {
        let path = self.dir.join(name);
        let result = std::fs::File::create(&path).and_then(|mut f| f.write_all(content));
        if let Err(e) = result {
            log::warn!("Can't write {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_files() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DebugSink::new(tmp.path().join("debug")).unwrap();

        sink.write_component(3, "graph {}\n", "graph { }\n");
        sink.write_permutations(
            "used_contigs.txt",
            &[Permutation::from_signed("tgt", "ctg1", &[1, -2])],
        );

        let bg = std::fs::read_to_string(sink.dir().join("comp3-bg.dot")).unwrap();
        assert_eq!(bg, "graph {}\n");
        assert!(sink.dir().join("comp3-weighted.dot").exists());

        let used = std::fs::read_to_string(sink.dir().join("used_contigs.txt")).unwrap();
        assert_eq!(used, ">tgt.ctg1\n+1 -2 $\n");
    }
}
