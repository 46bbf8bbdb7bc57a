use std::path::Path;

/// A small TypeScript project for integration tests.
///
/// Structure:
///   src/a.ts               -> ./b, lodash, components/Button, ./missing
///   src/b.ts               -> (nothing)
///   components/Button.tsx  -> react, via a multi-line import
///   README.md              -> not a recognized extension
///
/// Properties:
///   - 3 files, 5 imports
///   - 2 resolved edges: a -> b, a -> Button
///   - 1 unresolved local import: ./missing
///   - 1 entry file: src/a.ts
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create the fixture. Caller must keep the returned value alive
    /// (dropping `TempDir` deletes the files).
    pub fn new() -> Self {
        let p = Self::empty();
        p.write(
            "src/a.ts",
            concat!(
                "import { b } from './b';\n",
                "import _ from 'lodash';\n",
                "import { Button } from 'components/Button';\n",
                "import { gone } from './missing';\n",
                "export const a = b + 1;\n",
            ),
        );
        p.write("src/b.ts", "export const b = 1;\n");
        p.write(
            "components/Button.tsx",
            concat!(
                "import {\n",
                "  useState,\n",
                "  useEffect,\n",
                "} from \"react\";\n",
                "export const Button = () => null;\n",
            ),
        );
        p.write("README.md", "import nothing from 'here';\n");
        p
    }

    /// Two files: `a.ts` imports `./b`.
    pub fn pair() -> Self {
        let p = Self::empty();
        p.write("a.ts", "import { b } from \"./b\";\n");
        p.write("b.ts", "export const b = 1;\n");
        p
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Layout engine stand-in: writes `format=<T>` then its stdin to the `-o` path.
#[cfg(unix)]
pub const COPYING_ENGINE: &str = r#"out=""
fmt=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -T*) fmt="${1#-T}"; shift ;;
    *) shift ;;
  esac
done
{ echo "format=$fmt"; cat; } > "$out"
"#;

/// Write an executable `sh` script named `name` into `dir` and return its path.
#[cfg(unix)]
pub fn fake_engine(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
