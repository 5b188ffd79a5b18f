use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::{debug, info, warn};

use super::entry::DesktopEntry;

/// Every visible application entry, deduplicated, in discovery order.
pub struct Catalog {
    entries: Vec<DesktopEntry>,
}

impl Catalog {
    /// Scan `roots` in priority order. Earlier roots win (name, exec) ties,
    /// and a file that cannot be read is skipped rather than failing the
    /// whole scan.
    pub fn build(roots: &[PathBuf], language: Option<&str>) -> Self {
        let mut parsed = Vec::new();
        for root in roots {
            if !root.is_dir() {
                debug!("skipping missing applications directory {:?}", root);
                continue;
            }
            debug!("scanning desktop files in {:?}", root);
            for path in descriptor_files(root) {
                match fs::read_to_string(&path) {
                    Ok(text) => parsed.push(DesktopEntry::parse(&text, language)),
                    Err(err) => warn!("skipping unreadable desktop file {:?}: {}", path, err),
                }
            }
        }

        let scanned = parsed.len();
        let catalog = Self::from_entries(parsed);
        info!(
            "catalog: kept {} of {} desktop entries",
            catalog.entries.len(),
            scanned
        );
        catalog
    }

    /// Drop hidden entries, then deduplicate by (name, exec) keeping the
    /// first occurrence.
    pub fn from_entries(parsed: impl IntoIterator<Item = DesktopEntry>) -> Self {
        let mut entries: Vec<DesktopEntry> = Vec::new();
        for entry in parsed {
            if entry.is_hidden() {
                continue;
            }
            let duplicate = entries.iter().any(|seen| {
                seen.get("name") == entry.get("name") && seen.get("exec") == entry.get("exec")
            });
            if !duplicate {
                entries.push(entry);
            }
        }
        Catalog { entries }
    }

    /// Entries in stable discovery order.
    pub fn all(&self) -> &[DesktopEntry] {
        &self.entries
    }
}

/// The fixed search roots, highest priority first, then any configured
/// extras.
pub fn search_roots(extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(base_dirs) = BaseDirs::new() {
        roots.push(base_dirs.data_dir().join("applications"));
    }
    roots.push(PathBuf::from("/usr/share/applications"));
    roots.push(PathBuf::from("/usr/local/share/applications"));
    roots.extend(extra_dirs.iter().cloned());
    roots
}

/// `*.desktop` files directly under `root`, sorted by name so discovery
/// order is reproducible.
fn descriptor_files(root: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = read_dir
        .flatten()
        .map(|dir_entry| dir_entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("desktop"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_desktop(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn earlier_roots_win_duplicate_entries() {
        let user = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();
        write_desktop(
            user.path(),
            "editor.desktop",
            "[Desktop Entry]\nName=Editor\nExec=editor\nComment=User copy\n",
        );
        write_desktop(
            system.path(),
            "editor.desktop",
            "[Desktop Entry]\nName=Editor\nExec=editor\nComment=System copy\n",
        );

        let roots = vec![user.path().to_path_buf(), system.path().to_path_buf()];
        let catalog = Catalog::build(&roots, None);

        assert_eq!(catalog.all().len(), 1);
        assert_eq!(
            catalog.all()[0].get("comment"),
            Some(&crate::model::Value::String("User copy".into()))
        );
    }

    #[test]
    fn same_name_different_exec_is_not_a_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(
            dir.path(),
            "a.desktop",
            "[Desktop Entry]\nName=Shell\nExec=bash\n",
        );
        write_desktop(
            dir.path(),
            "b.desktop",
            "[Desktop Entry]\nName=Shell\nExec=zsh\n",
        );

        let catalog = Catalog::build(&[dir.path().to_path_buf()], None);
        assert_eq!(catalog.all().len(), 2);
    }

    #[test]
    fn hidden_entries_never_enter_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(
            dir.path(),
            "hidden.desktop",
            "[Desktop Entry]\nName=Secret\nExec=secret\nNoDisplay=true\n",
        );
        write_desktop(
            dir.path(),
            "shown.desktop",
            "[Desktop Entry]\nName=Shown\nExec=shown\nNoDisplay=false\n",
        );

        let catalog = Catalog::build(&[dir.path().to_path_buf()], None);
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.all()[0].name(), Some("Shown"));
    }

    #[test]
    fn unreadable_files_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory with the right extension defeats read_to_string.
        fs::create_dir(dir.path().join("broken.desktop")).unwrap();
        write_desktop(
            dir.path(),
            "fine.desktop",
            "[Desktop Entry]\nName=Fine\nExec=fine\n",
        );

        let catalog = Catalog::build(&[dir.path().to_path_buf()], None);
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.all()[0].name(), Some("Fine"));
    }

    #[test]
    fn only_desktop_files_are_considered() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(dir.path(), "notes.txt", "[Desktop Entry]\nName=Notes\n");
        write_desktop(
            dir.path(),
            "app.desktop",
            "[Desktop Entry]\nName=App\nExec=app\n",
        );

        let catalog = Catalog::build(&[dir.path().to_path_buf()], None);
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.all()[0].name(), Some("App"));
    }

    #[test]
    fn discovery_order_follows_sorted_file_names() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(
            dir.path(),
            "zebra.desktop",
            "[Desktop Entry]\nName=Zebra\nExec=zebra\n",
        );
        write_desktop(
            dir.path(),
            "ant.desktop",
            "[Desktop Entry]\nName=Ant\nExec=ant\n",
        );

        let catalog = Catalog::build(&[dir.path().to_path_buf()], None);
        let names: Vec<_> = catalog.all().iter().filter_map(|e| e.name()).collect();
        assert_eq!(names, vec!["Ant", "Zebra"]);
    }

    #[test]
    fn missing_roots_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let catalog = Catalog::build(&[missing], None);
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn extra_dirs_append_after_fixed_roots() {
        let extras = vec![PathBuf::from("/opt/apps")];
        let roots = search_roots(&extras);
        assert!(roots.len() >= 3);
        assert_eq!(roots.last(), Some(&PathBuf::from("/opt/apps")));
        assert!(roots.contains(&PathBuf::from("/usr/share/applications")));
        assert!(roots.contains(&PathBuf::from("/usr/local/share/applications")));
    }
}
