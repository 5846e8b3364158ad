#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MAIN_MODULE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<module rename-to=\"app\">\n    <inherits name=\"com.google.gwt.user.User\"/>\n</module>\n";

pub fn pom() -> &'static str {
    "<project>\n  <properties>\n    <start-class>com.acme.shop.Application</start-class>\n    <gwt.version>2.12.1</gwt.version>\n  </properties>\n</project>\n"
}

/// A recognised project; `with_main_module` adds `App.gwt.xml` to the base package
pub fn project(with_main_module: bool) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pom.xml"), pom()).unwrap();
    let base = java_base(tmp.path());
    fs::create_dir_all(&base).unwrap();
    if with_main_module {
        fs::write(base.join("App.gwt.xml"), MAIN_MODULE).unwrap();
    }
    tmp
}

pub fn java_base(root: &Path) -> PathBuf {
    root.join("src/main/java/com/acme/shop")
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}
