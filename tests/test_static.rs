use std::io;
use std::path::{Path, PathBuf};

use webcore::error::DispatchError;
use webcore::http::response::StatusCode;
use webcore::routing::static_files::StaticFile;
use webcore::routing::{DiskFiles, FileSource, MemoryFiles, StaticLoader, StaticLookup};

struct BrokenDisk;

impl FileSource for BrokenDisk {
    fn read(&self, _relative: &Path) -> io::Result<Vec<u8>> {
        Err(io::Error::from(io::ErrorKind::PermissionDenied))
    }
}

/// Fails the test if the loader reaches the file source at all.
struct Untouchable;

impl FileSource for Untouchable {
    fn read(&self, relative: &Path) -> io::Result<Vec<u8>> {
        panic!("unexpected read of {}", relative.display());
    }
}

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("webcore-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(root.join("css")).unwrap();
    root
}

#[test]
fn test_found_file_carries_content_type() {
    let loader = StaticLoader::new(MemoryFiles::new().with_file("/index.html", "<h1>hi</h1>"));

    assert_eq!(
        loader.load("/index.html").unwrap(),
        StaticLookup::Found(StaticFile {
            content_type: "text/html",
            bytes: b"<h1>hi</h1>".to_vec(),
        })
    );
}

#[test]
fn test_missing_file_is_absent() {
    let loader = StaticLoader::new(MemoryFiles::new());

    assert_eq!(loader.load("/nope.html").unwrap(), StaticLookup::Absent);
}

#[test]
fn test_unknown_extension_is_absent_without_reading() {
    let loader = StaticLoader::new(Untouchable);

    assert_eq!(loader.load("/user/create").unwrap(), StaticLookup::Absent);
    assert_eq!(loader.load("/data.unknownext").unwrap(), StaticLookup::Absent);
}

#[test]
fn test_traversal_is_absent_without_reading() {
    let loader = StaticLoader::new(Untouchable);

    assert_eq!(loader.load("/../secret.html").unwrap(), StaticLookup::Absent);
}

#[test]
fn test_read_failure_is_resource_access_error() {
    let loader = StaticLoader::new(BrokenDisk);

    let err = loader.load("/index.html").unwrap_err();
    assert!(matches!(err, DispatchError::ResourceAccess { ref path, .. } if path == "/index.html"));
    assert_eq!(err.status(), StatusCode::InternalServerError);
}

#[test]
fn test_disk_files_reads_under_root() {
    let root = temp_root();
    std::fs::write(root.join("css/site.css"), "body{}").unwrap();
    let loader = StaticLoader::new(DiskFiles::new(root.clone()));

    match loader.load("/css/site.css").unwrap() {
        StaticLookup::Found(file) => {
            assert_eq!(file.content_type, "text/css");
            assert_eq!(file.bytes, b"body{}");
        }
        StaticLookup::Absent => panic!("expected file"),
    }
    assert_eq!(loader.load("/css/missing.css").unwrap(), StaticLookup::Absent);

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn test_disk_directory_is_absent() {
    let root = temp_root();
    std::fs::create_dir_all(root.join("pages.html")).unwrap();
    let loader = StaticLoader::new(DiskFiles::new(root.clone()));

    assert_eq!(loader.load("/pages.html").unwrap(), StaticLookup::Absent);

    std::fs::remove_dir_all(root).unwrap();
}
