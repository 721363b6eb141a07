use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// Import the library modules
use pic_organizer::config::{OrganizerConfig, TransferMode};
use pic_organizer::file_system::{FileSystem, RealFileSystem};
use pic_organizer::organizer::organize_tree;

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

/// Minimal JPEG whose only content is an APP1 EXIF segment
fn write_jpeg(path: &Path, fields: &[Field]) {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("Failed to write EXIF");
    let tiff = tiff.into_inner();

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create source directory");
    }
    fs::write(path, jpeg).expect("Failed to write test image");
}

#[test]
fn test_end_to_end_photo_organization() {
    // Arrange: one photo whose only metadata is DateTimeOriginal
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let photo = src.path().join("camera/DSC_0001.JPG");
    write_jpeg(&photo, &[ascii(Tag::DateTimeOriginal, "2019:08:12 10:00:00")]);
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act: Run the full organization workflow
    let result = organize_tree(&config).expect("Organization failed");

    // Assert: Verify results
    assert_eq!(result.total_files, 1);
    assert_eq!(result.organized_files, 1);
    assert_eq!(result.skipped_files, 0);
    assert!(result.errors.is_empty());

    let expected = dst.path().join("2019/08/12/DSC_0001.JPG");
    assert!(expected.exists(), "Expected file not created");
    assert_eq!(fs::read(&expected).unwrap(), fs::read(&photo).unwrap());
    assert!(photo.exists(), "Copy mode must keep the source");
}

#[test]
fn test_copying_twice_never_overwrites() {
    // Arrange
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write_jpeg(
        &src.path().join("IMG_01.jpg"),
        &[ascii(Tag::DateTimeOriginal, "2021:05:01 14:30:05")],
    );
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act
    let first = organize_tree(&config).unwrap();
    let second = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(first.organized_files, 1);
    assert_eq!(second.organized_files, 1);
    let day = dst.path().join("2021/05/01");
    let mut names: Vec<String> = fs::read_dir(&day)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["IMG_01-0000.jpg", "IMG_01.jpg"]);
}

#[test]
fn test_move_mode_relocates_by_gps_time() {
    // Arrange
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let photo = src.path().join("gps.jpeg");
    let gps_time = Field {
        tag: Tag::GPSTimeStamp,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: 14, denom: 1 },
            Rational { num: 30, denom: 1 },
            Rational { num: 5, denom: 1 },
        ]),
    };
    write_jpeg(
        &photo,
        &[
            ascii(Tag::GPSDateStamp, "2021:05:01"),
            gps_time,
            ascii(Tag::DateTime, "2016:01:01 00:00:00"),
        ],
    );
    let config = OrganizerConfig::new(src.path(), dst.path()).with_mode(TransferMode::Move);

    // Act
    let result = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(result.organized_files, 1);
    assert!(!photo.exists(), "Move mode must remove the source");
    assert!(dst.path().join("2021/05/01/gps.jpeg").exists());
}

#[test]
fn test_photo_without_exif_uses_status_change_time() {
    // Arrange
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let photo = src.path().join("plain.jpg");
    fs::write(&photo, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
    let changed = RealFileSystem::new()
        .status_changed_at(&photo)
        .expect("ctime available");
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act
    let result = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(result.organized_files, 1);
    let expected: PathBuf = dst
        .path()
        .join(format!("{:04}", changed.year()))
        .join(format!("{:02}", changed.month()))
        .join(format!("{:02}", changed.day()))
        .join("plain.jpg");
    assert!(expected.exists(), "missing {}", expected.display());
}

#[test]
fn test_non_jpeg_files_are_ignored() {
    // Arrange
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("notes.txt"), b"not a photo").unwrap();
    fs::write(src.path().join("image.png"), b"not a jpeg").unwrap();
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act
    let result = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(result.total_files, 0);
    assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
}

#[test]
fn test_malformed_timestamp_skips_only_that_file() {
    // Arrange
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write_jpeg(
        &src.path().join("a_bad.jpg"),
        &[ascii(Tag::DateTimeOriginal, "2021-05-01T14:30:05+02:0Z")],
    );
    write_jpeg(
        &src.path().join("b_good.jpg"),
        &[ascii(Tag::DateTimeOriginal, "2020:02:02 02:02:02")],
    );
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act
    let result = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(result.total_files, 2);
    assert_eq!(result.organized_files, 1);
    assert_eq!(result.skipped_files, 1);
    assert!(result.errors[0].contains("a_bad.jpg"));
    assert!(dst.path().join("2020/02/02/b_good.jpg").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_day_directory_never_loses_existing_photo() {
    // Arrange: dst/2021/05/01 links to a directory that already holds IMG.jpg
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    fs::write(elsewhere.path().join("IMG.jpg"), b"PRECIOUS").unwrap();
    fs::create_dir_all(dst.path().join("2021/05")).unwrap();
    std::os::unix::fs::symlink(elsewhere.path(), dst.path().join("2021/05/01")).unwrap();
    write_jpeg(
        &src.path().join("IMG.jpg"),
        &[ascii(Tag::DateTimeOriginal, "2021:05:01 14:30:05")],
    );
    let config = OrganizerConfig::new(src.path(), dst.path());

    // Act
    let result = organize_tree(&config).unwrap();

    // Assert
    assert_eq!(result.organized_files, 1);
    assert!(result.errors.is_empty());
    assert_eq!(fs::read(elsewhere.path().join("IMG.jpg")).unwrap(), b"PRECIOUS");
    assert_eq!(
        fs::read(elsewhere.path().join("IMG-0000.jpg")).unwrap(),
        fs::read(src.path().join("IMG.jpg")).unwrap()
    );
}
