use pai::utils::atomic_file;
use pai::utils::number_parsing::parse_count;
use pai::utils::run_length_encoding::RunIterator;
use std::fs;

#[test]
fn test_run_iterator() {
    let input = [99, 99, 99, 103, 104, 105, 79, 79, 79];
    let runs: Vec<(u8, usize)> =
        RunIterator::new(&input).map(|(v, n)| (*v, n)).collect();
    assert_eq!(runs, [(99, 3), (103, 1), (104, 1), (105, 1), (79, 3)]);

    let empty: [u8; 0] = [];
    assert_eq!(RunIterator::new(&empty).count(), 0);

    let single = ["a"];
    let runs: Vec<_> = RunIterator::new(&single).collect();
    assert_eq!(runs, [(&"a", 1)]);
}

#[test]
fn test_parse_count() {
    assert_eq!(parse_count("1"), Some(1));
    assert_eq!(parse_count("0042"), Some(42));
    assert_eq!(parse_count("1000000"), Some(1000000));
    assert_eq!(parse_count(""), None);
    assert_eq!(parse_count("0"), None);
    assert_eq!(parse_count("-3"), None);
    assert_eq!(parse_count("+3"), None);
    assert_eq!(parse_count(" 3"), None);
    assert_eq!(parse_count("3.0"), None);
    assert_eq!(parse_count("99999999999999999999999999"), None);
}

#[test]
fn test_atomic_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.pai");

    atomic_file::write(&path, b"first").unwrap();
    atomic_file::write(&path, b"second").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"second");

    let tmp = atomic_file::temp_path(&path);
    assert_eq!(tmp.parent(), path.parent());
    assert_eq!(tmp.extension().unwrap(), "pai");
    assert!(!tmp.exists());
    assert_ne!(tmp, atomic_file::temp_path(&path));
}

#[test]
fn test_atomic_write_concurrent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.pai");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4u8)
            .map(|t| {
                let path = &path;
                s.spawn(move || {
                    let data = vec![t; 1000];
                    (0..50)
                        .filter(|_| atomic_file::write(path, &data).is_err())
                        .count()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0);
        }
    });

    // One of the writers won, and its data is intact.
    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), 1000);
    assert!(data.iter().all(|b| *b == data[0]));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_atomic_write_with_path_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.png");

    let res: std::io::Result<()> = atomic_file::write_with(&path, |tmp| {
        assert_eq!(tmp.extension().unwrap(), "png");
        fs::write(tmp, b"pixels")
    });
    res.unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"pixels");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_atomic_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.pai");
    atomic_file::write(&path, b"original").unwrap();

    let res: std::io::Result<()> = atomic_file::write_with(&path, |tmp| {
        fs::write(tmp, b"partial")?;
        Err(std::io::Error::new(std::io::ErrorKind::Other, "interrupted"))
    });
    assert!(res.is_err());
    assert_eq!(fs::read(&path).unwrap(), b"original");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
