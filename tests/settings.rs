use std::io::Write;

use map_tester::config::SensorSettings;

fn write_ini(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_sensor_ids_are_read_and_sorted() {
    let file = write_ini("[General]\nname=demo\n\n[Sensor]\nfront=12\nback=3\ngate=7\n");
    let settings = SensorSettings::load(Some(file.path()));
    assert_eq!(settings.sensor_ids, vec![3, 7, 12]);
    assert_eq!(settings.source.as_deref(), Some(file.path()));
}

#[test]
fn test_missing_sensor_section_gives_empty_list() {
    let file = write_ini("[Other]\na=1\n");
    let settings = SensorSettings::from_file(file.path()).unwrap();
    assert!(settings.sensor_ids.is_empty());
}

#[test]
fn test_missing_file_gives_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let settings = SensorSettings::load(Some(&dir.path().join("test.ini")));
    assert!(settings.sensor_ids.is_empty());
    assert!(settings.source.is_none());
}
