// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write as _;

use pretty_assertions::assert_eq;
use restricted_readline::*;

#[test]
fn test_config_file_drives_a_reader() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br##"{
            "foreground": "#00FF00",
            "commit_key": "tab",
            "delete_enabled": false,
            "min_len": 2,
            "max_len": 3
        }"##,
    )
    .unwrap();

    let json = std::fs::read_to_string(file.path()).unwrap();
    let config = ReaderConfig::try_from_json_str(&json).unwrap();
    assert_eq!(config.foreground().and_then(|it| it.to_hex()), Some("#00FF00".into()));

    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let restrictor = InputRestrictor::new_with_output_device(config, output_device);
    let mut keys = TestVecKeyPressReader::new([
        keypress!(@char 'a'),
        keypress!(@special SpecialKey::Tab),
        keypress!(@special SpecialKey::Backspace),
        keypress!(@special SpecialKey::Enter),
        keypress!(@char 'b'),
        keypress!(@char 'c'),
        keypress!(@char 'd'),
        keypress!(@special SpecialKey::Tab),
    ]);

    let text = restrictor.read("abcd", &mut keys).unwrap();

    assert_eq!(text, "abc");
    assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "abc");
}

#[test]
fn test_invalid_bounds_in_config_file() {
    let result = ReaderConfig::try_from_json_str(r#"{ "max_len": 0 }"#);
    assert!(matches!(
        result,
        Err(RestrictError::Configuration(ConfigError::MaxLengthTooSmall { max: 0 }))
    ));
}
