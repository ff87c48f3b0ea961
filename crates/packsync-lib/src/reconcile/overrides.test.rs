use super::*;

#[test]
fn test_is_binary_key_extension_rule() {
    assert!(is_binary_key("overrides/icons/a.png"));
    assert!(is_binary_key("overrides/config/foo.txt"));
    assert!(is_binary_key("archive.tar.gz"));
    assert!(!is_binary_key("overrides/README"));
    assert!(!is_binary_key("README"));
    assert!(!is_binary_key("trailing."));
    assert!(!is_binary_key(".gitignore"));
}

#[test]
fn test_is_binary_key_inspects_whole_key() {
    // Dot in a directory segment still counts
    assert!(is_binary_key("overrides/config.d/README"));
}

#[test]
fn test_strip_overrides_prefix() {
    assert_eq!(strip_overrides_prefix("overrides/config/foo.txt"), "config/foo.txt");
    assert_eq!(strip_overrides_prefix("Overrides/README"), "README");
    assert_eq!(strip_overrides_prefix("config/overrides/x"), "config/overrides/x");
    assert_eq!(strip_overrides_prefix("overrides"), "overrides");
    assert_eq!(strip_overrides_prefix("é"), "é");
}

#[test]
fn test_strip_data_uri() {
    assert_eq!(strip_data_uri("data:image/png;base64,iVBORw0K"), "iVBORw0K");
    assert_eq!(strip_data_uri("data:;base64,AA=="), "AA==");
    assert_eq!(strip_data_uri("iVBORw0K"), "iVBORw0K");
    assert_eq!(strip_data_uri("data:text/plain,hello"), "data:text/plain,hello");
}

#[test]
fn test_text_override_passes_through() {
    let decoded = OverrideDecoder::decode("overrides/README", "hello\nworld").unwrap();

    assert_eq!(decoded.relative_path, PathBuf::from("README"));
    assert_eq!(decoded.bytes, b"hello\nworld");
    assert!(!decoded.binary);
}

#[test]
fn test_binary_override_with_data_uri() {
    // PNG signature
    let decoded =
        OverrideDecoder::decode("overrides/icons/a.png", "data:image/png;base64,iVBORw0KGgo=")
            .unwrap();

    assert_eq!(decoded.relative_path, PathBuf::from("icons/a.png"));
    assert_eq!(decoded.bytes, vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    assert!(decoded.binary);
}

#[test]
fn test_binary_override_without_padding_or_with_newlines() {
    let unpadded = OverrideDecoder::decode("overrides/config/foo.txt", "Zm9vYg").unwrap();
    assert_eq!(unpadded.bytes, b"foob");

    let wrapped = OverrideDecoder::decode("overrides/config/foo.txt", "Zm9v\nYmFy\n").unwrap();
    assert_eq!(wrapped.bytes, b"foobar");
    assert_eq!(wrapped.relative_path, PathBuf::from("config/foo.txt"));
}

#[test]
fn test_binary_override_accepts_url_safe_alphabet() {
    let standard = OverrideDecoder::decode("overrides/blob.bin", "+/+/").unwrap();
    assert_eq!(standard.bytes, vec![0xfb, 0xff, 0xbf]);

    let url_safe = OverrideDecoder::decode("overrides/blob.bin", "-_-_").unwrap();
    assert_eq!(url_safe.bytes, standard.bytes);

    let mixed = OverrideDecoder::decode("overrides/blob.bin", "-/+_").unwrap();
    assert_eq!(mixed.bytes, standard.bytes);
}

#[test]
fn test_invalid_base64_is_decode_error() {
    let err = OverrideDecoder::decode("overrides/a.png", "not*base64!").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidBase64 { ref key, .. } if key == "overrides/a.png"));
}

#[test]
fn test_destination_rejects_escaping_paths() {
    assert!(matches!(
        OverrideDecoder::destination("overrides/../escape.txt"),
        Err(DecodeError::UnsafePath { .. })
    ));
    assert!(matches!(
        OverrideDecoder::destination("/etc/passwd"),
        Err(DecodeError::UnsafePath { .. })
    ));
    assert!(matches!(
        OverrideDecoder::destination("overrides/"),
        Err(DecodeError::EmptyPath { .. })
    ));
}

#[test]
fn test_destination_normalizes_current_dir() {
    assert_eq!(
        OverrideDecoder::destination("overrides/./config/./a.cfg").unwrap(),
        PathBuf::from("config/a.cfg")
    );
}
