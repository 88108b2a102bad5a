use courier::http::encoding::{ContentEncoding, gzip_compress};
use flate2::read::GzDecoder;
use std::io::Read;

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

#[test]
fn test_negotiate_gzip_token() {
    for value in ["gzip", "GZIP", "deflate, gzip", "gzip ,br", "br;q=1, gzip;q=0.8"] {
        assert_eq!(
            ContentEncoding::negotiate(Some(value)),
            ContentEncoding::Gzip,
            "{value:?} should negotiate gzip"
        );
    }
}

#[test]
fn test_negotiate_rejects_substrings_and_others() {
    for value in ["xgzipy", "gzipped", "deflate", "br, compress", "", "gzip;q=0"] {
        assert_eq!(
            ContentEncoding::negotiate(Some(value)),
            ContentEncoding::Identity,
            "{value:?} should not negotiate gzip"
        );
    }
}

#[test]
fn test_negotiate_missing_header() {
    assert_eq!(ContentEncoding::negotiate(None), ContentEncoding::Identity);
}

#[test]
fn test_header_value() {
    assert_eq!(ContentEncoding::Gzip.header_value(), Some("gzip"));
    assert_eq!(ContentEncoding::Identity.header_value(), None);
}

#[test]
fn test_gzip_round_trip() {
    let inputs: [&[u8]; 4] = [b"", b"abc", b"\x00\xffbinary", "ünïcödé".as_bytes()];
    for input in inputs {
        let compressed = gzip_compress(input).unwrap();
        assert_eq!(gunzip(&compressed), input);
    }
}

#[test]
fn test_encode_reports_applied_encoding() {
    let (body, applied) = ContentEncoding::Gzip.encode(b"hello".to_vec());

    assert_eq!(applied, ContentEncoding::Gzip);
    assert_eq!(gunzip(&body), b"hello");
}
