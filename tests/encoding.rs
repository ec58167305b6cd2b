use rfc3986::pct_enc::{table::*, *};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

#[test]
fn enc_dec() {
    let s = encode(RAW.as_bytes(), QUERY);
    assert_eq!(ENCODED, s);

    let mut buf = String::from("?");
    encode_to(RAW.as_bytes(), QUERY, &mut buf);
    assert_eq!(&buf[1..], ENCODED);

    assert!(QUERY.validate(s.as_bytes()));
    assert!(!QUERY.validate(RAW.as_bytes()));

    assert_eq!(RAW.as_bytes(), &*decode(ENCODED.as_bytes()));
    assert_eq!(RAW, decode_to_string_lossy(ENCODED));

    // Only allowed bytes stay unencoded.
    assert_eq!(encode(b"hello world", PCHAR), "hello%20world");
    assert_eq!(encode(b"a/b?c", PCHAR), "a%2Fb%3Fc");
    assert_eq!(encode(b"a/b?c", QUERY), "a/b?c");
    assert_eq!(encode(b"100%", UNRESERVED), "100%25");
    assert_eq!(encode(b"\0\xff", UNRESERVED), "%00%FF");
    assert_eq!(encode(b"", UNRESERVED), "");
}

#[test]
fn decode_is_lenient() {
    assert_eq!(&*decode(b"%2D%E6%B5"), b"\x2d\xe6\xb5");
    assert_eq!(&*decode(b"%2d%"), b"-%");
    assert_eq!(&*decode(b"%2d%fg"), b"-%fg");
    assert_eq!(&*decode(b"%%41"), b"%A");
    assert_eq!(decode_to_string_lossy("%E6%B5"), "\u{FFFD}");
    assert_eq!(decode_to_string_lossy("plain"), "plain");
}

#[test]
fn round_trip() {
    for s in ["", "plain", "a b&c=d", "¡Olé!", "张三", "te😃a", "%41", "\0\r\n"] {
        for table in [UNRESERVED, PCHAR, QUERY, USERINFO] {
            let encoded = encode(s.as_bytes(), table);
            assert!(encoded.is_ascii());
            assert_eq!(&*decode(encoded.as_bytes()), s.as_bytes(), "{s:?}");
        }
    }
}

#[test]
fn normalize_octets() {
    assert_eq!(normalize("%7euser"), "~user");
    assert_eq!(normalize("%2f%3a%c3%a9"), "%2F%3A%C3%A9");
    assert_eq!(normalize("%41%2D%5f"), "A-_");
    assert_eq!(normalize("50%"), "50%");
    assert_eq!(normalize("%zz%4"), "%zz%4");

    let once = normalize("%7E%7e%2f%2F");
    assert_eq!(once, "~~%2F%2F");
    assert_eq!(normalize(&once), once);

    // Hexadecimal digits stay encoded where they would complete a stray '%'.
    assert_eq!(normalize("%%34%31"), "%%341");
    assert_eq!(normalize("%4%31%31"), "%4%311");
    assert_eq!(normalize("%%41"), "%%41");
    assert_eq!(normalize("%%47"), "%G");
    for s in ["%%34%31", "%4%31%31", "a%%3%33", "%%%34%36%34"] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "{s}");
        assert_eq!(decode(once.as_bytes()), decode(s.as_bytes()), "{s}");
    }
}

#[test]
fn table() {
    assert!(UNRESERVED.allows(b'~'));
    assert!(!UNRESERVED.allows(b'%'));
    assert!(!UNRESERVED.allows_pct_encoded());
    assert!(PCHAR.allows_pct_encoded());
    assert!(PCHAR.is_subset(QUERY));
    assert!(!QUERY.is_subset(PCHAR));

    // Percent-encoded octets are checked when allowed.
    assert!(PATH.validate(b"/a%20b"));
    assert!(!PATH.validate(b"/a%2"));
    assert!(!UNRESERVED.validate(b"a%20b"));
    // Zero bytes are never allowed.
    assert!(!QUERY.validate(b"\0"));

    let t = Table::new(b"ab").or(Table::new(b"c")).sub(Table::new(b"b"));
    assert!(t.allows(b'a') && t.allows(b'c') && !t.allows(b'b'));
}

#[test]
fn split() {
    let s = EStr::new("id=3&name=%E5%BC%A0%E4%B8%89").unwrap();
    let mut split = s.split('&');

    let it = split.next().unwrap();
    assert_eq!(it, "id=3");
    assert_eq!(&*it.decode(), b"id=3");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k, "id");
    assert_eq!(v, "3");

    let it = split.next().unwrap();
    assert_eq!(it, "name=%E5%BC%A0%E4%B8%89");
    assert_eq!(it.decode_lossy(), "name=张三");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k.decode_lossy(), "name");
    assert_eq!(v.decode_lossy(), "张三");
    assert!(split.next().is_none());

    assert!(EStr::new("100%").is_none());
    assert!(EStr::new("%4g").is_none());
    assert_eq!(EStr::new("%4A").unwrap().len(), 3);
}
