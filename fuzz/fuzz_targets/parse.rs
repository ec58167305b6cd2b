#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc3986::Uri;

fuzz_target!(|data: &str| {
    let Ok(r) = Uri::parse(data) else {
        return;
    };
    let mut buf = String::with_capacity(data.len());
    if let Some(s) = r.scheme_str() {
        buf.push_str(s);
        buf.push(':');
    }
    if let Some(a) = r.authority_str() {
        buf.push_str("//");
        buf.push_str(a);
    }
    buf.push_str(r.path_str());
    if let Some(q) = r.query_str() {
        buf.push('?');
        buf.push_str(q);
    }
    if let Some(f) = r.fragment_str() {
        buf.push('#');
        buf.push_str(f);
    }
    assert_eq!(data, buf);

    // Every present group of a strictly parsed reference is typed.
    assert_eq!(r.has_scheme(), r.scheme().is_some());
    assert_eq!(r.has_authority(), r.authority().is_some());
    assert!(r.path().is_some());
    assert_eq!(r.has_query(), r.query().is_some());
    assert_eq!(r.has_fragment(), r.fragment().is_some());

    let lenient = Uri::parse_lenient(data);
    assert_eq!(r.scheme(), lenient.scheme());
    assert_eq!(r.authority(), lenient.authority());
    assert_eq!(r.path(), lenient.path());
    assert_eq!(r.query(), lenient.query());
    assert_eq!(r.fragment(), lenient.fragment());

    // Typed components assemble back into a reference.
    let assembled = Uri::from_parts(
        r.scheme(),
        r.authority(),
        r.path().unwrap(),
        r.query(),
        r.fragment(),
    )
    .unwrap();
    assert_eq!(assembled.normalize(), r.normalize());
});
