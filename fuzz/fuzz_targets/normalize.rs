#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc3986::{normalize::Normalizer, Uri};

fuzz_target!(|data: &str| {
    let Ok(r) = Uri::parse(data) else {
        return;
    };

    let r1 = r.normalize();
    assert_eq!(r1.has_scheme(), r.has_scheme());
    assert_eq!(r1.has_authority(), r.has_authority());
    assert_eq!(r1.has_query(), r.has_query());
    assert_eq!(r1.has_fragment(), r.has_fragment());

    // Normalization is idempotent.
    assert_eq!(r1.normalize(), r1);

    match Normalizer::new().allow_path_underflow(false).normalize(&r) {
        Ok(r2) => assert_eq!(r2, r1),
        Err(_) => assert!(r.has_scheme()),
    }
});
