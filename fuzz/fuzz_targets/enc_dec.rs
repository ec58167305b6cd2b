#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc3986::pct_enc::{self, table, EStr};

fuzz_target!(|data: &[u8]| {
    for table in [table::UNRESERVED, table::PCHAR, table::QUERY] {
        let encoded = pct_enc::encode(data, table);
        assert!(table.validate(encoded.as_bytes()) || !table.allows_pct_encoded());
        assert!(EStr::new(&encoded).is_some());
        assert_eq!(data, &*pct_enc::decode(encoded.as_bytes()));

        let normalized = pct_enc::normalize(&encoded);
        assert_eq!(pct_enc::normalize(&normalized), normalized);
        assert_eq!(data, &*pct_enc::decode(normalized.as_bytes()));
    }

    let lossy = String::from_utf8_lossy(data);
    let encoded = pct_enc::encode(data, table::QUERY);
    assert_eq!(lossy, pct_enc::decode_to_string_lossy(&encoded));

    // Raw input may contain stray '%'.
    let normalized = pct_enc::normalize(&lossy);
    assert_eq!(pct_enc::normalize(&normalized), normalized);
    assert_eq!(pct_enc::decode(lossy.as_bytes()), pct_enc::decode(normalized.as_bytes()));
});
