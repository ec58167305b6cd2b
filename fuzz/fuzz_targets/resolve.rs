#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc3986::{resolve::ResolveError, Resolver, Uri};

fuzz_target!(|data: (&str, &str)| {
    let Ok(base) = Uri::parse(data.0) else {
        return;
    };

    let res = base.resolve(data.1);
    let Ok(u1) = res else {
        assert!(!base.has_scheme() || Uri::parse(data.1).is_err());
        return;
    };

    assert!(u1.has_scheme());
    assert!(u1.path().is_some());
    assert_eq!(u1.fragment_str(), Uri::parse(data.1).unwrap().fragment_str());

    // Resolving the result against the base changes nothing.
    let u2 = base.resolve(u1.as_str()).unwrap();
    assert_eq!(u1, u2);

    match Resolver::with_base(&base)
        .allow_path_underflow(false)
        .resolve(data.1)
    {
        Ok(u3) => assert_eq!(u1, u3),
        Err(e) => assert_eq!(e, ResolveError::PathUnderflow),
    }
});
