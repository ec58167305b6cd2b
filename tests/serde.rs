#![cfg(feature = "serde")]

use rfc3986::{component::Scheme, Uri};

#[test]
fn uri() {
    let uri = Uri::parse("http://example.com/a?b#c").unwrap();
    let json = serde_json::to_string(&uri).unwrap();
    assert_eq!(json, r#""http://example.com/a?b#c""#);

    let de: Uri<&str> = serde_json::from_str(&json).unwrap();
    assert_eq!(de, uri);
    assert_eq!(de.path_str(), "/a");

    let de: Uri<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(de.query_str(), Some("b"));

    let err = serde_json::from_str::<Uri<String>>(r#""http://a b""#).unwrap_err();
    assert!(err.to_string().contains("invalid URI"));
    assert!(serde_json::from_str::<Uri<String>>(r#""http://a:99999""#).is_err());
}

#[test]
fn scheme() {
    let json = serde_json::to_string(&Scheme::HTTPS).unwrap();
    assert_eq!(json, r#""https""#);

    let scheme: Scheme = serde_json::from_str(r#""HTTPS""#).unwrap();
    assert_eq!(scheme, Scheme::HTTPS);
    assert!(serde_json::from_str::<Scheme>(r#""1http""#).is_err());
}
