use std::{
    collections::HashSet,
    net::{Ipv4Addr, Ipv6Addr},
};

use rfc3986::{
    component::{Authority, Fragment, Host, Path, Port, Query, Scheme, Userinfo},
    error::*,
};

#[test]
fn scheme() {
    let s = Scheme::parse("Svn+SSH").unwrap();
    assert_eq!(s.as_str(), "svn+ssh");
    assert_eq!(s.default_port(), None);
    assert_eq!(s.to_string(), "svn+ssh");
    assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::HTTPS);

    let mut set = HashSet::new();
    set.insert(Scheme::parse("http").unwrap());
    assert!(set.contains(&Scheme::HTTP));

    assert_eq!(Scheme::SSH.default_port(), Some(22));
    assert_eq!(Scheme::REDIS.default_port(), Some(6379));
    assert_eq!(Scheme::LDAPS.default_port(), Some(636));

    assert_eq!(Scheme::parse(""), Err(SchemeError::Empty));
    assert_eq!(
        Scheme::parse("+a"),
        Err(SchemeError::InvalidStart { byte: b'+' })
    );
    assert_eq!(
        Scheme::parse("a:b"),
        Err(SchemeError::InvalidCharacter {
            index: 1,
            byte: b':'
        })
    );
}

#[test]
fn userinfo() {
    let u = Userinfo::parse("user:p%40ss:word").unwrap();
    assert_eq!(u.user(), "user");
    assert_eq!(u.password().unwrap(), "p%40ss:word");
    assert_eq!(u.password().unwrap().decode_lossy(), "p@ss:word");

    let u = Userinfo::parse("").unwrap();
    assert_eq!(u.user(), "");
    assert_eq!(u.password(), None);

    assert_eq!(
        Userinfo::parse("a@b"),
        Err(UserinfoError::InvalidCharacter {
            index: 1,
            byte: b'@'
        })
    );
    assert_eq!(
        Userinfo::parse("a%4"),
        Err(UserinfoError::InvalidPercentEncoding { index: 1 })
    );
}

#[test]
fn host() {
    assert_eq!(
        Host::parse("10.0.0.255").unwrap(),
        Host::Ipv4(Ipv4Addr::new(10, 0, 0, 255))
    );
    assert_eq!(
        Host::parse("[::FFFF:10.0.0.1]").unwrap(),
        Host::Ipv6 {
            addr: Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped(),
            zone_id: None
        }
    );

    let h = Host::parse("WWW.%E4%BE%8B.Com").unwrap();
    assert_eq!(h, Host::RegisteredName("www.%E4%BE%8B.com".into()));
    assert_eq!(h.as_registered_name().unwrap().decode_lossy(), "www.例.com");
    assert!(!h.is_ip_literal());

    assert_eq!(Host::parse(""), Err(HostError::Empty));
    assert_eq!(
        Host::parse("exa mple"),
        Err(HostError::InvalidCharacter {
            index: 3,
            byte: b' '
        })
    );
    assert_eq!(
        Host::parse("ex%zzample"),
        Err(HostError::InvalidRegisteredName { index: 2 })
    );
    assert_eq!(
        Host::parse("a:b"),
        Err(HostError::InvalidCharacter {
            index: 1,
            byte: b':'
        })
    );

    assert_eq!(Host::parse("127.0.0.1").unwrap().to_string(), "127.0.0.1");
    assert_eq!(
        Host::parse("[0:0::1%25lo]").unwrap().to_string(),
        "[::1%25lo]"
    );
    assert_eq!(
        Host::Ipv6 {
            addr: Ipv6Addr::UNSPECIFIED,
            zone_id: None
        }
        .to_string(),
        "[::]"
    );
}

#[test]
fn port() {
    assert_eq!(Port::parse("65535").unwrap().value(), 65535);
    assert_eq!(Port::parse("0").unwrap(), Port::new(0));
    assert_eq!(Port::parse("00080").unwrap(), Port::from(80));
    assert_eq!(u16::from(Port::new(443)), 443);
    assert_eq!(Port::new(8080).to_string(), "8080");

    assert_eq!(Port::parse("65536"), Err(PortError::Overflow));
    assert_eq!(Port::parse("99999999999999999999"), Err(PortError::Overflow));
    assert_eq!(Port::parse(""), Err(PortError::Empty));
    assert_eq!(
        Port::parse("-1"),
        Err(PortError::InvalidCharacter {
            index: 0,
            byte: b'-'
        })
    );
}

#[test]
fn authority() {
    let a = Authority::parse("user:pass@[fe80::1%25eth0]:8080").unwrap();
    assert_eq!(a.userinfo().unwrap().as_str(), "user:pass");
    assert_eq!(
        a.host(),
        &Host::Ipv6 {
            addr: Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1),
            zone_id: Some("eth0".into())
        }
    );
    assert_eq!(a.port(), Some(Port::new(8080)));
    assert_eq!(a.to_string(), "user:pass@[fe80::1%25eth0]:8080");

    let a = Authority::parse("Example.COM:").unwrap();
    assert_eq!(a.host(), &Host::RegisteredName("example.com".into()));
    assert_eq!(a.port(), None);

    let a = Authority::parse("@:").unwrap();
    assert_eq!(a.userinfo().unwrap().as_str(), "");
    assert!(a.host().is_empty());
    assert_eq!(a.to_string(), "@");

    // Only the first '@' ends the userinfo.
    assert!(matches!(
        Authority::parse("a@b@c"),
        Err(AuthorityError::InvalidHost(_, _))
    ));

    let a = Authority::new(
        None,
        Host::parse("example.com").unwrap(),
        Some(Port::new(443)),
    );
    assert_eq!(a.to_string(), "example.com:443");
    assert_eq!(a.with_port(None).to_string(), "example.com");

    assert_eq!(
        Authority::parse("[::1]:"),
        Ok(Authority::new(
            None,
            Host::parse("[::1]").unwrap(),
            None
        ))
    );
    assert_eq!(
        Authority::parse("[::1"),
        Err(AuthorityError::UnterminatedIpv6)
    );
    assert_eq!(
        Authority::parse("u@[::1]80"),
        Err(AuthorityError::InvalidCharactersAfterIpv6 { index: 7 })
    );
    assert_eq!(
        Authority::parse("host:http"),
        Err(AuthorityError::InvalidPort(
            "http".into(),
            PortError::InvalidCharacter {
                index: 0,
                byte: b'h'
            }
        ))
    );
}

#[test]
fn path() {
    let p = Path::parse("/a/b%2Fc/").unwrap();
    assert!(p.is_absolute());
    assert!(p.segments().eq(["a", "b%2Fc", ""]));
    assert!(p.segments().rev().eq(["", "b%2Fc", "a"]));
    assert_eq!(p.segments().nth(1).unwrap().decode_lossy(), "b/c");

    let p = Path::parse("a/./b/../c").unwrap();
    assert!(!p.is_absolute());
    assert_eq!(p.removing_dot_segments().to_string(), "a/c");

    let p = Path::from_segments(Vec::<String>::new(), false).unwrap();
    assert!(p.is_empty());
    assert_eq!(p.to_string(), "");
    assert_eq!(p, Path::parse("").unwrap());

    let p = Path::from_segments([""], true).unwrap();
    assert_eq!(p, Path::parse("/").unwrap());

    assert_eq!(
        Path::parse("/a#b"),
        Err(PathError::InvalidCharacter {
            index: 2,
            byte: b'#'
        })
    );
}

#[test]
fn query() {
    let q = Query::parse("a=1&b=&c&a=2&e=%3D").unwrap();
    assert_eq!(q.len(), 5);
    assert_eq!(q.get("a").unwrap().unwrap(), "1");
    assert_eq!(q.get("b").unwrap().unwrap(), "");
    assert_eq!(q.get("c"), Some(None));
    assert_eq!(q.get("e").unwrap().unwrap().decode_lossy(), "=");
    assert_eq!(q.get("d"), None);
    assert!(q.pairs().map(|(k, _)| k.as_str()).eq(["a", "b", "c", "a", "e"]));

    let q = Query::default()
        .appending("q", Some("rust lang"))
        .unwrap()
        .appending("flag", None)
        .unwrap();
    assert_eq!(q.to_string(), "q=rust%20lang&flag");
    assert_eq!(Query::parse(&q.to_string()).unwrap(), q);

    assert_eq!(
        Query::default().appending("", Some("x")),
        Err(QueryError::EmptyKey { index: 0 })
    );
    assert_eq!(Query::parse("&a"), Err(QueryError::EmptyKey { index: 0 }));
}

#[test]
fn fragment() {
    let f = Fragment::parse("section-2%20b?x/y").unwrap();
    assert_eq!(f.as_str(), "section-2%20b?x/y");
    assert_eq!(f.decode(), "section-2 b?x/y");
    assert_eq!(Fragment::parse("").unwrap().as_str(), "");

    // Malformed octets are kept and passed through on decoding.
    let f = Fragment::parse("100%").unwrap();
    assert_eq!(f.decode(), "100%");

    assert_eq!(
        Fragment::parse("a#b"),
        Err(FragmentError::ContainsHash { index: 1 })
    );
    assert_eq!(
        Fragment::parse("a\r\n"),
        Err(FragmentError::ContainsNewline { index: 1 })
    );
}
