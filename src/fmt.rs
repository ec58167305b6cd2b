use crate::{
    component::{Authority, Fragment, Host, Path, Port, Query, Scheme, Userinfo},
    pct_enc::EStr,
    Uri,
};
use borrow_or_share::Bos;
use core::fmt::{self, Write};

impl<T: Bos<str>> fmt::Debug for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme_str())
            .field("authority", &self.authority_str())
            .field("path", &self.path_str())
            .field("query", &self.query_str())
            .field("fragment", &self.fragment_str())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Uri<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

macro_rules! impl_by_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Debug for $ty {
                #[inline]
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self.as_str(), f)
                }
            }

            impl fmt::Display for $ty {
                #[inline]
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self.as_str(), f)
                }
            }
        )*
    };
}

impl_by_str!(Scheme, Userinfo, Fragment);

impl fmt::Debug for Port {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Port").field(&self.value()).finish()
    }
}

impl fmt::Display for Port {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ipv4(addr) => f.debug_tuple("Ipv4").field(addr).finish(),
            Host::Ipv6 { addr, zone_id } => f
                .debug_struct("Ipv6")
                .field("addr", addr)
                .field("zone_id", zone_id)
                .finish(),
            Host::RegisteredName(name) => f.debug_tuple("RegisteredName").field(name).finish(),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ipv4(addr) => write!(f, "{addr}"),
            Host::Ipv6 {
                addr,
                zone_id: None,
            } => write!(f, "[{addr}]"),
            Host::Ipv6 {
                addr,
                zone_id: Some(zone_id),
            } => write!(f, "[{addr}%25{zone_id}]"),
            Host::RegisteredName(name) => f.write_str(name),
        }
    }
}

impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("userinfo", &self.userinfo())
            .field("host", self.host())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = self.userinfo() {
            write!(f, "{userinfo}@")?;
        }
        write!(f, "{}", self.host())?;
        if let Some(port) = self.port() {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("absolute", &self.is_absolute())
            .field("segments", &self.segments())
            .finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute() {
            f.write_char('/')?;
        }
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pairs()).finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs().enumerate() {
            if i > 0 {
                f.write_char('&')?;
            }
            f.write_str(key.as_str())?;
            if let Some(value) = value {
                write!(f, "={value}")?;
            }
        }
        Ok(())
    }
}
