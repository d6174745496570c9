//! Moving decoded values into concrete Rust types.

use crate::{Decoded, IntWidth, TypeDescriptor};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// A Rust type with a descriptor and a conversion from [`Decoded`].
///
/// `from_decoded` returns `None` when the value does not have the shape the
/// descriptor promised.
///
/// Records implement this by hand:
///
/// ```rust
/// use keel_decode::{Decoded, FromDecoded, TypeDescriptor};
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl FromDecoded for Server {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::named("Server")
///     }
///
///     fn from_decoded(value: Decoded) -> Option<Self> {
///         let mut fields = value.into_record("Server")?;
///         Some(Server {
///             host: fields.take("host")?,
///             port: fields.take("port")?,
///         })
///     }
/// }
/// ```
pub trait FromDecoded: Sized {
    fn descriptor() -> TypeDescriptor;

    fn from_decoded(value: Decoded) -> Option<Self>;
}

/// Owned fields of a decoded record.
#[derive(Debug)]
pub struct RecordFields {
    fields: IndexMap<String, Decoded>,
}

impl RecordFields {
    /// Remove a field and convert it.
    pub fn take<T: FromDecoded>(&mut self, key: &str) -> Option<T> {
        self.fields.shift_remove(key).and_then(T::from_decoded)
    }
}

impl Decoded {
    /// The fields of a record with the given name.
    pub fn into_record(self, name: &str) -> Option<RecordFields> {
        match self {
            Decoded::Record {
                name: record_name,
                fields,
            } if record_name == name => Some(RecordFields { fields }),
            _ => None,
        }
    }
}

impl FromDecoded for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromDecoded for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Bool
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! signed {
    ($($ty:ty => $width:expr),* $(,)?) => {$(
        impl FromDecoded for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Int($width)
            }

            fn from_decoded(value: Decoded) -> Option<Self> {
                match value {
                    Decoded::Int(n) => <$ty>::try_from(n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! unsigned {
    ($($ty:ty => $width:expr),* $(,)?) => {$(
        impl FromDecoded for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::UInt($width)
            }

            fn from_decoded(value: Decoded) -> Option<Self> {
                match value {
                    Decoded::UInt(n) => <$ty>::try_from(n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

signed! {
    i8 => IntWidth::Bits8,
    i16 => IntWidth::Bits16,
    i32 => IntWidth::Bits32,
    i64 => IntWidth::Bits64,
    isize => IntWidth::Size,
}

unsigned! {
    u8 => IntWidth::Bits8,
    u16 => IntWidth::Bits16,
    u32 => IntWidth::Bits32,
    u64 => IntWidth::Bits64,
    usize => IntWidth::Size,
}

impl FromDecoded for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Float
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl FromDecoded for f32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Float
    }

    /// Narrowing rounds to the nearest `f32`. A finite value outside the
    /// `f32` range is rejected rather than becoming infinite.
    fn from_decoded(value: Decoded) -> Option<Self> {
        let wide = f64::from_decoded(value)?;
        let narrow = wide as f32;
        (narrow.is_finite() || !wide.is_finite()).then_some(narrow)
    }
}

impl FromDecoded for PathBuf {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Path
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl FromDecoded for IpAddr {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::IpAddr
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::IpAddr(addr) => Some(addr),
            _ => None,
        }
    }
}

impl FromDecoded for SocketAddr {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::SocketAddr
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::SocketAddr(addr) => Some(addr),
            _ => None,
        }
    }
}

impl FromDecoded for Duration {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Duration
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl<T: FromDecoded> FromDecoded for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::Null => Some(None),
            other => T::from_decoded(other).map(Some),
        }
    }
}

impl<T: FromDecoded> FromDecoded for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        match value {
            Decoded::List(items) => items.into_iter().map(T::from_decoded).collect(),
            _ => None,
        }
    }
}

fn set_items<T: FromDecoded, C: FromIterator<T>>(value: Decoded) -> Option<C> {
    match value {
        Decoded::Set(items) => items.into_iter().map(T::from_decoded).collect(),
        _ => None,
    }
}

impl<T: FromDecoded + Eq + Hash> FromDecoded for HashSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        set_items(value)
    }
}

impl<T: FromDecoded + Ord> FromDecoded for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        set_items(value)
    }
}

fn map_entries<K: FromDecoded, V: FromDecoded, C: FromIterator<(K, V)>>(
    value: Decoded,
) -> Option<C> {
    match value {
        Decoded::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| Some((K::from_decoded(k)?, V::from_decoded(v)?)))
            .collect(),
        _ => None,
    }
}

impl<K: FromDecoded + Eq + Hash, V: FromDecoded> FromDecoded for HashMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        map_entries(value)
    }
}

impl<K: FromDecoded + Ord, V: FromDecoded> FromDecoded for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        map_entries(value)
    }
}

impl<K: FromDecoded + Eq + Hash, V: FromDecoded> FromDecoded for IndexMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        map_entries(value)
    }
}
