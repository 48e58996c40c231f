//! Labels and operator kinds.
//!
//! A [`Label`] is an opaque index token (momentum or spin). Labels compare by
//! value, so two operators carry the "same index" exactly when their labels are
//! equal. A [`Kind`] tells creation and annihilation operators apart.
use std::fmt;
use std::sync::Arc;

/// Spin-up token used by the text notation.
pub const SPIN_UP: &str = "↑";
/// Spin-down token used by the text notation.
pub const SPIN_DOWN: &str = "↓";

/// An opaque, cheaply clonable index label.
///
/// Labels are stored verbatim; no normalization is applied, so `"p1"` and
/// `"p01"` are different labels.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Label(Arc<str>);

impl Label {
    /// Creates a new label from anything string-like.
    pub fn new(name: impl AsRef<str>) -> Self {
        Label(Arc::from(name.as_ref()))
    }

    /// The spin-up label.
    pub fn up() -> Self {
        Label::new(SPIN_UP)
    }

    /// The spin-down label.
    pub fn down() -> Self {
        Label::new(SPIN_DOWN)
    }

    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label(Arc::from(name))
    }
}

impl From<&String> for Label {
    fn from(name: &String) -> Self {
        Label::new(name)
    }
}

impl From<&Label> for Label {
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Label::from(c.to_string())
    }
}

macro_rules! label_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Label {
                fn from(value: $t) -> Self {
                    Label::from(value.to_string())
                }
            }
        )*
    };
}

label_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// The kind of a fermionic ladder operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Kind {
    /// `c^\dagger`
    Creation,
    /// `c`
    Annihilation,
}

impl Kind {
    pub fn is_creation(self) -> bool {
        self == Kind::Creation
    }

    pub fn is_annihilation(self) -> bool {
        self == Kind::Annihilation
    }

    /// Returns the other kind.
    pub fn flip(self) -> Self {
        match self {
            Kind::Creation => Kind::Annihilation,
            Kind::Annihilation => Kind::Creation,
        }
    }
}

impl From<bool> for Kind {
    /// `true` is a creation operator, `false` an annihilation operator.
    fn from(is_creation: bool) -> Self {
        if is_creation {
            Kind::Creation
        } else {
            Kind::Annihilation
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Creation => write!(f, "c^\\dagger"),
            Kind::Annihilation => write!(f, "c"),
        }
    }
}
