#[macro_export]
macro_rules! impl_string_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }
    };
}

#[macro_export]
macro_rules! impl_id_newtype {
    ($name:ty, $inner:ty) => {
        impl $name {
            pub const fn new(v: $inner) -> Self {
                Self(v)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }
    };
}
