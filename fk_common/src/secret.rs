//! Credential wrapper that keeps secrets out of logs.
//!
//! Configuration values like the Paystack secret key and the JWT signing secret travel through `Debug`-formatted
//! config structs and access-log lines. Wrapping them in [`Secret`] makes redaction the default; the value only
//! comes out through an explicit [`Secret::reveal`] at the point of use.

use std::fmt::{self, Debug, Display};

#[derive(Clone, Default)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped value. Call this as close to the point of use as possible, so the secret never sits in a
    /// variable that might get logged.
    pub fn reveal(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
