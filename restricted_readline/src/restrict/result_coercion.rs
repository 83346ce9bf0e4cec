// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::RestrictError;

/// Types a committed line can be turned into by the `read_as` methods.
///
/// The text is parsed as is with [`str::parse`], nothing is trimmed. Failures become
/// [`RestrictError::Format`], which names the target type and the parse failure but not
/// the text itself.
pub trait CoerceCommittedText: Sized {
    /// Shown in [`RestrictError::Format`].
    const TYPE_NAME: &'static str;

    /// # Errors
    ///
    /// [`RestrictError::Format`] if `text` is not a valid `Self`.
    fn coerce(text: &str) -> Result<Self, RestrictError>;
}

macro_rules! impl_coerce_via_from_str {
    ($($type:ty),* $(,)?) => {
        $(
            impl CoerceCommittedText for $type {
                const TYPE_NAME: &'static str = stringify!($type);

                fn coerce(text: &str) -> Result<Self, RestrictError> {
                    text.parse::<$type>().map_err(|error| RestrictError::Format {
                        target_type: Self::TYPE_NAME,
                        reason: error.to_string(),
                    })
                }
            }
        )*
    };
}

impl_coerce_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl CoerceCommittedText for String {
    const TYPE_NAME: &'static str = "String";

    fn coerce(text: &str) -> Result<Self, RestrictError> { Ok(text.to_string()) }
}

/// Convert a committed line into `T`.
///
/// ```
/// use restricted_readline::coerce_committed_text;
///
/// let port: u16 = coerce_committed_text("8080").unwrap();
/// assert_eq!(port, 8080);
/// assert!(coerce_committed_text::<u8>("300").is_err());
/// ```
///
/// # Errors
///
/// [`RestrictError::Format`] if `text` is not a valid `T`.
pub fn coerce_committed_text<T: CoerceCommittedText>(text: &str) -> Result<T, RestrictError> {
    T::coerce(text)
}
