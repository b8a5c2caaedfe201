//! Text encoding of typed setting values.
//!
//! Everything is stored as text. Parsing returns `None` for anything that
//! cannot be read back as the requested type, and the store substitutes
//! the caller's default.

/// A value that can be written as a setting.
pub trait SettingText {
    /// Canonical text written to the document
    fn to_setting_text(&self) -> String;
}

/// A value that can be read back from a setting.
pub trait SettingValue: SettingText + Sized {
    /// Parse stored text, `None` if it is unset or not this type
    fn parse_setting(text: &str) -> Option<Self>;
}

impl SettingText for str {
    fn to_setting_text(&self) -> String {
        self.to_string()
    }
}

impl SettingText for String {
    fn to_setting_text(&self) -> String {
        self.clone()
    }
}

impl SettingValue for String {
    /// Empty text counts as unset.
    fn parse_setting(text: &str) -> Option<Self> {
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl SettingText for bool {
    fn to_setting_text(&self) -> String {
        if *self { "True" } else { "False" }.to_string()
    }
}

impl SettingValue for bool {
    fn parse_setting(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

macro_rules! integer_setting {
    ($($t:ty),*) => {$(
        impl SettingText for $t {
            fn to_setting_text(&self) -> String {
                self.to_string()
            }
        }

        impl SettingValue for $t {
            fn parse_setting(text: &str) -> Option<Self> {
                text.trim().parse().ok()
            }
        }
    )*};
}

integer_setting!(i32, i64, u32, u64);

impl SettingText for f64 {
    /// Shortest text that parses back to the same value, always with `.`.
    fn to_setting_text(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for f64 {
    /// Accepts `.` or a lone `,` as the decimal separator.
    fn parse_setting(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(v) = text.parse() {
            return Some(v);
        }
        if text.matches(',').count() == 1 && !text.contains('.') {
            return text.replace(',', ".").parse().ok();
        }
        None
    }
}
