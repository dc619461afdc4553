// ==========================================
// Internationalization (i18n)
// ==========================================
// rust-i18n, Brazilian Portuguese (default) and English.
// The rust_i18n::i18n! macro is initialized in lib.rs.
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale
///
/// # Arguments
/// - locale: "pt-BR" or "en"
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a key without arguments
///
/// # Example
/// ```no_run
/// use club_attendance::i18n::t;
/// let msg = t("indicator.no_weekday");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a key, replacing `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use club_attendance::i18n::t_with_args;
/// let msg = t_with_args("note.no_period", &[("year", "2024")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // the locale is global and tests run in parallel
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("pt-BR");
        assert_eq!(current_locale(), "pt-BR");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        assert_eq!(t("common.success"), "Operação realizada com sucesso");

        set_locale("en");
        assert_eq!(t("common.success"), "Operation successful");

        set_locale("pt-BR");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("note.no_period", &[("year", "2031")]);
        assert!(msg.contains("2031"));
        assert!(msg.contains("No academic period"));

        set_locale("pt-BR");
        let msg = t_with_args("indicator.no_pagela", &[("missing", "3"), ("total", "3")]);
        assert!(msg.contains("3 de 3"));
    }
}
