//! The translator capability boundary.
//!
//! The pipeline only ever needs one operation from the outside world:
//! translate one string into one target language. Everything behind that
//! call (HTTP, process, cache) lives outside this crate.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// One-string-at-a-time translation capability.
///
/// Implementations report failure, rather than returning empty text, when
/// the backing service cannot produce a usable result.
pub trait Translator {
    fn translate(&self, text: &str, target: &LanguageIdentifier) -> Result<String, Error>;
}

/// Any matching closure works as a translator, which keeps tests short.
impl<F> Translator for F
where
    F: Fn(&str, &LanguageIdentifier) -> Result<String, Error>,
{
    fn translate(&self, text: &str, target: &LanguageIdentifier) -> Result<String, Error> {
        self(text, target)
    }
}

/// Returns every input unchanged. Used for dry runs, where the interesting
/// part is the document handling and repair stages, not the translation.
#[derive(Debug, Clone, Default)]
pub struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(&self, text: &str, _target: &LanguageIdentifier) -> Result<String, Error> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dutch() -> LanguageIdentifier {
        "nl".parse().unwrap()
    }

    #[test]
    fn test_echo_translator() {
        let translated = EchoTranslator.translate("hello", &dutch()).unwrap();
        assert_eq!(translated, "hello");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |text: &str, _target: &LanguageIdentifier| Ok(text.to_uppercase());
        assert_eq!(upper.translate("hello", &dutch()).unwrap(), "HELLO");
    }

    #[test]
    fn test_failing_translator_propagates() {
        let failing = |_: &str, _: &LanguageIdentifier| -> Result<String, Error> {
            Err(Error::translation("service unavailable"))
        };
        assert!(failing.translate("hello", &dutch()).is_err());
    }
}
