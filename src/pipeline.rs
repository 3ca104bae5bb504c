//! The translation pipeline: walks a source document two levels deep and
//! builds the translated counterpart.
//!
//! Only two leaf shapes are translatable: a string entry and an array of
//! strings. Every other shape is skipped and does not appear in the target
//! namespace. That is a deliberate pipeline policy, not an accident; a
//! lossless variant would need an explicit copy branch here.

use unic_langid::LanguageIdentifier;

use crate::{
    entity,
    error::Error,
    placeholder,
    translator::Translator,
    types::{Document, Node},
};

/// Translates one string and repairs the result.
///
/// The raw translation goes through placeholder restoration and entity
/// normalization before it is considered finished.
pub fn translate_string<T: Translator>(
    original: &str,
    target: &LanguageIdentifier,
    translator: &T,
) -> Result<String, Error> {
    let raw = translator.translate(original, target)?;
    if raw.is_empty() && !original.is_empty() {
        return Err(Error::translation(format!(
            "empty response for text: {}",
            original
        )));
    }
    let restored = placeholder::restore(original, &raw);
    Ok(entity::normalize(&restored))
}

/// Translates a whole document into the target language.
///
/// Namespaces and entries are visited in stored order so the output file
/// diffs cleanly against the input. Returns the target document together
/// with the number of strings translated.
///
/// `cap` bounds the number of strings translated by this call (useful
/// against per-request service quotas during trial runs); once reached, the
/// remaining translatable leaves are skipped. `None` means no cap. Callers
/// processing several files thread a shrinking cap through to keep the
/// budget run-wide; see [`crate::batch::run_module`].
pub fn translate_document<T: Translator>(
    source: &Document,
    target_lang: &str,
    translator: &T,
    cap: Option<usize>,
) -> Result<(Document, usize), Error> {
    let target: LanguageIdentifier = target_lang
        .parse()
        .map_err(|e| Error::translation(format!("invalid language {:?}: {:?}", target_lang, e)))?;

    let namespaces = source.namespaces().unwrap_or(&[]);
    let mut count = 0usize;
    let mut target_namespaces = Vec::with_capacity(namespaces.len());

    for (name, value) in namespaces {
        // A namespace is expected to be an object of entries; anything else
        // has no translatable content and is skipped like any other odd leaf.
        let entries = match value.as_object() {
            Some(entries) => entries,
            None => continue,
        };

        let mut target_entries = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            if cap.is_some_and(|cap| count >= cap) {
                break;
            }
            match entry {
                Node::String(text) => {
                    let translated = translate_string(text, &target, translator)?;
                    count += 1;
                    target_entries.push((key.clone(), Node::String(translated)));
                }
                Node::Array(items) if items.iter().all(|i| matches!(i, Node::String(_))) => {
                    let mut translated_items = Vec::with_capacity(items.len());
                    for item in items {
                        if let Node::String(text) = item {
                            translated_items.push(Node::String(translate_string(
                                text, &target, translator,
                            )?));
                            count += 1;
                        }
                    }
                    target_entries.push((key.clone(), Node::Array(translated_items)));
                }
                // Numbers, booleans, nulls, nested objects and mixed arrays
                // are not translatable entries; they are dropped.
                _ => {}
            }
        }
        target_namespaces.push((name.clone(), Node::Object(target_entries)));
    }

    Ok((Document::new(Node::Object(target_namespaces)), count))
}
