//! Header collections a context can be injected into.
//!
//! A [`HeaderTable`] is an ordered sequence of entries. Injection only ever overwrites the value
//! of an existing entry or appends a new one, entries are never removed nor reordered.

use http::{HeaderMap, HeaderName, HeaderValue, Request};

use crate::Error;

/// Ordered collection of request headers.
pub trait HeaderTable {
    /// Visits every entry in order with its lower-cased name and a mutable reference to its
    /// value.
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut HeaderValue));

    /// Appends a new entry after all the existing ones.
    fn try_push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), Error>;
}

impl HeaderTable for HeaderMap {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut HeaderValue)) {
        for (name, value) in self.iter_mut() {
            f(name.as_str(), value);
        }
    }

    fn try_push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), Error> {
        self.try_append(name, value)?;
        Ok(())
    }
}

impl<B> HeaderTable for Request<B> {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut HeaderValue)) {
        self.headers_mut().for_each_entry(f)
    }

    fn try_push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), Error> {
        self.headers_mut().try_push(name, value)
    }
}

impl<T: HeaderTable + ?Sized> HeaderTable for &mut T {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut HeaderValue)) {
        (**self).for_each_entry(f)
    }

    fn try_push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), Error> {
        (**self).try_push(name, value)
    }
}

/// Header as received from the client, with the original casing of its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    key: String,
    lowcase_key: String,
    value: HeaderValue,
}

impl HeaderEntry {
    /// Name with its original casing.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lowcase_key(&self) -> &str {
        &self.lowcase_key
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

/// Ordered list of headers preserving the casing of their names.
///
/// Unlike [`HeaderMap`], duplicated names are kept as distinct entries in the position they were
/// received, which is what an HTTP/1 proxy forwards upstream. The list may be limited to a fixed
/// number of entries.
#[derive(Clone, Debug, Default)]
pub struct HeaderList {
    entries: Vec<HeaderEntry>,
    max_entries: Option<usize>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list refusing to grow over `max_entries` entries.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: Some(max_entries),
        }
    }

    /// Appends a header keeping the casing of `key`.
    pub fn push(&mut self, key: &str, value: HeaderValue) -> Result<(), Error> {
        if let Some(max_entries) = self.max_entries {
            if self.entries.len() >= max_entries {
                return Err(Error::HeaderLimit(max_entries));
            }
        }
        self.entries.try_reserve(1)?;
        self.entries.push(HeaderEntry {
            key: key.to_owned(),
            lowcase_key: key.to_ascii_lowercase(),
            value,
        });
        Ok(())
    }

    /// Returns the value of the first entry matching `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|entry| entry.lowcase_key.eq_ignore_ascii_case(key))
            .map(|entry| &entry.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a HeaderEntry;
    type IntoIter = std::slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl HeaderTable for HeaderList {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut HeaderValue)) {
        for entry in self.entries.iter_mut() {
            f(&entry.lowcase_key, &mut entry.value);
        }
    }

    fn try_push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), Error> {
        self.push(name.as_str(), value)
    }
}
