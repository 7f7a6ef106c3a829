//! Merge of the collected headers into the request.

use crate::{Error, HeaderTable, PendingHeader};

/// Merges `pending` into `headers`.
///
/// Every existing entry whose name matches a pending header gets its value replaced, in place;
/// the pending header is then consumed and cannot match a later entry. The pending headers left
/// are appended in order. If an append fails the merge stops, headers already appended are not
/// removed.
///
/// The headers are scanned linearly: the number of headers emitted by a tracer is small, and a
/// name index would not pay for itself.
pub fn merge_headers<T>(headers: &mut T, mut pending: Vec<PendingHeader>) -> Result<(), Error>
where
    T: HeaderTable + ?Sized,
{
    if pending.is_empty() {
        return Ok(());
    }

    headers.for_each_entry(&mut |name, value| {
        let Some(index) = pending.iter().position(|header| header.name.as_str() == name) else {
            return;
        };
        let header = pending.remove(index);
        tracing::debug!(
            header.name = name,
            header.old_value = ?value,
            header.new_value = ?header.value,
            "replacing tracing header"
        );
        *value = header.value;
    });

    for header in pending {
        tracing::debug!(
            header.name = header.name.as_str(),
            header.value = ?header.value,
            "adding tracing header"
        );
        if let Err(err) = headers.try_push(header.name, header.value) {
            tracing::error!(error = %err, "failed to insert header");
            return Err(err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, HeaderValue};

    use super::*;
    use crate::HeaderList;

    fn pending(headers: &[(&str, &str)]) -> Vec<PendingHeader> {
        headers
            .iter()
            .map(|(key, value)| PendingHeader::new(key, value).unwrap())
            .collect()
    }

    fn list(headers: &[(&str, &str)]) -> HeaderList {
        let mut list = HeaderList::new();
        for (key, value) in headers {
            list.push(key, HeaderValue::from_str(value).unwrap()).unwrap();
        }
        list
    }

    fn entries(list: &HeaderList) -> Vec<(&str, &str)> {
        list.iter()
            .map(|entry| (entry.key(), entry.value().to_str().unwrap()))
            .collect()
    }

    #[test]
    fn replaces_ignoring_case() {
        let mut headers = list(&[("Accept", "*/*"), ("X-Trace-Id", "old")]);
        merge_headers(&mut headers, pending(&[("x-trace-id", "new")])).unwrap();

        assert_eq!(entries(&headers), [("Accept", "*/*"), ("X-Trace-Id", "new")]);
    }

    #[test]
    fn appends_new_keys_last() {
        let mut headers = list(&[("Host", "example.com")]);
        merge_headers(&mut headers, pending(&[("ot-span-id", "42")])).unwrap();

        let last = headers.iter().last().unwrap();
        assert_eq!(last.key(), "ot-span-id");
        assert_eq!(last.value(), "42");
    }

    #[test]
    fn untouched_headers_keep_their_position() {
        let mut headers = list(&[
            ("Host", "example.com"),
            ("traceparent", "old-parent"),
            ("Accept", "*/*"),
            ("tracestate", "old-state"),
            ("User-Agent", "curl"),
        ]);
        merge_headers(
            &mut headers,
            pending(&[
                ("tracestate", "new-state"),
                ("baggage", "k=v"),
                ("traceparent", "new-parent"),
            ]),
        )
        .unwrap();

        assert_eq!(
            entries(&headers),
            [
                ("Host", "example.com"),
                ("traceparent", "new-parent"),
                ("Accept", "*/*"),
                ("tracestate", "new-state"),
                ("User-Agent", "curl"),
                ("baggage", "k=v"),
            ]
        );
    }

    #[test]
    fn pending_header_is_used_once() {
        let mut headers = list(&[("X-Trace-Id", "a"), ("x-trace-id", "b")]);
        merge_headers(&mut headers, pending(&[("x-trace-id", "new")])).unwrap();

        assert_eq!(entries(&headers), [("X-Trace-Id", "new"), ("x-trace-id", "b")]);
    }

    #[test]
    fn duplicated_pending_keys_are_appended() {
        let mut headers = list(&[("X-Trace-Id", "old")]);
        merge_headers(
            &mut headers,
            pending(&[("x-trace-id", "first"), ("x-trace-id", "second")]),
        )
        .unwrap();

        assert_eq!(
            entries(&headers),
            [("X-Trace-Id", "first"), ("x-trace-id", "second")]
        );
    }

    #[test]
    fn empty_pending_set_is_a_no_op() {
        let mut headers = list(&[("Host", "example.com")]);
        merge_headers(&mut headers, Vec::new()).unwrap();

        assert_eq!(entries(&headers), [("Host", "example.com")]);
    }

    #[test]
    fn failed_append_keeps_previous_ones() {
        let mut headers = HeaderList::with_max_entries(2);
        headers.push("Host", HeaderValue::from_static("example.com")).unwrap();

        let err = merge_headers(
            &mut headers,
            pending(&[("traceparent", "parent"), ("tracestate", "state")]),
        )
        .unwrap_err();

        assert!(matches!(err, Error::HeaderLimit(2)));
        assert_eq!(
            entries(&headers),
            [("Host", "example.com"), ("traceparent", "parent")]
        );
    }

    #[test]
    fn merges_into_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/html"));
        headers.insert("x-trace-id", HeaderValue::from_static("abc"));

        merge_headers(
            &mut headers,
            pending(&[("X-Trace-Id", "123"), ("x-span-id", "456")]),
        )
        .unwrap();

        let entries = headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_str().unwrap()))
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                ("content-type", "text/html"),
                ("x-trace-id", "123"),
                ("x-span-id", "456"),
            ]
        );
    }
}
