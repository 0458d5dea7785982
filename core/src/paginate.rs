/*
    spotify-backup-rs | Rust CLI tool to export liked tracks and playlists to local backup files.
    Copyright (C) 2026  spotify-backup-rs contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, Stream};
use rspotify::model::Page;
use rspotify::ClientError;
use thiserror::Error;

/// Page size requested from every paginated endpoint.
pub const PAGE_LIMIT: u32 = 50;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Spotify API error: {0}")]
    Spotify(#[from] ClientError),
    #[error("page request at offset {offset} timed out after {timeout:?}")]
    Timeout { offset: u32, timeout: Duration },
}

/// Lazy stream of pages pulled from an offset-parameterized endpoint.
///
/// `fetch` is called once per page, starting at offset 0 and advancing by
/// the number of items each page actually carried. The stream ends exactly
/// when a page comes back without a `next` pointer; an endpoint with zero
/// items yields a single empty page and then ends without error. Each page
/// request is bounded by `timeout`.
///
/// The stream is finite and non-restartable. Drain it with
/// [`futures::TryStreamExt::try_next`]; the first error aborts it.
pub fn pages<T, F, Fut>(
    fetch: F,
    timeout: Duration,
) -> impl Stream<Item = Result<Page<T>, FetchError>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, ClientError>>,
{
    stream::try_unfold(
        (fetch, 0u32, false),
        move |(mut fetch, offset, done)| async move {
            if done {
                return Ok(None);
            }
            let page = tokio::time::timeout(timeout, fetch(offset))
                .await
                .map_err(|_| FetchError::Timeout { offset, timeout })??;
            let done = page.next.is_none();
            let next_offset = offset + page.items.len() as u32;
            Ok(Some((page, (fetch, next_offset, done))))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{pin_mut, TryStreamExt};
    use std::cell::RefCell;

    fn page(offset: u32, len: u32, total: u32, has_next: bool) -> Page<u32> {
        Page {
            href: String::new(),
            items: (offset..offset + len).collect(),
            limit: PAGE_LIMIT,
            next: has_next.then(|| format!("offset={}", offset + len)),
            offset,
            previous: None,
            total,
        }
    }

    #[tokio::test]
    async fn concatenates_pages_and_stops_at_missing_next() {
        // Three pages; the fetch queue panics if pulled a fourth time.
        let queue = RefCell::new(vec![
            page(0, 50, 113, true),
            page(50, 50, 113, true),
            page(100, 13, 113, false),
        ]);
        let offsets = RefCell::new(Vec::new());

        let stream = pages(
            |offset| {
                offsets.borrow_mut().push(offset);
                let next = queue.borrow_mut().remove(0);
                async move { Ok::<_, ClientError>(next) }
            },
            Duration::from_secs(1),
        );
        pin_mut!(stream);

        let mut items = Vec::new();
        while let Some(page) = stream.try_next().await.unwrap() {
            items.extend(page.items);
        }

        assert_eq!(items, (0..113).collect::<Vec<u32>>());
        assert_eq!(*offsets.borrow(), vec![0, 50, 100]);
        assert!(queue.borrow().is_empty());
    }

    #[tokio::test]
    async fn empty_endpoint_yields_no_items() {
        let calls = RefCell::new(0u32);

        let stream = pages(
            |offset| {
                *calls.borrow_mut() += 1;
                let empty = page(offset, 0, 0, false);
                async move { Ok::<_, ClientError>(empty) }
            },
            Duration::from_secs(1),
        );
        pin_mut!(stream);

        let mut items: Vec<u32> = Vec::new();
        while let Some(page) = stream.try_next().await.unwrap() {
            items.extend(page.items);
        }

        assert!(items.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn slow_page_request_times_out() {
        let stream = pages(
            |_offset| std::future::pending::<Result<Page<u32>, ClientError>>(),
            Duration::from_millis(20),
        );
        pin_mut!(stream);

        let err = stream.try_next().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { offset: 0, .. }));
    }
}
