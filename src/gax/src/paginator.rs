// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use futures::stream::unfold;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;

/// Describes a type that can be iterated over asyncly when used with
/// [Paginator].
pub trait PageableResponse {
    /// The type of the items in each page.
    type PageItem;

    /// Consumes the page and returns its items.
    fn items(self) -> Vec<Self::PageItem>;

    /// The token for the next page, or the empty string on the last page.
    fn next_page_token(&self) -> String;
}

/// An adapter that converts list RPCs as defined by [AIP-4233](https://google.aip.dev/client-libraries/4233)
/// into a [futures::Stream] that can be iterated over in an async fashion.
#[pin_project]
pub struct Paginator<T, E> {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>,
}

type ControlFlow = std::ops::ControlFlow<(), String>;

impl<T, E> Paginator<T, E>
where
    T: PageableResponse,
{
    /// Creates a new [Paginator] given the initial page token and a function
    /// to fetch the next [PageableResponse].
    pub fn new<F>(
        seed_token: String,
        execute: impl Fn(String) -> F + Clone + Send + 'static,
    ) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send,
        E: Send,
    {
        let stream = unfold(ControlFlow::Continue(seed_token), move |state| {
            let execute = execute.clone();
            async move {
                let token = match state {
                    ControlFlow::Continue(token) => token,
                    ControlFlow::Break(_) => return None,
                };
                match execute(token).await {
                    Ok(page) => {
                        let tok = page.next_page_token();
                        let next_state = if tok.is_empty() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(tok)
                        };
                        Some((Ok(page), next_state))
                    }
                    Err(e) => Some((Err(e), ControlFlow::Break(()))),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Converts the paginator into one that yields individual items instead
    /// of full pages.
    pub fn items(self) -> ItemPaginator<T, E> {
        ItemPaginator::new(self)
    }

    /// Returns the next page of the wrapped stream.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }
}

impl<T, E> Stream for Paginator<T, E> {
    type Item = Result<T, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

/// A [Paginator] that yields individual items.
///
/// Pages with no items are skipped, and the underlying pages are only fetched
/// as the stream is consumed.
#[pin_project]
pub struct ItemPaginator<T, E>
where
    T: PageableResponse,
{
    #[pin]
    stream: Paginator<T, E>,
    current: Option<std::vec::IntoIter<T::PageItem>>,
}

impl<T, E> ItemPaginator<T, E>
where
    T: PageableResponse,
{
    fn new(paginator: Paginator<T, E>) -> Self {
        Self {
            stream: paginator,
            current: None,
        }
    }

    /// Returns the next item of the wrapped stream.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }
}

impl<T, E> Stream for ItemPaginator<T, E>
where
    T: PageableResponse,
{
    type Item = Result<T::PageItem, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(iter) = this.current.as_mut() {
                if let Some(item) = iter.next() {
                    return std::task::Poll::Ready(Some(Ok(item)));
                }
                *this.current = None;
            }
            match futures::ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(page)) => *this.current = Some(page.items().into_iter()),
                Some(Err(e)) => return std::task::Poll::Ready(Some(Err(e))),
                None => return std::task::Poll::Ready(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct TestRequest {
        page_token: String,
    }

    struct TestResponse {
        items: Vec<PageItem>,
        next_page_token: String,
    }

    #[derive(Clone)]
    struct PageItem {
        name: String,
    }

    impl PageableResponse for TestResponse {
        type PageItem = PageItem;

        fn items(self) -> Vec<PageItem> {
            self.items
        }

        fn next_page_token(&self) -> String {
            self.next_page_token.clone()
        }
    }

    type TestError = Box<dyn std::error::Error + Send + Sync>;

    fn page(names: &[&str], next_page_token: &str) -> TestResponse {
        TestResponse {
            items: names
                .iter()
                .map(|name| PageItem {
                    name: name.to_string(),
                })
                .collect(),
            next_page_token: next_page_token.to_string(),
        }
    }

    #[derive(Clone)]
    struct Client {
        data: Arc<Mutex<VecDeque<TestResponse>>>,
    }

    impl Client {
        async fn list_rpc(&self, _req: TestRequest) -> Result<TestResponse, TestError> {
            let mut responses = self.data.lock().unwrap();
            Ok(responses.pop_front().unwrap())
        }

        fn list_rpc_stream(&self, req: TestRequest) -> Paginator<TestResponse, TestError> {
            let client = self.clone();
            let tok = req.page_token.clone();
            let execute = move |token| {
                let mut req = req.clone();
                let client = client.clone();
                req.page_token = token;
                async move { client.list_rpc(req).await }
            };
            Paginator::new(tok, execute)
        }
    }

    #[tokio::test]
    async fn paginator_stops_on_empty_token() {
        let responses = VecDeque::from([page(&["item1", "item2"], "token2"), page(&["item3"], "")]);
        let expected_tokens = VecDeque::from(["token1".to_string(), "token2".to_string()]);

        let state = Arc::new(Mutex::new(responses));
        let tokens = Arc::new(Mutex::new(expected_tokens));

        let execute = move |token: String| {
            let expected_token = tokens.clone().lock().unwrap().pop_front().unwrap();
            assert_eq!(token, expected_token);
            let resp = state.clone().lock().unwrap().pop_front().unwrap();
            async move { Ok::<_, TestError>(resp) }
        };

        let mut pages = vec![];
        let mut stream = Paginator::new("token1".to_string(), execute);
        while let Some(resp) = stream.next().await {
            pages.push(resp.unwrap());
        }
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items[0].name, "item1");
        assert_eq!(pages[0].items[1].name, "item2");
        assert_eq!(pages[1].items[0].name, "item3");
    }

    #[tokio::test]
    async fn paginator_as_client() {
        let responses = VecDeque::from([page(&["item1", "item2"], "token1"), page(&["item3"], "")]);
        let client = Client {
            data: Arc::new(Mutex::new(responses)),
        };
        let mut names = vec![];
        let mut stream = client.list_rpc_stream(TestRequest::default());
        while let Some(resp) = stream.next().await {
            names.extend(resp.unwrap().items.into_iter().map(|i| i.name));
        }
        assert_eq!(names, vec!["item1", "item2", "item3"]);
    }

    #[tokio::test]
    async fn item_paginator_skips_empty_pages() {
        let responses = VecDeque::from([
            page(&["a", "b", "c"], "abc"),
            page(&[], "def"),
            page(&["d"], "ghi"),
            page(&["e", "f"], ""),
        ]);
        let client = Client {
            data: Arc::new(Mutex::new(responses)),
        };
        let mut names = vec![];
        let mut items = client.list_rpc_stream(TestRequest::default()).items();
        while let Some(item) = items.next().await {
            names.push(item.unwrap().name);
        }
        assert_eq!(names, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[tokio::test]
    async fn paginator_error() {
        let execute = |_| async { Err::<TestResponse, TestError>("err".into()) };

        let mut paginator = Paginator::new(String::new(), execute);
        let mut count = 0;
        while let Some(resp) = paginator.next().await {
            match resp {
                Ok(_) => panic!("expected an error"),
                Err(e) => {
                    assert_eq!(e.to_string(), "err");
                    count += 1;
                }
            }
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn item_paginator_error() {
        let execute = |_| async { Err::<TestResponse, TestError>("err".into()) };

        let mut items = Paginator::new(String::new(), execute).items();
        let mut count = 0;
        while let Some(item) = items.next().await {
            assert!(item.is_err());
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
