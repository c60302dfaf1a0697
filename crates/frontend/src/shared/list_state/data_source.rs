//! One fetch per effective request, last request wins.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::list_request::{EffectiveRequest, ListResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The remote list endpoint. May fail, may resolve out of order.
#[async_trait(?Send)]
pub trait ListEndpoint<T> {
    async fn fetch(&self, request: &EffectiveRequest) -> Result<ListResponse<T>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Published,
    Failed,
    /// A newer request was submitted meanwhile; the result was dropped
    Stale,
}

/// What the view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    /// Request echoed with the rows above; `None` until the first success
    pub request: Option<EffectiveRequest>,
    /// Set by a failed fetch; the rows of the last good page stay in place
    pub error: Option<FetchError>,
    pub loading: bool,
}

impl<T> Default for PageView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            request: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> PageView<T> {
    pub fn page_index(&self) -> u32 {
        self.request.as_ref().map_or(0, |r| r.list.page_index)
    }

    pub fn total_pages(&self) -> u64 {
        match &self.request {
            Some(r) if r.list.page_size > 0 => self.total_count.div_ceil(u64::from(r.list.page_size)),
            _ => 0,
        }
    }
}

struct SourceState<T> {
    last_token: u64,
    view: PageView<T>,
}

impl<T> SourceState<T> {
    fn begin(&mut self) -> FetchToken {
        self.last_token += 1;
        self.view.loading = true;
        FetchToken(self.last_token)
    }

    fn complete(
        &mut self,
        token: FetchToken,
        request: EffectiveRequest,
        result: Result<ListResponse<T>, FetchError>,
    ) -> FetchOutcome {
        if token.0 != self.last_token {
            log::debug!("data source: response #{} superseded by #{}", token.0, self.last_token);
            return FetchOutcome::Stale;
        }

        self.view.loading = false;
        match result {
            Ok(response) => {
                self.view.items = response.items;
                self.view.total_count = response.total_count;
                self.view.request = Some(request);
                self.view.error = None;
                FetchOutcome::Published
            }
            Err(e) => {
                log::warn!("data source: fetch #{} failed: {e}", token.0);
                self.view.error = Some(e);
                FetchOutcome::Failed
            }
        }
    }
}

pub struct PaginatedDataSource<T, E> {
    endpoint: Rc<E>,
    state: Rc<RefCell<SourceState<T>>>,
}

impl<T, E> Clone for PaginatedDataSource<T, E> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Rc::clone(&self.endpoint),
            state: Rc::clone(&self.state),
        }
    }
}

impl<T, E> PaginatedDataSource<T, E>
where
    T: Clone + 'static,
    E: ListEndpoint<T> + 'static,
{
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint: Rc::new(endpoint),
            state: Rc::new(RefCell::new(SourceState {
                last_token: 0,
                view: PageView::default(),
            })),
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn view(&self) -> PageView<T> {
        self.state.borrow().view.clone()
    }

    /// Token of the newest submitted request
    pub fn current_token(&self) -> Option<FetchToken> {
        match self.state.borrow().last_token {
            0 => None,
            token => Some(FetchToken(token)),
        }
    }

    /// Makes `request` current right away and returns the fetch to drive.
    ///
    /// Dropping the returned future abandons the fetch; it stays superseded
    /// as soon as another request is submitted.
    pub fn submit(&self, request: EffectiveRequest) -> impl Future<Output = FetchOutcome> + 'static {
        let token = self.state.borrow_mut().begin();
        let endpoint = Rc::clone(&self.endpoint);
        let state = Rc::clone(&self.state);

        async move {
            let result = endpoint.fetch(&request).await;
            state.borrow_mut().complete(token, request, result)
        }
    }

    pub fn dismiss_error(&self) {
        self.state.borrow_mut().view.error = None;
    }
}
