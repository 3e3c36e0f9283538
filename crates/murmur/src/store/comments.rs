//! Comment thread state store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::api::endpoints::{self, COMMENTS, PageQuery, UserQuery};
use crate::error::Error;
use crate::models::{Comment, NewComment, Page};

use super::posts::DEFAULT_PAGE_SIZE;

#[derive(Debug)]
struct ThreadState {
    comments: Vec<Comment>,
    page: u32,
    size: u32,
    total_pages: u32,
    has_more: bool,
}

impl Default for ThreadState {
    fn default() -> Self {
        Self {
            comments: Vec::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            has_more: true,
        }
    }
}

/// Comment thread state and comment operations.
///
/// The store holds one thread at a time; refreshing with a different post
/// id replaces the loaded thread. Cloning is cheap; clones share the same
/// state.
#[derive(Clone)]
pub struct CommentsStore {
    inner: Arc<CommentsInner>,
}

struct CommentsInner {
    api: ApiClient,
    state: RwLock<ThreadState>,
    // Collapses overlapping load_more calls into one fetch.
    loading_more: AtomicBool,
}

impl CommentsStore {
    /// Create a store over the given client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(CommentsInner {
                api,
                state: RwLock::new(ThreadState::default()),
                loading_more: AtomicBool::new(false),
            }),
        }
    }

    /// Returns a copy of the loaded thread.
    pub fn comments(&self) -> Vec<Comment> {
        self.inner.state.read().unwrap().comments.clone()
    }

    /// True when the thread has further pages to load.
    pub fn has_more(&self) -> bool {
        self.inner.state.read().unwrap().has_more
    }

    /// Fetch the first page of a post's comments and replace the loaded
    /// thread.
    #[instrument(skip(self))]
    pub async fn refresh_thread(&self, post_id: &str) -> Result<(), Error> {
        let page = self.fetch_page(post_id, 0).await?;
        debug!(count = page.content.len(), "thread refreshed");
        self.apply_page(page, true);
        Ok(())
    }

    /// Fetch the next page of the thread and append it.
    ///
    /// A call while the thread is exhausted, or while another load is in
    /// flight, is a no-op.
    #[instrument(skip(self))]
    pub async fn load_more(&self, post_id: &str) -> Result<(), Error> {
        if !self.has_more() {
            return Ok(());
        }
        if self.inner.loading_more.swap(true, Ordering::Acquire) {
            return Ok(());
        }
        let result = self.load_next_page(post_id).await;
        self.inner.loading_more.store(false, Ordering::Release);
        result
    }

    async fn load_next_page(&self, post_id: &str) -> Result<(), Error> {
        let next = self.inner.state.read().unwrap().page + 1;
        let page = self.fetch_page(post_id, next).await?;
        debug!(page = next, count = page.content.len(), "thread page appended");
        self.apply_page(page, false);
        Ok(())
    }

    /// Create a comment and prepend it to the loaded thread.
    #[instrument(skip(self, comment), fields(post = %comment.post_id))]
    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment, Error> {
        let created: Comment = self
            .inner
            .api
            .post(COMMENTS, comment)
            .await?
            .require(COMMENTS)?;

        self.inner
            .state
            .write()
            .unwrap()
            .comments
            .insert(0, created.clone());
        Ok(created)
    }

    /// Delete a comment and remove it from the loaded thread.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: &str, user_id: &str) -> Result<(), Error> {
        let path = endpoints::comment_by_id(id);
        self.inner
            .api
            .delete_query::<_, serde_json::Value>(&path, &UserQuery { user_id })
            .await?;

        let mut state = self.inner.state.write().unwrap();
        state.comments.retain(|comment| comment.id != id);
        Ok(())
    }

    async fn fetch_page(&self, post_id: &str, page: u32) -> Result<Page<Comment>, Error> {
        let size = self.inner.state.read().unwrap().size;
        let path = endpoints::comments_for_post(post_id);
        let query = PageQuery { page, size };
        self.inner
            .api
            .get_query(&path, &query)
            .await?
            .require(&path)
    }

    fn apply_page(&self, page: Page<Comment>, replace: bool) {
        let Page {
            content,
            pageable,
            total_pages,
            last,
            ..
        } = page;

        let mut state = self.inner.state.write().unwrap();
        if replace {
            state.comments = content;
        } else {
            state.comments.extend(content);
        }
        state.page = pageable.page_number;
        state.size = pageable.page_size;
        state.total_pages = total_pages;
        state.has_more = !last;
    }
}
