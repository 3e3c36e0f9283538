//! Feed state store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::api::endpoints::{self, FeedQuery, POSTS, UserQuery, VOTES};
use crate::api::{ApiClient, MultipartForm};
use crate::error::{Error, InvalidInputError};
use crate::models::{ImageUpload, NewPost, Page, Post, PostFilters, Vote, VoteDirection};

/// Default feed page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug)]
struct FeedState {
    posts: Vec<Post>,
    current: Option<Post>,
    filters: PostFilters,
    page: u32,
    size: u32,
    total_pages: u32,
    has_more: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            current: None,
            filters: PostFilters::default(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            has_more: true,
        }
    }
}

/// Wire payload for PUT /votes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest<'a> {
    post_id: &'a str,
    user_id: &'a str,
    vote_type: VoteDirection,
}

/// Feed state and post operations.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct PostsStore {
    inner: Arc<PostsInner>,
}

struct PostsInner {
    api: ApiClient,
    state: RwLock<FeedState>,
    // Collapses overlapping load_more calls into one fetch.
    loading_more: AtomicBool,
}

impl PostsStore {
    /// Create a store over the given client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(PostsInner {
                api,
                state: RwLock::new(FeedState::default()),
                loading_more: AtomicBool::new(false),
            }),
        }
    }

    /// Returns a copy of the loaded feed.
    pub fn posts(&self) -> Vec<Post> {
        self.inner.state.read().unwrap().posts.clone()
    }

    /// Returns the post loaded by [`PostsStore::post`], if any.
    pub fn current_post(&self) -> Option<Post> {
        self.inner.state.read().unwrap().current.clone()
    }

    /// Returns the active feed filters.
    pub fn filters(&self) -> PostFilters {
        self.inner.state.read().unwrap().filters.clone()
    }

    /// True when the feed has further pages to load.
    pub fn has_more(&self) -> bool {
        self.inner.state.read().unwrap().has_more
    }

    /// Replace the feed filters and rewind to the first page.
    ///
    /// The feed content is unchanged until the next fetch.
    pub fn set_filters(&self, filters: PostFilters) {
        let mut state = self.inner.state.write().unwrap();
        state.filters = filters;
        state.page = 0;
    }

    /// Drop all filters and rewind to the first page.
    pub fn reset_filters(&self) {
        self.set_filters(PostFilters::default());
    }

    /// Fetch the first feed page and replace the loaded posts.
    #[instrument(skip(self))]
    pub async fn refresh_feed(&self) -> Result<(), Error> {
        let page = self.fetch_page(0).await?;
        debug!(count = page.content.len(), "feed refreshed");
        self.apply_page(page, true);
        Ok(())
    }

    /// Fetch the next feed page and append it to the loaded posts.
    ///
    /// A call while the feed is exhausted, or while another load is in
    /// flight, is a no-op.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> Result<(), Error> {
        if !self.has_more() {
            return Ok(());
        }
        if self.inner.loading_more.swap(true, Ordering::Acquire) {
            return Ok(());
        }
        let result = self.load_next_page().await;
        self.inner.loading_more.store(false, Ordering::Release);
        result
    }

    async fn load_next_page(&self) -> Result<(), Error> {
        let next = self.inner.state.read().unwrap().page + 1;
        let page = self.fetch_page(next).await?;
        debug!(page = next, count = page.content.len(), "feed page appended");
        self.apply_page(page, false);
        Ok(())
    }

    /// Fetch a single post and record it as the current post.
    #[instrument(skip(self))]
    pub async fn post(&self, id: &str) -> Result<Post, Error> {
        let path = endpoints::post_by_id(id);
        let post: Post = self.inner.api.get(&path).await?.require(&path)?;
        self.inner.state.write().unwrap().current = Some(post.clone());
        Ok(post)
    }

    /// Create a post with optional image attachments and prepend it to the
    /// loaded feed.
    ///
    /// The post payload travels as the JSON `post` part of a multipart
    /// request; each image is an `images` part.
    #[instrument(skip(self, post, images), fields(images = images.len()))]
    pub async fn create_post(
        &self,
        post: &NewPost,
        images: Vec<ImageUpload>,
    ) -> Result<Post, Error> {
        let payload = serde_json::to_string(post).map_err(|e| InvalidInputError::Body {
            reason: e.to_string(),
        })?;

        let mut form = MultipartForm::new().text("post", payload);
        for image in images {
            form = form.image("images", image);
        }

        let created: Post = self
            .inner
            .api
            .post_multipart(POSTS, form)
            .await?
            .require(POSTS)?;

        self.inner
            .state
            .write()
            .unwrap()
            .posts
            .insert(0, created.clone());
        Ok(created)
    }

    /// Delete a post and remove it from the loaded feed.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: &str, user_id: &str) -> Result<(), Error> {
        let path = endpoints::post_by_id(id);
        self.inner
            .api
            .delete_query::<_, serde_json::Value>(&path, &UserQuery { user_id })
            .await?;

        let mut state = self.inner.state.write().unwrap();
        state.posts.retain(|post| post.id != id);
        Ok(())
    }

    /// Record a vote and update the affected post's counts in place.
    ///
    /// Server rejections and transport failures are logged and swallowed
    /// so a failed vote never disrupts feed browsing; only a dead session
    /// propagates to the caller.
    #[instrument(skip(self), fields(post = post_id, direction = %direction))]
    pub async fn vote(
        &self,
        post_id: &str,
        user_id: &str,
        direction: VoteDirection,
    ) -> Result<(), Error> {
        let request = VoteRequest {
            post_id,
            user_id,
            vote_type: direction,
        };

        match self.inner.api.put::<_, Vote>(VOTES, &request).await {
            Ok(_) => {
                self.apply_vote(post_id, direction);
                Ok(())
            }
            Err(error @ Error::Auth(_)) => Err(error),
            Err(error) => {
                warn!(%error, "vote failed");
                Ok(())
            }
        }
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<Post>, Error> {
        let (size, filters) = {
            let state = self.inner.state.read().unwrap();
            (state.size, state.filters.clone())
        };
        let query = FeedQuery::new(page, size, &filters);
        self.inner
            .api
            .get_query(POSTS, &query)
            .await?
            .require(POSTS)
    }

    fn apply_page(&self, page: Page<Post>, replace: bool) {
        let Page {
            content,
            pageable,
            total_pages,
            last,
            ..
        } = page;

        let mut state = self.inner.state.write().unwrap();
        if replace {
            state.posts = content;
        } else {
            state.posts.extend(content);
        }
        state.page = pageable.page_number;
        state.size = pageable.page_size;
        state.total_pages = total_pages;
        state.has_more = !last;
    }

    fn apply_vote(&self, post_id: &str, direction: VoteDirection) {
        let mut state = self.inner.state.write().unwrap();
        for post in state.posts.iter_mut().filter(|post| post.id == post_id) {
            adjust_counts(post, direction);
        }
        if let Some(current) = state.current.as_mut().filter(|post| post.id == post_id) {
            adjust_counts(current, direction);
        }
    }
}

/// Retract the previous vote from the counters, then apply the new one.
fn adjust_counts(post: &mut Post, direction: VoteDirection) {
    match post.current_user_vote {
        Some(1) => post.upvotes -= 1,
        Some(-1) => post.downvotes -= 1,
        _ => {}
    }
    match direction {
        VoteDirection::Up => post.upvotes += 1,
        VoteDirection::Down => post.downvotes += 1,
    }
    post.current_user_vote = Some(direction.value());
}
