use std::future::Future;

use crate::date_format::DateFormatter;
use crate::error::FetchResult;
use crate::post::{Page, Post};

/// Anything able to resolve a `next_page` cursor into the following batch.
pub trait PageSource {
    fn fetch_page(&self, cursor: &str) -> impl Future<Output = FetchResult<Page>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostItem {
    pub uid: Option<String>,
    pub link: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl PostItem {
    fn from(post: Post, formatter: &DateFormatter) -> FetchResult<Self> {
        let date = formatter.format(post.first_publication_date.as_deref())?;
        Ok(PostItem {
            link: post.link(),
            uid: post.uid,
            title: post.data.title,
            subtitle: post.data.subtitle,
            author: post.data.author,
            date,
        })
    }
}

fn format_batch(posts: Vec<Post>, formatter: &DateFormatter) -> FetchResult<Vec<PostItem>> {
    posts.into_iter()
        .map(|post| PostItem::from(post, formatter))
        .collect()
}

/// Display state of the post list: posts in fetch order plus the cursor of
/// the next batch. Posts are only ever appended, and once the cursor is
/// `None` no more batches are loaded.
pub struct Paginator {
    posts: Vec<PostItem>,
    next_page: Option<String>,
    formatter: DateFormatter,
}

impl Paginator {
    pub fn new(first_page: Page, formatter: DateFormatter) -> FetchResult<Self> {
        let posts = format_batch(first_page.results, &formatter)?;
        Ok(Paginator {
            posts,
            next_page: first_page.next_page,
            formatter,
        })
    }

    pub fn posts(&self) -> &[PostItem] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetches the batch behind the current cursor and appends it.
    /// Returns how many posts were added. On error nothing changes, so the
    /// same batch can be requested again.
    pub async fn load_more<S: PageSource>(&mut self, source: &S) -> FetchResult<usize> {
        let Some(ref cursor) = self.next_page else {
            return Ok(0);
        };

        let page = source.fetch_page(cursor).await?;
        let mut batch = format_batch(page.results, &self.formatter)?;
        let added = batch.len();

        self.posts.append(&mut batch);
        self.next_page = page.next_page;

        Ok(added)
    }
}
