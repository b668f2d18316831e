use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    pub data: PostData,
}

impl Post {
    pub fn link(&self) -> String {
        match self.uid {
            Some(ref uid) => format!("/post/{}", uid),
            None => "#".to_string(),
        }
    }
}

/// One batch of posts as returned by the content API search endpoint.
/// `next_page` is the opaque cursor for the following batch.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Page {
    #[serde(default)]
    pub next_page: Option<String>,
    pub results: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use crate::test_data::{FIRST_PAGE_JSON, LAST_PAGE_JSON};

    use super::*;

    #[test]
    fn test_decode_search_response() {
        let page: Page = serde_json::from_str(FIRST_PAGE_JSON).unwrap();
        assert_eq!(page.next_page.as_deref(), Some("https://blog.cdn.prismic.io/api/v2/documents/search?ref=YF0&page=2&pageSize=2"));
        assert_eq!(page.results.len(), 2);

        let post = &page.results[0];
        assert_eq!(post.uid.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(post.first_publication_date.as_deref(), Some("2021-03-15T19:25:28+0000"));
        assert_eq!(post.data.title, "Como utilizar Hooks");
        assert_eq!(post.data.subtitle, "Pensando em sincronização em vez de ciclos de vida.");
        assert_eq!(post.data.author, "Joseph Oliveira");
        assert_eq!(post.link(), "/post/como-utilizar-hooks");
    }

    #[test]
    fn test_decode_last_page() {
        let page: Page = serde_json::from_str(LAST_PAGE_JSON).unwrap();
        assert_eq!(page.next_page, None);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].first_publication_date, None);
        assert_eq!(page.results[0].uid, None);
        assert_eq!(page.results[0].link(), "#");
    }

    #[test]
    fn test_missing_next_page_is_none() {
        let page: Page = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page.next_page, None);
        assert!(page.results.is_empty());
    }
}
