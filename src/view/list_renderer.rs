use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use ramhorns::Template;

use crate::paginator::PostItem;

pub const LIST_TEMPLATE_NAME: &str = "postlist.tpl";
pub const DEFAULT_LIST_TEMPLATE: &str = include_str!("../../res/template/postlist.tpl");

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    post_list: Vec<ViewPost<'a>>,
    errors: Vec<ViewError<'a>>,
    load_more: Option<LoadMore>,
}

#[derive(ramhorns::Content)]
struct ViewPost<'a> {
    anchor: String,
    link: &'a str,
    title: &'a str,
    subtitle: &'a str,
    date: &'a str,
    author: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewError<'a> {
    message: &'a str,
}

/// The "load more" control. Only rendered while there is a next batch.
#[derive(ramhorns::Content, Debug, Clone, PartialEq)]
pub struct LoadMore {
    pub href: String,
    pub label: String,
}

pub fn post_anchor(index: usize) -> String {
    format!("post-{}", index)
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

fn parse_template<'a>(parsed: Result<Template<'a>, ramhorns::Error>) -> io::Result<ListRenderer<'a>> {
    match parsed {
        Ok(template) => Ok(ListRenderer { template }),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e))),
    }
}

impl<'a> ListRenderer<'a> {
    pub fn new(list_tpl_src: &'a str) -> io::Result<ListRenderer<'a>> {
        parse_template(Template::new(list_tpl_src))
    }

    pub fn render(&self, posts: &[PostItem], load_more: Option<LoadMore>, errors: &[String]) -> String {
        let post_list = posts.iter()
            .enumerate()
            .map(|(i, post)| ViewPost {
                anchor: post_anchor(i),
                link: post.link.as_str(),
                title: post.title.as_str(),
                subtitle: post.subtitle.as_str(),
                date: post.date.as_str(),
                author: post.author.as_str(),
            })
            .collect();

        let errors = errors.iter().map(|e| ViewError { message: e.as_str() }).collect();

        self.template.render(&ListPage {
            post_list,
            errors,
            load_more,
        })
    }
}

impl ListRenderer<'static> {
    /// Owns the template source, for templates read from disk.
    pub fn from_source(list_tpl_src: String) -> io::Result<ListRenderer<'static>> {
        parse_template(Template::new(list_tpl_src))
    }
}

/// Uses `postlist.tpl` from the template dir when present, the built-in one otherwise.
pub fn load_list_renderer(template_dir: Option<&Path>) -> io::Result<ListRenderer<'static>> {
    if let Some(dir) = template_dir {
        let template_path = dir.join(LIST_TEMPLATE_NAME);
        if template_path.exists() {
            let template_src = fs::read_to_string(&template_path)?;
            return ListRenderer::from_source(template_src);
        }
    }
    ListRenderer::new(DEFAULT_LIST_TEMPLATE)
}
