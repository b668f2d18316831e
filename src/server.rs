use std::io;
use std::io::ErrorKind;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::{Config, LoadMode};
use crate::content_api::ContentClient;
use crate::date_format::DateFormatter;
use crate::error::FetchResult;
use crate::paginator::{PageSource, Paginator};
use crate::post::Page;
use crate::query_string::QueryString;
use crate::view::list_renderer::{load_list_renderer, post_anchor, ListRenderer, LoadMore};

const LIST_ERROR: &str = "Error listing posts";
const LOAD_MORE_ERROR: &str = "Could not load more posts. Please try again.";

struct AppState {
    client: ContentClient,
    renderer: ListRenderer<'static>,
    formatter: DateFormatter,
    // Set when load_mode is startup
    startup_page: Option<Page>,
    config: Config,
}

impl AppState {
    async fn new(config: Config) -> io::Result<Self> {
        let client = ContentClient::new(&config.content_api)?;
        let formatter = DateFormatter::new(&config.view.date_format, &config.view.locale)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
        let renderer = load_list_renderer(config.paths.template_dir.as_deref())?;

        let startup_page = match config.content_api.load_mode {
            LoadMode::Startup => {
                info!("Loading first page from {}", config.content_api.endpoint);
                Some(client.first_page().await?)
            }
            LoadMode::Request => None,
        };

        Ok(AppState {
            client,
            renderer,
            formatter,
            startup_page,
            config,
        })
    }
}

pub struct FeedOptions<'a> {
    /// Batches requested through `?page=`
    pub batches: u32,
    pub max_batches: u32,
    pub load_more_label: &'a str,
}

fn get_batches(req: &HttpRequest, max_batches: u32) -> u32 {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).get_batches(max_batches),
        None => 1,
    }
}

/// Loads up to `batches - 1` more batches into the paginator and renders the list.
/// A failing batch stops the loading and is shown as a notice above the control.
/// The control is left out once `max_batches` are on the page.
pub async fn render_feed<S: PageSource>(
    renderer: &ListRenderer<'_>,
    paginator: &mut Paginator,
    source: &S,
    opts: &FeedOptions<'_>) -> String {
    let mut errors = vec![];
    let mut loaded = 1;

    while loaded < opts.batches && paginator.has_more() {
        match paginator.load_more(source).await {
            Ok(_) => loaded += 1,
            Err(e) => {
                error!("Error loading batch {}: {}", loaded + 1, e);
                errors.push(LOAD_MORE_ERROR.to_string());
                break;
            }
        }
    }

    let load_more = if paginator.has_more() && loaded < opts.max_batches {
        Some(LoadMore {
            href: format!("/?page={}#{}", loaded + 1, post_anchor(paginator.posts().len())),
            label: opts.load_more_label.to_string(),
        })
    } else {
        None
    };

    renderer.render(paginator.posts(), load_more, &errors)
}

async fn render_index(state: &AppState, batches: u32) -> FetchResult<String> {
    let first_page = match state.startup_page {
        Some(ref page) => page.clone(),
        None => state.client.first_page().await?,
    };

    let mut paginator = Paginator::new(first_page, state.formatter.clone())?;
    let opts = FeedOptions {
        batches,
        max_batches: state.config.view.max_batches,
        load_more_label: state.config.view.load_more_label.as_str(),
    };
    Ok(render_feed(&state.renderer, &mut paginator, &state.client, &opts).await)
}

#[web::get("/")]
async fn index(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let batches = get_batches(&req, state.config.view.max_batches);

    match render_index(&state, batches).await {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            error!("{}: {}", LIST_ERROR, e);
            web::HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(LIST_ERROR)
        }
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState::new(config).await?);

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
