use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[content_api]
endpoint = "https://your-repository.cdn.prismic.io/api/v2"
# access_token = "..."
document_type = "posts"
page_size = 2
order_field = "last_publication_date"
order_direction = "desc"
# startup: fetch the first page once, request: fetch it on every request
load_mode = "startup"
timeout_secs = 10

[view]
date_format = "%d %b %Y"
locale = "pt_BR"
load_more_label = "Carregar mais posts"
max_batches = 50

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
# template_dir = "template"
public_dir = "res/public"

[server]
address = "0.0.0.0"
port = 8001
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
