pub mod list_renderer;
