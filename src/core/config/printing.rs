use crate::core::config::data::{path_display, Config};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: {} (default)", self.model()),
        }
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: {} (default)", self.base_url()),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
        println!("  markdown: {}", on_off(self.markdown_enabled()));
        println!("  syntax: {}", on_off(self.syntax_enabled()));
        println!("  group-lists: {}", on_off(self.group_lists_enabled()));
        match &self.log_filter {
            Some(filter) => println!("  log-filter: {filter}"),
            None => println!("  log-filter: (unset)"),
        }
        match &self.resources_file {
            Some(path) => println!("  resources-file: {}", path_display(path)),
            None => println!("  resources-file: (default)"),
        }
    }
}
