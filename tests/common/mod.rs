#![allow(dead_code)]

use std::io::Write;
use viewconf::domain::color::Color;
use viewconf::domain::config::Config;

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const VIEW_INI: &str = r#"
; style for the default track layout
[format]
margins = 30
bar_height = 15
show_grid = true
track_title_color = rgba(0.2, 0.2, 0.2, 1)

[gene]
fill = rgba(1, 1, 1, 1)
stroke = rgba(0, 0, 0, 1)
caption = "Gene"

[exon]
fill = rgba(0.73, 0.73, 0.87, 1)
collapse_to_parent = false
"#;

/// Store holding one entry of every kind.
pub fn sample_config() -> Config {
    let mut config = Config::new();
    config.set_color("exon", "fill", Color::new(0.73, 0.73, 0.87, 1.0));
    config.set_cstr("gene", "caption", "Gene");
    config.set_num("format", "margins", 30.0);
    config.set_bool("exon", "collapse_to_parent", false);
    config
}
