//! Read-only accessor protocol the renderer looks display attributes up through.
//!
//! A miss is `None`; the renderer applies its own built-in default.

use crate::domain::color::Color;
use crate::domain::config::Config;

pub trait ConfigPort {
    fn get_color(&self, section: &str, key: &str) -> Option<Color>;
    fn get_cstr(&self, section: &str, key: &str) -> Option<&str>;
    fn get_num(&self, section: &str, key: &str) -> Option<f64>;
    fn get_bool(&self, section: &str, key: &str) -> Option<bool>;
}

impl ConfigPort for Config {
    fn get_color(&self, section: &str, key: &str) -> Option<Color> {
        Config::get_color(self, section, key)
    }

    fn get_cstr(&self, section: &str, key: &str) -> Option<&str> {
        Config::get_cstr(self, section, key)
    }

    fn get_num(&self, section: &str, key: &str) -> Option<f64> {
        Config::get_num(self, section, key)
    }

    fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        Config::get_bool(self, section, key)
    }
}
